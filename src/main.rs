//! leafsupply firmware for the nRF52840.
//!
//! Hardware is wired into one [`Controller`], which lives in a
//! critical-section mutex. Two tasks react to GPIO edges:
//!
//! - **button_task**: rising edge on the matrix sense line → scan + dispatch
//! - **encoder_task**: rising edge on encoder line A → decode + dispatch
//!
//! Each handler body runs with interrupts masked, so scans, settle-waits
//! and PWM writes never interleave. The executor idles in WFE between
//! edges.

#![no_std]
#![no_main]

use core::cell::RefCell;
use core::convert::Infallible;

use defmt::{info, unwrap};
use embassy_executor::Spawner;
use embassy_nrf::gpio::{Input, Level, Output, OutputDrive, Pull};
use embassy_nrf::peripherals::{PWM0, TWISPI0};
use embassy_nrf::pwm::{Prescaler, SimplePwm};
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::{Duration, Timer};
use embedded_hal::pwm::{ErrorType, SetDutyCycle};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use leafsupply::config::{BUTTON_DEBOUNCE_MS, PWM_PERIOD};
use leafsupply::ui::display::OledText;
use leafsupply::regulator::high_time_compare;
use leafsupply::{ButtonScanner, Controller, Hc595, QuadratureDecoder};

bind_interrupts!(struct Irqs {
    TWISPI0 => twim::InterruptHandler<peripherals::TWISPI0>;
});

type Shift = Hc595<Output<'static>, Output<'static>, Output<'static>>;
type Display = OledText<Twim<'static, TWISPI0>>;
type Board = Controller<Shift, Lm317Pwm, Display>;
type SharedBoard = Mutex<CriticalSectionRawMutex, RefCell<Board>>;

static BOARD: StaticCell<SharedBoard> = StaticCell::new();

/// PWM0 channel 0 driving the LM317 adjust transistor.
///
/// In its default polarity the nRF PWM raises the pin at the compare match,
/// so the compare value is the low time; [`high_time_compare`] converts.
struct Lm317Pwm(SimplePwm<'static, PWM0>);

impl ErrorType for Lm317Pwm {
    type Error = Infallible;
}

impl SetDutyCycle for Lm317Pwm {
    fn max_duty_cycle(&self) -> u16 {
        self.0.max_duty()
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.0.set_duty(0, high_time_compare(duty, self.0.max_duty()));
        Ok(())
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("leafsupply starting");

    // 74HC595: SER, SRCLK, RCLK
    let shift = Hc595::new(
        Output::new(p.P0_13, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_14, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_15, Level::Low, OutputDrive::Standard),
    );

    // 16 MHz / 16 = 1 MHz count, 100 counts per period → 10 kHz.
    let mut pwm = SimplePwm::new_1ch(p.PWM0, p.P0_17);
    pwm.set_prescaler(Prescaler::Div16);
    pwm.set_max_duty(PWM_PERIOD);
    let mut lm317 = Lm317Pwm(pwm);
    let _ = lm317.set_duty_cycle_fully_off();

    let i2c = Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, twim::Config::default());
    let display = unwrap!(OledText::init(i2c));

    let mut controller = Controller::new(shift, lm317, display);
    controller.start();
    let board: &'static SharedBoard = BOARD.init(Mutex::new(RefCell::new(controller)));

    let scanner = ButtonScanner::new(Input::new(p.P0_03, Pull::Down));
    let decoder = QuadratureDecoder::new(
        Input::new(p.P0_04, Pull::Down),
        Input::new(p.P0_28, Pull::Down),
    );

    unwrap!(spawner.spawn(button_task(board, scanner)));
    unwrap!(spawner.spawn(encoder_task(board, decoder)));
    info!("leafsupply running");
}

/// Waits for a key to close the sense line, scans the matrix with the
/// board locked, then waits for release before re-arming.
#[embassy_executor::task]
async fn button_task(board: &'static SharedBoard, mut scanner: ButtonScanner<Input<'static>>) -> ! {
    loop {
        scanner.sense_line().wait_for_rising_edge().await;

        let pressed = board.lock(|cell| cell.borrow_mut().on_button_edge(&mut scanner));
        if let Some(button) = pressed {
            info!("Button: {}", button);
        }

        // Wait for release to avoid repeat triggers.
        scanner.sense_line().wait_for_low().await;
        Timer::after(Duration::from_millis(BUTTON_DEBOUNCE_MS)).await;
    }
}

/// Decodes one detent per rising edge on line A.
#[embassy_executor::task]
async fn encoder_task(
    board: &'static SharedBoard,
    mut decoder: QuadratureDecoder<Input<'static>, Input<'static>>,
) -> ! {
    loop {
        decoder.line_a().wait_for_rising_edge().await;
        board.lock(|cell| cell.borrow_mut().on_encoder_edge(&mut decoder));
    }
}
