//! Control dispatcher - the single owner of all mutable board state.
//!
//! The firmware keeps one [`Controller`] behind a critical-section mutex
//! and calls into it from the two edge handlers:
//!
//! | Event                 | Precondition      | Action                         |
//! |-----------------------|-------------------|--------------------------------|
//! | S_PWR (0)             | any               | acknowledge on row 1           |
//! | S_MNU1 (1)            | any               | select next channel, render    |
//! | S_SEL (2)             | any               | acknowledge on row 1           |
//! | S_MNU2 (3)            | any               | toggle selected channel, render|
//! | Clockwise             | LM317 selected    | duty +1, render                |
//! | CounterClockwise      | LM317 selected    | duty -1, render                |
//!
//! Rotation on the LM317 redraws even at a clamp bound, which also clears
//! a pending acknowledgement. Rotation on a fixed channel changes nothing.

use embedded_hal::digital::InputPin;
use embedded_hal::pwm::SetDutyCycle;

use crate::input::buttons::ButtonScanner;
use crate::input::encoder::QuadratureDecoder;
use crate::input::{ButtonId, RotationEvent};
use crate::register::OutputRegister;
use crate::regulator::RegulatorBank;
use crate::shift_register::ShiftOut;
use crate::ui::presenter::{Presenter, ScreenState};
use crate::ui::{Screen, TextDisplay};

pub struct Controller<S, P, D> {
    register: OutputRegister<S>,
    bank: RegulatorBank<P>,
    presenter: Presenter,
    display: D,
    screen: Screen,
}

impl<S, P, D> Controller<S, P, D>
where
    S: ShiftOut,
    P: SetDutyCycle,
    D: TextDisplay,
{
    /// Take ownership of the collaborators. The register is seeded with the
    /// power-up byte and the PWM compare is zeroed; nothing is shown until
    /// [`start`](Self::start).
    pub fn new(shift: S, pwm: P, display: D) -> Self {
        Self {
            register: OutputRegister::new(shift),
            bank: RegulatorBank::new(pwm),
            presenter: Presenter::new(),
            display,
            screen: Screen::Home,
        }
    }

    /// Latch the power-up register byte and draw the home screen.
    pub fn start(&mut self) {
        self.register.publish();
        self.screen = Screen::Home;
        self.refresh();
        info!("Controller: started, register {=u8:#b}", self.register.current_byte());
    }

    /// Button-line edge: scan the matrix and act on the result.
    pub fn on_button_edge<I: InputPin>(&mut self, scanner: &mut ButtonScanner<I>) -> Option<ButtonId> {
        let pressed = scanner.scan(&mut self.register);
        if let Some(button) = pressed {
            self.handle_button(button);
        }
        pressed
    }

    /// Encoder line-A edge: decode the pulse and act on it.
    pub fn on_encoder_edge<A, B>(&mut self, decoder: &mut QuadratureDecoder<A, B>) -> RotationEvent
    where
        A: InputPin,
        B: InputPin,
    {
        let event = decoder.decode();
        self.handle_rotation(event);
        event
    }

    pub fn handle_button(&mut self, button: ButtonId) {
        debug!("Controller: button {}", button);
        match button {
            ButtonId::Power | ButtonId::Select => {
                self.presenter.acknowledge(button, &mut self.display);
            }
            ButtonId::Menu1 => {
                self.bank.select_next();
                self.refresh();
            }
            ButtonId::Menu2 => {
                let channel = self.bank.selected();
                let enabled = self.bank.toggle_power(channel);
                self.register.set_channel_enabled(channel, enabled);
                self.refresh();
            }
        }
    }

    pub fn handle_rotation(&mut self, event: RotationEvent) {
        let increment = match event {
            RotationEvent::Clockwise => true,
            RotationEvent::CounterClockwise => false,
            RotationEvent::None => return,
        };
        if !self.bank.selected().is_adjustable() {
            return;
        }
        self.bank.adjust(increment);
        self.refresh();
    }

    fn refresh(&mut self) {
        match self.screen {
            Screen::Home => self.presenter.render(&self.bank, &mut self.display),
        }
    }

    pub fn bank(&self) -> &RegulatorBank<P> {
        &self.bank
    }

    /// The stored output register byte.
    pub fn register_byte(&self) -> u8 {
        self.register.current_byte()
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Text currently on the display.
    pub fn screen_state(&self) -> &ScreenState {
        self.presenter.screen()
    }

    pub fn display(&self) -> &D {
        &self.display
    }
}
