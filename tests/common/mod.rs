//! Simulated front panel for integration tests.
//!
//! The shift register, button matrix and encoder are modelled closely
//! enough that the real scanner and decoder run against them: a held key
//! closes the sense line only while its scan line is latched high, and the
//! encoder replays a waveform that advances one step per pin read.

#![allow(dead_code)]

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType as DigitalErrorType, InputPin};
use embedded_hal::pwm::{ErrorType as PwmErrorType, SetDutyCycle};
use leafsupply::config::{DISPLAY_COLS, DISPLAY_ROWS, PWM_PERIOD};
use leafsupply::{ButtonId, ButtonScanner, Controller, QuadratureDecoder, ShiftOut, TextDisplay};

// ═══════════════════════════════════════════════════════════════════════════
// Register + button matrix
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Default)]
struct PanelState {
    latched: u8,
    transmits: Vec<u8>,
    held: Vec<ButtonId>,
}

#[derive(Clone, Default)]
pub struct Panel {
    state: Rc<RefCell<PanelState>>,
}

impl Panel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shift(&self) -> PanelShift {
        PanelShift(self.state.clone())
    }

    pub fn sense(&self) -> PanelSense {
        PanelSense(self.state.clone())
    }

    pub fn hold(&self, button: ButtonId) {
        self.state.borrow_mut().held.push(button);
    }

    pub fn release_all(&self) {
        self.state.borrow_mut().held.clear();
    }

    /// Byte currently on the 74HC595 outputs.
    pub fn latched(&self) -> u8 {
        self.state.borrow().latched
    }

    pub fn transmits(&self) -> Vec<u8> {
        self.state.borrow().transmits.clone()
    }
}

pub struct PanelShift(Rc<RefCell<PanelState>>);

impl ShiftOut for PanelShift {
    fn transmit_and_latch(&mut self, byte: u8) {
        let mut state = self.0.borrow_mut();
        state.latched = byte;
        state.transmits.push(byte);
    }
}

pub struct PanelSense(Rc<RefCell<PanelState>>);

impl DigitalErrorType for PanelSense {
    type Error = Infallible;
}

impl InputPin for PanelSense {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        let state = self.0.borrow();
        Ok(state
            .held
            .iter()
            .any(|button| state.latched & button.scan_pattern() != 0))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Encoder waveform
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Default)]
struct Wave {
    /// (A, B) levels and how many reads each one lasts.
    segments: Vec<((bool, bool), u32)>,
    reads: u32,
}

impl Wave {
    fn sample(&mut self) -> (bool, bool) {
        let now = self.reads;
        self.reads += 1;
        let mut elapsed = 0;
        for &(levels, duration) in &self.segments {
            elapsed += duration;
            if now < elapsed {
                return levels;
            }
        }
        self.segments.last().map(|&(levels, _)| levels).unwrap_or((false, false))
    }
}

#[derive(Clone, Default)]
pub struct Encoder {
    wave: Rc<RefCell<Wave>>,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the waveform and restart its clock.
    pub fn play(&self, segments: &[((bool, bool), u32)]) {
        let mut wave = self.wave.borrow_mut();
        wave.segments = segments.to_vec();
        wave.reads = 0;
    }

    /// One clockwise detent: A leads B.
    pub fn clockwise(&self) {
        self.play(&[((true, false), 4), ((true, true), 4), ((false, true), 4), ((false, false), 1)]);
    }

    /// One counter-clockwise detent as seen from the line-A edge.
    pub fn counter_clockwise(&self) {
        self.play(&[((false, true), 4), ((true, true), 4), ((true, false), 4), ((false, false), 1)]);
    }

    pub fn line_a(&self) -> EncoderLine {
        EncoderLine { wave: self.wave.clone(), b: false }
    }

    pub fn line_b(&self) -> EncoderLine {
        EncoderLine { wave: self.wave.clone(), b: true }
    }
}

pub struct EncoderLine {
    wave: Rc<RefCell<Wave>>,
    b: bool,
}

impl DigitalErrorType for EncoderLine {
    type Error = Infallible;
}

impl InputPin for EncoderLine {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        let (a, b) = self.wave.borrow_mut().sample();
        Ok(if self.b { b } else { a })
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// PWM + display
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct PwmProbe {
    compare: u16,
}

impl PwmProbe {
    pub fn duty(&self) -> u16 {
        self.compare
    }
}

impl PwmErrorType for PwmProbe {
    type Error = Infallible;
}

impl SetDutyCycle for PwmProbe {
    fn max_duty_cycle(&self) -> u16 {
        PWM_PERIOD
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.compare = duty;
        Ok(())
    }
}

pub struct TextGrid {
    cells: [[u8; DISPLAY_COLS]; DISPLAY_ROWS],
    flushes: usize,
}

impl Default for TextGrid {
    fn default() -> Self {
        Self { cells: [[b' '; DISPLAY_COLS]; DISPLAY_ROWS], flushes: 0 }
    }
}

impl TextGrid {
    pub fn row(&self, row: usize) -> String {
        String::from_utf8(self.cells[row].to_vec()).unwrap()
    }

    /// Screen updates pushed to the panel.
    pub fn flushes(&self) -> usize {
        self.flushes
    }
}

impl TextDisplay for TextGrid {
    fn clear(&mut self) {
        self.cells = [[b' '; DISPLAY_COLS]; DISPLAY_ROWS];
    }

    fn write_text(&mut self, text: &str, row: u8, col: u8) {
        let row = &mut self.cells[row as usize];
        for (cell, byte) in row[col as usize..].iter_mut().zip(text.bytes()) {
            *cell = byte;
        }
    }

    fn flush(&mut self) {
        self.flushes += 1;
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Whole bench
// ═══════════════════════════════════════════════════════════════════════════

pub type BenchController = Controller<PanelShift, PwmProbe, TextGrid>;

pub struct Bench {
    pub panel: Panel,
    pub encoder: Encoder,
    pub controller: BenchController,
    pub scanner: ButtonScanner<PanelSense>,
    pub decoder: QuadratureDecoder<EncoderLine, EncoderLine>,
}

impl Bench {
    /// A started controller on a fresh panel.
    pub fn new() -> Self {
        let panel = Panel::new();
        let encoder = Encoder::new();
        let mut controller = Controller::new(panel.shift(), PwmProbe::default(), TextGrid::default());
        controller.start();
        Self {
            scanner: ButtonScanner::new(panel.sense()),
            decoder: QuadratureDecoder::new(encoder.line_a(), encoder.line_b()),
            panel,
            encoder,
            controller,
        }
    }

    /// Hold `button`, fire the sense-line edge, release.
    pub fn press(&mut self, button: ButtonId) -> Option<ButtonId> {
        self.panel.hold(button);
        let seen = self.controller.on_button_edge(&mut self.scanner);
        self.panel.release_all();
        seen
    }

    pub fn rotate_clockwise(&mut self) {
        self.encoder.clockwise();
        self.controller.on_encoder_edge(&mut self.decoder);
    }

    pub fn rotate_counter_clockwise(&mut self) {
        self.encoder.counter_clockwise();
        self.controller.on_encoder_edge(&mut self.decoder);
    }

    pub fn pwm_duty(&self) -> u16 {
        self.controller.bank().pwm().duty()
    }
}
