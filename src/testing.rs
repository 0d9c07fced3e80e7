//! Host-side stand-ins for the board collaborators, shared by unit tests.

use std::io::ErrorKind;

pub use embedded_hal_mock::eh1::pwm::{Mock as PwmMock, Transaction as PwmTransaction};
use embedded_hal_mock::eh1::MockError;

use crate::config::{DISPLAY_COLS, DISPLAY_ROWS, PWM_PERIOD};
use crate::shift_register::ShiftOut;
use crate::ui::TextDisplay;

/// Records every byte latched into the register.
#[derive(Default)]
pub struct RecordingShift {
    pub sent: Vec<u8>,
}

impl ShiftOut for RecordingShift {
    fn transmit_and_latch(&mut self, byte: u8) {
        self.sent.push(byte);
    }
}

/// Expected `set_duty_cycle_percent` call: the max-duty query, then the
/// compare write.
pub fn duty_write(percent: u8) -> [PwmTransaction; 2] {
    [
        PwmTransaction::max_duty_cycle(PWM_PERIOD),
        PwmTransaction::set_duty_cycle(u16::from(percent) * PWM_PERIOD / 100),
    ]
}

/// Same as [`duty_write`], but the compare write fails.
pub fn failed_duty_write(percent: u8) -> [PwmTransaction; 2] {
    let [max, set] = duty_write(percent);
    [max, set.with_error(MockError::Io(ErrorKind::NotConnected))]
}

/// PWM mock expecting one successful write per entry of `percents`.
pub fn pwm_expecting(percents: &[u8]) -> PwmMock {
    let expectations: Vec<_> = percents.iter().flat_map(|&p| duty_write(p)).collect();
    PwmMock::new(&expectations)
}

/// 16×2 character cell grid.
pub struct TextGrid {
    pub cells: [[u8; DISPLAY_COLS]; DISPLAY_ROWS],
    pub clears: usize,
    pub flushes: usize,
}

impl Default for TextGrid {
    fn default() -> Self {
        Self {
            cells: [[b' '; DISPLAY_COLS]; DISPLAY_ROWS],
            clears: 0,
            flushes: 0,
        }
    }
}

impl TextGrid {
    pub fn row(&self, row: usize) -> &str {
        core::str::from_utf8(&self.cells[row]).unwrap()
    }
}

impl TextDisplay for TextGrid {
    fn clear(&mut self) {
        self.cells = [[b' '; DISPLAY_COLS]; DISPLAY_ROWS];
        self.clears += 1;
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
