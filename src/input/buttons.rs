//! Button matrix scanner.
//!
//! The four keys share one sense line. Each key's contact closes between
//! one of the register's upper outputs (Q7..Q4) and that line, so a key is
//! detected by driving its one-hot pattern and reading the sense level.
//!
//! Scanning borrows the output register, so it cannot interleave with an
//! enable-bit change. The register is restored before `scan` returns.

use embedded_hal::digital::InputPin;

use super::{asserted, ButtonId};
use crate::register::OutputRegister;
use crate::shift_register::ShiftOut;

pub struct ButtonScanner<I> {
    sense: I,
}

impl<I: InputPin> ButtonScanner<I> {
    pub fn new(sense: I) -> Self {
        Self { sense }
    }

    /// The sense line, for edge waits in the firmware.
    pub fn sense_line(&mut self) -> &mut I {
        &mut self.sense
    }

    /// Whether any key is closed under the currently latched pattern.
    pub fn sense_asserted(&mut self) -> bool {
        asserted(&mut self.sense)
    }

    /// Probe every key once and report the pressed one.
    ///
    /// All four patterns are always driven. If several keys are held, the
    /// highest-indexed one wins.
    pub fn scan<S: ShiftOut>(&mut self, register: &mut OutputRegister<S>) -> Option<ButtonId> {
        let mut pressed = None;
        {
            let mut window = register.scan_window();
            for button in ButtonId::ALL {
                window.present(button.scan_pattern());
                if self.sense_asserted() {
                    pressed = Some(button);
                }
            }
        }

        debug!("Buttons: scan -> {}", pressed);
        pressed
    }

    pub fn free(self) -> I {
        self.sense
    }
}
