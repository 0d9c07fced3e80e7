//! Output register model.
//!
//! One 74HC595 byte serves two roles:
//!
//! ```text
//! Bit 7..4: indicator lines, borrowed as one-hot button scan lines
//! Bit 3   : indicator line
//! Bit 2   : LM317 enable
//! Bit 1   : 7805 enable
//! Bit 0   : LD33V enable
//! ```
//!
//! [`OutputRegister`] owns the authoritative byte. Button scanning goes
//! through a [`ScanWindow`], which borrows the register mutably, so no
//! enable bit can change while scan patterns are on the outputs, and the
//! stored byte is retransmitted when the window closes.

use crate::config::{DEFAULT_REGISTER, SCAN_PRESERVE_MASK};
use crate::regulator::ChannelId;
use crate::shift_register::ShiftOut;

pub struct OutputRegister<S> {
    byte: u8,
    shift: S,
}

impl<S: ShiftOut> OutputRegister<S> {
    /// Seed the register with [`DEFAULT_REGISTER`]. Nothing is transmitted
    /// until [`publish`](Self::publish) or a mutation.
    pub fn new(shift: S) -> Self {
        Self::with_byte(shift, DEFAULT_REGISTER)
    }

    pub fn with_byte(shift: S, byte: u8) -> Self {
        Self { byte, shift }
    }

    /// The stored byte. Never reflects a scan pattern.
    pub fn current_byte(&self) -> u8 {
        self.byte
    }

    /// Whether the stored byte has `id`'s enable bit set.
    pub fn channel_enabled(&self, id: ChannelId) -> bool {
        self.byte & id.enable_mask() != 0
    }

    /// Drive the stored byte onto the outputs.
    pub fn publish(&mut self) {
        trace!("Register: publish {=u8:#b}", self.byte);
        self.shift.transmit_and_latch(self.byte);
    }

    /// Set or clear one channel's enable bit and transmit the result.
    ///
    /// Exactly one transmit per call, even when the bit already had the
    /// requested value.
    pub fn set_channel_enabled(&mut self, id: ChannelId, enabled: bool) {
        if enabled {
            self.byte |= id.enable_mask();
        } else {
            self.byte &= !id.enable_mask();
        }
        self.publish();
    }

    /// Borrow the outputs for scan patterns.
    pub fn scan_window(&mut self) -> ScanWindow<'_, S> {
        ScanWindow { register: self }
    }

    /// Release the shift-register driver.
    pub fn free(self) -> S {
        self.shift
    }
}

/// Scan-pattern view of an [`OutputRegister`].
///
/// Dropping the window retransmits the stored byte bit-exact.
pub struct ScanWindow<'a, S: ShiftOut> {
    register: &'a mut OutputRegister<S>,
}

impl<S: ShiftOut> ScanWindow<'_, S> {
    /// Transmit `pattern` in the upper nibble with the stored low nibble
    /// kept, so the regulators see no glitch while scanning.
    pub fn present(&mut self, pattern: u8) {
        let byte = (pattern & !SCAN_PRESERVE_MASK) | (self.register.byte & SCAN_PRESERVE_MASK);
        self.register.shift.transmit_and_latch(byte);
    }
}

impl<S: ShiftOut> Drop for ScanWindow<'_, S> {
    fn drop(&mut self) {
        self.register.publish();
    }
}
