//! 74HC595 serial-in / parallel-out register.
//!
//! The board drives every regulator enable line and indicator LED through
//! one 74HC595. The rest of the crate only needs the "clock one byte in,
//! then latch" primitive, which is the [`ShiftOut`] trait.

use embedded_hal::digital::{OutputPin, PinState};

/// Transmit one byte into the register and latch it onto the outputs.
///
/// Assumed synchronous and always successful.
pub trait ShiftOut {
    fn transmit_and_latch(&mut self, byte: u8);
}

impl<T: ShiftOut + ?Sized> ShiftOut for &mut T {
    fn transmit_and_latch(&mut self, byte: u8) {
        (**self).transmit_and_latch(byte)
    }
}

/// Bit-banged 74HC595 driver.
///
/// Bits are shifted MSB first, so bit 7 lands on Q7 after the latch.
pub struct Hc595<DATA, CLOCK, LATCH> {
    data: DATA,
    clock: CLOCK,
    latch: LATCH,
}

impl<DATA, CLOCK, LATCH> Hc595<DATA, CLOCK, LATCH>
where
    DATA: OutputPin,
    CLOCK: OutputPin,
    LATCH: OutputPin,
{
    /// Wrap the SER, SRCLK and RCLK pins. Clock and latch must idle low.
    pub fn new(data: DATA, clock: CLOCK, latch: LATCH) -> Self {
        Self { data, clock, latch }
    }

    /// Release the pins.
    pub fn free(self) -> (DATA, CLOCK, LATCH) {
        (self.data, self.clock, self.latch)
    }
}

impl<DATA, CLOCK, LATCH> ShiftOut for Hc595<DATA, CLOCK, LATCH>
where
    DATA: OutputPin,
    CLOCK: OutputPin,
    LATCH: OutputPin,
{
    fn transmit_and_latch(&mut self, byte: u8) {
        // GPIO errors are not recoverable here; nRF pins are infallible.
        for bit in (0..8).rev() {
            let _ = self.data.set_state(PinState::from(byte & (1 << bit) != 0));
            let _ = self.clock.set_high();
            let _ = self.clock.set_low();
        }
        let _ = self.latch.set_high();
        let _ = self.latch.set_low();
    }
}
