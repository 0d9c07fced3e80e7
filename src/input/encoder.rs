//! Rotary encoder handler.
//!
//! Called from the line-A rising edge. The two lines are sampled on entry:
//!
//! ```text
//! A=1 B=0  → clockwise: wait for (1,0) to end, then for B to drop
//! A=0 B=1  → counter-clockwise: wait for (0,1) to end, then for A to drop
//! other    → no rotation, return immediately
//! ```
//!
//! Waiting out the rest of the pulse inside the handler means one detent
//! yields one event and bounce on the trailing edges is absorbed. Every
//! wait is capped at [`SETTLE_POLL_LIMIT`] polls; a stuck line reports
//! [`RotationEvent::None`] instead of hanging the board.

use embedded_hal::digital::InputPin;

use super::{asserted, RotationEvent};
use crate::config::SETTLE_POLL_LIMIT;

/// Which line the decoder waits on once the entry combination ends.
/// Between calls the decoder is idle and holds no phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum Phase {
    WaitLineBRelease,
    WaitLineARelease,
}

pub struct QuadratureDecoder<A, B> {
    a: A,
    b: B,
    poll_limit: u32,
}

impl<A: InputPin, B: InputPin> QuadratureDecoder<A, B> {
    pub fn new(a: A, b: B) -> Self {
        Self::with_poll_limit(a, b, SETTLE_POLL_LIMIT)
    }

    /// Use a custom settle bound instead of [`SETTLE_POLL_LIMIT`].
    pub fn with_poll_limit(a: A, b: B, poll_limit: u32) -> Self {
        Self { a, b, poll_limit }
    }

    /// Line A, for edge waits in the firmware.
    pub fn line_a(&mut self) -> &mut A {
        &mut self.a
    }

    /// Resolve the edge that just fired into a rotation event.
    pub fn decode(&mut self) -> RotationEvent {
        let entry = self.levels();
        let (event, phase) = match entry {
            (true, false) => (RotationEvent::Clockwise, Phase::WaitLineBRelease),
            (false, true) => (RotationEvent::CounterClockwise, Phase::WaitLineARelease),
            _ => return RotationEvent::None,
        };

        if !self.wait_while(|dec| dec.levels() == entry) {
            warn!("Encoder: stuck at entry levels");
            return RotationEvent::None;
        }

        let released = match phase {
            Phase::WaitLineBRelease => self.wait_while(|dec| asserted(&mut dec.b)),
            Phase::WaitLineARelease => self.wait_while(|dec| asserted(&mut dec.a)),
        };
        if !released {
            warn!("Encoder: line never released in {}", phase);
            return RotationEvent::None;
        }

        debug!("Encoder: {}", event);
        event
    }

    /// Poll `busy` until it reports false. Returns false if the limit ran out.
    fn wait_while(&mut self, mut busy: impl FnMut(&mut Self) -> bool) -> bool {
        for _ in 0..self.poll_limit {
            if !busy(self) {
                return true;
            }
        }
        false
    }

    fn levels(&mut self) -> (bool, bool) {
        (asserted(&mut self.a), asserted(&mut self.b))
    }

    pub fn free(self) -> (A, B) {
        (self.a, self.b)
    }
}
