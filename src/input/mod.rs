//! Front-panel input - button matrix scanner and rotary encoder.
//!
//! Both sources are edge-triggered: the firmware calls into these
//! modules from the handler of the edge that fired, with the controller
//! locked for the whole call.
//!
//! ## Components
//!
//! - **Buttons**: 4 keys sensed through one common line, selected by
//!   one-hot patterns on the output register
//! - **Encoder**: two-line quadrature decoder with settle-wait

pub mod buttons;
pub mod encoder;


use embedded_hal::digital::InputPin;

use crate::config::SCAN_PATTERNS;
use crate::error::Error;

/// Physical buttons, in scan order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonId {
    /// S_PWR - no action assigned yet.
    Power,
    /// S_MNU1 - cycle the displayed regulator.
    Menu1,
    /// S_SEL - reserved.
    Select,
    /// S_MNU2 - toggle the displayed regulator on/off.
    Menu2,
}

impl ButtonId {
    pub const ALL: [ButtonId; 4] = [
        ButtonId::Power,
        ButtonId::Menu1,
        ButtonId::Select,
        ButtonId::Menu2,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Silkscreen label.
    pub const fn label(self) -> &'static str {
        match self {
            ButtonId::Power => "S_PWR",
            ButtonId::Menu1 => "S_MNU1",
            ButtonId::Select => "S_SEL",
            ButtonId::Menu2 => "S_MNU2",
        }
    }

    /// One-hot register pattern that connects this key to the sense line.
    pub const fn scan_pattern(self) -> u8 {
        SCAN_PATTERNS[self.index()]
    }
}

impl TryFrom<u8> for ButtonId {
    type Error = Error;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(raw as usize)
            .copied()
            .ok_or(Error::InvalidButton(raw))
    }
}

/// Result of one decoder call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RotationEvent {
    Clockwise,
    CounterClockwise,
    /// The edge did not match either entry condition, or the pulse never
    /// settled.
    None,
}

/// Read a line as a plain level. A failed read counts as deasserted.
pub(crate) fn asserted<I: InputPin>(line: &mut I) -> bool {
    line.is_high().unwrap_or(false)
}
