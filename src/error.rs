//! Unified error type for leafsupply.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.

/// Top-level error type used across the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Raw value does not name one of the three regulator channels.
    InvalidChannel(u8),

    /// Raw value does not name one of the four panel buttons.
    InvalidButton(u8),

    /// The display driver failed to initialise or flush.
    Display,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::InvalidChannel(raw) => write!(f, "no regulator channel {}", raw),
            Error::InvalidButton(raw) => write!(f, "no button {}", raw),
            Error::Display => f.write_str("display driver failure"),
        }
    }
}
