//! User interface - 16×2 character display and screen composition.
//!
//! The control core only ever places text; the display hardware behind
//! [`TextDisplay`] is chosen by the firmware.
//!
//! ## Components
//!
//! - **Presenter**: composes the home screen from the regulator bank
//! - **Display** (embedded only): SSD1306 128×64 OLED via I²C, laid out
//!   as a 16×2 character grid

pub mod presenter;

#[cfg(feature = "embedded")]
pub mod display;

/// Text-placement interface of the character display.
///
/// `row` is 0 or 1, `col` is 0..=15. Text is not wrapped; callers pad or
/// truncate to the row width.
///
/// Buffered displays may hold `clear` and `write_text` back until
/// [`flush`](TextDisplay::flush); the presenter flushes once per update.
pub trait TextDisplay {
    fn clear(&mut self);
    fn write_text(&mut self, text: &str, row: u8, col: u8);

    /// Push pending changes to the panel.
    fn flush(&mut self) {}
}

impl<T: TextDisplay + ?Sized> TextDisplay for &mut T {
    fn clear(&mut self) {
        (**self).clear()
    }

    fn write_text(&mut self, text: &str, row: u8, col: u8) {
        (**self).write_text(text, row, col)
    }

    fn flush(&mut self) {
        (**self).flush()
    }
}

/// Screens (views) the UI can be in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Screen {
    /// Selected regulator: name, output setting, power state.
    Home,
}
