//! Home screen composition.
//!
//! ```text
//! +----------------+
//! |LM317           |
//! |         42%  ON|
//! +----------------+
//! ```
//!
//! Row 0 holds the regulator name. Row 1 holds the output setting
//! right-aligned before the state field, and `" ON"`/`"OFF"` in columns
//! 13..=15. The adjustable channel shows its duty in percent; fixed
//! channels show their nominal voltage with one decimal.

use core::fmt::Write;

use embedded_hal::pwm::SetDutyCycle;
use heapless::String;

use super::TextDisplay;
use crate::config::{DISPLAY_COLS, DISPLAY_ROWS, STATE_COL};
use crate::input::ButtonId;
use crate::regulator::{RegulatorBank, RegulatorChannel};

/// One display row.
pub type Line = String<DISPLAY_COLS>;

/// Rendered content of both rows, always padded to full width.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScreenState {
    lines: [Line; DISPLAY_ROWS],
}

impl ScreenState {
    /// Compose the home screen for the bank's selected channel.
    pub fn home<P: SetDutyCycle>(bank: &RegulatorBank<P>) -> Self {
        let channel = bank.selected_channel();
        let mut screen = Self::default();

        let _ = write!(screen.lines[0], "{:<width$}", channel.id().name(), width = DISPLAY_COLS);

        let state = if channel.enabled() { "ON" } else { "OFF" };
        let _ = write!(
            screen.lines[1],
            "{:>vw$} {:>sw$}",
            setting(channel).as_str(),
            state,
            vw = STATE_COL - 1,
            sw = DISPLAY_COLS - STATE_COL,
        );
        screen
    }

    pub fn line(&self, row: usize) -> &str {
        self.lines[row].as_str()
    }

    pub fn lines(&self) -> &[Line; DISPLAY_ROWS] {
        &self.lines
    }
}

/// `"42%"` for the adjustable channel, `"5.0V"` for fixed ones.
fn setting(channel: &RegulatorChannel) -> String<8> {
    let mut out = String::new();
    if channel.id().is_adjustable() {
        let _ = write!(out, "{}%", channel.duty().percent());
    } else {
        let tenths = (channel.nominal_millivolts() + 50) / 100;
        let _ = write!(out, "{}.{}V", tenths / 10, tenths % 10);
    }
    out
}

/// Owns the last rendered screen and pushes it to the display.
#[derive(Default)]
pub struct Presenter {
    screen: ScreenState,
}

impl Presenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the home screen from scratch and redraw both rows.
    pub fn render<P, D>(&mut self, bank: &RegulatorBank<P>, display: &mut D)
    where
        P: SetDutyCycle,
        D: TextDisplay,
    {
        self.screen = ScreenState::home(bank);
        display.clear();
        for (row, line) in self.screen.lines.iter().enumerate() {
            display.write_text(line.as_str(), row as u8, 0);
        }
        display.flush();
    }

    /// Show "<label> Pressed" on row 1 for a button with no action yet.
    /// The next [`render`](Self::render) replaces it.
    pub fn acknowledge<D: TextDisplay>(&mut self, button: ButtonId, display: &mut D) {
        let mut line = Line::new();
        let _ = write!(line, "{:<width$}", Ack(button), width = DISPLAY_COLS);
        display.write_text(line.as_str(), 1, 0);
        display.flush();
        self.screen.lines[1] = line;
    }

    /// What the display currently shows.
    pub fn screen(&self) -> &ScreenState {
        &self.screen
    }
}

struct Ack(ButtonId);

impl core::fmt::Display for Ack {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut msg: String<DISPLAY_COLS> = String::new();
        let _ = write!(msg, "{} Pressed", self.0.label());
        f.pad(msg.as_str())
    }
}
