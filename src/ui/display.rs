//! SSD1306 OLED wrapper, presented as a 16×2 character display.
//!
//! The 8×13 font gives exactly 16 columns across 128 pixels; the two rows
//! sit in the upper and lower halves of the panel. Drawing only touches
//! the frame buffer; nothing reaches the panel until `flush`.

use embedded_graphics::mono_font::ascii::FONT_8X13;
use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

use super::TextDisplay;
use crate::config::{DISPLAY_COLS, DISPLAY_ROWS};
use crate::error::Error;

/// Type alias for the concrete display driver.
///
/// Generic over the I²C implementation so callers pass in their HAL's
/// I²C peripheral.
pub type Oled<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

const CELL_WIDTH: u32 = 8;
const CELL_HEIGHT: u32 = 13;

/// Top pixel row of each text row.
const ROW_TOP: [i32; DISPLAY_ROWS] = [10, 38];

pub struct OledText<I2C> {
    display: Oled<I2C>,
}

impl<I2C> OledText<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    /// Initialise the SSD1306 and clear the screen.
    pub fn init(i2c: I2C) -> Result<Self, Error> {
        let interface = I2CDisplayInterface::new(i2c);
        let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        display.init().map_err(|_| Error::Display)?;
        display.clear_buffer();
        display.flush().map_err(|_| Error::Display)?;
        Ok(Self { display })
    }
}

fn text_style() -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(&FONT_8X13)
        .text_color(BinaryColor::On)
        .build()
}

impl<I2C> TextDisplay for OledText<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn clear(&mut self) {
        self.display.clear_buffer();
    }

    fn write_text(&mut self, text: &str, row: u8, col: u8) {
        let Some(&top) = ROW_TOP.get(row as usize) else {
            return;
        };
        let room = DISPLAY_COLS.saturating_sub(col as usize);
        let text = text.get(..room).unwrap_or(text);
        let origin = Point::new(col as i32 * CELL_WIDTH as i32, top);

        // Blank the cells first; glyphs only set pixels.
        let _ = Rectangle::new(origin, Size::new(text.len() as u32 * CELL_WIDTH, CELL_HEIGHT))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::Off))
            .draw(&mut self.display);
        let _ = Text::with_baseline(text, origin, text_style(), Baseline::Top).draw(&mut self.display);
    }

    /// Send the frame buffer over I²C, once per screen update.
    fn flush(&mut self) {
        if self.display.flush().is_err() {
            warn!("Display: flush failed");
        }
    }
}
