//! Control core of the leafsupply bench power supply.
//!
//! Three regulators (an adjustable LM317 plus fixed 7805 and LD33V) are
//! switched through one 74HC595 output register, which doubles as the
//! scan driver for a four-key button matrix. A rotary encoder trims the
//! LM317's PWM duty cycle, and a 16×2 text display shows the selected
//! channel.
//!
//! Everything here is generic over `embedded-hal` traits and the small
//! [`ShiftOut`] / [`TextDisplay`] seams, so it runs unchanged on the host.
//!
//! Usage: `cargo test` for the host suite, `cargo build --release
//! --features embedded --target thumbv7em-none-eabihf` for the firmware.
//!
//! Note: The embedded binary lives in main.rs with #![no_std] and
//! #![no_main]; it only wires hardware into [`Controller`].

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod config;
pub mod controller;
pub mod error;
pub mod input;
pub mod register;
pub mod regulator;
pub mod shift_register;
pub mod ui;

#[cfg(test)]
mod testing;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports
// ═══════════════════════════════════════════════════════════════════════════

pub use controller::Controller;
pub use error::Error;
pub use input::buttons::ButtonScanner;
pub use input::encoder::QuadratureDecoder;
pub use input::{ButtonId, RotationEvent};
pub use register::{OutputRegister, ScanWindow};
pub use regulator::{ChannelId, DutyCycle, RegulatorBank, RegulatorChannel};
pub use shift_register::{Hc595, ShiftOut};
pub use ui::presenter::{Presenter, ScreenState};
pub use ui::{Screen, TextDisplay};
