//! Application-wide constants and compile-time configuration.
//!
//! All hardware wiring, timing parameters, and display geometry live
//! here so they can be tuned in one place.

// Regulator channels

/// Number of regulator channels on the board.
pub const CHANNEL_COUNT: usize = 3;

/// Display names, indexed by channel.
pub const CHANNEL_NAMES: [&str; CHANNEL_COUNT] = ["LM317", "7805", "LD33V"];

/// Nominal output of each regulator in millivolts.
/// The LM317 figure is informational only; its output follows the PWM duty.
pub const CHANNEL_NOMINAL_MV: [u16; CHANNEL_COUNT] = [1200, 5000, 3370];

/// Enable line of each channel on the output register.
///
/// Fixed by the board wiring: LM317 → Q2, 7805 → Q1, LD33V → Q0.
pub const CHANNEL_ENABLE_MASKS: [u8; CHANNEL_COUNT] = [0b0000_0100, 0b0000_0010, 0b0000_0001];

// Output register (74HC595)

/// Register contents at power-up: indicator lines Q3..Q7 on, every
/// regulator off.
pub const DEFAULT_REGISTER: u8 = 0b1111_1000;

/// Bits kept from the stored register while a scan pattern is presented.
pub const SCAN_PRESERVE_MASK: u8 = 0b0000_1111;

/// One-hot scan patterns, indexed by button.
pub const SCAN_PATTERNS: [u8; 4] = [0b1000_0000, 0b0100_0000, 0b0010_0000, 0b0001_0000];

// PWM

/// PWM period in timer counts. One count per percent of duty.
pub const PWM_PERIOD: u16 = 100;

/// Highest duty cycle accepted by the adjustable channel (percent).
pub const DUTY_MAX: u8 = 100;

// Input timing

/// Upper bound on polls spent waiting for an encoder pulse to settle.
///
/// At 64 MHz one poll is well under a microsecond, so this allows tens of
/// milliseconds, far longer than any detent pulse.
pub const SETTLE_POLL_LIMIT: u32 = 200_000;

/// Button debounce time (ms).
pub const BUTTON_DEBOUNCE_MS: u64 = 30;

// Display

/// Characters per display row.
pub const DISPLAY_COLS: usize = 16;

/// Number of display rows.
pub const DISPLAY_ROWS: usize = 2;

/// Column where the ON/OFF field starts on the second row.
pub const STATE_COL: usize = 13;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; actual `embassy_nrf::peripherals::*` types are
// selected in `main.rs`.  Adjust for your custom PCB.
//
//   74HC595 SER      → P0.13
//   74HC595 SRCLK    → P0.14
//   74HC595 RCLK     → P0.15
//   Button sense     → P0.03  (pull-down, high while a scanned key closes)
//   Encoder A        → P0.04  (pull-down, common to VDD)
//   Encoder B        → P0.28  (pull-down, common to VDD)
//   LM317 PWM        → P0.17
//   I²C SDA          → P0.26
//   I²C SCL          → P0.27
