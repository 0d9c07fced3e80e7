//! Regulator bank - per-channel power state and the LM317 duty cycle.
//!
//! Three regulators share the board:
//!
//! | Channel | Part  | Output                         |
//! |---------|-------|--------------------------------|
//! | 0       | LM317 | adjustable, set by PWM duty    |
//! | 1       | 7805  | fixed 5.0 V                    |
//! | 2       | LD33V | fixed 3.37 V                   |
//!
//! The bank owns the PWM output of the adjustable channel, so the live
//! compare value can only change through [`RegulatorBank::toggle_power`]
//! and [`RegulatorBank::adjust`].

use embedded_hal::pwm::SetDutyCycle;

use crate::config::{
    CHANNEL_COUNT, CHANNEL_ENABLE_MASKS, CHANNEL_NAMES, CHANNEL_NOMINAL_MV, DUTY_MAX,
};
use crate::error::Error;

/// One of the three fixed regulator channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelId {
    /// Adjustable LM317.
    Lm317,
    /// Fixed 7805.
    Vr7805,
    /// Fixed LD33V.
    Ld33v,
}

impl ChannelId {
    /// All channels in display order.
    pub const ALL: [ChannelId; CHANNEL_COUNT] = [ChannelId::Lm317, ChannelId::Vr7805, ChannelId::Ld33v];

    /// The channel whose output follows the PWM duty cycle.
    pub const ADJUSTABLE: ChannelId = ChannelId::Lm317;

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        CHANNEL_NAMES[self.index()]
    }

    pub const fn nominal_millivolts(self) -> u16 {
        CHANNEL_NOMINAL_MV[self.index()]
    }

    /// Bit of the output register that drives this channel's enable line.
    pub const fn enable_mask(self) -> u8 {
        CHANNEL_ENABLE_MASKS[self.index()]
    }

    pub const fn is_adjustable(self) -> bool {
        matches!(self, ChannelId::Lm317)
    }

    /// Next channel in display order, wrapping after the last.
    pub const fn next(self) -> Self {
        match self {
            ChannelId::Lm317 => ChannelId::Vr7805,
            ChannelId::Vr7805 => ChannelId::Ld33v,
            ChannelId::Ld33v => ChannelId::Lm317,
        }
    }
}

impl TryFrom<u8> for ChannelId {
    type Error = Error;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(raw as usize)
            .copied()
            .ok_or(Error::InvalidChannel(raw))
    }
}

/// PWM duty cycle in percent, always within `0..=100`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DutyCycle(u8);

impl DutyCycle {
    pub const ZERO: DutyCycle = DutyCycle(0);
    pub const MAX: DutyCycle = DutyCycle(DUTY_MAX);

    /// Clamp `percent` into range.
    pub const fn saturating(percent: u8) -> Self {
        if percent > DUTY_MAX {
            Self::MAX
        } else {
            Self(percent)
        }
    }

    pub const fn percent(self) -> u8 {
        self.0
    }

    /// One percent up, stopping at 100.
    pub const fn increment(self) -> Self {
        Self::saturating(self.0.saturating_add(1))
    }

    /// One percent down, stopping at 0.
    pub const fn decrement(self) -> Self {
        Self(self.0.saturating_sub(1))
    }
}

/// Compare value that keeps an up-counting PWM output high for `duty` of
/// `max` counts when the pin only rises at the compare match.
///
/// The nRF PWM peripheral in its default polarity behaves this way, so
/// compare 0 would mean "always high".
pub const fn high_time_compare(duty: u16, max: u16) -> u16 {
    max.saturating_sub(duty)
}

/// State of a single regulator channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegulatorChannel {
    id: ChannelId,
    enabled: bool,
    nominal_mv: u16,
    duty: DutyCycle,
}

impl RegulatorChannel {
    const fn new(id: ChannelId) -> Self {
        Self {
            id,
            enabled: false,
            nominal_mv: id.nominal_millivolts(),
            duty: DutyCycle::ZERO,
        }
    }

    pub fn id(&self) -> ChannelId {
        self.id
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn nominal_millivolts(&self) -> u16 {
        self.nominal_mv
    }

    /// Stored duty cycle. Only meaningful on the adjustable channel, and
    /// kept while the channel is off.
    pub fn duty(&self) -> DutyCycle {
        self.duty
    }
}

/// The three regulator channels plus the one selected for display.
pub struct RegulatorBank<P> {
    channels: [RegulatorChannel; CHANNEL_COUNT],
    selected: ChannelId,
    pwm: P,
}

impl<P: SetDutyCycle> RegulatorBank<P> {
    /// All channels off, LM317 selected, duty 0. The PWM output is driven
    /// to 0 immediately.
    pub fn new(pwm: P) -> Self {
        let mut bank = Self {
            channels: ChannelId::ALL.map(RegulatorChannel::new),
            selected: ChannelId::Lm317,
            pwm,
        };
        bank.program_duty(DutyCycle::ZERO);
        bank
    }

    pub fn selected(&self) -> ChannelId {
        self.selected
    }

    pub fn selected_index(&self) -> usize {
        self.selected.index()
    }

    pub fn selected_channel(&self) -> &RegulatorChannel {
        self.channel(self.selected)
    }

    pub fn channel(&self, id: ChannelId) -> &RegulatorChannel {
        &self.channels[id.index()]
    }

    pub fn channels(&self) -> &[RegulatorChannel] {
        &self.channels
    }

    /// The PWM output driving the adjustable channel.
    pub fn pwm(&self) -> &P {
        &self.pwm
    }

    /// Advance the display selection, wrapping LD33V → LM317.
    pub fn select_next(&mut self) -> ChannelId {
        self.selected = self.selected.next();
        info!("Regulator: selected {}", self.selected);
        self.selected
    }

    /// Flip `id` on or off and return the new state.
    ///
    /// For the adjustable channel the live PWM compare follows: 0 while off,
    /// the stored duty while on. The stored duty itself is never touched.
    pub fn toggle_power(&mut self, id: ChannelId) -> bool {
        let channel = &mut self.channels[id.index()];
        channel.enabled = !channel.enabled;
        let enabled = channel.enabled;
        let duty = channel.duty;
        info!("Regulator: {} {}", id, if enabled { "on" } else { "off" });

        if id.is_adjustable() {
            self.program_duty(if enabled { duty } else { DutyCycle::ZERO });
        }
        enabled
    }

    /// Step the selected channel's duty by one percent.
    ///
    /// Ignored unless the adjustable channel is selected. Saturates at
    /// 0 and 100. Returns whether the stored duty changed.
    pub fn adjust(&mut self, increment: bool) -> bool {
        if !self.selected.is_adjustable() {
            return false;
        }

        let channel = &mut self.channels[self.selected.index()];
        let before = channel.duty;
        channel.duty = if increment {
            before.increment()
        } else {
            before.decrement()
        };
        let (after, enabled) = (channel.duty, channel.enabled);

        if after == before {
            return false;
        }

        debug!("Regulator: duty {} -> {}", before.percent(), after.percent());
        if enabled {
            self.program_duty(after);
        }
        true
    }

    fn program_duty(&mut self, duty: DutyCycle) {
        if self.pwm.set_duty_cycle_percent(duty.percent()).is_err() {
            warn!("Regulator: PWM compare write failed ({}%)", duty.percent());
        }
    }
}
