//! Configuration type definitions

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::color::COLOR_COUNT;
use crate::time::{Time, TimeError, TimeField};

/// Number of GPIO pins on the RP2040
pub const GPIO_COUNT: u8 = 30;

/// Highest display brightness level
pub const MAX_BRIGHTNESS: u8 = 7;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Pin number does not exist on the chip
    InvalidPin(u8),
    /// Pin assigned to more than one signal
    DuplicatePin(u8),
    /// Pin is wired to a fixed board function
    ReservedPin(u8),
    /// Brightness above [`MAX_BRIGHTNESS`]
    InvalidBrightness(u8),
    /// Boot time out of range
    InvalidTime(TimeField),
}

/// Latch/clock/data pins of one shift-register channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChannelPins {
    /// Storage register clock (ST_CP)
    pub latch: u8,
    /// Shift register clock (SH_CP)
    pub clock: u8,
    /// Serial data (DS)
    pub data: u8,
}

impl ChannelPins {
    /// Create a channel pin triplet
    pub const fn new(latch: u8, clock: u8, data: u8) -> Self {
        Self { latch, clock, data }
    }
}

/// TM1637 wiring and brightness
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Clock line
    pub clk: u8,
    /// Data line
    pub dio: u8,
    /// Brightness 0-7
    pub brightness: u8,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            clk: 26,
            dio: 27,
            brightness: MAX_BRIGHTNESS,
        }
    }
}

/// Boot-time RTC setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RtcConfig {
    /// Write `initial_time` to the RTC on every boot
    pub set_on_boot: bool,
    /// Time written when `set_on_boot` is true
    pub initial_time: Time,
}

impl Default for RtcConfig {
    fn default() -> Self {
        Self {
            set_on_boot: true,
            initial_time: Time {
                year: 2024,
                month: 8,
                date: 4,
                weekday: 1,
                hour: 17,
                minute: 36,
                second: 0,
            },
        }
    }
}

/// Complete clock configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClockConfig {
    pub rtc: RtcConfig,
    pub display: DisplayConfig,
    /// Hour channels in red, green, blue order
    pub hours: [ChannelPins; COLOR_COUNT],
    /// Minute channels in red, green, blue order
    pub minutes: [ChannelPins; COLOR_COUNT],
    /// Seconds channel (red)
    pub seconds: ChannelPins,
}

impl Default for ClockConfig {
    /// Reference wiring: banks on GPIO2-22, display on GPIO26/27
    fn default() -> Self {
        Self {
            rtc: RtcConfig::default(),
            display: DisplayConfig::default(),
            hours: [
                ChannelPins::new(2, 3, 4),
                ChannelPins::new(5, 6, 7),
                ChannelPins::new(8, 9, 10),
            ],
            minutes: [
                ChannelPins::new(11, 12, 13),
                ChannelPins::new(14, 15, 16),
                ChannelPins::new(17, 18, 19),
            ],
            seconds: ChannelPins::new(20, 21, 22),
        }
    }
}

impl ClockConfig {
    /// Every configured pin: display clk/dio, then each channel's
    /// latch/clock/data for hours, minutes and seconds
    pub fn pins(&self) -> impl Iterator<Item = u8> + '_ {
        let display = [self.display.clk, self.display.dio];
        let channels = self
            .hours
            .iter()
            .chain(self.minutes.iter())
            .chain(core::iter::once(&self.seconds))
            .flat_map(|ch| [ch.latch, ch.clock, ch.data]);
        display.into_iter().chain(channels)
    }

    /// Check pins, brightness and boot time
    ///
    /// `reserved` lists pins the board uses for fixed functions.
    pub fn validate(&self, reserved: &[u8]) -> Result<(), ConfigError> {
        let mut seen: u32 = 0;
        for pin in self.pins() {
            if pin >= GPIO_COUNT {
                return Err(ConfigError::InvalidPin(pin));
            }
            if reserved.contains(&pin) {
                return Err(ConfigError::ReservedPin(pin));
            }
            let bit = 1u32 << pin;
            if seen & bit != 0 {
                return Err(ConfigError::DuplicatePin(pin));
            }
            seen |= bit;
        }

        if self.display.brightness > MAX_BRIGHTNESS {
            return Err(ConfigError::InvalidBrightness(self.display.brightness));
        }

        self.rtc
            .initial_time
            .validate()
            .map_err(|TimeError::OutOfRange(field)| ConfigError::InvalidTime(field))
    }
}
