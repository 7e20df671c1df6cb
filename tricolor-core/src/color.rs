//! Color rotation for the hour and minute LED banks
//!
//! Each field has three shift-register channels (red, green, blue). One of
//! them carries the value; which one is a pure function of the time.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of color channels per rotating field
pub const COLOR_COUNT: usize = 3;

/// Minutes spent on one color before the minute bank rotates
pub const MINUTES_PER_COLOR: u8 = 20;

/// Active color channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ColorIndex {
    Red,
    Green,
    Blue,
}

impl ColorIndex {
    /// All colors in channel order
    pub const ALL: [ColorIndex; COLOR_COUNT] = [ColorIndex::Red, ColorIndex::Green, ColorIndex::Blue];

    /// Color for an index, wrapping modulo 3
    pub fn from_index(index: u8) -> Self {
        Self::ALL[(index as usize) % COLOR_COUNT]
    }

    /// Hour bank color: `hour mod 3`
    pub fn for_hour(hour: u8) -> Self {
        Self::from_index(hour)
    }

    /// Minute bank color: `(minute div 20) mod 3`
    pub fn for_minute(minute: u8) -> Self {
        Self::from_index(minute / MINUTES_PER_COLOR)
    }

    /// Channel index (0 = red, 1 = green, 2 = blue)
    pub fn index(self) -> usize {
        match self {
            ColorIndex::Red => 0,
            ColorIndex::Green => 1,
            ColorIndex::Blue => 2,
        }
    }
}
