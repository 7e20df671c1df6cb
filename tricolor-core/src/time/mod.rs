//! Calendar time and the DS3231 timekeeping register block
//!
//! [`Time`] is the only representation of a clock reading in the crate.
//! The RTC register layout is fixed by the chip:
//!
//! | Offset | Field   | Range  |
//! |--------|---------|--------|
//! | 0x00   | seconds | 00-59  |
//! | 0x01   | minutes | 00-59  |
//! | 0x02   | hours   | 00-23  |
//! | 0x03   | day     | 1-7    |
//! | 0x04   | date    | 01-31  |
//! | 0x05   | month   | 01-12  |
//! | 0x06   | year    | 00-99  |
//!
//! Both directions go through [`Time::to_registers`] and
//! [`Time::from_registers`], so read and write can never disagree on order.

pub mod bcd;

pub use bcd::{bcd_to_binary, binary_to_bcd};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Size of the timekeeping register block
pub const REGISTER_COUNT: usize = 7;

/// First year representable by the two-digit year register
pub const BASE_YEAR: u16 = 2000;

/// Register offsets within the timekeeping block
pub mod reg {
    pub const SECONDS: usize = 0x00;
    pub const MINUTES: usize = 0x01;
    pub const HOURS: usize = 0x02;
    pub const DAY: usize = 0x03;
    pub const DATE: usize = 0x04;
    pub const MONTH: usize = 0x05;
    pub const YEAR: usize = 0x06;
}

/// Value bits of each register; the rest are control/status flags
/// (12-hour mode, century, oscillator stop)
mod mask {
    pub const SECONDS: u8 = 0x7F;
    pub const MINUTES: u8 = 0x7F;
    pub const HOURS: u8 = 0x3F;
    pub const DAY: u8 = 0x07;
    pub const DATE: u8 = 0x3F;
    pub const MONTH: u8 = 0x1F;
    pub const YEAR: u8 = 0xFF;
}

/// A time field, used to report which one is out of range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeField {
    Year,
    Month,
    Date,
    Weekday,
    Hour,
    Minute,
    Second,
}

/// Time validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeError {
    /// Field outside its natural range
    OutOfRange(TimeField),
}

/// Calendar time in binary (human-readable) form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Time {
    /// Full year, 2000-2099
    pub year: u16,
    /// Month, 1-12
    pub month: u8,
    /// Day of month, 1-31
    pub date: u8,
    /// Day of week, 1-7 (user-defined origin)
    pub weekday: u8,
    /// Hour, 0-23
    pub hour: u8,
    /// Minute, 0-59
    pub minute: u8,
    /// Second, 0-59
    pub second: u8,
}

impl Default for Time {
    fn default() -> Self {
        Self {
            year: BASE_YEAR,
            month: 1,
            date: 1,
            weekday: 1,
            hour: 0,
            minute: 0,
            second: 0,
        }
    }
}

impl Time {
    /// Check every field against its natural range
    ///
    /// Returns the first offending field, in register order.
    pub fn validate(&self) -> Result<(), TimeError> {
        let checks = [
            (self.second <= 59, TimeField::Second),
            (self.minute <= 59, TimeField::Minute),
            (self.hour <= 23, TimeField::Hour),
            ((1..=7).contains(&self.weekday), TimeField::Weekday),
            ((1..=31).contains(&self.date), TimeField::Date),
            ((1..=12).contains(&self.month), TimeField::Month),
            (
                (BASE_YEAR..BASE_YEAR + 100).contains(&self.year),
                TimeField::Year,
            ),
        ];

        match checks.iter().find(|(ok, _)| !ok) {
            Some(&(_, field)) => Err(TimeError::OutOfRange(field)),
            None => Ok(()),
        }
    }

    /// Encode into the physical register block
    ///
    /// Fields must be in range; see [`Time::validate`].
    pub fn to_registers(&self) -> [u8; REGISTER_COUNT] {
        let mut regs = [0u8; REGISTER_COUNT];
        regs[reg::SECONDS] = binary_to_bcd(self.second);
        regs[reg::MINUTES] = binary_to_bcd(self.minute);
        regs[reg::HOURS] = binary_to_bcd(self.hour);
        regs[reg::DAY] = binary_to_bcd(self.weekday);
        regs[reg::DATE] = binary_to_bcd(self.date);
        regs[reg::MONTH] = binary_to_bcd(self.month);
        regs[reg::YEAR] = binary_to_bcd((self.year.saturating_sub(BASE_YEAR) % 100) as u8);
        regs
    }

    /// Decode the physical register block
    ///
    /// Control bits are masked off; the hours register is read as 24-hour.
    pub fn from_registers(regs: &[u8; REGISTER_COUNT]) -> Self {
        let field = |offset: usize, mask: u8| bcd_to_binary(regs[offset] & mask);

        Self {
            year: BASE_YEAR + field(reg::YEAR, mask::YEAR) as u16,
            month: field(reg::MONTH, mask::MONTH),
            date: field(reg::DATE, mask::DATE),
            weekday: field(reg::DAY, mask::DAY),
            hour: field(reg::HOURS, mask::HOURS),
            minute: field(reg::MINUTES, mask::MINUTES),
            second: field(reg::SECONDS, mask::SECONDS),
        }
    }
}
