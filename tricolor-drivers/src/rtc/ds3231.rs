//! DS3231 real-time clock driver
//!
//! Only the timekeeping block (registers 0x00-0x06) is used. A read is a
//! single write-read transaction: register pointer 0x00, then seven bytes.
//! A write sends the pointer followed by all seven registers so the chip
//! restarts its countdown chain with a consistent value.

use tricolor_core::time::{Time, TimeError, TimeField, REGISTER_COUNT};
use tricolor_core::traits::RealTimeClock;
use tricolor_hal::I2cBus;

/// Fixed 7-bit bus address
pub const DS3231_ADDRESS: u8 = 0x68;

/// First timekeeping register
const REG_SECONDS: u8 = 0x00;

/// DS3231 errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ds3231Error<E> {
    /// Bus transaction failed
    Bus(E),
    /// Refused to write an out-of-range time
    InvalidTime(TimeField),
}

/// DS3231 on an I2C bus
pub struct Ds3231<I2C> {
    i2c: I2C,
}

impl<I2C: I2cBus> Ds3231<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Release the bus
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Read the raw timekeeping block
    pub fn read_registers(&mut self) -> Result<[u8; REGISTER_COUNT], Ds3231Error<I2C::Error>> {
        let mut regs = [0u8; REGISTER_COUNT];
        self.i2c
            .write_read(DS3231_ADDRESS, &[REG_SECONDS], &mut regs)
            .map_err(Ds3231Error::Bus)?;
        Ok(regs)
    }
}

impl<I2C: I2cBus> RealTimeClock for Ds3231<I2C> {
    type Error = Ds3231Error<I2C::Error>;

    fn read_time(&mut self) -> Result<Time, Self::Error> {
        let regs = self.read_registers()?;
        Ok(Time::from_registers(&regs))
    }

    fn write_time(&mut self, time: &Time) -> Result<(), Self::Error> {
        time.validate()
            .map_err(|TimeError::OutOfRange(field)| Ds3231Error::InvalidTime(field))?;

        let mut frame = [0u8; REGISTER_COUNT + 1];
        frame[0] = REG_SECONDS;
        frame[1..].copy_from_slice(&time.to_registers());

        self.i2c
            .write(DS3231_ADDRESS, &frame)
            .map_err(Ds3231Error::Bus)
    }
}
