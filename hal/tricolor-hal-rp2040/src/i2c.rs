//! Blocking I2C master
//!
//! The RTC is read once per second with a 1-byte write and a 7-byte read,
//! so the blocking driver is enough and keeps the clock task simple.

use embassy_rp::i2c::{Blocking, Config, I2c, Instance, SclPin, SdaPin};
use embassy_rp::Peri;
use embedded_hal::i2c::{Error as _, ErrorKind, I2c as _};
use tricolor_hal::{I2cBus, I2cConfig};

/// I2C errors, reduced from [`ErrorKind`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cBusError {
    /// Bus error (misplaced start/stop)
    Bus,
    /// Lost arbitration to another master
    ArbitrationLost,
    /// Address or data not acknowledged
    Nack,
    /// Receive overrun
    Overrun,
    /// Anything else the controller reports
    Other,
}

impl From<ErrorKind> for I2cBusError {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Bus => Self::Bus,
            ErrorKind::ArbitrationLoss => Self::ArbitrationLost,
            ErrorKind::NoAcknowledge(_) => Self::Nack,
            ErrorKind::Overrun => Self::Overrun,
            _ => Self::Other,
        }
    }
}

/// RP2040 I2C controller in blocking mode
pub struct RpI2c<'d, T: Instance> {
    i2c: I2c<'d, T, Blocking>,
}

impl<'d, T: Instance> RpI2c<'d, T> {
    /// Set up the controller on the given pins
    pub fn new(
        peri: Peri<'d, T>,
        scl: Peri<'d, impl SclPin<T>>,
        sda: Peri<'d, impl SdaPin<T>>,
        config: I2cConfig,
    ) -> Self {
        let mut rp_config = Config::default();
        rp_config.frequency = config.frequency;
        Self {
            i2c: I2c::new_blocking(peri, scl, sda, rp_config),
        }
    }
}

impl<T: Instance> I2cBus for RpI2c<'_, T> {
    type Error = I2cBusError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.i2c
            .write(address, data)
            .map_err(|e| I2cBusError::from(e.kind()))
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.i2c
            .write_read(address, write_data, read_buf)
            .map_err(|e| I2cBusError::from(e.kind()))
    }
}
