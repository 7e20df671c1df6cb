//! RP2040-specific HAL for the clock firmware
//!
//! This crate provides RP2040 implementations of the shared
//! `tricolor-hal` traits, plus RP2040-specific functionality:
//!
//! - Push-pull outputs for the bit-banged display and shift registers
//! - Blocking I2C master for the RTC
//! - Dynamic pin allocation for config-driven setup

#![no_std]

pub mod gpio;
pub mod i2c;
pub mod pins;

pub use gpio::RpOutput;
pub use i2c::{I2cBusError, RpI2c};
pub use pins::{I2cPeripherals, PinBank, PinBankPeripherals, PinError, RESERVED_PINS};

// Re-export shared traits from tricolor-hal for convenience
pub use tricolor_hal::{I2cBus, I2cConfig, OutputPin};
