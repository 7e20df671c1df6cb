//! Device drivers
//!
//! This crate provides concrete implementations of the traits defined
//! in tricolor-core for the clock's three device kinds:
//!
//! - Segment display (TM1637, bit-banged two-wire protocol)
//! - Real-time clock (DS3231 over I2C)
//! - LED banks (74HC595 serial-in/parallel-out shift registers)
//!
//! Pins come in through [`tricolor_hal::OutputPin`] and the I2C bus through
//! [`tricolor_hal::I2cBus`], so every driver runs on the host against mocks.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod display;
pub mod rtc;
pub mod shift;

#[cfg(test)]
pub(crate) mod mock;

pub use display::Tm1637;
pub use rtc::{Ds3231, Ds3231Error};
pub use shift::SipoChannel;
