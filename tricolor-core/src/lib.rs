//! Board-agnostic core logic for the Tricolor clock
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Calendar time and the DS3231 register codec (BCD)
//! - Seven-segment encoding table
//! - Color rotation for the hour and minute LED banks
//! - Device traits (RTC, shift register channel, segment display)
//! - The per-second color cycle controller and its pacing
//! - Configuration types and the embedded config parser

#![no_std]
#![deny(unsafe_code)]

// proptest expands to std paths
#[cfg(test)]
extern crate std;

pub mod color;
pub mod config;
pub mod cycle;
pub mod segments;
pub mod time;
pub mod traits;
