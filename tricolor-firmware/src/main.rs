//! Tricolor - RTC-driven LED clock firmware
//!
//! Reads a DS3231 once per second and shows the time three ways: hours,
//! minutes and seconds as binary on 74HC595-driven LED banks, and HHMM on
//! a TM1637 display. The hour and minute banks each have red, green and
//! blue channels; the lit color rotates with the time of day.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_time::Timer;
use {defmt_rtt as _, panic_probe as _};

use tricolor_core::traits::RealTimeClock;
use tricolor_drivers::Ds3231;
use tricolor_hal_rp2040::{I2cConfig, PinBank, PinBankPeripherals, RpI2c};

mod board;
mod config;
mod observer;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Tricolor clock starting...");

    let p = embassy_rp::init(Default::default());
    let (pins, i2c) = PinBankPeripherals::from_peripherals(p);
    let mut bank = PinBank::new(pins);
    info!("Peripherals initialized");

    let config = config::load_config();

    // RTC on the board's fixed I2C0 pair
    let mut rtc = Ds3231::new(RpI2c::new(i2c.i2c0, i2c.scl, i2c.sda, I2cConfig::STANDARD));

    if config.rtc.set_on_boot {
        match rtc.write_time(&config.rtc.initial_time) {
            Ok(()) => info!("RTC set to {}", config.rtc.initial_time),
            Err(e) => error!("Failed to set RTC: {}", e),
        }
    }

    let clock = match board::clock(rtc, &mut bank, &config) {
        Ok(clock) => clock,
        Err(e) => {
            // Only reachable if validation and the pin bank disagree
            error!("Pin setup failed: {}", e);
            loop {
                Timer::after_secs(1).await;
            }
        }
    };
    info!("Display and LED banks ready");

    spawner.spawn(unwrap!(tasks::clock_task(clock)));

    info!("Tricolor clock running");
}
