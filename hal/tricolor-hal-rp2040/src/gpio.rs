//! GPIO outputs
//!
//! Wraps the embassy output driver so the clock drivers only see
//! [`tricolor_hal::OutputPin`].

use embassy_rp::gpio::{AnyPin, Level, Output};
use embassy_rp::Peri;
use tricolor_hal::OutputPin;

/// Push-pull output on any GPIO
pub struct RpOutput<'d> {
    pin: Output<'d>,
}

impl<'d> RpOutput<'d> {
    /// Configure `pin` as an output, starting low
    pub fn new(pin: Peri<'d, AnyPin>) -> Self {
        Self::with_level(pin, false)
    }

    /// Configure `pin` as an output with an explicit initial level
    pub fn with_level(pin: Peri<'d, AnyPin>, high: bool) -> Self {
        let level = if high { Level::High } else { Level::Low };
        Self {
            pin: Output::new(pin, level),
        }
    }
}

impl OutputPin for RpOutput<'_> {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}
