//! Configuration loading
//!
//! The configuration is compiled into the firmware from `clock.toml` and
//! parsed with the no_std parser in tricolor-core. A file that does not
//! parse or validate is replaced by the reference wiring so the clock still
//! comes up.

use defmt::*;
use tricolor_core::config::{parse_config, ClockConfig};
use tricolor_hal_rp2040::RESERVED_PINS;

/// Embedded configuration
/// Edit clock.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../../clock.toml");

/// Parse and validate the embedded configuration
pub fn load_config() -> ClockConfig {
    let config = match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            error!("clock.toml parse error: {}, using defaults", e);
            return ClockConfig::default();
        }
    };

    match config.validate(&RESERVED_PINS) {
        Ok(()) => {
            info!(
                "Config loaded: display on gpio{}/gpio{}, brightness {}",
                config.display.clk, config.display.dio, config.display.brightness
            );
            config
        }
        Err(e) => {
            error!("clock.toml rejected: {}, using defaults", e);
            ClockConfig::default()
        }
    }
}
