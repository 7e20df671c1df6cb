//! Simple TOML parser for the clock configuration
//!
//! This is a minimal, allocation-free parser that handles only the subset
//! used by `clock.toml`. It is not a general TOML parser.
//!
//! Supported features:
//! - Key = value pairs (string, integer, boolean)
//! - `[rtc]`, `[display]` section headers
//! - `[hours.red]`, `[minutes.blue]`, `[seconds.red]` channel headers
//! - Comments (# ...)
//!
//! Keys that are not present keep the reference wiring from
//! [`ClockConfig::default`].

use crate::color::ColorIndex;

use super::types::{ChannelPins, ClockConfig, GPIO_COUNT};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Invalid section header
    InvalidSection,
    /// Key not valid in the current section
    UnknownKey,
    /// Invalid value type
    InvalidValue,
    /// Invalid pin string
    InvalidPin,
}

/// LED bank selected by a channel section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bank {
    Hours,
    Minutes,
    Seconds,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Rtc,
    Display,
    Channel(Bank, ColorIndex),
}

/// Parse TOML configuration into ClockConfig
pub fn parse_config(input: &str) -> Result<ClockConfig, ParseError> {
    let mut config = ClockConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        match parse_key_value(line) {
            Some((key, value)) => apply_value(section, key, value, &mut config)?,
            None => return Err(ParseError::InvalidValue),
        }
    }

    Ok(config)
}

/// Parse section header like "rtc" or "hours.red"
fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    let header = header.trim();

    match header.split_once('.') {
        None => match header {
            "rtc" => Ok(Section::Rtc),
            "display" => Ok(Section::Display),
            _ => Err(ParseError::InvalidSection),
        },
        Some((bank, color)) => {
            let bank = match bank.trim() {
                "hours" => Bank::Hours,
                "minutes" => Bank::Minutes,
                "seconds" => Bank::Seconds,
                _ => return Err(ParseError::InvalidSection),
            };
            let color = match color.trim() {
                "red" => ColorIndex::Red,
                "green" => ColorIndex::Green,
                "blue" => ColorIndex::Blue,
                _ => return Err(ParseError::InvalidSection),
            };
            // Seconds only have red LEDs
            if bank == Bank::Seconds && color != ColorIndex::Red {
                return Err(ParseError::InvalidSection);
            }
            Ok(Section::Channel(bank, color))
        }
    }
}

/// Apply a key/value pair to the section being parsed
fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut ClockConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Root => Err(ParseError::UnknownKey),
        Section::Rtc => {
            let time = &mut config.rtc.initial_time;
            match key {
                "set_on_boot" => config.rtc.set_on_boot = parse_bool(value)?,
                "year" => time.year = parse_int(value)?,
                "month" => time.month = parse_int(value)?,
                "date" => time.date = parse_int(value)?,
                "weekday" => time.weekday = parse_int(value)?,
                "hour" => time.hour = parse_int(value)?,
                "minute" => time.minute = parse_int(value)?,
                "second" => time.second = parse_int(value)?,
                _ => return Err(ParseError::UnknownKey),
            }
            Ok(())
        }
        Section::Display => {
            match key {
                "clk" => config.display.clk = parse_pin(value)?,
                "dio" => config.display.dio = parse_pin(value)?,
                "brightness" => config.display.brightness = parse_int(value)?,
                _ => return Err(ParseError::UnknownKey),
            }
            Ok(())
        }
        Section::Channel(bank, color) => {
            let pins = channel_mut(config, bank, color);
            match key {
                "latch" => pins.latch = parse_pin(value)?,
                "clock" => pins.clock = parse_pin(value)?,
                "data" => pins.data = parse_pin(value)?,
                _ => return Err(ParseError::UnknownKey),
            }
            Ok(())
        }
    }
}

fn channel_mut(config: &mut ClockConfig, bank: Bank, color: ColorIndex) -> &mut ChannelPins {
    match bank {
        Bank::Hours => &mut config.hours[color.index()],
        Bank::Minutes => &mut config.minutes[color.index()],
        Bank::Seconds => &mut config.seconds,
    }
}

/// Parse a key = value line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // Remove inline comments
    let value = if let Some(hash_pos) = value.find('#') {
        // Make sure # is not inside a string
        let quote_count = value[..hash_pos].matches('"').count();
        if quote_count % 2 == 0 {
            value[..hash_pos].trim()
        } else {
            value
        }
    } else {
        value
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> &str {
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
        &value[1..value.len() - 1]
    } else {
        // Allow unquoted strings for simple values
        value
    }
}

/// Parse an integer value
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Parse a pin string like "gpio11"
fn parse_pin(value: &str) -> Result<u8, ParseError> {
    let pin = parse_string(value)
        .strip_prefix("gpio")
        .ok_or(ParseError::InvalidPin)?;
    let pin: u8 = pin.parse().map_err(|_| ParseError::InvalidPin)?;

    if pin >= GPIO_COUNT {
        return Err(ParseError::InvalidPin);
    }

    Ok(pin)
}
