//! Build script for tricolor-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates clock.toml at compile time, then runs it through the
//!   firmware's own parser so the build and the board agree on the file

use std::collections::BTreeMap;
use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// GPIO pins on the RP2040
const GPIO_COUNT: i64 = 30;

/// I2C0 SDA/SCL, wired to the RTC
const RESERVED_PINS: [i64; 2] = [0, 1];

const COLORS: [&str; 3] = ["red", "green", "blue"];

const SECTIONS: [&str; 5] = ["rtc", "display", "hours", "minutes", "seconds"];

const RTC_KEYS: [&str; 8] = [
    "set_on_boot",
    "year",
    "month",
    "date",
    "weekday",
    "hour",
    "minute",
    "second",
];

const DISPLAY_KEYS: [&str; 3] = ["clk", "dio", "brightness"];

const CHANNEL_KEYS: [&str; 3] = ["latch", "clock", "data"];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR not set"));

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).expect("create memory.x");
    f.write_all(memory_x).expect("write memory.x");

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate clock.toml at compile time
///
/// The firmware falls back to the reference wiring when the embedded file
/// is bad, so a broken file is caught here rather than on the bench.
fn validate_config() {
    println!("cargo:rerun-if-changed=clock.toml");

    let config_path = Path::new("clock.toml");

    if !config_path.exists() {
        fail(
            "clock.toml not found",
            &["The firmware embeds clock.toml from the tricolor-firmware directory.".into()],
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read clock.toml", &[e.to_string()]),
    };

    let config: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => fail(
            "Invalid TOML syntax in clock.toml",
            &e.to_string().lines().map(String::from).collect::<Vec<_>>(),
        ),
    };

    let mut errors = Vec::new();
    let mut pins: BTreeMap<i64, String> = BTreeMap::new();

    validate_sections(&config, &mut errors);
    validate_rtc(&config, &mut errors);
    validate_display(&config, &mut pins, &mut errors);
    for bank in ["hours", "minutes"] {
        for color in COLORS {
            validate_channel(&config, bank, color, &mut pins, &mut errors);
        }
    }
    validate_channel(&config, "seconds", "red", &mut pins, &mut errors);
    if let Some(seconds) = config.get("seconds").and_then(|s| s.as_table()) {
        for color in seconds.keys().filter(|c| c.as_str() != "red") {
            errors.push(format!("[seconds.{}] not supported, seconds are red only", color));
        }
    }

    if !errors.is_empty() {
        fail("Invalid clock configuration", &errors);
    }

    // The firmware reads the file with the core line parser, not with toml
    let parsed = match tricolor_core::config::parse_config(&content) {
        Ok(parsed) => parsed,
        Err(e) => fail(
            "clock.toml rejected by the firmware parser",
            &[format!("{:?}", e)],
        ),
    };
    let reserved = RESERVED_PINS.map(|pin| pin as u8);
    if let Err(e) = parsed.validate(&reserved) {
        fail("clock.toml rejected by the firmware", &[format!("{:?}", e)]);
    }

    println!("cargo:warning=clock.toml validated successfully");
}

/// Reject root keys and sections the firmware does not know
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        return;
    };

    for (name, value) in root {
        if !SECTIONS.contains(&name.as_str()) {
            match value {
                toml::Value::Table(_) => errors.push(format!("unknown section [{}]", name)),
                _ => errors.push(format!("'{}' must be inside a section", name)),
            }
            continue;
        }

        // [rtc] and [display] report their own shape errors
        let table = match value {
            toml::Value::Table(t) => t,
            _ if name == "rtc" || name == "display" => continue,
            _ => {
                errors.push(format!("[{}] must be a table", name));
                continue;
            }
        };

        if name == "hours" || name == "minutes" {
            for color in table.keys() {
                if !COLORS.contains(&color.as_str()) {
                    errors.push(format!("[{}.{}] unknown color", name, color));
                }
            }
        }
    }
}

/// Report keys of a section that are not in `known`
fn reject_unknown_keys(
    section: &str,
    table: &toml::map::Map<String, toml::Value>,
    known: &[&str],
    errors: &mut Vec<String>,
) {
    for key in table.keys() {
        if !known.contains(&key.as_str()) {
            errors.push(format!("[{}] unknown key '{}'", section, key));
        }
    }
}

/// Check the optional [rtc] boot time
fn validate_rtc(config: &toml::Value, errors: &mut Vec<String>) {
    let rtc = match config.get("rtc") {
        Some(toml::Value::Table(t)) => t,
        Some(_) => {
            errors.push("[rtc] must be a table".into());
            return;
        }
        None => return,
    };

    reject_unknown_keys("rtc", rtc, &RTC_KEYS, errors);

    if let Some(value) = rtc.get("set_on_boot") {
        if !value.is_bool() {
            errors.push("[rtc] set_on_boot must be true or false".into());
        }
    }

    let ranges: [(&str, i64, i64); 7] = [
        ("year", 2000, 2099),
        ("month", 1, 12),
        ("date", 1, 31),
        ("weekday", 1, 7),
        ("hour", 0, 23),
        ("minute", 0, 59),
        ("second", 0, 59),
    ];
    for (key, min, max) in ranges {
        match rtc.get(key) {
            Some(toml::Value::Integer(v)) if (min..=max).contains(v) => {}
            Some(_) => errors.push(format!("[rtc] {} must be {}-{}", key, min, max)),
            None => {}
        }
    }
}

/// Check the [display] pins and brightness
fn validate_display(
    config: &toml::Value,
    pins: &mut BTreeMap<i64, String>,
    errors: &mut Vec<String>,
) {
    let display = match config.get("display") {
        Some(toml::Value::Table(t)) => t,
        Some(_) => {
            errors.push("[display] must be a table".into());
            return;
        }
        None => return,
    };

    reject_unknown_keys("display", display, &DISPLAY_KEYS, errors);

    for key in ["clk", "dio"] {
        if let Some(value) = display.get(key) {
            claim_pin(value, format!("display.{}", key), pins, errors);
        }
    }

    match display.get("brightness") {
        Some(toml::Value::Integer(b)) if (0..=7).contains(b) => {}
        Some(_) => errors.push("[display] brightness must be 0-7".into()),
        None => {}
    }
}

/// Check one [bank.color] channel
fn validate_channel(
    config: &toml::Value,
    bank: &str,
    color: &str,
    pins: &mut BTreeMap<i64, String>,
    errors: &mut Vec<String>,
) {
    let channel = match config.get(bank).and_then(|b| b.get(color)) {
        Some(toml::Value::Table(t)) => t,
        Some(_) => {
            errors.push(format!("[{}.{}] must be a table", bank, color));
            return;
        }
        None => return,
    };

    reject_unknown_keys(&format!("{}.{}", bank, color), channel, &CHANNEL_KEYS, errors);
    for key in CHANNEL_KEYS {
        if let Some(value) = channel.get(key) {
            claim_pin(value, format!("{}.{}.{}", bank, color, key), pins, errors);
        }
    }
}

/// Parse a "gpioNN" string and record who uses it
fn claim_pin(
    value: &toml::Value,
    owner: String,
    pins: &mut BTreeMap<i64, String>,
    errors: &mut Vec<String>,
) {
    let pin = value
        .as_str()
        .and_then(|s| s.strip_prefix("gpio"))
        .and_then(|n| n.parse::<i64>().ok());

    let pin = match pin {
        Some(pin) if (0..GPIO_COUNT).contains(&pin) => pin,
        _ => {
            errors.push(format!("{} must be \"gpio0\"-\"gpio29\"", owner));
            return;
        }
    };

    if RESERVED_PINS.contains(&pin) {
        errors.push(format!("{} uses gpio{}, reserved for the RTC I2C bus", owner, pin));
        return;
    }

    if let Some(previous) = pins.get(&pin) {
        errors.push(format!("{} reuses gpio{} from {}", owner, pin, previous));
        return;
    }
    pins.insert(pin, owner);
}

/// Abort the build with a boxed error message
fn fail(title: &str, lines: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        format_error_lines(lines)
    );
}

/// Format error message lines with box drawing
fn format_error_lines(lines: &[String]) -> String {
    lines
        .iter()
        .map(|line| {
            let truncated = if line.len() > 62 {
                format!("{}...", &line[..59])
            } else {
                line.to_string()
            };
            format!("║  • {:<62} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
