//! Build script for dotmatrix-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates display.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use dotmatrix_core::config::display;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths and scripts
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Expected shape of one integer key
struct IntKey {
    section: &'static str,
    key: &'static str,
    range: RangeInclusive<i64>,
}

impl IntKey {
    fn new<T: Copy + Into<i64>>(
        section: &'static str,
        key: &'static str,
        range: RangeInclusive<T>,
    ) -> Self {
        Self {
            section,
            key,
            range: (*range.start()).into()..=(*range.end()).into(),
        }
    }
}

/// Integer keys with the ranges the firmware enforces on the device
fn int_keys() -> [IntKey; 6] {
    [
        IntKey::new("refresh", "row_rate_hz", display::ROW_RATE_HZ_RANGE),
        IntKey::new("bus", "spi_frequency_hz", display::SPI_FREQUENCY_HZ_RANGE),
        IntKey::new("bus", "reset_pulse_us", display::RESET_PULSE_US_RANGE),
        IntKey::new("marquee", "step_ms", display::STEP_MS_RANGE),
        IntKey::new("marquee", "gap_columns", display::GAP_COLUMNS_RANGE),
        IntKey::new("status", "interval_ms", display::STATUS_INTERVAL_MS_RANGE),
    ]
}

const BOOL_KEYS: &[(&str, &str)] = &[("bus", "output_enable_inverted")];

/// Validate display.toml configuration at compile time
fn validate_config() {
    // Re-run if display.toml changes
    println!("cargo:rerun-if-changed=display.toml");

    let config_path = Path::new("display.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: display.toml not found!                                  ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds display.toml at compile time.               ║\n\
            ║  Please create one in the dotmatrix-firmware directory.          ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read display.toml                              ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in display.toml                      ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_known_keys(&config, &mut errors);
    validate_values(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid display configuration                            ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=display.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Reject sections and keys the firmware parser would refuse
fn validate_known_keys(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        return;
    };

    let int_keys = int_keys();

    for (section, body) in root {
        let Some(body) = body.as_table() else {
            errors.push(format!("'{}' must be a [section]", section));
            continue;
        };

        for key in body.keys() {
            let known = int_keys
                .iter()
                .any(|k| k.section == section && k.key == key)
                || BOOL_KEYS.iter().any(|(s, k)| s == section && k == key);
            if !known {
                errors.push(format!("[{}] unknown key '{}'", section, key));
            }
        }
    }
}

/// Check types and ranges of every key that is present
fn validate_values(config: &toml::Value, errors: &mut Vec<String>) {
    for entry in int_keys() {
        match config.get(entry.section).and_then(|s| s.get(entry.key)) {
            None => {}
            Some(toml::Value::Integer(v)) => {
                if !entry.range.contains(v) {
                    errors.push(format!(
                        "[{}] {} must be {}-{}",
                        entry.section,
                        entry.key,
                        entry.range.start(),
                        entry.range.end()
                    ));
                }
            }
            Some(_) => {
                errors.push(format!("[{}] {} must be an integer", entry.section, entry.key));
            }
        }
    }

    for (section, key) in BOOL_KEYS {
        match config.get(*section).and_then(|s| s.get(*key)) {
            None | Some(toml::Value::Boolean(_)) => {}
            Some(_) => errors.push(format!("[{}] {} must be true or false", section, key)),
        }
    }
}
