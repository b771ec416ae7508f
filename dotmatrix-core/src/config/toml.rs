//! Minimal TOML reader for `display.toml`
//!
//! Handles the subset the display configuration needs:
//! - `[section]` headers
//! - `key = value` pairs with integer (underscores allowed) or boolean values
//! - Comments (`# ...`), full-line and trailing
//!
//! Keys that are absent keep their [`DisplayConfig::default`] value.

use super::display::DisplayConfig;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header (1-based line number)
    InvalidSection(usize),
    /// Key not valid in its section
    UnknownKey(usize),
    /// Value has the wrong type or does not fit
    InvalidValue(usize),
    /// Line is neither a header nor a key/value pair
    Malformed(usize),
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Refresh,
    Bus,
    Marquee,
    Status,
}

/// Parse TOML text into a [`DisplayConfig`]
///
/// Values are not range-checked here; call [`DisplayConfig::validate`].
pub fn parse_display_config(input: &str) -> Result<DisplayConfig, ParseError> {
    let mut config = DisplayConfig::default();
    let mut section = Section::Root;

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = strip_comment(line).trim();

        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') {
            if !line.ends_with(']') {
                return Err(ParseError::InvalidSection(line_no));
            }
            section = parse_section_header(&line[1..line.len() - 1])
                .ok_or(ParseError::InvalidSection(line_no))?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::Malformed(line_no))?;
        apply_value(section, key, value, &mut config, line_no)?;
    }

    Ok(config)
}

fn parse_section_header(header: &str) -> Option<Section> {
    match header.trim() {
        "refresh" => Some(Section::Refresh),
        "bus" => Some(Section::Bus),
        "marquee" => Some(Section::Marquee),
        "status" => Some(Section::Status),
        _ => None,
    }
}

/// Drop a trailing `# comment` (no string values exist, so no quote tracking)
fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

fn parse_int<T: core::str::FromStr>(value: &str, line_no: usize) -> Result<T, ParseError> {
    // TOML allows `4_000_000`; strip separators into a fixed buffer
    let mut digits: heapless::String<24> = heapless::String::new();
    for c in value.chars().filter(|c| *c != '_') {
        digits
            .push(c)
            .map_err(|_| ParseError::InvalidValue(line_no))?;
    }
    digits
        .parse()
        .map_err(|_| ParseError::InvalidValue(line_no))
}

fn parse_bool(value: &str, line_no: usize) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue(line_no)),
    }
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut DisplayConfig,
    line_no: usize,
) -> Result<(), ParseError> {
    match (section, key) {
        (Section::Refresh, "row_rate_hz") => {
            config.refresh.row_rate_hz = parse_int(value, line_no)?;
        }
        (Section::Bus, "spi_frequency_hz") => {
            config.bus.spi_frequency_hz = parse_int(value, line_no)?;
        }
        (Section::Bus, "reset_pulse_us") => {
            config.bus.reset_pulse_us = parse_int(value, line_no)?;
        }
        (Section::Bus, "output_enable_inverted") => {
            config.bus.output_enable_inverted = parse_bool(value, line_no)?;
        }
        (Section::Marquee, "step_ms") => {
            config.marquee.step_ms = parse_int(value, line_no)?;
        }
        (Section::Marquee, "gap_columns") => {
            config.marquee.gap_columns = parse_int(value, line_no)?;
        }
        (Section::Status, "interval_ms") => {
            config.status.interval_ms = parse_int(value, line_no)?;
        }
        _ => return Err(ParseError::UnknownKey(line_no)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
# Reference board
[refresh]
row_rate_hz = 2_400   # 200 fps on 12 rows

[bus]
spi_frequency_hz = 8_000_000
reset_pulse_us = 20
output_enable_inverted = false

[marquee]
step_ms = 50
gap_columns = 4

[status]
interval_ms = 1000
"#;

    #[test]
    fn test_parse_full_config() {
        let config = parse_display_config(SAMPLE).unwrap();
        assert_eq!(config.refresh.row_rate_hz, 2400);
        assert_eq!(config.bus.spi_frequency_hz, 8_000_000);
        assert_eq!(config.bus.reset_pulse_us, 20);
        assert!(!config.bus.output_enable_inverted);
        assert_eq!(config.marquee.step_ms, 50);
        assert_eq!(config.marquee.gap_columns, 4);
        assert_eq!(config.status.interval_ms, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_keys_keep_defaults() {
        let config = parse_display_config("[marquee]\nstep_ms = 120\n").unwrap();
        assert_eq!(config.marquee.step_ms, 120);
        assert_eq!(config.refresh, DisplayConfig::default().refresh);
        assert_eq!(config.bus, DisplayConfig::default().bus);
    }

    #[test]
    fn test_empty_input_is_default() {
        assert_eq!(parse_display_config("").unwrap(), DisplayConfig::default());
    }

    #[test]
    fn test_unknown_section() {
        assert_eq!(
            parse_display_config("[refresh]\nrow_rate_hz = 100\n[heater]\n"),
            Err(ParseError::InvalidSection(3))
        );
    }

    #[test]
    fn test_key_in_wrong_section() {
        assert_eq!(
            parse_display_config("[bus]\nstep_ms = 10\n"),
            Err(ParseError::UnknownKey(2))
        );
        assert_eq!(
            parse_display_config("row_rate_hz = 10\n"),
            Err(ParseError::UnknownKey(1))
        );
    }

    #[test]
    fn test_bad_values() {
        assert_eq!(
            parse_display_config("[bus]\nreset_pulse_us = fast\n"),
            Err(ParseError::InvalidValue(2))
        );
        assert_eq!(
            parse_display_config("[bus]\noutput_enable_inverted = 1\n"),
            Err(ParseError::InvalidValue(2))
        );
        assert_eq!(
            parse_display_config("[marquee]\ngap_columns = 70000\n"),
            Err(ParseError::InvalidValue(2))
        );
    }

    #[test]
    fn test_malformed_lines() {
        assert_eq!(
            parse_display_config("[bus\n"),
            Err(ParseError::InvalidSection(1))
        );
        assert_eq!(
            parse_display_config("[bus]\nspi_frequency_hz\n"),
            Err(ParseError::Malformed(2))
        );
    }
}
