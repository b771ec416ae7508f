//! Display configuration loading
//!
//! `display.toml` is embedded at compile time (and validated by build.rs).
//! It is parsed again on the device so a single source drives both.

use defmt::*;

use dotmatrix_core::config::{parse_display_config, DisplayConfig};

/// Embedded configuration (edit display.toml and rebuild to customize)
const EMBEDDED_CONFIG: &str = include_str!("../display.toml");

/// Parse and validate the embedded configuration
///
/// Falls back to [`DisplayConfig::default`] if either step fails.
pub fn load_display_config() -> DisplayConfig {
    let config = match parse_display_config(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to parse display.toml: {:?}", e);
            error!("Using default display configuration");
            return DisplayConfig::default();
        }
    };

    if let Err(e) = config.validate() {
        error!("display.toml out of range: {:?}", e);
        error!("Using default display configuration");
        return DisplayConfig::default();
    }

    info!(
        "Display config: {} rows/s, SPI {} Hz, step {} ms",
        config.refresh.row_rate_hz, config.bus.spi_frequency_hz, config.marquee.step_ms
    );
    config
}
