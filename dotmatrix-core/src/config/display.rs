//! Run-time display tunables
//!
//! These come from `display.toml`. Everything here can change without
//! touching the grid geometry, which is fixed at compile time.

use core::ops::RangeInclusive;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// Accepted ranges. The firmware build script checks display.toml
// against these same constants.

/// `[refresh] row_rate_hz`
pub const ROW_RATE_HZ_RANGE: RangeInclusive<u32> = 60..=20_000;
/// `[bus] spi_frequency_hz`
pub const SPI_FREQUENCY_HZ_RANGE: RangeInclusive<u32> = 100_000..=31_250_000;
/// `[bus] reset_pulse_us`
pub const RESET_PULSE_US_RANGE: RangeInclusive<u32> = 1..=10_000;
/// `[marquee] step_ms`
pub const STEP_MS_RANGE: RangeInclusive<u32> = 10..=10_000;
/// `[marquee] gap_columns`
pub const GAP_COLUMNS_RANGE: RangeInclusive<u16> = 0..=64;
/// `[status] interval_ms`
pub const STATUS_INTERVAL_MS_RANGE: RangeInclusive<u32> = 100..=600_000;

/// Configuration validation error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Row rate outside 60..=20000 Hz
    RowRate,
    /// SPI clock outside 100 kHz..=31.25 MHz
    SpiFrequency,
    /// Reset pulse outside 1..=10000 us
    ResetPulse,
    /// Marquee step outside 10..=10000 ms
    MarqueeStep,
    /// Marquee gap wider than 64 columns
    MarqueeGap,
    /// Status interval outside 100..=600000 ms
    StatusInterval,
}

/// Refresh cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RefreshConfig {
    /// Row ticks per second (frame rate = row rate / rows)
    pub row_rate_hz: u32,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self { row_rate_hz: 1200 }
    }
}

impl RefreshConfig {
    /// Period of one row tick in microseconds
    pub fn row_period_us(&self) -> u32 {
        1_000_000 / self.row_rate_hz.max(1)
    }

    /// Full frames per second for a grid of `rows` rows
    pub fn frame_rate_hz(&self, rows: usize) -> u32 {
        self.row_rate_hz / (rows.max(1) as u32)
    }
}

/// Shift-register bus settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BusConfig {
    /// SPI clock in Hz
    pub spi_frequency_hz: u32,
    /// Width of the start-up reset pulse in microseconds
    pub reset_pulse_us: u32,
    /// Output-enable line is active-low
    pub output_enable_inverted: bool,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            spi_frequency_hz: 4_000_000,
            reset_pulse_us: 10,
            output_enable_inverted: true,
        }
    }
}

/// Scrolling banner settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MarqueeConfig {
    /// Time between one-column scroll steps
    pub step_ms: u32,
    /// Blank columns between repetitions of the banner
    pub gap_columns: u16,
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        Self {
            step_ms: 80,
            gap_columns: 8,
        }
    }
}

/// Periodic status logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StatusConfig {
    /// Interval between status lines
    pub interval_ms: u32,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self { interval_ms: 5000 }
    }
}

/// Complete display configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    pub refresh: RefreshConfig,
    pub bus: BusConfig,
    pub marquee: MarqueeConfig,
    pub status: StatusConfig,
}

impl DisplayConfig {
    /// Check every value against its supported range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !ROW_RATE_HZ_RANGE.contains(&self.refresh.row_rate_hz) {
            return Err(ConfigError::RowRate);
        }
        if !SPI_FREQUENCY_HZ_RANGE.contains(&self.bus.spi_frequency_hz) {
            return Err(ConfigError::SpiFrequency);
        }
        if !RESET_PULSE_US_RANGE.contains(&self.bus.reset_pulse_us) {
            return Err(ConfigError::ResetPulse);
        }
        if !STEP_MS_RANGE.contains(&self.marquee.step_ms) {
            return Err(ConfigError::MarqueeStep);
        }
        if !GAP_COLUMNS_RANGE.contains(&self.marquee.gap_columns) {
            return Err(ConfigError::MarqueeGap);
        }
        if !STATUS_INTERVAL_MS_RANGE.contains(&self.status.interval_ms) {
            return Err(ConfigError::StatusInterval);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(DisplayConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_row_period() {
        let refresh = RefreshConfig { row_rate_hz: 1200 };
        assert_eq!(refresh.row_period_us(), 833);
        assert_eq!(refresh.frame_rate_hz(12), 100);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let mut config = DisplayConfig::default();
        config.refresh.row_rate_hz = 10;
        assert_eq!(config.validate(), Err(ConfigError::RowRate));

        let mut config = DisplayConfig::default();
        config.bus.spi_frequency_hz = 50_000_000;
        assert_eq!(config.validate(), Err(ConfigError::SpiFrequency));

        let mut config = DisplayConfig::default();
        config.bus.reset_pulse_us = 0;
        assert_eq!(config.validate(), Err(ConfigError::ResetPulse));

        let mut config = DisplayConfig::default();
        config.marquee.gap_columns = 65;
        assert_eq!(config.validate(), Err(ConfigError::MarqueeGap));

        let mut config = DisplayConfig::default();
        config.status.interval_ms = 1;
        assert_eq!(config.validate(), Err(ConfigError::StatusInterval));
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let mut config = DisplayConfig::default();
        config.refresh.row_rate_hz = *ROW_RATE_HZ_RANGE.end();
        config.bus.spi_frequency_hz = *SPI_FREQUENCY_HZ_RANGE.start();
        config.bus.reset_pulse_us = *RESET_PULSE_US_RANGE.end();
        config.marquee.step_ms = *STEP_MS_RANGE.start();
        config.marquee.gap_columns = *GAP_COLUMNS_RANGE.end();
        config.status.interval_ms = *STATUS_INTERVAL_MS_RANGE.end();
        assert_eq!(config.validate(), Ok(()));

        config.marquee.step_ms = STEP_MS_RANGE.end() + 1;
        assert_eq!(config.validate(), Err(ConfigError::MarqueeStep));

        let mut config = DisplayConfig::default();
        config.refresh.row_rate_hz = ROW_RATE_HZ_RANGE.start() - 1;
        assert_eq!(config.validate(), Err(ConfigError::RowRate));
    }
}
