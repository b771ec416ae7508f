//! SPI bus abstractions
//!
//! The register chain only ever receives data, so the bus is modelled as a
//! write-only master.

/// SPI bus master (transmit only)
///
/// Bytes are clocked out in slice order. The implementation owns framing
/// (bit order, clock edges); callers only rely on every byte being shifted
/// out completely before `write` returns.
pub trait SpiBus {
    /// Error type for SPI operations
    type Error;

    /// Write data, blocking until the last bit has left the shifter
    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error>;
}

impl<T: SpiBus + ?Sized> SpiBus for &mut T {
    type Error = T::Error;

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        T::write(self, data)
    }
}

/// SPI configuration
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
    /// Clock polarity
    pub polarity: ClockPolarity,
    /// Clock phase
    pub phase: Phase,
}

impl Default for SpiConfig {
    fn default() -> Self {
        Self {
            frequency: 4_000_000, // 4 MHz, well inside 74HC595 limits at 3.3V
            polarity: ClockPolarity::IdleLow,
            phase: Phase::CaptureOnFirstTransition,
        }
    }
}

/// SPI clock polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockPolarity {
    /// Clock idles low (CPOL=0)
    IdleLow,
    /// Clock idles high (CPOL=1)
    IdleHigh,
}

/// SPI clock phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Data captured on first clock transition (CPHA=0)
    CaptureOnFirstTransition,
    /// Data captured on second clock transition (CPHA=1)
    CaptureOnSecondTransition,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_mode0() {
        let cfg = SpiConfig::default();
        assert_eq!(cfg.polarity, ClockPolarity::IdleLow);
        assert_eq!(cfg.phase, Phase::CaptureOnFirstTransition);
    }
}
