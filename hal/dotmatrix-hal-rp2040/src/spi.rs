//! Blocking SPI master
//!
//! The refresh tick runs from an interrupt-priority executor and must finish
//! each row before returning, so the bus is driven in blocking mode. Any
//! `embedded-hal` 1.0 SPI bus works; on the board this is
//! `embassy_rp::spi::Spi<'_, SPIx, Blocking>` built with
//! `Spi::new_blocking_txonly`.

use dotmatrix_hal::spi::{ClockPolarity, Phase};
use dotmatrix_hal::SpiConfig;
use embassy_rp::spi;

/// Transmit-only adapter over an `embedded-hal` SPI bus
pub struct BlockingSpi<B> {
    bus: B,
}

impl<B> BlockingSpi<B>
where
    B: embedded_hal::spi::SpiBus<u8>,
{
    /// Wrap a configured bus
    pub fn new(bus: B) -> Self {
        Self { bus }
    }
}

impl<B> dotmatrix_hal::SpiBus for BlockingSpi<B>
where
    B: embedded_hal::spi::SpiBus<u8>,
{
    type Error = B::Error;

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.bus.write(data)?;
        // Latch must not rise while the last byte is still in the FIFO
        self.bus.flush()
    }
}

/// embassy-rp bus configuration for `config`
pub fn spi_config(config: &SpiConfig) -> spi::Config {
    let mut cfg = spi::Config::default();
    cfg.frequency = config.frequency;
    cfg.polarity = match config.polarity {
        ClockPolarity::IdleLow => spi::Polarity::IdleLow,
        ClockPolarity::IdleHigh => spi::Polarity::IdleHigh,
    };
    cfg.phase = match config.phase {
        Phase::CaptureOnFirstTransition => spi::Phase::CaptureOnFirstTransition,
        Phase::CaptureOnSecondTransition => spi::Phase::CaptureOnSecondTransition,
    };
    cfg
}
