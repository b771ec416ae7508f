//! RP2040-specific HAL for the LED grid firmware
//!
//! This crate provides RP2040-specific implementations of the shared
//! `dotmatrix-hal` traits:
//!
//! - Push-pull GPIO outputs for the latch, reset and output-enable lines
//! - Blocking SPI master for shifting rows into the register chain

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod spi;

pub use gpio::RpOutput;
pub use spi::{spi_config, BlockingSpi};

// Re-export shared traits from dotmatrix-hal for convenience
pub use dotmatrix_hal::{OutputPin, SpiBus, SpiConfig};
