//! dotmatrix Hardware Abstraction Layer
//!
//! This crate defines the narrow hardware interface the LED grid needs:
//! a handful of digital output lines and a write-only synchronous serial
//! bus. Chip-specific crates implement these traits so the cascade driver
//! and the frame engine never touch peripheral types directly.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  dotmatrix-firmware / dotmatrix-drivers │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  dotmatrix-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ dotmatrix-hal-│
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Digital output (latch, reset, output-enable)
//! - [`spi::SpiBus`] - Serial shift-out to the register chain

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use gpio::{OutputPin, Polarity};
pub use spi::{SpiBus, SpiConfig};
