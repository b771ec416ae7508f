//! Board-agnostic core logic for the LED grid firmware
//!
//! This crate contains everything that does not depend on a specific
//! microcontroller:
//!
//! - Bit-packed frames and scroll operations
//! - The row-multiplexing frame engine
//! - The pending-frame mailbox shared with the refresh context
//! - Interval polling for foreground schedulers
//! - Banner text rendering and scrolling
//! - Configuration types and the `display.toml` reader

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod engine;
pub mod font;
pub mod frame;
pub mod mailbox;
pub mod marquee;
pub mod timing;
pub mod traits;

pub use engine::{FrameEngine, GeometryError, RowPayload};
pub use frame::{Frame, RowWord};
pub use mailbox::{FrameMailbox, FrameWriter};
pub use timing::{interval_elapsed, IntervalGate};
