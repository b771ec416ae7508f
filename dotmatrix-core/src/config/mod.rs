//! Configuration
//!
//! Grid geometry is fixed at compile time; refresh, bus and banner
//! tunables are read from `display.toml` at start-up.

pub mod display;
pub mod geometry;
pub mod toml;

pub use display::*;
pub use geometry::*;
pub use toml::{parse_display_config, ParseError};
