//! Hardware-facing traits
//!
//! The frame engine only ever talks to the display through these.

pub mod cascade;

pub use cascade::CascadeSink;
