//! Shift-register driver implementations

pub mod cascade;

pub use cascade::{CascadeConfig, CascadeDriver, CascadeError, CascadePins};
