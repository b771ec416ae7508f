//! Shared refresh statistics
//!
//! Written by the refresh task, read by the status report. The refresh task
//! runs at interrupt priority, so plain atomics are used instead of
//! embassy-sync primitives. thumbv6m has no atomic RMW; portable-atomic
//! falls back to critical sections.

use portable_atomic::{AtomicU32, Ordering};

/// Full refresh cycles completed
pub static FRAMES_COMPLETED: AtomicU32 = AtomicU32::new(0);

/// Published frames picked up at a cycle boundary
pub static FRAMES_ADOPTED: AtomicU32 = AtomicU32::new(0);

/// Rows lost to SPI errors
pub static BUS_ERRORS: AtomicU32 = AtomicU32::new(0);

/// Point-in-time copy of the counters
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RefreshStats {
    pub frames_completed: u32,
    pub frames_adopted: u32,
    pub bus_errors: u32,
}

impl RefreshStats {
    /// Read all counters
    pub fn snapshot() -> Self {
        Self {
            frames_completed: FRAMES_COMPLETED.load(Ordering::Relaxed),
            frames_adopted: FRAMES_ADOPTED.load(Ordering::Relaxed),
            bus_errors: BUS_ERRORS.load(Ordering::Relaxed),
        }
    }
}
