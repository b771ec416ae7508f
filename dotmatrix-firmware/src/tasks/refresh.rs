//! Row refresh task
//!
//! Lights one grid row per tick. Runs on the interrupt executor so the
//! foreground can never delay a row, and uses blocking SPI so each tick is
//! a single uninterrupted latch cycle.

use defmt::*;
use embassy_time::{Duration, Ticker};
use portable_atomic::Ordering;

use dotmatrix_core::config::{RefreshConfig, GRID_ROWS};

use crate::board::{GridCascade, GridEngine};
use crate::channels::{BUS_ERRORS, FRAMES_ADOPTED, FRAMES_COMPLETED};

/// Log only the first bus error and then every Nth
const BUS_ERROR_LOG_EVERY: u32 = 1000;

/// Refresh task
///
/// Owns the frame engine and the cascade driver for the lifetime of the
/// firmware.
#[embassy_executor::task]
pub async fn refresh_task(mut engine: GridEngine, mut cascade: GridCascade, refresh: RefreshConfig) {
    info!(
        "Refresh task started: {} rows/s, {} frames/s",
        refresh.row_rate_hz,
        refresh.frame_rate_hz(GRID_ROWS)
    );

    let mut ticker = Ticker::every(Duration::from_micros(u64::from(refresh.row_period_us())));

    loop {
        ticker.next().await;

        if let Err(e) = engine.tick(&mut cascade) {
            let errors = BUS_ERRORS.fetch_add(1, Ordering::Relaxed).wrapping_add(1);
            if errors == 1 || errors % BUS_ERROR_LOG_EVERY == 0 {
                warn!("Cascade bus error ({} total): {:?}", errors, e);
            }
        }

        // Export once per cycle
        if engine.active_row() == 0 {
            FRAMES_COMPLETED.store(engine.frames_completed(), Ordering::Relaxed);
            FRAMES_ADOPTED.store(engine.frames_adopted(), Ordering::Relaxed);
        }
    }
}
