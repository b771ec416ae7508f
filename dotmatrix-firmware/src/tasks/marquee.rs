//! Banner scroll task
//!
//! Foreground frame producer. Renders a fixed banner once, then scrolls it
//! across the grid one column per step and publishes every step through the
//! mailbox. A second interval gate logs refresh statistics.

use defmt::*;
use embassy_time::{Duration, Instant, Timer};
use heapless::Vec;

use dotmatrix_core::config::{DisplayConfig, GridFrame, GRID_ROWS};
use dotmatrix_core::font::{render_text, GLYPH_HEIGHT};
use dotmatrix_core::marquee::Marquee;
use dotmatrix_core::IntervalGate;

use crate::board::GridWriter;
use crate::channels::RefreshStats;

/// Banner text
const BANNER: &str = "DOTMATRIX 32X12 ";

/// Column capacity for the rendered banner (6 columns per glyph)
const BANNER_COLUMNS: usize = 128;

/// Glyph rows are centred vertically
const BANNER_ROW_OFFSET: u8 = (GRID_ROWS as u8 - GLYPH_HEIGHT) / 2;

/// How often the gates are polled
const POLL_INTERVAL_MS: u64 = 5;

/// Marquee task
#[embassy_executor::task]
pub async fn marquee_task(mut writer: GridWriter, config: DisplayConfig) {
    info!("Marquee task started");

    let mut columns: Vec<u16, BANNER_COLUMNS> = Vec::new();
    if render_text(BANNER, BANNER_ROW_OFFSET, &mut columns).is_err() {
        warn!("Banner truncated to {} columns", columns.len());
    }

    let mut marquee = Marquee::new(&columns, usize::from(config.marquee.gap_columns));
    let mut canvas = GridFrame::blank();

    let start = Instant::now().as_ticks();
    let mut step_gate = IntervalGate::new(
        start,
        Duration::from_millis(u64::from(config.marquee.step_ms)).as_ticks(),
    );
    let mut status_gate = IntervalGate::new(
        start,
        Duration::from_millis(u64::from(config.status.interval_ms)).as_ticks(),
    );

    // Start from a known blank grid
    writer.submit(&canvas);

    loop {
        Timer::after_millis(POLL_INTERVAL_MS).await;
        let now = Instant::now().as_ticks();

        if step_gate.poll(now) {
            marquee.step(&mut canvas);
            writer.submit(&canvas);
            trace!("Marquee column {}", marquee.position());
        }

        if status_gate.poll(now) {
            let stats = RefreshStats::snapshot();
            let mailbox = writer.mailbox();
            info!(
                "Refresh: {} frames, {} adopted, {} published, {} superseded, {} bus errors",
                stats.frames_completed,
                stats.frames_adopted,
                mailbox.published(),
                mailbox.superseded(),
                stats.bus_errors
            );
        }
    }
}
