//! dotmatrix - LED Dot-Matrix Grid Firmware
//!
//! Main firmware binary for an RP2040 driving a 32x12 LED grid through six
//! cascaded 74HC595 shift registers. One row is lit per refresh tick; a
//! foreground task scrolls a banner and hands complete frames to the
//! refresh side through a single-slot mailbox.
//!
//! Executors:
//! - Interrupt executor on `SWI_IRQ_1`: the refresh task
//! - Thread executor (this `main`): the marquee task

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_time::Delay;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use dotmatrix_core::config::{GridFrame, CASCADE_DEVICES, GRID_COLUMNS, GRID_ROWS};
use dotmatrix_core::{FrameEngine, FrameMailbox};

use crate::board::{CascadeResources, GridMailbox};
use crate::config::load_display_config;

mod board;
mod channels;
mod config;
mod tasks;

/// Executor for the refresh task
static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();

// Frame storage (must live forever for task references):
// front (refresh), spare (mailbox slot), working (marquee)
static FRAMES: StaticCell<[GridFrame; 3]> = StaticCell::new();
static MAILBOX: StaticCell<GridMailbox> = StaticCell::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    EXECUTOR_HIGH.on_interrupt()
}

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("dotmatrix firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_display_config();

    // Setup the register chain
    let mut cascade = CascadeResources {
        spi: p.SPI0,
        sck: p.PIN_18,
        mosi: p.PIN_19,
        latch: p.PIN_17,
        reset: p.PIN_20,
        output_enable: p.PIN_21,
    }
    .into_driver(&config.bus);

    if let Err(e) = cascade.init(&mut Delay) {
        // Refresh retries every row, so keep going
        error!("Cascade init failed: {:?}", e);
    }
    info!(
        "Cascade initialized: {} devices, {}x{} grid",
        CASCADE_DEVICES, GRID_COLUMNS, GRID_ROWS
    );

    // Frame buffers and mailbox
    let [front, spare, working] = FRAMES.init([GridFrame::blank(); 3]);
    let mailbox: &'static GridMailbox = MAILBOX.init(FrameMailbox::new(spare));
    let writer = mailbox.writer(working);

    let engine = match FrameEngine::new(front, mailbox) {
        Ok(engine) => engine,
        Err(e) => {
            // Geometry constants disagree; nothing sensible to display
            error!("Grid geometry invalid: {:?}", e);
            cascade.set_output_enabled(false);
            loop {
                cortex_m::asm::wfi();
            }
        }
    };

    // Refresh runs above the thread executor
    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let high_spawner = EXECUTOR_HIGH.start(interrupt::SWI_IRQ_1);
    high_spawner
        .spawn(tasks::refresh_task(engine, cascade, config.refresh))
        .unwrap();

    spawner.spawn(tasks::marquee_task(writer, config)).unwrap();

    info!("All tasks spawned, firmware running");
}
