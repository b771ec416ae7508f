//! Board wiring and grid types
//!
//! Pin assignments (RP2040):
//!
//! | Signal            | GPIO | Notes                    |
//! |-------------------|------|--------------------------|
//! | SPI0 SCK (SRCLK)  | 18   | shift clock              |
//! | SPI0 MOSI (SER)   | 19   | serial data              |
//! | Latch (RCLK)      | 17   | rising edge latches      |
//! | Reset (SRCLR)     | 20   | active-low               |
//! | Output enable (OE)| 21   | polarity from config     |

use embassy_rp::gpio::AnyPin;
use embassy_rp::peripherals::{PIN_17, PIN_18, PIN_19, PIN_20, PIN_21, SPI0};
use embassy_rp::spi::{Blocking, Spi};
use embassy_rp::Peri;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

use dotmatrix_core::config::{BusConfig, GridWord, CASCADE_DEVICES, GRID_ROWS};
use dotmatrix_core::{FrameEngine, FrameMailbox, FrameWriter};
use dotmatrix_drivers::shift_register::{CascadeConfig, CascadeDriver, CascadePins};
use dotmatrix_hal::SpiConfig;
use dotmatrix_hal_rp2040::{spi_config, BlockingSpi, RpOutput};

/// Blocking SPI0 wrapped for the cascade driver
pub type GridSpi = BlockingSpi<Spi<'static, SPI0, Blocking>>;

/// Cascade driver for the grid's register chain
pub type GridCascade =
    CascadeDriver<GridSpi, RpOutput<'static>, RpOutput<'static>, RpOutput<'static>, CASCADE_DEVICES>;

/// Mailbox shared between the marquee and refresh tasks
pub type GridMailbox = FrameMailbox<'static, CriticalSectionRawMutex, GridWord, GRID_ROWS>;

/// Refresh-side state machine
pub type GridEngine =
    FrameEngine<'static, 'static, CriticalSectionRawMutex, GridWord, GRID_ROWS, CASCADE_DEVICES>;

/// Producer-side handle
pub type GridWriter = FrameWriter<'static, 'static, CriticalSectionRawMutex, GridWord, GRID_ROWS>;

/// Peripherals the register chain needs
pub struct CascadeResources {
    pub spi: Peri<'static, SPI0>,
    pub sck: Peri<'static, PIN_18>,
    pub mosi: Peri<'static, PIN_19>,
    pub latch: Peri<'static, PIN_17>,
    pub reset: Peri<'static, PIN_20>,
    pub output_enable: Peri<'static, PIN_21>,
}

impl CascadeResources {
    /// Build the driver
    ///
    /// Lines come up in their idle state: latch high, reset released and
    /// outputs disabled. [`CascadeDriver::init`] still has to run.
    pub fn into_driver(self, bus: &BusConfig) -> GridCascade {
        let config = CascadeConfig::from(bus);

        let spi = Spi::new_blocking_txonly(
            self.spi,
            self.sck,
            self.mosi,
            spi_config(&SpiConfig {
                frequency: bus.spi_frequency_hz,
                ..SpiConfig::default()
            }),
        );

        let latch = RpOutput::new(Peri::<AnyPin>::from(self.latch), true);
        let reset = RpOutput::new(
            Peri::<AnyPin>::from(self.reset),
            config.reset_polarity.level(false),
        );
        let output_enable = RpOutput::new(
            Peri::<AnyPin>::from(self.output_enable),
            config.output_enable_polarity.level(false),
        );

        CascadeDriver::new(
            BlockingSpi::new(spi),
            CascadePins {
                latch,
                reset,
                output_enable,
            },
            config,
        )
    }
}
