//! GPIO outputs
//!
//! Wraps embassy-rp's push-pull output so it can be handed to the
//! board-agnostic cascade driver.

use embassy_rp::gpio::{AnyPin, Level, Output};
use embassy_rp::Peri;

/// RP2040 push-pull output
pub struct RpOutput<'d> {
    pin: Output<'d>,
}

impl<'d> RpOutput<'d> {
    /// Configure `pin` as an output driven to `high` immediately
    pub fn new(pin: Peri<'d, AnyPin>, high: bool) -> Self {
        Self {
            pin: Output::new(pin, Level::from(high)),
        }
    }
}

impl dotmatrix_hal::OutputPin for RpOutput<'_> {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}
