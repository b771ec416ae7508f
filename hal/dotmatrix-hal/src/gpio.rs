//! GPIO pin abstractions
//!
//! Provides the output-pin trait used for the shift-register control
//! lines, plus a polarity helper for active-low signals.

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;
}

/// Electrical polarity of a control line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Asserted when the pin is high
    #[default]
    ActiveHigh,
    /// Asserted when the pin is low (e.g. 74HC595 `OE` and `SRCLR`)
    ActiveLow,
}

impl Polarity {
    /// Pin level that corresponds to the logical `asserted` state
    pub const fn level(self, asserted: bool) -> bool {
        match self {
            Polarity::ActiveHigh => asserted,
            Polarity::ActiveLow => !asserted,
        }
    }

    /// Drive `pin` to the logical `asserted` state
    pub fn drive<P: OutputPin + ?Sized>(self, pin: &mut P, asserted: bool) {
        pin.set_state(self.level(asserted));
    }
}
