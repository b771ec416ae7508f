//! Cascaded 74HC595-style shift registers
//!
//! N 8-bit serial-in/parallel-out registers share one data/clock pair; the
//! serial output of each feeds the next. Bytes written to the bus ripple
//! down the chain, so the first byte written ends up in the last device.
//!
//! # Control lines
//!
//! - `latch` (RCLK): rising edge copies every shift stage to its outputs
//! - `reset` (SRCLR): clears the shift stages while asserted
//! - `output_enable` (OE): gates the output drivers
//!
//! A transfer drives the latch low, writes the whole payload, then drives
//! it high. The outputs therefore see one edge per transfer and never show
//! a partially shifted chain.

use dotmatrix_core::config::BusConfig;
use dotmatrix_core::traits::CascadeSink;
use dotmatrix_hal::{OutputPin, Polarity, SpiBus};
use embedded_hal::delay::DelayNs;

/// Cascade driver error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CascadeError<E> {
    /// The serial bus rejected the payload
    Bus(E),
}

/// Control-line polarities and timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CascadeConfig {
    /// Width of the start-up reset pulse in microseconds
    pub reset_pulse_us: u32,
    /// Polarity of the reset line
    pub reset_polarity: Polarity,
    /// Polarity of the output-enable line
    pub output_enable_polarity: Polarity,
}

impl Default for CascadeConfig {
    fn default() -> Self {
        // 74HC595: SRCLR and OE are both active-low
        Self {
            reset_pulse_us: 10,
            reset_polarity: Polarity::ActiveLow,
            output_enable_polarity: Polarity::ActiveLow,
        }
    }
}

impl From<&BusConfig> for CascadeConfig {
    fn from(bus: &BusConfig) -> Self {
        Self {
            reset_pulse_us: bus.reset_pulse_us,
            reset_polarity: Polarity::ActiveLow,
            output_enable_polarity: if bus.output_enable_inverted {
                Polarity::ActiveLow
            } else {
                Polarity::ActiveHigh
            },
        }
    }
}

/// Control lines of the chain
pub struct CascadePins<L, R, E> {
    /// Storage-register clock
    pub latch: L,
    /// Shift-register clear
    pub reset: R,
    /// Output enable
    pub output_enable: E,
}

/// Driver for a chain of `N` cascaded shift registers
pub struct CascadeDriver<SPI, L, R, E, const N: usize> {
    spi: SPI,
    latch: L,
    reset: R,
    output_enable: E,
    config: CascadeConfig,
    outputs_enabled: bool,
    transfers: u32,
}

impl<SPI, L, R, E, const N: usize> CascadeDriver<SPI, L, R, E, N>
where
    SPI: SpiBus,
    L: OutputPin,
    R: OutputPin,
    E: OutputPin,
{
    /// Take ownership of the bus and control lines
    ///
    /// Lines are left untouched until [`CascadeDriver::init`].
    pub fn new(spi: SPI, pins: CascadePins<L, R, E>, config: CascadeConfig) -> Self {
        Self {
            spi,
            latch: pins.latch,
            reset: pins.reset,
            output_enable: pins.output_enable,
            config,
            outputs_enabled: false,
            transfers: 0,
        }
    }

    /// Bring the chain to a known state
    ///
    /// Blanks the outputs, pulses the reset line, latches the cleared
    /// registers and finally enables the outputs. Run once at start-up.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), CascadeError<SPI::Error>> {
        self.set_output_enabled(false);
        self.latch.set_high();

        self.config.reset_polarity.drive(&mut self.reset, true);
        delay.delay_us(self.config.reset_pulse_us);
        self.config.reset_polarity.drive(&mut self.reset, false);

        // Boards without a reset line tie SRCLR high; shift zeros regardless
        self.clear()?;

        self.set_output_enabled(true);
        Ok(())
    }

    /// Shift `payload` through the chain and latch it
    ///
    /// `payload[0]` is written first and ends up in the device furthest
    /// from the controller. If the bus fails the latch stays low, so the
    /// outputs keep the previous row instead of a half-shifted one.
    pub fn shift_out(&mut self, payload: &[u8; N]) -> Result<(), CascadeError<SPI::Error>> {
        self.latch.set_low();
        self.spi.write(payload).map_err(CascadeError::Bus)?;
        self.latch.set_high();
        self.transfers = self.transfers.wrapping_add(1);
        Ok(())
    }

    /// Shift and latch all zeros
    pub fn clear(&mut self) -> Result<(), CascadeError<SPI::Error>> {
        self.shift_out(&[0; N])
    }

    /// Gate the output drivers without disturbing the registers
    pub fn set_output_enabled(&mut self, enabled: bool) {
        self.config
            .output_enable_polarity
            .drive(&mut self.output_enable, enabled);
        self.outputs_enabled = enabled;
    }

    /// Output drivers are enabled
    pub fn outputs_enabled(&self) -> bool {
        self.outputs_enabled
    }

    /// Completed transfers since construction
    pub fn transfers(&self) -> u32 {
        self.transfers
    }

    /// Number of devices in the chain
    pub const fn devices(&self) -> usize {
        N
    }
}

impl<SPI, L, R, E, const N: usize> CascadeSink<N> for CascadeDriver<SPI, L, R, E, N>
where
    SPI: SpiBus,
    L: OutputPin,
    R: OutputPin,
    E: OutputPin,
{
    type Error = CascadeError<SPI::Error>;

    fn shift_out(&mut self, payload: &[u8; N]) -> Result<(), Self::Error> {
        CascadeDriver::shift_out(self, payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::RefCell;
    use heapless::Vec;

    /// Everything the mocks observe, in order
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Event {
        Pin(Line, bool),
        Byte(u8),
        DelayUs(u32),
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Line {
        Latch,
        Reset,
        Oe,
    }

    type Log = RefCell<Vec<Event, 64>>;

    struct MockPin<'a> {
        line: Line,
        high: bool,
        log: &'a Log,
    }

    impl<'a> MockPin<'a> {
        fn new(line: Line, log: &'a Log) -> Self {
            Self {
                line,
                high: false,
                log,
            }
        }
    }

    impl OutputPin for MockPin<'_> {
        fn set_high(&mut self) {
            self.high = true;
            self.log.borrow_mut().push(Event::Pin(self.line, true)).ok();
        }

        fn set_low(&mut self) {
            self.high = false;
            self.log.borrow_mut().push(Event::Pin(self.line, false)).ok();
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    struct MockSpi<'a> {
        log: &'a Log,
        fail: bool,
    }

    impl SpiBus for MockSpi<'_> {
        type Error = ();

        fn write(&mut self, data: &[u8]) -> Result<(), ()> {
            if self.fail {
                return Err(());
            }
            let mut log = self.log.borrow_mut();
            for &b in data {
                log.push(Event::Byte(b)).ok();
            }
            Ok(())
        }
    }

    struct MockDelay<'a> {
        log: &'a Log,
    }

    impl DelayNs for MockDelay<'_> {
        fn delay_ns(&mut self, ns: u32) {
            self.log.borrow_mut().push(Event::DelayUs(ns / 1_000)).ok();
        }

        fn delay_us(&mut self, us: u32) {
            self.log.borrow_mut().push(Event::DelayUs(us)).ok();
        }
    }

    type TestDriver<'a> = CascadeDriver<MockSpi<'a>, MockPin<'a>, MockPin<'a>, MockPin<'a>, 3>;

    fn driver(log: &Log, fail: bool) -> TestDriver<'_> {
        CascadeDriver::new(
            MockSpi { log, fail },
            CascadePins {
                latch: MockPin::new(Line::Latch, log),
                reset: MockPin::new(Line::Reset, log),
                output_enable: MockPin::new(Line::Oe, log),
            },
            CascadeConfig::default(),
        )
    }

    #[test]
    fn test_shift_out_frames_bytes_with_latch() {
        let log = Log::default();
        let mut cascade = driver(&log, false);

        cascade.shift_out(&[0xA1, 0xB2, 0xC3]).unwrap();

        assert_eq!(
            log.borrow()[..],
            [
                Event::Pin(Line::Latch, false),
                Event::Byte(0xA1),
                Event::Byte(0xB2),
                Event::Byte(0xC3),
                Event::Pin(Line::Latch, true),
            ]
        );
        assert_eq!(cascade.transfers(), 1);
    }

    #[test]
    fn test_one_rising_edge_per_transfer() {
        let log = Log::default();
        let mut cascade = driver(&log, false);

        for _ in 0..4 {
            cascade.shift_out(&[1, 2, 3]).unwrap();
        }

        // Every rising edge follows exactly one complete payload
        let log = log.borrow();
        let mut latched = 0;
        let mut pending = 0;
        for event in log.iter() {
            match event {
                Event::Byte(_) => pending += 1,
                Event::Pin(Line::Latch, true) => {
                    assert_eq!(pending, 3);
                    pending = 0;
                    latched += 1;
                }
                _ => {}
            }
        }
        assert_eq!(latched, 4);
        assert_eq!(cascade.transfers(), 4);
    }

    #[test]
    fn test_bus_error_leaves_latch_low() {
        let log = Log::default();
        let mut cascade = driver(&log, true);

        assert_eq!(cascade.shift_out(&[1, 2, 3]), Err(CascadeError::Bus(())));
        assert_eq!(log.borrow()[..], [Event::Pin(Line::Latch, false)]);
        assert_eq!(cascade.transfers(), 0);
    }

    #[test]
    fn test_init_sequence() {
        let log = Log::default();
        let mut cascade = driver(&log, false);
        let mut delay = MockDelay { log: &log };

        cascade.init(&mut delay).unwrap();

        assert_eq!(
            log.borrow()[..],
            [
                // Blank (OE is active-low)
                Event::Pin(Line::Oe, true),
                Event::Pin(Line::Latch, true),
                // Reset pulse (SRCLR is active-low)
                Event::Pin(Line::Reset, false),
                Event::DelayUs(10),
                Event::Pin(Line::Reset, true),
                // Latch a blank chain
                Event::Pin(Line::Latch, false),
                Event::Byte(0),
                Event::Byte(0),
                Event::Byte(0),
                Event::Pin(Line::Latch, true),
                // Enable outputs
                Event::Pin(Line::Oe, false),
            ]
        );
        assert!(cascade.outputs_enabled());
    }

    #[test]
    fn test_active_high_output_enable() {
        let log = Log::default();
        let mut cascade = CascadeDriver::<_, _, _, _, 3>::new(
            MockSpi { log: &log, fail: false },
            CascadePins {
                latch: MockPin::new(Line::Latch, &log),
                reset: MockPin::new(Line::Reset, &log),
                output_enable: MockPin::new(Line::Oe, &log),
            },
            CascadeConfig {
                output_enable_polarity: Polarity::ActiveHigh,
                ..CascadeConfig::default()
            },
        );

        cascade.set_output_enabled(true);
        cascade.set_output_enabled(false);
        assert_eq!(
            log.borrow()[..],
            [Event::Pin(Line::Oe, true), Event::Pin(Line::Oe, false)]
        );
    }

    #[test]
    fn test_config_from_bus() {
        let bus = BusConfig {
            reset_pulse_us: 25,
            output_enable_inverted: false,
            ..BusConfig::default()
        };
        let config = CascadeConfig::from(&bus);
        assert_eq!(config.reset_pulse_us, 25);
        assert_eq!(config.reset_polarity, Polarity::ActiveLow);
        assert_eq!(config.output_enable_polarity, Polarity::ActiveHigh);

        assert_eq!(
            CascadeConfig::from(&BusConfig::default()),
            CascadeConfig::default()
        );
    }

    #[test]
    fn test_clear_sends_zeros() {
        let log = Log::default();
        let mut cascade = driver(&log, false);

        cascade.clear().unwrap();
        let bytes = log
            .borrow()
            .iter()
            .filter(|e| matches!(e, Event::Byte(_)))
            .count();
        assert_eq!(bytes, 3);
        assert!(!log.borrow().contains(&Event::Byte(1)));
    }

    #[test]
    fn test_usable_as_cascade_sink() {
        fn send<S: CascadeSink<3>>(sink: &mut S) -> Result<(), S::Error> {
            sink.shift_out(&[7, 8, 9])
        }

        let log = Log::default();
        let mut cascade = driver(&log, false);
        send(&mut cascade).unwrap();
        assert!(log.borrow().contains(&Event::Byte(9)));
        assert_eq!(cascade.devices(), 3);
    }
}
