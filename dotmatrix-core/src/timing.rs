//! Non-blocking interval polling
//!
//! Schedulers compare a free-running tick counter against a recorded mark.
//! Subtraction wraps, so counter rollover is harmless as long as polls
//! happen at least once per counter period.

/// Free-running tick counter value
pub trait Ticks: Copy + PartialOrd {
    /// `self - earlier`, modulo the counter width
    fn elapsed_since(self, earlier: Self) -> Self;
}

impl Ticks for u32 {
    fn elapsed_since(self, earlier: Self) -> Self {
        self.wrapping_sub(earlier)
    }
}

impl Ticks for u64 {
    fn elapsed_since(self, earlier: Self) -> Self {
        self.wrapping_sub(earlier)
    }
}

/// Whether `interval` ticks have passed since `mark`
///
/// On `true` the mark moves to `now`, so the next interval is measured
/// from this poll rather than from the previous deadline.
pub fn interval_elapsed<T: Ticks>(mark: &mut T, now: T, interval: T) -> bool {
    if now.elapsed_since(*mark) >= interval {
        *mark = now;
        true
    } else {
        false
    }
}

/// A mark plus the interval it is polled against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IntervalGate<T> {
    mark: T,
    interval: T,
}

impl<T: Ticks> IntervalGate<T> {
    /// Gate that first opens `interval` ticks after `now`
    pub fn new(now: T, interval: T) -> Self {
        Self {
            mark: now,
            interval,
        }
    }

    /// Poll the gate; true at most once per interval
    pub fn poll(&mut self, now: T) -> bool {
        interval_elapsed(&mut self.mark, now, self.interval)
    }

    /// Restart the interval from `now`
    pub fn reset(&mut self, now: T) {
        self.mark = now;
    }

    /// Interval in ticks
    pub fn interval(&self) -> T {
        self.interval
    }

    /// Change the interval without moving the mark
    pub fn set_interval(&mut self, interval: T) {
        self.interval = interval;
    }
}
