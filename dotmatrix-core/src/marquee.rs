//! Scrolling banner
//!
//! Feeds a column bitmap into a frame one column per step. Column 0 is the
//! entry edge: each step shifts the frame one column towards the high bit
//! and writes the next source column into column 0. After the last source
//! column, `gap` blank columns pass before the banner repeats.

use crate::frame::{Frame, RowWord};

/// Endless column feed over a borrowed banner
#[derive(Debug, Clone)]
pub struct Marquee<'a> {
    /// Source columns, bit `r` = row `r`
    columns: &'a [u16],
    /// Blank columns between repetitions
    gap: usize,
    /// Next column to emit, in `0..period()`
    position: usize,
}

impl<'a> Marquee<'a> {
    /// Marquee over `columns` with `gap` blank columns between passes
    pub fn new(columns: &'a [u16], gap: usize) -> Self {
        Self {
            columns,
            gap,
            position: 0,
        }
    }

    /// Columns in one full pass, including the gap
    pub fn period(&self) -> usize {
        self.columns.len() + self.gap
    }

    /// Position of the next column within the pass
    pub fn position(&self) -> usize {
        self.position
    }

    /// Restart from the first source column
    pub fn rewind(&mut self) {
        self.position = 0;
    }

    /// Next column in the feed
    pub fn next_column(&mut self) -> u16 {
        let period = self.period();
        if period == 0 {
            return 0;
        }

        let column = self.columns.get(self.position).copied().unwrap_or(0);
        self.position = (self.position + 1) % period;
        column
    }

    /// Scroll `frame` by one column, bringing the next column in at column 0
    pub fn step<W: RowWord, const ROWS: usize>(&mut self, frame: &mut Frame<W, ROWS>) {
        frame.shift_left(1);
        let column = self.next_column();
        for row in 0..ROWS.min(u16::BITS as usize) {
            frame.set_pixel(0, row, (column >> row) & 1 == 1);
        }
    }
}
