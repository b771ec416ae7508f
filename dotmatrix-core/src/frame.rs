//! Bit-packed pixel frames
//!
//! A frame is `ROWS` row words. Bit `k` of row `r` is the pixel at column
//! `k`, row `r`. The word type fixes the grid width, so a 32-column grid
//! uses `u32` rows and an 8-column grid uses `u8` rows.

use core::fmt::Debug;

/// Unsigned integer usable as one row of pixels
pub trait RowWord: Copy + Eq + Debug + Send + 'static {
    /// Number of pixel columns in one row
    const BITS: u32;
    /// Number of bytes one row occupies on the cascade
    const BYTES: usize;
    /// All pixels off
    const ZERO: Self;
    /// All pixels on
    const ONES: Self;

    /// Logical shift towards higher columns; bits past the width are lost
    fn shl(self, amount: u32) -> Self;

    /// Logical shift towards column 0; bits shifted below 0 are lost
    fn shr(self, amount: u32) -> Self;

    /// State of the pixel at `column` (false when out of range)
    fn bit(self, column: u32) -> bool;

    /// Copy of `self` with the pixel at `column` set to `on`
    fn with_bit(self, column: u32, on: bool) -> Self;

    /// Bitwise complement
    fn invert(self) -> Self;

    /// Number of lit pixels
    fn count_lit(self) -> u32;

    /// Write the row big-endian into `out` (`out.len() == Self::BYTES`)
    fn write_be(self, out: &mut [u8]);
}

macro_rules! impl_row_word {
    ($($ty:ty),*) => {
        $(
            impl RowWord for $ty {
                const BITS: u32 = <$ty>::BITS;
                const BYTES: usize = core::mem::size_of::<$ty>();
                const ZERO: Self = 0;
                const ONES: Self = <$ty>::MAX;

                #[inline]
                fn shl(self, amount: u32) -> Self {
                    self.checked_shl(amount).unwrap_or(0)
                }

                #[inline]
                fn shr(self, amount: u32) -> Self {
                    self.checked_shr(amount).unwrap_or(0)
                }

                #[inline]
                fn bit(self, column: u32) -> bool {
                    column < Self::BITS && (self >> column) & 1 == 1
                }

                #[inline]
                fn with_bit(self, column: u32, on: bool) -> Self {
                    if column >= Self::BITS {
                        return self;
                    }
                    let mask: $ty = 1 << column;
                    if on {
                        self | mask
                    } else {
                        self & !mask
                    }
                }

                #[inline]
                fn invert(self) -> Self {
                    !self
                }

                #[inline]
                fn count_lit(self) -> u32 {
                    self.count_ones()
                }

                #[inline]
                fn write_be(self, out: &mut [u8]) {
                    out.copy_from_slice(&self.to_be_bytes());
                }
            }
        )*
    };
}

impl_row_word!(u8, u16, u32, u64);

/// Fixed-size pixel bitmap
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Frame<W: RowWord, const ROWS: usize> {
    rows: [W; ROWS],
}

impl<W: RowWord, const ROWS: usize> Default for Frame<W, ROWS> {
    fn default() -> Self {
        Self::blank()
    }
}

impl<W: RowWord, const ROWS: usize> Frame<W, ROWS> {
    /// Number of rows
    pub const HEIGHT: usize = ROWS;
    /// Number of columns
    pub const WIDTH: u32 = W::BITS;

    /// Frame with every pixel off
    pub const fn blank() -> Self {
        Self {
            rows: [W::ZERO; ROWS],
        }
    }

    /// Frame from raw row words
    pub const fn from_rows(rows: [W; ROWS]) -> Self {
        Self { rows }
    }

    /// Raw row words
    pub fn rows(&self) -> &[W; ROWS] {
        &self.rows
    }

    /// Row word `row`, or all-off if out of range
    pub fn row(&self, row: usize) -> W {
        self.rows.get(row).copied().unwrap_or(W::ZERO)
    }

    /// Replace row `row`; out-of-range rows are ignored
    pub fn set_row(&mut self, row: usize, value: W) {
        if let Some(slot) = self.rows.get_mut(row) {
            *slot = value;
        }
    }

    /// Overwrite every row from `rows`
    pub fn copy_from_rows(&mut self, rows: &[W; ROWS]) {
        self.rows = *rows;
    }

    /// Pixel state; out-of-range coordinates read as off
    pub fn pixel(&self, column: u32, row: usize) -> bool {
        self.row(row).bit(column)
    }

    /// Set a pixel; out-of-range coordinates are ignored
    pub fn set_pixel(&mut self, column: u32, row: usize, on: bool) {
        if let Some(slot) = self.rows.get_mut(row) {
            *slot = slot.with_bit(column, on);
        }
    }

    /// Turn every pixel off
    pub fn clear(&mut self) {
        self.rows = [W::ZERO; ROWS];
    }

    /// Turn every pixel on
    pub fn fill(&mut self) {
        self.rows = [W::ONES; ROWS];
    }

    /// Invert every pixel
    pub fn invert(&mut self) {
        for row in self.rows.iter_mut() {
            *row = row.invert();
        }
    }

    /// Number of lit pixels in the whole frame
    pub fn count_lit(&self) -> u32 {
        self.rows.iter().map(|row| row.count_lit()).sum()
    }

    /// Shift every row `amount` columns towards the high bit
    ///
    /// Pixels pushed past the last column are dropped and column 0 fills
    /// with off pixels. An amount of at least the row width clears the frame.
    pub fn shift_left(&mut self, amount: u32) {
        for row in self.rows.iter_mut() {
            *row = row.shl(amount);
        }
    }

    /// Shift every row `amount` columns towards column 0
    ///
    /// Mirror of [`Frame::shift_left`].
    pub fn shift_right(&mut self, amount: u32) {
        for row in self.rows.iter_mut() {
            *row = row.shr(amount);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    type Grid = Frame<u32, 12>;

    #[test]
    fn test_blank_frame() {
        let frame = Grid::blank();
        assert_eq!(frame.count_lit(), 0);
        assert_eq!(frame, Grid::default());
        assert_eq!(Grid::WIDTH, 32);
        assert_eq!(Grid::HEIGHT, 12);
    }

    #[test]
    fn test_set_and_read_pixel() {
        let mut frame = Grid::blank();
        frame.set_pixel(0, 0, true);
        frame.set_pixel(31, 11, true);
        assert!(frame.pixel(0, 0));
        assert!(frame.pixel(31, 11));
        assert_eq!(frame.row(0), 1);
        assert_eq!(frame.row(11), 0x8000_0000);

        frame.set_pixel(0, 0, false);
        assert!(!frame.pixel(0, 0));
        assert_eq!(frame.count_lit(), 1);
    }

    #[test]
    fn test_out_of_range_ignored() {
        let mut frame = Grid::blank();
        frame.set_pixel(32, 0, true);
        frame.set_pixel(0, 12, true);
        frame.set_row(40, 0xFFFF_FFFF);
        assert_eq!(frame.count_lit(), 0);
        assert!(!frame.pixel(99, 99));
        assert_eq!(frame.row(12), 0);
    }

    #[test]
    fn test_fill_clear_invert() {
        let mut frame = Frame::<u8, 2>::blank();
        frame.fill();
        assert_eq!(frame.count_lit(), 16);
        frame.set_row(1, 0b1111_0000);
        frame.invert();
        assert_eq!(frame.rows(), &[0x00, 0x0F]);
        frame.clear();
        assert_eq!(frame.count_lit(), 0);
    }

    #[test]
    fn test_shift_drops_overflow() {
        let mut frame = Frame::<u8, 2>::from_rows([0b1000_0001, 0b0100_0010]);
        frame.shift_left(1);
        assert_eq!(frame.rows(), &[0b0000_0010, 0b1000_0100]);

        frame.shift_right(2);
        assert_eq!(frame.rows(), &[0b0000_0000, 0b0010_0001]);
    }

    #[test]
    fn test_shift_by_width_clears() {
        let mut frame = Grid::blank();
        frame.fill();
        frame.shift_left(32);
        assert_eq!(frame.count_lit(), 0);

        frame.fill();
        frame.shift_right(100);
        assert_eq!(frame.count_lit(), 0);
    }

    #[test]
    fn test_shift_zero_is_identity() {
        let mut frame = Grid::from_rows([0xDEAD_BEEF; 12]);
        frame.shift_left(0);
        frame.shift_right(0);
        assert_eq!(frame.row(5), 0xDEAD_BEEF);
    }

    #[test]
    fn test_write_be() {
        let mut out = [0u8; 4];
        0x1234_5678u32.write_be(&mut out);
        assert_eq!(out, [0x12, 0x34, 0x56, 0x78]);

        let mut one = [0u8; 1];
        0xA5u8.write_be(&mut one);
        assert_eq!(one, [0xA5]);
    }

    proptest! {
        #[test]
        fn prop_shift_left_truncates(v in any::<u32>(), k in 0u32..40) {
            let mut frame = Frame::<u32, 1>::from_rows([v]);
            frame.shift_left(k);
            let expected = if k >= 32 { 0 } else { v << k };
            prop_assert_eq!(frame.row(0), expected);
        }

        #[test]
        fn prop_shift_right_truncates(v in any::<u16>(), k in 0u32..20) {
            let mut frame = Frame::<u16, 1>::from_rows([v]);
            frame.shift_right(k);
            let expected = if k >= 16 { 0 } else { v >> k };
            prop_assert_eq!(frame.row(0), expected);
        }

        #[test]
        fn prop_pixel_roundtrip(col in 0u32..32, row in 0usize..12) {
            let mut frame = Grid::blank();
            frame.set_pixel(col, row, true);
            prop_assert!(frame.pixel(col, row));
            prop_assert_eq!(frame.count_lit(), 1);
        }
    }
}
