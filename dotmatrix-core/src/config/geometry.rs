//! Grid geometry
//!
//! Compile-time dimensions of the reference board and the helpers that
//! derive the cascade layout from them.

use crate::frame::{Frame, RowWord};

/// Rows driven by one row-select register
pub const ROWS_PER_BANK: usize = 8;

/// Number of rows on the reference grid
pub const GRID_ROWS: usize = 12;

/// Row word of the reference grid (32 columns)
pub type GridWord = u32;

/// Number of columns on the reference grid
pub const GRID_COLUMNS: u32 = <GridWord as RowWord>::BITS;

/// Shift registers in the reference chain (2 row-select + 4 pixel)
pub const CASCADE_DEVICES: usize = cascade_devices::<GridWord>(GRID_ROWS);

/// Frame of the reference grid
pub type GridFrame = Frame<GridWord, GRID_ROWS>;

/// Row-select registers needed for `rows` rows
pub const fn bank_count(rows: usize) -> usize {
    rows.div_ceil(ROWS_PER_BANK)
}

/// Total shift registers needed for a grid of `rows` rows of `W`
pub const fn cascade_devices<W: RowWord>(rows: usize) -> usize {
    bank_count(rows) + W::BYTES
}
