//! Row multiplexer / frame engine
//!
//! Called once per refresh tick. Each call lights exactly one row: it
//! builds the cascade payload for the active row of the current frame,
//! hands it to a [`CascadeSink`], and advances to the next row, wrapping
//! to row 0 after the last one. At the cycle boundary, before row 0 is
//! built, a frame waiting in the mailbox is swapped in. That swap is the
//! only place the displayed bitmap changes, so every refresh cycle shows
//! one self-consistent frame.
//!
//! # Payload layout
//!
//! ```text
//!   payload[0 .. BANKS]          row select, highest bank first
//!   payload[BANKS .. BANKS + B]  row word, most-significant byte first
//! ```
//!
//! Read as a big-endian integer the row-select field equals `1 << row`,
//! so row 0 is bank A bit 0 and row 8 is bank B bit 0.

use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::config::geometry::{bank_count, ROWS_PER_BANK};
use crate::frame::{Frame, RowWord};
use crate::mailbox::FrameMailbox;
use crate::traits::CascadeSink;

/// Engine construction error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GeometryError {
    /// Grid has no rows
    NoRows,
    /// Cascade length does not match row-select banks plus row bytes
    DeviceCountMismatch {
        /// Devices the geometry needs
        expected: usize,
        /// Devices the engine was instantiated with
        actual: usize,
    },
}

/// Bytes for one refresh tick
///
/// Only built by [`FrameEngine`], so `banks` always fits inside `bytes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RowPayload<const N: usize> {
    row: usize,
    banks: usize,
    bytes: [u8; N],
}

impl<const N: usize> RowPayload<N> {
    /// Row these bytes light
    pub fn row(&self) -> usize {
        self.row
    }

    /// Full cascade payload, row-select bytes first
    pub fn bytes(&self) -> &[u8; N] {
        &self.bytes
    }

    /// Row-select portion
    pub fn row_select(&self) -> &[u8] {
        &self.bytes[..self.banks]
    }

    /// Pixel portion
    pub fn pixels(&self) -> &[u8] {
        &self.bytes[self.banks..]
    }
}

/// Write the one-hot row-select pattern for `row` into `select`
///
/// `select` holds one byte per bank, highest bank first. A row beyond the
/// last bank leaves every byte zero.
pub fn encode_row_select(row: usize, select: &mut [u8]) {
    select.fill(0);
    let bank = row / ROWS_PER_BANK;
    if bank >= select.len() {
        return;
    }
    let index = select.len() - 1 - bank;
    select[index] = 1 << (row % ROWS_PER_BANK);
}

/// Row-multiplexing state machine
///
/// `N` is the number of cascaded devices and must equal
/// `bank_count(ROWS) + W::BYTES`.
pub struct FrameEngine<'m, 'f, M: RawMutex, W: RowWord, const ROWS: usize, const N: usize> {
    front: &'f mut Frame<W, ROWS>,
    mailbox: &'m FrameMailbox<'f, M, W, ROWS>,
    row: usize,
    frames_completed: u32,
    frames_adopted: u32,
}

impl<'m, 'f, M, W, const ROWS: usize, const N: usize> FrameEngine<'m, 'f, M, W, ROWS, N>
where
    M: RawMutex,
    W: RowWord,
{
    /// Row-select bytes at the head of every payload
    pub const BANKS: usize = bank_count(ROWS);

    /// Create an engine displaying `front` and adopting from `mailbox`
    pub fn new(
        front: &'f mut Frame<W, ROWS>,
        mailbox: &'m FrameMailbox<'f, M, W, ROWS>,
    ) -> Result<Self, GeometryError> {
        if ROWS == 0 {
            return Err(GeometryError::NoRows);
        }
        let expected = Self::BANKS + W::BYTES;
        if expected != N {
            return Err(GeometryError::DeviceCountMismatch {
                expected,
                actual: N,
            });
        }

        Ok(Self {
            front,
            mailbox,
            row: 0,
            frames_completed: 0,
            frames_adopted: 0,
        })
    }

    /// Row the next tick will light
    pub fn active_row(&self) -> usize {
        self.row
    }

    /// Frame currently being displayed
    ///
    /// A pending frame only replaces this once the next cycle starts.
    pub fn current(&self) -> &Frame<W, ROWS> {
        self.front
    }

    /// Full refresh cycles completed
    pub fn frames_completed(&self) -> u32 {
        self.frames_completed
    }

    /// Published frames adopted at a wraparound
    pub fn frames_adopted(&self) -> u32 {
        self.frames_adopted
    }

    /// Build the payload for the active row and advance
    ///
    /// Does not touch hardware; [`FrameEngine::tick`] is this plus the
    /// shift-out.
    pub fn next_payload(&mut self) -> RowPayload<N> {
        if self.row == 0 && self.mailbox.adopt(&mut self.front) {
            self.frames_adopted = self.frames_adopted.wrapping_add(1);
        }

        let row = self.row;
        let mut bytes = [0u8; N];
        let (select, pixels) = bytes.split_at_mut(Self::BANKS);
        encode_row_select(row, select);
        self.front.row(row).write_be(pixels);

        self.advance();

        RowPayload {
            row,
            banks: Self::BANKS,
            bytes,
        }
    }

    /// One refresh tick: light the active row on `sink`, then advance
    ///
    /// The row advances even if the sink fails, so a bus error costs one
    /// dark row rather than stalling the scan. Returns the row that was sent.
    pub fn tick<S: CascadeSink<N>>(&mut self, sink: &mut S) -> Result<usize, S::Error> {
        let payload = self.next_payload();
        sink.shift_out(&payload.bytes)?;
        Ok(payload.row)
    }

    fn advance(&mut self) {
        self.row += 1;
        if self.row >= ROWS {
            self.row = 0;
            self.frames_completed = self.frames_completed.wrapping_add(1);
        }
    }
}
