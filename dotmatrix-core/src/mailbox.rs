//! Pending-frame hand-off between the producer and the refresh context
//!
//! Three frame buffers circulate between three owners:
//!
//! ```text
//!   FrameWriter.working ──publish──▶ FrameMailbox.slot ──adopt──▶ FrameEngine.front
//!          ▲                          │        ▲                        │
//!          └──────── stale buffer ────┘        └───── old front ────────┘
//! ```
//!
//! Publishing and adopting each exchange two `&mut Frame` references and
//! flip the update flag inside one short critical section. No frame is
//! ever copied across contexts, and since every buffer has exactly one
//! owner at any instant, a frame can never be adopted half-written.
//!
//! The slot holds at most one pending frame: publishing again before the
//! engine adopts replaces the earlier frame (last write wins).

use core::cell::RefCell;
use core::mem;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;

use crate::frame::{Frame, RowWord};

struct Slot<'f, W: RowWord, const ROWS: usize> {
    frame: &'f mut Frame<W, ROWS>,
    /// Update-pending flag
    pending: bool,
    /// Frames published since start-up
    published: u32,
    /// Frames replaced before the engine adopted them
    superseded: u32,
}

/// Single-slot, last-write-wins frame mailbox
///
/// `M` selects the lock: `CriticalSectionRawMutex` when the refresh step
/// runs in interrupt context, `NoopRawMutex` when everything shares one
/// executor.
pub struct FrameMailbox<'f, M: RawMutex, W: RowWord, const ROWS: usize> {
    inner: Mutex<M, RefCell<Slot<'f, W, ROWS>>>,
}

impl<'f, M: RawMutex, W: RowWord, const ROWS: usize> FrameMailbox<'f, M, W, ROWS> {
    /// Create a mailbox around the spare buffer
    ///
    /// The spare's contents are never displayed; only published frames
    /// are adopted.
    pub fn new(spare: &'f mut Frame<W, ROWS>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Slot {
                frame: spare,
                pending: false,
                published: 0,
                superseded: 0,
            })),
        }
    }

    /// Producer handle owning the `working` buffer
    pub fn writer<'m>(
        &'m self,
        working: &'f mut Frame<W, ROWS>,
    ) -> FrameWriter<'m, 'f, M, W, ROWS> {
        FrameWriter {
            mailbox: self,
            working,
        }
    }

    /// A published frame is waiting for the next wraparound
    pub fn is_pending(&self) -> bool {
        self.inner.lock(|slot| slot.borrow().pending)
    }

    /// Frames published since start-up
    pub fn published(&self) -> u32 {
        self.inner.lock(|slot| slot.borrow().published)
    }

    /// Frames that were replaced before being adopted
    pub fn superseded(&self) -> u32 {
        self.inner.lock(|slot| slot.borrow().superseded)
    }

    /// Exchange `buffer` with the slot and raise the update flag
    fn publish(&self, buffer: &mut &'f mut Frame<W, ROWS>) {
        self.inner.lock(|slot| {
            let mut slot = slot.borrow_mut();
            mem::swap(&mut slot.frame, buffer);
            if slot.pending {
                slot.superseded = slot.superseded.wrapping_add(1);
            }
            slot.pending = true;
            slot.published = slot.published.wrapping_add(1);
        })
    }

    /// If a frame is pending, exchange it with `front` and clear the flag
    ///
    /// Returns whether `front` now refers to a newly published frame.
    pub(crate) fn adopt(&self, front: &mut &'f mut Frame<W, ROWS>) -> bool {
        self.inner.lock(|slot| {
            let mut slot = slot.borrow_mut();
            if !slot.pending {
                return false;
            }
            mem::swap(&mut slot.frame, front);
            slot.pending = false;
            true
        })
    }
}

/// Producer side of the mailbox
///
/// Owns the buffer frames are built in. After each publish that buffer is
/// whatever the mailbox handed back (a superseded or retired frame), so
/// every submission writes a complete frame.
pub struct FrameWriter<'m, 'f, M: RawMutex, W: RowWord, const ROWS: usize> {
    mailbox: &'m FrameMailbox<'f, M, W, ROWS>,
    working: &'f mut Frame<W, ROWS>,
}

impl<'m, 'f, M: RawMutex, W: RowWord, const ROWS: usize> FrameWriter<'m, 'f, M, W, ROWS> {
    /// Copy `frame` into the working buffer and publish it
    pub fn submit(&mut self, frame: &Frame<W, ROWS>) {
        *self.working = *frame;
        self.mailbox.publish(&mut self.working);
    }

    /// Publish raw row words
    pub fn submit_rows(&mut self, rows: &[W; ROWS]) {
        self.working.copy_from_rows(rows);
        self.mailbox.publish(&mut self.working);
    }

    /// Build a frame in place, starting from blank, then publish it
    pub fn publish_with<F>(&mut self, build: F)
    where
        F: FnOnce(&mut Frame<W, ROWS>),
    {
        self.working.clear();
        build(self.working);
        self.mailbox.publish(&mut self.working);
    }

    /// The previous publish has not been adopted yet
    pub fn is_pending(&self) -> bool {
        self.mailbox.is_pending()
    }

    /// Mailbox this writer publishes to
    pub fn mailbox(&self) -> &'m FrameMailbox<'f, M, W, ROWS> {
        self.mailbox
    }
}
