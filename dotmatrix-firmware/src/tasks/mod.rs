//! Embassy async tasks
//!
//! The refresh task runs on the high-priority interrupt executor; the
//! marquee runs on the thread executor and only talks to refresh through
//! the frame mailbox and the statistics atomics.

pub mod marquee;
pub mod refresh;

pub use marquee::marquee_task;
pub use refresh::refresh_task;
