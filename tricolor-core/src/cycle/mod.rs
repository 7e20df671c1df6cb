//! Per-second color cycle
//!
//! The controller reads the RTC, rotates the active color channel of the
//! hour and minute banks, writes all shift registers and the segment
//! display. The pacer decides how long to wait before the next tick.

pub mod controller;
pub mod pacing;

pub use controller::{ChannelBank, ColorCycleController, TickReport};
pub use pacing::{TickPacer, TICK_PERIOD_MS};
