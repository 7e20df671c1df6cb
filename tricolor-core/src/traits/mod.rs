//! Hardware abstraction traits
//!
//! These traits define the interface between the color cycle controller
//! and the concrete device drivers.

pub mod display;
pub mod observer;
pub mod rtc;
pub mod shift;

pub use display::SegmentDisplay;
pub use observer::{NoopObserver, TickObserver};
pub use rtc::RealTimeClock;
pub use shift::{reset_channels, ShiftRegister};
