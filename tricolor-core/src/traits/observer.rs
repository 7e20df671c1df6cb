//! Tick observation hooks
//!
//! The controller reports what it did through this trait instead of
//! logging itself, so logging never runs inside the protocol drivers.

use crate::cycle::TickReport;

/// Receives the outcome of every controller tick
///
/// `E` is the error type of the clock being read.
pub trait TickObserver<E> {
    /// A tick completed and all outputs were written
    fn on_tick(&mut self, report: &TickReport);

    /// The RTC read failed; outputs were left untouched
    fn on_read_error(&mut self, error: &E);
}

/// Observer that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl<E> TickObserver<E> for NoopObserver {
    fn on_tick(&mut self, _report: &TickReport) {}

    fn on_read_error(&mut self, _error: &E) {}
}
