//! defmt logging for controller ticks

use defmt::*;
use tricolor_core::cycle::TickReport;
use tricolor_core::traits::TickObserver;

/// Logs every tick and counts consecutive RTC failures
#[derive(Default)]
pub struct DefmtObserver {
    consecutive_errors: u32,
}

impl<E: Format> TickObserver<E> for DefmtObserver {
    fn on_tick(&mut self, report: &TickReport) {
        if self.consecutive_errors > 0 {
            info!(
                "RTC back after {} failed reads",
                self.consecutive_errors
            );
            self.consecutive_errors = 0;
        }

        let time = &report.time;
        trace!(
            "{=u8}:{=u8}:{=u8} hour={} minute={}",
            time.hour,
            time.minute,
            time.second,
            report.hour_color,
            report.minute_color
        );
        if report.hours_reset {
            debug!("Hour color -> {}", report.hour_color);
        }
        if report.minutes_reset {
            debug!("Minute color -> {}", report.minute_color);
        }
    }

    fn on_read_error(&mut self, error: &E) {
        self.consecutive_errors = self.consecutive_errors.saturating_add(1);
        warn!(
            "RTC read failed ({} in a row): {}",
            self.consecutive_errors, error
        );
    }
}
