//! Per-second clock task
//!
//! Owns the controller and every device. Each tick starts at least one
//! period after the previous one; a tick that overruns is followed
//! immediately by the next. A failed RTC read still waits out the period
//! so a dead bus is retried once per second rather than in a tight loop.

use defmt::*;
use embassy_time::{Instant, Timer};
use tricolor_core::cycle::TickPacer;

use crate::board::Clock;

#[embassy_executor::task]
pub async fn clock_task(mut clock: Clock) {
    info!("Clock task started");

    let pacer = TickPacer::default();

    loop {
        let start = Instant::now();

        // Failures are already reported through the observer
        let _ = clock.tick();

        let wait = pacer.remaining_ms(start.as_millis(), Instant::now().as_millis());
        Timer::after_millis(wait).await;
    }
}
