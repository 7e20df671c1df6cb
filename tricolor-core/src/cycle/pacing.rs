//! Tick pacing
//!
//! Consecutive ticks start at least one period apart. Time spent inside a
//! tick shortens the wait; overruns are not carried into later ticks.

/// Nominal tick period
pub const TICK_PERIOD_MS: u64 = 1000;

/// Computes the end-of-tick wait from a monotonic millisecond clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickPacer {
    period_ms: u64,
}

impl Default for TickPacer {
    fn default() -> Self {
        Self::new(TICK_PERIOD_MS)
    }
}

impl TickPacer {
    /// Create a pacer with the given period
    pub const fn new(period_ms: u64) -> Self {
        Self { period_ms }
    }

    /// Tick period in milliseconds
    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }

    /// Milliseconds to sleep before the next tick may start
    ///
    /// Zero when the tick already used the whole period.
    pub fn remaining_ms(&self, tick_start_ms: u64, now_ms: u64) -> u64 {
        let elapsed = now_ms.saturating_sub(tick_start_ms);
        self.period_ms.saturating_sub(elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_remaining() {
        let pacer = TickPacer::default();
        assert_eq!(pacer.period_ms(), 1000);
        assert_eq!(pacer.remaining_ms(5_000, 5_000), 1000);
        assert_eq!(pacer.remaining_ms(5_000, 5_120), 880);
        assert_eq!(pacer.remaining_ms(5_000, 6_000), 0);
    }

    #[test]
    fn test_overrun_not_carried() {
        let pacer = TickPacer::default();
        // A stalled tick waits nothing, the next one gets a full period
        assert_eq!(pacer.remaining_ms(0, 2_500), 0);
        assert_eq!(pacer.remaining_ms(2_500, 2_510), 990);
    }

    #[test]
    fn test_clock_going_backwards_waits_full_period() {
        let pacer = TickPacer::new(500);
        assert_eq!(pacer.remaining_ms(1_000, 900), 500);
    }

    proptest! {
        #[test]
        fn tick_never_shorter_than_period(start in 0u64..1_000_000, work in 0u64..5_000) {
            let pacer = TickPacer::default();
            let now = start + work;
            let next_start = now + pacer.remaining_ms(start, now);
            prop_assert!(next_start - start >= TICK_PERIOD_MS);
        }
    }
}
