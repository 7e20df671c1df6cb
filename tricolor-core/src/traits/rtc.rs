//! Real-time clock trait

use crate::time::Time;

/// Battery-backed time source
pub trait RealTimeClock {
    /// Error type for bus or validation failures
    type Error;

    /// Read the current time
    fn read_time(&mut self) -> Result<Time, Self::Error>;

    /// Set the current time
    fn write_time(&mut self, time: &Time) -> Result<(), Self::Error>;
}
