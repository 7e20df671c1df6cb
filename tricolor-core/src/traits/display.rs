//! Segment display trait

use crate::segments::SegmentPattern;

/// Multi-digit seven-segment display
pub trait SegmentDisplay {
    /// Write patterns starting at digit `position`, then light the display
    fn write(&mut self, segments: &[SegmentPattern], position: u8);
}
