//! Seven-segment encoding
//!
//! Bit layout of a [`SegmentPattern`] (TM1637 wiring):
//!
//! ```text
//!      --A--          bit 0 = A   bit 4 = E
//!     F     B         bit 1 = B   bit 5 = F
//!      --G--          bit 2 = C   bit 6 = G
//!     E     C         bit 3 = D   bit 7 = DP
//!      --D--  DP
//! ```

use heapless::Vec;

/// One digit position worth of segment bits
pub type SegmentPattern = u8;

/// Pattern with every segment off
pub const BLANK: SegmentPattern = 0x00;

/// Number of addressable digit positions on the display controller
pub const MAX_DIGITS: usize = 6;

/// Encoded text, one pattern per display position
pub type Segments = Vec<SegmentPattern, MAX_DIGITS>;

/// Patterns for hex digits 0-F
pub const DIGIT_PATTERNS: [SegmentPattern; 16] = [
    0x3F, 0x06, 0x5B, 0x4F, 0x66, 0x6D, 0x7D, 0x07, // 0-7
    0x7F, 0x6F, 0x77, 0x7C, 0x39, 0x5E, 0x79, 0x71, // 8-F
];

/// Encode a single digit; only the low nibble is used
pub fn encode_digit(value: u8) -> SegmentPattern {
    DIGIT_PATTERNS[(value & 0x0F) as usize]
}

/// Encode a single character
///
/// Decimal digits map to their pattern, anything else is blank.
pub fn encode_char(ch: char) -> SegmentPattern {
    match ch.to_digit(10) {
        Some(digit) => encode_digit(digit as u8),
        None => BLANK,
    }
}

/// Encode text, one pattern per character
///
/// Never fails. Characters beyond [`MAX_DIGITS`] are dropped.
pub fn encode_string(text: &str) -> Segments {
    text.chars().take(MAX_DIGITS).map(encode_char).collect()
}
