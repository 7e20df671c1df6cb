//! Packed-decimal conversion
//!
//! Each nibble holds one decimal digit: 36 is stored as `0x36`.
//! Both functions are total over the two-digit range (0-99 / 0x00-0x99).

/// Decode a packed-decimal byte
pub const fn bcd_to_binary(bcd: u8) -> u8 {
    (bcd & 0x0F) + 10 * (bcd >> 4)
}

/// Encode a value in 0-99 as packed decimal
pub const fn binary_to_bcd(value: u8) -> u8 {
    ((value / 10) << 4) + (value % 10)
}
