//! Segment display drivers

pub mod tm1637;

pub use tm1637::{Tm1637, BIT_DELAY_US};
