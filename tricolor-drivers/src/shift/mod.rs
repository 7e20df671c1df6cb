//! Shift register drivers

pub mod sipo;

pub use sipo::SipoChannel;
