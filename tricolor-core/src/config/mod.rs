//! Configuration types
//!
//! Board wiring and the boot-time clock setting. The firmware embeds a
//! small TOML file and parses it with [`parse_config`].

pub mod parser;
pub mod types;

pub use parser::{parse_config, ParseError};
pub use types::*;
