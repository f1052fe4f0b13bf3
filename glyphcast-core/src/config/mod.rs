//! Configuration
//!
//! Display and service settings, loadable from a TOML `[display]` table.

pub mod toml;
pub mod types;

pub use self::toml::parse_config;
pub use types::*;
