//! TOML configuration loading
//!
//! Expected layout:
//!
//! ```toml
//! [display]
//! font_api_url = "http://192.168.1.20:5000/api/font?"
//! scroll_mode = true
//! scroll_step = 1
//! default_font_size = 16
//! ```
//!
//! Every key is optional; missing keys take their defaults. A missing
//! `[display]` table yields the default configuration.

use serde::Deserialize;

use super::types::{ConfigError, DisplayConfig};

#[derive(Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    display: DisplayConfig,
}

/// Parse and validate a TOML configuration
pub fn parse_config(input: &str) -> Result<DisplayConfig, ConfigError> {
    let file: ConfigFile = ::toml::from_str(input).map_err(|_e| {
        warn!("config parse failed");
        ConfigError::Parse
    })?;

    file.display.validate()?;
    Ok(file.display)
}
