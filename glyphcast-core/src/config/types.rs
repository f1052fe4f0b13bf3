//! Configuration type definitions

use alloc::string::String;

use glyphcast_protocol::FontSize;
use serde::Deserialize;

use crate::client::DEFAULT_REQUEST_TIMEOUT_MS;
use crate::renderer::{
    RenderMode, ScrollConfig, DEFAULT_FRAME_INTERVAL_MS, DEFAULT_SCROLL_STEP,
};

/// Default display width (SH1106 / SSD1306 class panels)
pub const DEFAULT_WIDTH: u32 = 128;

/// Default display height
pub const DEFAULT_HEIGHT: u32 = 64;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// TOML could not be parsed or has the wrong shape
    Parse,
    /// Width or height is zero
    InvalidDimensions,
    /// Service URL is empty
    MissingUrl,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Parse => write!(f, "malformed configuration"),
            Self::InvalidDimensions => write!(f, "display dimensions must be non-zero"),
            Self::MissingUrl => write!(f, "font_api_url is empty"),
        }
    }
}

/// Display pipeline configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Font service endpoint, including its query separator
    pub font_api_url: String,
    /// Panel width in pixels
    pub width: u32,
    /// Panel height in pixels
    pub height: u32,
    /// Marquee (true) or centered (false)
    pub scroll_mode: bool,
    /// Marquee advance per frame in pixels
    pub scroll_step: u32,
    /// Marquee pause per frame
    pub frame_interval_ms: u32,
    /// Font size used when a call does not override it
    pub default_font_size: FontSize,
    /// Per-request HTTP timeout
    pub request_timeout_ms: u32,
    /// Pause after each text item
    pub delay_between_texts_ms: u32,
    /// How long the "font error" placeholder stays up
    pub error_hold_ms: u32,
    /// Network join timeout
    pub wifi_timeout_s: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            font_api_url: String::from("http://127.0.0.1:5000/api/font?"),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            scroll_mode: true,
            scroll_step: DEFAULT_SCROLL_STEP,
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
            default_font_size: FontSize::DEFAULT,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            delay_between_texts_ms: 1000,
            error_hold_ms: 2000,
            wifi_timeout_s: 30,
        }
    }
}

impl DisplayConfig {
    /// Check values that would make the pipeline unusable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidDimensions);
        }
        if self.font_api_url.trim().is_empty() {
            return Err(ConfigError::MissingUrl);
        }
        Ok(())
    }

    /// Scroll parameters
    pub fn scroll(&self) -> ScrollConfig {
        ScrollConfig {
            step: self.scroll_step,
            frame_interval_ms: self.frame_interval_ms,
        }
    }

    /// Render mode selected by `scroll_mode`
    pub fn render_mode(&self) -> RenderMode {
        if self.scroll_mode {
            RenderMode::Scroll(self.scroll())
        } else {
            RenderMode::Static
        }
    }
}
