//! Board-agnostic core of the Glyphcast text display
//!
//! Renders arbitrary Unicode text on a small monochrome panel by fetching
//! per-character bitmaps from a remote font service. Everything here is
//! independent of the actual panel, HTTP stack and network hardware:
//!
//! - Collaborator traits (HTTP transport, pixel display, connectivity)
//! - Font service client and glyph cache
//! - Line compositor and static/marquee renderer
//! - Per-item state machine and the pipeline controller
//! - Configuration type definitions and TOML loading

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

// Must come first so the logging macros are visible to every module
#[macro_use]
mod fmt;

pub mod bitmap;
pub mod cache;
pub mod client;
pub mod compositor;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod renderer;
pub mod traits;

#[cfg(test)]
mod testing;

pub use bitmap::{Bitmap, Canvas, CompositeBitmap, Glyph};
pub use cache::{CacheKey, CacheStats, GlyphCache};
pub use client::FontServiceClient;
pub use compositor::LineCompositor;
pub use config::{parse_config, ConfigError, DisplayConfig};
pub use error::{ApplicationError, CompositeError, FetchError, InitializationError, ProtocolError};
pub use pipeline::{DisplayOptions, GlyphDisplay, ItemError, ItemReport, ItemState};
pub use renderer::{RenderMode, Renderer, ScrollConfig};
pub use traits::{Connectivity, DisplayError, GlyphSource, HttpClient, HttpResponse, NetworkError, PixelDisplay};

pub use glyphcast_protocol::FontSize;
