//! Bitmap Font Service Protocol
//!
//! This crate defines the HTTP exchange between the device and the remote
//! bitmap font service. The device cannot rasterize most scripts itself, so
//! it asks the service for one character at a time:
//!
//! ```text
//! GET {base_url}text=%E4%BD%A0&font_size=24
//!
//! 200 {"success": true, "bitmap": [[0,1,...],...], "width": 22, "height": 24}
//! 400 {"success": false, "error": "..."}   missing or empty text
//! 500 {"success": false, "error": "..."}   rendering failure
//! ```
//!
//! Everything here is pure data handling so it can be tested on the host and
//! reused on any target with an allocator.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod encoding;
pub mod query;
pub mod reply;

pub use encoding::{percent_decode, percent_encode, DecodeError};
pub use query::{
    blank_extent, build_query, FontSize, InvalidFontSize, DEFAULT_FONT_SIZE, MAX_FONT_SIZE, MIN_FONT_SIZE,
};
pub use reply::{parse_reply, GlyphPayload, Reply, ReplyError};

/// HTTP status of a successful glyph reply
pub const STATUS_OK: u16 = 200;

/// HTTP status for a missing or empty `text` parameter
pub const STATUS_BAD_REQUEST: u16 = 400;

/// HTTP status for a rendering failure inside the service
pub const STATUS_INTERNAL_ERROR: u16 = 500;
