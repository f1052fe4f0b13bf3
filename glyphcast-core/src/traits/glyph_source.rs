//! Glyph provider trait

use glyphcast_protocol::FontSize;

use crate::bitmap::Glyph;
use crate::error::FetchError;

/// Something that can produce the bitmap for one character
///
/// Implemented by [`FontServiceClient`](crate::client::FontServiceClient);
/// the cache wraps any implementation.
pub trait GlyphSource {
    fn fetch_glyph(&mut self, character: char, size: FontSize) -> Result<Glyph, FetchError>;
}
