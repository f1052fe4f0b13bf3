//! Line compositor
//!
//! Turns a string into one composite bitmap. Each Unicode scalar is one
//! glyph lookup; glyphs are placed left to right and bottom-aligned against
//! the tallest glyph in the line.
//!
//! Composition is all-or-nothing: if any glyph is unavailable the whole line
//! fails and no bitmap is produced.

use alloc::rc::Rc;
use alloc::vec::Vec;

use glyphcast_protocol::FontSize;

use crate::bitmap::{blit, Bitmap, CompositeBitmap, Glyph};
use crate::cache::GlyphCache;
use crate::error::CompositeError;
use crate::traits::GlyphSource;

/// Composes lines of text using a glyph cache
pub struct LineCompositor<S> {
    cache: GlyphCache<S>,
}

impl<S: GlyphSource> LineCompositor<S> {
    pub fn new(source: S) -> Self {
        Self {
            cache: GlyphCache::new(source),
        }
    }

    /// Look up every glyph of `text` and stitch them into one bitmap
    pub fn compose_line(
        &mut self,
        text: &str,
        font_size: FontSize,
    ) -> Result<CompositeBitmap, CompositeError> {
        let mut glyphs: Vec<Rc<Glyph>> = Vec::with_capacity(text.len());

        for character in text.chars() {
            let glyph = self
                .cache
                .get_or_fetch(character, font_size)
                .map_err(|source| CompositeError::GlyphUnavailable { character, source })?;
            glyphs.push(glyph);
        }

        if glyphs.is_empty() {
            return Err(CompositeError::EmptyText);
        }

        let composite = stitch(&glyphs);
        debug!(
            "composed {} glyphs into {}x{}",
            glyphs.len(),
            composite.width(),
            composite.height()
        );
        Ok(composite)
    }

    pub fn cache(&self) -> &GlyphCache<S> {
        &self.cache
    }
}

/// Place glyphs side by side, bottom-aligned
fn stitch(glyphs: &[Rc<Glyph>]) -> CompositeBitmap {
    let max_height = glyphs.iter().map(|g| g.height()).max().unwrap_or(0);
    let total_width = glyphs.iter().map(|g| g.width()).sum();

    let mut bitmap = Bitmap::new(total_width, max_height);
    let mut cursor = 0u32;

    for glyph in glyphs {
        let y_offset = max_height - glyph.height();
        blit(&mut bitmap, glyph.bitmap(), cursor as i32, y_offset as i32);
        cursor += glyph.width();
    }

    CompositeBitmap::new(bitmap)
}
