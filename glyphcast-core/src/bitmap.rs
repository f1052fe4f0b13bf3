//! Monochrome bitmaps
//!
//! [`Bitmap`] is a row-major grid of on/off pixels. Glyphs and composite
//! lines are thin wrappers that carry their own invariants. All copying goes
//! through [`blit`], which clips against the destination so that callers never
//! index out of bounds.

use alloc::vec;
use alloc::vec::Vec;

use glyphcast_protocol::{GlyphPayload, ReplyError};

/// Anything pixels can be drawn onto
pub trait Canvas {
    /// (width, height) in pixels
    fn dimensions(&self) -> (u32, u32);

    /// Turn on the pixel at (x, y)
    ///
    /// [`blit`] only passes coordinates inside `dimensions()`; direct calls
    /// outside it are ignored.
    fn set_pixel(&mut self, x: u32, y: u32);
}

/// Row-major monochrome bitmap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<bool>,
}

impl Bitmap {
    /// Create a bitmap with every pixel unset
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![false; width as usize * height as usize],
        }
    }

    /// Wrap row-major pixel data
    ///
    /// Returns `None` if the pixel count does not match the dimensions.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<bool>) -> Option<Self> {
        if pixels.len() != width as usize * height as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build from a list of rows
    ///
    /// Returns `None` if the rows differ in length.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Option<Self> {
        let width = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let mut pixels = Vec::with_capacity(width * rows.len());
        for row in rows {
            let row = row.as_ref();
            if row.len() != width {
                return None;
            }
            pixels.extend_from_slice(row);
        }
        Some(Self {
            width: width as u32,
            height: rows.len() as u32,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// True if the bitmap has no pixels at all
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Pixel at (x, y); out-of-range coordinates read as unset
    pub fn get(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.pixels[self.index(x, y)]
    }

    /// One row of pixels
    pub fn row(&self, y: u32) -> Option<&[bool]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.width as usize;
        Some(&self.pixels[start..start + self.width as usize])
    }

    /// Coordinates of every set pixel, row by row
    pub fn iter_set(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let width = self.width.max(1) as usize;
        self.pixels
            .iter()
            .enumerate()
            .filter(|(_, &on)| on)
            .map(move |(i, _)| ((i % width) as u32, (i / width) as u32))
    }

    /// Number of set pixels
    pub fn count_set(&self) -> usize {
        self.pixels.iter().filter(|&&on| on).count()
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

impl Canvas for Bitmap {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn set_pixel(&mut self, x: u32, y: u32) {
        if x < self.width && y < self.height {
            let i = self.index(x, y);
            self.pixels[i] = true;
        }
    }
}

/// OR-composite every set pixel of `src` onto `dst` with its top-left at (x, y)
///
/// Pixels that land outside `dst` are dropped. Existing pixels are never
/// cleared. Returns the number of pixels written.
pub fn blit<C: Canvas + ?Sized>(dst: &mut C, src: &Bitmap, x: i32, y: i32) -> usize {
    let (dst_w, dst_h) = dst.dimensions();
    let mut written = 0;

    for (sx, sy) in src.iter_set() {
        let px = x as i64 + sx as i64;
        let py = y as i64 + sy as i64;
        if px < 0 || py < 0 || px >= dst_w as i64 || py >= dst_h as i64 {
            continue;
        }
        dst.set_pixel(px as u32, py as u32);
        written += 1;
    }

    written
}

/// A single character's bitmap as delivered by the font service
///
/// Both dimensions are non-zero. Glyphs are never modified after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    bitmap: Bitmap,
}

impl Glyph {
    /// Wrap a bitmap, rejecting zero-sized ones
    pub fn new(bitmap: Bitmap) -> Option<Self> {
        if bitmap.width == 0 || bitmap.height == 0 {
            return None;
        }
        Some(Self { bitmap })
    }

    pub fn width(&self) -> u32 {
        self.bitmap.width
    }

    pub fn height(&self) -> u32 {
        self.bitmap.height
    }

    pub fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }
}

impl TryFrom<GlyphPayload> for Glyph {
    type Error = ReplyError;

    fn try_from(payload: GlyphPayload) -> Result<Self, Self::Error> {
        let GlyphPayload {
            width,
            height,
            pixels,
        } = payload;
        if width == 0 || height == 0 {
            return Err(ReplyError::ZeroSize);
        }
        let rows = (pixels.len() / width as usize) as u32;
        Bitmap::from_pixels(width, height, pixels)
            .and_then(Glyph::new)
            .ok_or(ReplyError::RowCountMismatch {
                declared: height,
                actual: rows,
            })
    }
}

/// A full line of glyphs, bottom-aligned and placed side by side
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeBitmap {
    bitmap: Bitmap,
}

impl CompositeBitmap {
    pub(crate) fn new(bitmap: Bitmap) -> Self {
        Self { bitmap }
    }

    pub fn width(&self) -> u32 {
        self.bitmap.width
    }

    pub fn height(&self) -> u32 {
        self.bitmap.height
    }

    pub fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }

    pub fn into_bitmap(self) -> Bitmap {
        self.bitmap
    }
}
