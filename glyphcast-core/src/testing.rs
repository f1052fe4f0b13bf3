//! Test doubles shared by the unit tests

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use embedded_hal::delay::DelayNs;
use glyphcast_protocol::FontSize;

use crate::bitmap::{Bitmap, Canvas, Glyph};
use crate::error::FetchError;
use crate::traits::{DisplayError, GlyphSource, NetworkError, PixelDisplay};

/// Records every flushed frame and every status text call
pub struct RecordingDisplay {
    pub frame: Bitmap,
    pub flushed: Vec<Bitmap>,
    pub texts: Vec<(i32, i32, String)>,
    pub clears: u32,
    pub fail_init: bool,
    pub fail_flush: bool,
}

impl RecordingDisplay {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            frame: Bitmap::new(width, height),
            flushed: Vec::new(),
            texts: Vec::new(),
            clears: 0,
            fail_init: false,
            fail_flush: false,
        }
    }

    /// Text lines drawn, in order
    pub fn lines(&self) -> Vec<&str> {
        self.texts.iter().map(|(_, _, t)| t.as_str()).collect()
    }
}

impl Canvas for RecordingDisplay {
    fn dimensions(&self) -> (u32, u32) {
        self.frame.dimensions()
    }

    fn set_pixel(&mut self, x: u32, y: u32) {
        self.frame.set_pixel(x, y);
    }
}

impl PixelDisplay for RecordingDisplay {
    fn init(&mut self) -> Result<(), DisplayError> {
        if self.fail_init {
            return Err(DisplayError::Communication);
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.clears += 1;
        self.frame = Bitmap::new(self.frame.width(), self.frame.height());
        Ok(())
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) -> Result<(), DisplayError> {
        self.texts.push((x, y, String::from(text)));
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        if self.fail_flush {
            return Err(DisplayError::Communication);
        }
        self.flushed.push(self.frame.clone());
        Ok(())
    }
}

/// Delay that only adds up what it was asked to wait
#[derive(Default)]
pub struct CountingDelay {
    pub total_ms: u64,
    pub calls: u32,
}

impl DelayNs for CountingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ms += (ns / 1_000_000) as u64;
        self.calls += 1;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.total_ms += ms as u64;
        self.calls += 1;
    }
}

/// Serves fully-lit glyphs of fixed sizes per character
///
/// Characters missing from the table fail as unreachable. Every request is
/// logged with its font size.
pub struct TableSource {
    pub sizes: BTreeMap<char, (u32, u32)>,
    pub calls: Vec<(char, FontSize)>,
}

impl TableSource {
    pub fn new(entries: &[(char, u32, u32)]) -> Self {
        Self {
            sizes: entries.iter().map(|&(c, w, h)| (c, (w, h))).collect(),
            calls: Vec::new(),
        }
    }

    /// Characters requested, in order
    pub fn chars(&self) -> Vec<char> {
        self.calls.iter().map(|&(c, _)| c).collect()
    }
}

impl GlyphSource for TableSource {
    fn fetch_glyph(&mut self, character: char, size: FontSize) -> Result<Glyph, FetchError> {
        self.calls.push((character, size));
        let &(w, h) = self
            .sizes
            .get(&character)
            .ok_or(FetchError::Network(NetworkError::Unreachable))?;
        let mut bitmap = Bitmap::new(w, h);
        for y in 0..h {
            for x in 0..w {
                bitmap.set_pixel(x, y);
            }
        }
        Ok(Glyph::new(bitmap).unwrap())
    }
}
