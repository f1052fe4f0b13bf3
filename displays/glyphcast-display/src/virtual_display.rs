//! In-memory panel
//!
//! Behaves like a double-buffered panel without any bus: drawing goes to a
//! back buffer and `flush` copies it to the visible one. Useful for running
//! the pipeline on a host.

use glyphcast_core::{Canvas, DisplayError, PixelDisplay};

use crate::framebuffer::FrameBuffer;
use crate::text::draw_status_text;

/// Simulated panel, 128x64 unless sized otherwise
pub struct VirtualDisplay<const W: usize = 128, const PAGES: usize = 8> {
    back: FrameBuffer<W, PAGES>,
    front: FrameBuffer<W, PAGES>,
    flushes: u32,
}

impl<const W: usize, const PAGES: usize> Default for VirtualDisplay<W, PAGES> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const PAGES: usize> VirtualDisplay<W, PAGES> {
    pub const fn new() -> Self {
        Self {
            back: FrameBuffer::new(),
            front: FrameBuffer::new(),
            flushes: 0,
        }
    }

    /// What the panel currently shows
    pub fn visible(&self) -> &FrameBuffer<W, PAGES> {
        &self.front
    }

    /// Number of completed flushes
    pub fn flushes(&self) -> u32 {
        self.flushes
    }
}

impl<const W: usize, const PAGES: usize> Canvas for VirtualDisplay<W, PAGES> {
    fn dimensions(&self) -> (u32, u32) {
        self.back.dimensions()
    }

    fn set_pixel(&mut self, x: u32, y: u32) {
        self.back.set_pixel(x, y);
    }
}

impl<const W: usize, const PAGES: usize> PixelDisplay for VirtualDisplay<W, PAGES> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.back.clear();
        Ok(())
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) -> Result<(), DisplayError> {
        match draw_status_text(&mut self.back, x, y, text) {
            Ok(_) => Ok(()),
            Err(never) => match never {},
        }
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.front = self.back.clone();
        self.flushes += 1;
        trace!("virtual flush #{}", self.flushes);
        Ok(())
    }
}
