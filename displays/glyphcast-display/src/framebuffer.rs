//! Page-organized monochrome frame buffer
//!
//! Matches the SH1106/SSD1306 memory layout: the panel is split into pages
//! of 8 rows, and each byte holds one column of a page with bit 0 at the top.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::{DrawTarget, OriginDimensions, Pixel, Size};
use glyphcast_core::Canvas;

/// Frame buffer `W` pixels wide and `PAGES * 8` pixels tall
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer<const W: usize, const PAGES: usize> {
    pages: [[u8; W]; PAGES],
}

impl<const W: usize, const PAGES: usize> Default for FrameBuffer<W, PAGES> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const PAGES: usize> FrameBuffer<W, PAGES> {
    pub const WIDTH: u32 = W as u32;
    pub const HEIGHT: u32 = (PAGES * 8) as u32;

    /// Create a blank buffer
    pub const fn new() -> Self {
        Self {
            pages: [[0; W]; PAGES],
        }
    }

    /// Turn every pixel off
    pub fn clear(&mut self) {
        for page in self.pages.iter_mut() {
            page.fill(0);
        }
    }

    /// Set or reset one pixel; out-of-range coordinates are ignored
    pub fn set(&mut self, x: u32, y: u32, on: bool) {
        let (x, y) = (x as usize, y as usize);
        if x >= W || y >= PAGES * 8 {
            return;
        }
        let bit = 1u8 << (y % 8);
        let byte = &mut self.pages[y / 8][x];
        if on {
            *byte |= bit;
        } else {
            *byte &= !bit;
        }
    }

    /// Read one pixel; out-of-range coordinates read as off
    pub fn get(&self, x: u32, y: u32) -> bool {
        let (x, y) = (x as usize, y as usize);
        if x >= W || y >= PAGES * 8 {
            return false;
        }
        self.pages[y / 8][x] & (1 << (y % 8)) != 0
    }

    /// Raw bytes of one page, in panel order
    pub fn page(&self, index: usize) -> Option<&[u8; W]> {
        self.pages.get(index)
    }

    pub fn count_set(&self) -> usize {
        self.pages
            .iter()
            .flat_map(|page| page.iter())
            .map(|byte| byte.count_ones() as usize)
            .sum()
    }
}

impl<const W: usize, const PAGES: usize> Canvas for FrameBuffer<W, PAGES> {
    fn dimensions(&self) -> (u32, u32) {
        (Self::WIDTH, Self::HEIGHT)
    }

    fn set_pixel(&mut self, x: u32, y: u32) {
        self.set(x, y, true);
    }
}

impl<const W: usize, const PAGES: usize> OriginDimensions for FrameBuffer<W, PAGES> {
    fn size(&self) -> Size {
        Size::new(Self::WIDTH, Self::HEIGHT)
    }
}

impl<const W: usize, const PAGES: usize> DrawTarget for FrameBuffer<W, PAGES> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x >= 0 && point.y >= 0 {
                self.set(point.x as u32, point.y as u32, color.is_on());
            }
        }
        Ok(())
    }
}

impl<const W: usize, const PAGES: usize> core::fmt::Debug for FrameBuffer<W, PAGES> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for y in 0..Self::HEIGHT {
            for x in 0..Self::WIDTH {
                f.write_str(if self.get(x, y) { "#" } else { "." })?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}
