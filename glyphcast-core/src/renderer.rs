//! Composite bitmap renderer
//!
//! Two modes:
//! - **Static**: the bitmap is centered once and flushed.
//! - **Scroll**: a right-to-left marquee. The bitmap enters from the right
//!   edge and keeps moving until it has fully left on the left side.
//!
//! Timing is open-loop: each frame is followed by a fixed pause, so total
//! scroll time is frame count times interval plus whatever the bus costs.

use embedded_hal::delay::DelayNs;

use crate::bitmap::{blit, CompositeBitmap};
use crate::traits::{DisplayError, PixelDisplay};

/// Default horizontal advance per frame in pixels
pub const DEFAULT_SCROLL_STEP: u32 = 2;

/// Default pause after each frame in milliseconds
pub const DEFAULT_FRAME_INTERVAL_MS: u32 = 80;

/// Marquee parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScrollConfig {
    /// Pixels advanced per frame (0 is treated as 1)
    pub step: u32,
    /// Pause after each flushed frame
    pub frame_interval_ms: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            step: DEFAULT_SCROLL_STEP,
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
        }
    }
}

impl ScrollConfig {
    /// One pixel per frame: smoother, twice as slow
    pub const fn smooth() -> Self {
        Self {
            step: 1,
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
        }
    }
}

/// How a composite is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RenderMode {
    /// Centered, single frame
    Static,
    /// Horizontal marquee
    Scroll(ScrollConfig),
}

/// Draws composites onto a [`PixelDisplay`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Renderer {
    mode: RenderMode,
}

impl Renderer {
    pub const fn new(mode: RenderMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Draw `composite` in the configured mode
    ///
    /// Returns the number of frames flushed.
    pub fn render<D, T>(
        &self,
        display: &mut D,
        delay: &mut T,
        composite: &CompositeBitmap,
    ) -> Result<u32, DisplayError>
    where
        D: PixelDisplay + ?Sized,
        T: DelayNs + ?Sized,
    {
        match self.mode {
            RenderMode::Static => render_static(display, composite).map(|()| 1),
            RenderMode::Scroll(config) => render_scroll(display, delay, composite, config),
        }
    }
}

/// Top-left position that centers `inner` within `outer`
///
/// Uses floor division, so an odd leftover puts the extra pixel on the far
/// side (the bitmap sits one pixel closer to the origin).
pub fn centered_origin(outer: (u32, u32), inner: (u32, u32)) -> (i32, i32) {
    let dx = outer.0 as i64 - inner.0 as i64;
    let dy = outer.1 as i64 - inner.1 as i64;
    (dx.div_euclid(2) as i32, dy.div_euclid(2) as i32)
}

/// Frame offsets for a marquee: `0, step, 2*step, ...` ending exactly on
/// `display_width + bitmap_width`
///
/// When the total is not a multiple of `step` the last advance is shorter,
/// so the final frame always has the bitmap fully off the left edge.
pub fn scroll_offsets(display_width: u32, bitmap_width: u32, step: u32) -> impl Iterator<Item = u32> {
    let total = display_width.saturating_add(bitmap_width);
    let step = step.max(1);
    let count = total.div_ceil(step) + 1;
    (0..count).map(move |i| i.saturating_mul(step).min(total))
}

/// Draw centered and flush once
pub fn render_static<D: PixelDisplay + ?Sized>(
    display: &mut D,
    composite: &CompositeBitmap,
) -> Result<(), DisplayError> {
    let (x, y) = centered_origin(display.dimensions(), (composite.width(), composite.height()));
    debug!(
        "static render {}x{} at ({}, {})",
        composite.width(),
        composite.height(),
        x,
        y
    );

    display.clear()?;
    blit(display, composite.bitmap(), x, y);
    display.flush()
}

/// Run the full marquee, pausing after every frame
pub fn render_scroll<D, T>(
    display: &mut D,
    delay: &mut T,
    composite: &CompositeBitmap,
    config: ScrollConfig,
) -> Result<u32, DisplayError>
where
    D: PixelDisplay + ?Sized,
    T: DelayNs + ?Sized,
{
    let (width, height) = display.dimensions();
    let (_, y) = centered_origin((width, height), (composite.width(), composite.height()));
    let mut frames = 0u32;

    for offset in scroll_offsets(width, composite.width(), config.step) {
        display.clear()?;
        // Screen x of composite column 0
        let x = width as i64 - offset as i64;
        blit(display, composite.bitmap(), x as i32, y);
        display.flush()?;
        delay.delay_ms(config.frame_interval_ms);
        frames += 1;
    }

    debug!(
        "scrolled {}px wide bitmap in {} frames",
        composite.width(),
        frames
    );
    Ok(frames)
}
