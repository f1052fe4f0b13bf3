//! Pixel display trait
//!
//! Defines the interface to the monochrome panel the pipeline draws on.

use crate::bitmap::Canvas;

/// Display errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with the panel (bus NAK, arbitration loss, ...)
    Communication,
    /// Display not initialized
    NotInitialized,
}

impl core::fmt::Display for DisplayError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Communication => write!(f, "display communication error"),
            Self::NotInitialized => write!(f, "display not initialized"),
        }
    }
}

/// Monochrome pixel display with a local frame buffer
///
/// `set_pixel` (from [`Canvas`]) only touches the frame buffer; nothing
/// reaches the panel until `flush`.
pub trait PixelDisplay: Canvas {
    /// Bring up the panel
    ///
    /// Called once before anything else. The default does nothing, for
    /// displays that need no setup.
    fn init(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }

    /// Clear the frame buffer
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Draw ASCII status text with its top-left corner at (x, y)
    ///
    /// Uses the panel's built-in font; only meant for status and error
    /// messages, never for glyph-service content.
    fn draw_text(&mut self, x: i32, y: i32, text: &str) -> Result<(), DisplayError>;

    /// Send the frame buffer to the panel
    fn flush(&mut self) -> Result<(), DisplayError>;
}

impl<T: PixelDisplay + ?Sized> Canvas for &mut T {
    fn dimensions(&self) -> (u32, u32) {
        (**self).dimensions()
    }

    fn set_pixel(&mut self, x: u32, y: u32) {
        (**self).set_pixel(x, y)
    }
}

impl<T: PixelDisplay + ?Sized> PixelDisplay for &mut T {
    fn init(&mut self) -> Result<(), DisplayError> {
        (**self).init()
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        (**self).clear()
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) -> Result<(), DisplayError> {
        (**self).draw_text(x, y, text)
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        (**self).flush()
    }
}
