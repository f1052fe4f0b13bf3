//! Built-in status text
//!
//! Boot, progress and error messages are drawn locally in a small ASCII
//! font; only the actual content goes through the font service.

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::{DrawTarget, Point};
use embedded_graphics::text::{Baseline, Text};
use embedded_graphics::Drawable;

/// Font used for status lines
pub const STATUS_FONT: &MonoFont<'static> = &FONT_6X10;

/// Draw `text` with its top-left corner at (x, y)
///
/// Returns the position just after the last character.
pub fn draw_status_text<D>(target: &mut D, x: i32, y: i32, text: &str) -> Result<Point, D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let style = MonoTextStyle::new(STATUS_FONT, BinaryColor::On);
    Text::with_baseline(text, Point::new(x, y), style, Baseline::Top).draw(target)
}

/// Width in pixels of `text` in the status font
pub fn status_text_width(text: &str) -> u32 {
    let advance = STATUS_FONT.character_size.width + STATUS_FONT.character_spacing;
    text.chars().count() as u32 * advance
}
