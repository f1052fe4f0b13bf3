//! Request construction and the font size domain.

use alloc::string::String;
use core::fmt::Write;
use serde::Deserialize;

use crate::encoding::percent_encode_into;

/// Smallest font size the service renders
pub const MIN_FONT_SIZE: u8 = 1;

/// Largest font size the service renders
pub const MAX_FONT_SIZE: u8 = 128;

/// Size the service falls back to for missing or out-of-range values
pub const DEFAULT_FONT_SIZE: u8 = 24;

/// Font size in pixels, always within `MIN_FONT_SIZE..=MAX_FONT_SIZE`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(try_from = "u16")]
pub struct FontSize(u8);

/// A font size outside `MIN_FONT_SIZE..=MAX_FONT_SIZE`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidFontSize(pub u16);

impl core::fmt::Display for InvalidFontSize {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "font size {} outside {}..={}",
            self.0, MIN_FONT_SIZE, MAX_FONT_SIZE
        )
    }
}

impl TryFrom<u16> for FontSize {
    type Error = InvalidFontSize;

    fn try_from(px: u16) -> Result<Self, Self::Error> {
        Self::new(px).ok_or(InvalidFontSize(px))
    }
}

impl Default for FontSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl FontSize {
    /// The service's own default
    pub const DEFAULT: Self = Self(DEFAULT_FONT_SIZE);

    /// Create a font size, rejecting values the service would not honor
    pub const fn new(px: u16) -> Option<Self> {
        if px >= MIN_FONT_SIZE as u16 && px <= MAX_FONT_SIZE as u16 {
            Some(Self(px as u8))
        } else {
            None
        }
    }

    /// Pixel value
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Scale by a percentage, never dropping below 1 px or above the maximum
    pub fn scaled(self, percent: u16) -> Self {
        let px = (self.0 as u32 * percent as u32) / 100;
        let px = px.clamp(MIN_FONT_SIZE as u32, MAX_FONT_SIZE as u32);
        Self(px as u8)
    }
}

impl core::fmt::Display for FontSize {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Build the request URL for `text` at `size`
///
/// `base_url` is normally configured with its query separator already in
/// place (`http://host:5000/api/font?`). A separator is appended when it is
/// missing.
pub fn build_query(base_url: &str, text: &str, size: FontSize) -> String {
    let mut url = String::with_capacity(base_url.len() + text.len() * 3 + 24);
    url.push_str(base_url);

    if !(base_url.ends_with('?') || base_url.ends_with('&')) {
        url.push(if base_url.contains('?') { '&' } else { '?' });
    }

    url.push_str("text=");
    percent_encode_into(text, &mut url);
    // Writing to a String cannot fail
    let _ = write!(url, "&font_size={}", size.get());
    url
}

/// Expected extent of a whitespace-only or empty reply
///
/// The service estimates a third of the font size per space and always
/// reports the full font size as height, so blank text never comes back as a
/// zero-sized bitmap.
pub fn blank_extent(char_count: usize, size: FontSize) -> (u32, u32) {
    let per_char = (size.get() / 3) as u32;
    let width = (per_char * char_count as u32).max(1);
    (width, size.get() as u32)
}
