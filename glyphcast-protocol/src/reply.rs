//! Reply body decoding.
//!
//! The service answers with a JSON object whose shape depends on the
//! `success` flag. The body is checked strictly before anything is handed to
//! the caller: declared dimensions must match the actual row and column
//! counts, and every pixel must be 0 or 1.

use alloc::string::String;
use alloc::vec::Vec;
use serde::Deserialize;

/// Errors from decoding a reply body
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReplyError {
    /// Body is not JSON or lacks a boolean `success`
    Malformed,
    /// A field required on success is absent
    MissingField(&'static str),
    /// Width or height is zero
    ZeroSize,
    /// `height` disagrees with the number of rows
    RowCountMismatch { declared: u32, actual: u32 },
    /// A row's length disagrees with `width`
    RowWidthMismatch { row: u32, declared: u32, actual: u32 },
    /// A pixel value other than 0 or 1
    InvalidPixel { row: u32, col: u32 },
}

impl core::fmt::Display for ReplyError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Malformed => write!(f, "malformed reply body"),
            Self::MissingField(name) => write!(f, "missing field `{}`", name),
            Self::ZeroSize => write!(f, "zero-sized bitmap"),
            Self::RowCountMismatch { declared, actual } => {
                write!(f, "height {} but {} rows", declared, actual)
            }
            Self::RowWidthMismatch {
                row,
                declared,
                actual,
            } => write!(f, "row {} has {} pixels, width is {}", row, actual, declared),
            Self::InvalidPixel { row, col } => write!(f, "invalid pixel at ({}, {})", col, row),
        }
    }
}

/// A validated glyph bitmap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphPayload {
    /// Width in pixels (non-zero)
    pub width: u32,
    /// Height in pixels (non-zero)
    pub height: u32,
    /// Row-major pixels, `width * height` entries
    pub pixels: Vec<bool>,
}

/// A decoded reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// `success: true` with a consistent bitmap
    Glyph(GlyphPayload),
    /// `success: false`, with the service's message when it sent one
    Rejected(String),
}

#[derive(Deserialize)]
struct RawReply {
    success: bool,
    bitmap: Option<Vec<Vec<u8>>>,
    width: Option<u32>,
    height: Option<u32>,
    error: Option<String>,
}

/// Decode and validate a reply body
pub fn parse_reply(body: &[u8]) -> Result<Reply, ReplyError> {
    let raw: RawReply = serde_json::from_slice(body).map_err(|_| ReplyError::Malformed)?;

    if !raw.success {
        return Ok(Reply::Rejected(raw.error.unwrap_or_default()));
    }

    let rows = raw.bitmap.ok_or(ReplyError::MissingField("bitmap"))?;
    let width = raw.width.ok_or(ReplyError::MissingField("width"))?;
    let height = raw.height.ok_or(ReplyError::MissingField("height"))?;

    if width == 0 || height == 0 {
        return Err(ReplyError::ZeroSize);
    }
    if rows.len() != height as usize {
        return Err(ReplyError::RowCountMismatch {
            declared: height,
            actual: rows.len() as u32,
        });
    }

    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for (y, row) in rows.iter().enumerate() {
        if row.len() != width as usize {
            return Err(ReplyError::RowWidthMismatch {
                row: y as u32,
                declared: width,
                actual: row.len() as u32,
            });
        }
        for (x, &value) in row.iter().enumerate() {
            match value {
                0 => pixels.push(false),
                1 => pixels.push(true),
                _ => {
                    return Err(ReplyError::InvalidPixel {
                        row: y as u32,
                        col: x as u32,
                    })
                }
            }
        }
    }

    Ok(Reply::Glyph(GlyphPayload {
        width,
        height,
        pixels,
    }))
}
