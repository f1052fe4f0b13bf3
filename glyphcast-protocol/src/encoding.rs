//! Query string percent-encoding.
//!
//! Only the unreserved ASCII set passes through untouched:
//! `A-Z a-z 0-9 - _ . ~`. Every other character, including space and all
//! multi-byte scripts, is written as its UTF-8 bytes in `%XX` form with
//! uppercase hex digits.

use alloc::string::String;
use alloc::vec::Vec;

const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";

/// Errors from decoding a percent-encoded string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// `%` not followed by two more bytes
    Truncated,
    /// `%` followed by something other than two hex digits
    InvalidHex,
}

/// Check whether a byte may appear unescaped in a query value
pub const fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~')
}

/// Percent-encode `text` into a new string
pub fn percent_encode(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 3);
    percent_encode_into(text, &mut out);
    out
}

/// Percent-encode `text`, appending to `out`
///
/// UTF-8 continuation and lead bytes are all >= 0x80, so working byte by
/// byte escapes every non-ASCII character in full.
pub fn percent_encode_into(text: &str, out: &mut String) {
    for &byte in text.as_bytes() {
        if is_unreserved(byte) {
            out.push(byte as char);
        } else {
            out.push('%');
            out.push(HEX_UPPER[(byte >> 4) as usize] as char);
            out.push(HEX_UPPER[(byte & 0x0F) as usize] as char);
        }
    }
}

/// Decode a percent-encoded string back into raw bytes
///
/// Accepts either hex case. Bytes outside `%XX` sequences are copied as-is.
pub fn percent_decode(encoded: &str) -> Result<Vec<u8>, DecodeError> {
    let bytes = encoded.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            if i + 2 >= bytes.len() {
                return Err(DecodeError::Truncated);
            }
            let hi = hex_value(bytes[i + 1]).ok_or(DecodeError::InvalidHex)?;
            let lo = hex_value(bytes[i + 2]).ok_or(DecodeError::InvalidHex)?;
            out.push((hi << 4) | lo);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }

    Ok(out)
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}
