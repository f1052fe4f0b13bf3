//! Error taxonomy
//!
//! Transport, protocol and application failures all collapse into
//! [`FetchError`] at the font service boundary. The compositor wraps that in
//! [`CompositeError`], which only ever aborts the current line.
//! [`InitializationError`] is the only fatal condition.

use alloc::string::String;

use glyphcast_protocol::ReplyError;

use crate::config::ConfigError;
use crate::traits::{DisplayError, NetworkError};

/// The service answered, but not with a usable reply
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProtocolError {
    /// HTTP status other than 200
    Status(u16),
    /// Body failed to decode or validate
    Body(ReplyError),
}

impl core::fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Status(code) => write!(f, "unexpected HTTP status {}", code),
            Self::Body(e) => write!(f, "{}", e),
        }
    }
}

/// A well-formed reply with `success: false`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ApplicationError {
    /// Message reported by the service (may be empty)
    pub message: String,
}

impl core::fmt::Display for ApplicationError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "service rejected request: {}", self.message)
    }
}

/// A glyph could not be obtained
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FetchError {
    Network(NetworkError),
    Protocol(ProtocolError),
    Application(ApplicationError),
}

impl From<NetworkError> for FetchError {
    fn from(e: NetworkError) -> Self {
        FetchError::Network(e)
    }
}

impl From<ProtocolError> for FetchError {
    fn from(e: ProtocolError) -> Self {
        FetchError::Protocol(e)
    }
}

impl From<ReplyError> for FetchError {
    fn from(e: ReplyError) -> Self {
        FetchError::Protocol(ProtocolError::Body(e))
    }
}

impl From<ApplicationError> for FetchError {
    fn from(e: ApplicationError) -> Self {
        FetchError::Application(e)
    }
}

impl core::fmt::Display for FetchError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Network(e) => write!(f, "{}", e),
            Self::Protocol(e) => write!(f, "{}", e),
            Self::Application(e) => write!(f, "{}", e),
        }
    }
}

/// A line could not be composed
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CompositeError {
    /// The text contained no characters
    EmptyText,
    /// Fetching one of the glyphs failed
    GlyphUnavailable { character: char, source: FetchError },
}

impl core::fmt::Display for CompositeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "nothing to render"),
            Self::GlyphUnavailable { character, source } => {
                write!(f, "glyph {:?} unavailable: {}", character, source)
            }
        }
    }
}

/// Startup failed; the display pipeline cannot be used
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitializationError {
    /// Panel or bus setup failed
    Display(DisplayError),
    /// Panel size differs from the configured size
    SizeMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },
    /// Configuration rejected
    Config(ConfigError),
}

impl From<DisplayError> for InitializationError {
    fn from(e: DisplayError) -> Self {
        InitializationError::Display(e)
    }
}

impl From<ConfigError> for InitializationError {
    fn from(e: ConfigError) -> Self {
        InitializationError::Config(e)
    }
}

impl core::fmt::Display for InitializationError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Display(e) => write!(f, "display init failed: {}", e),
            Self::SizeMismatch { expected, actual } => write!(
                f,
                "display is {}x{}, configured for {}x{}",
                actual.0, actual.1, expected.0, expected.1
            ),
            Self::Config(e) => write!(f, "invalid configuration: {}", e),
        }
    }
}
