//! Blocking HTTP transport

use alloc::vec::Vec;

/// Transport-level failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NetworkError {
    /// No response within the request timeout
    Timeout,
    /// Host could not be resolved or refused the connection
    Unreachable,
    /// Connection broke while sending or receiving
    Io,
}

impl core::fmt::Display for NetworkError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Timeout => write!(f, "request timed out"),
            Self::Unreachable => write!(f, "service unreachable"),
            Self::Io => write!(f, "connection error"),
        }
    }
}

/// A complete HTTP response
///
/// Non-2xx statuses are returned as responses, not errors; judging the status
/// is up to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Minimal blocking HTTP client
pub trait HttpClient {
    /// Issue a single GET request
    ///
    /// Must give up after `timeout_ms` and must not retry.
    fn get(&mut self, url: &str, timeout_ms: u32) -> Result<HttpResponse, NetworkError>;
}

impl<T: HttpClient + ?Sized> HttpClient for &mut T {
    fn get(&mut self, url: &str, timeout_ms: u32) -> Result<HttpResponse, NetworkError> {
        (**self).get(url, timeout_ms)
    }
}
