//! Font service client
//!
//! One HTTP request per character, no retries. The reply is validated before
//! it becomes a [`Glyph`]; anything short of a complete, consistent bitmap is
//! a [`FetchError`].

use alloc::string::String;

use glyphcast_protocol::{build_query, parse_reply, FontSize, Reply, STATUS_OK};

use crate::bitmap::Glyph;
use crate::error::{ApplicationError, FetchError, ProtocolError};
use crate::traits::{GlyphSource, HttpClient};

/// Request timeout used unless configured otherwise
pub const DEFAULT_REQUEST_TIMEOUT_MS: u32 = 10_000;

/// Client for the remote bitmap font service
pub struct FontServiceClient<H> {
    http: H,
    base_url: String,
    timeout_ms: u32,
}

impl<H: HttpClient> FontServiceClient<H> {
    /// Create a client for `base_url` (e.g. `http://10.0.0.2:5000/api/font?`)
    pub fn new(http: H, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }

    /// Override the per-request timeout
    pub fn with_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }

    /// Access the underlying transport
    pub fn http(&self) -> &H {
        &self.http
    }

    /// Fetch the bitmap for a single character
    pub fn fetch_glyph(&mut self, character: char, size: FontSize) -> Result<Glyph, FetchError> {
        let mut buf = [0u8; 4];
        let url = build_query(&self.base_url, character.encode_utf8(&mut buf), size);
        trace!("GET {}", url.as_str());

        let response = self.http.get(&url, self.timeout_ms).map_err(|e| {
            warn!("glyph {} @{}: {}", character, size, e);
            e
        })?;

        if response.status != STATUS_OK {
            warn!("glyph {} @{}: HTTP {}", character, size, response.status);
            return Err(ProtocolError::Status(response.status).into());
        }

        match parse_reply(&response.body)? {
            Reply::Glyph(payload) => {
                let glyph = Glyph::try_from(payload)?;
                debug!(
                    "glyph {} @{}: {}x{}",
                    character,
                    size,
                    glyph.width(),
                    glyph.height()
                );
                Ok(glyph)
            }
            Reply::Rejected(message) => {
                warn!("glyph {} @{} rejected: {}", character, size, message.as_str());
                Err(ApplicationError { message }.into())
            }
        }
    }
}

impl<H: HttpClient> GlyphSource for FontServiceClient<H> {
    fn fetch_glyph(&mut self, character: char, size: FontSize) -> Result<Glyph, FetchError> {
        FontServiceClient::fetch_glyph(self, character, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{HttpResponse, NetworkError};
    use alloc::vec::Vec;

    struct MockHttp {
        reply: Result<HttpResponse, NetworkError>,
        requests: Vec<(String, u32)>,
    }

    impl MockHttp {
        fn replying(status: u16, body: &str) -> Self {
            Self {
                reply: Ok(HttpResponse {
                    status,
                    body: body.as_bytes().to_vec(),
                }),
                requests: Vec::new(),
            }
        }

        fn failing(error: NetworkError) -> Self {
            Self {
                reply: Err(error),
                requests: Vec::new(),
            }
        }
    }

    impl HttpClient for MockHttp {
        fn get(&mut self, url: &str, timeout_ms: u32) -> Result<HttpResponse, NetworkError> {
            self.requests.push((String::from(url), timeout_ms));
            self.reply.clone()
        }
    }

    const BASE: &str = "http://font.local:5000/api/font?";
    const GLYPH_2X2: &str = r#"{"success": true, "bitmap": [[1,0],[0,1]], "width": 2, "height": 2}"#;

    #[test]
    fn test_fetch_success() {
        let mut client = FontServiceClient::new(MockHttp::replying(200, GLYPH_2X2), BASE);
        let glyph = client.fetch_glyph('你', FontSize::DEFAULT).unwrap();

        assert_eq!(glyph.width(), 2);
        assert_eq!(glyph.height(), 2);
        assert!(glyph.bitmap().get(0, 0));
        assert!(glyph.bitmap().get(1, 1));
        assert!(!glyph.bitmap().get(1, 0));
    }

    #[test]
    fn test_single_request_with_timeout() {
        let mut client = FontServiceClient::new(MockHttp::replying(200, GLYPH_2X2), BASE);
        client.fetch_glyph(' ', FontSize::new(16).unwrap()).unwrap();

        assert_eq!(client.http().requests.len(), 1);
        let (url, timeout) = &client.http().requests[0];
        assert_eq!(url, "http://font.local:5000/api/font?text=%20&font_size=16");
        assert_eq!(*timeout, DEFAULT_REQUEST_TIMEOUT_MS);
    }

    #[test]
    fn test_custom_timeout() {
        let mut client =
            FontServiceClient::new(MockHttp::replying(200, GLYPH_2X2), BASE).with_timeout_ms(2500);
        client.fetch_glyph('A', FontSize::DEFAULT).unwrap();
        assert_eq!(client.http().requests[0].1, 2500);
    }

    #[test]
    fn test_network_error() {
        let mut client = FontServiceClient::new(MockHttp::failing(NetworkError::Timeout), BASE);
        assert_eq!(
            client.fetch_glyph('A', FontSize::DEFAULT),
            Err(FetchError::Network(NetworkError::Timeout))
        );
        // No retry
        assert_eq!(client.http().requests.len(), 1);
    }

    #[test]
    fn test_non_200_status() {
        let body = r#"{"success": false, "error": "boom"}"#;
        let mut client = FontServiceClient::new(MockHttp::replying(500, body), BASE);
        assert_eq!(
            client.fetch_glyph('A', FontSize::DEFAULT),
            Err(FetchError::Protocol(ProtocolError::Status(500)))
        );
    }

    #[test]
    fn test_malformed_body() {
        let mut client = FontServiceClient::new(MockHttp::replying(200, "not json"), BASE);
        assert!(matches!(
            client.fetch_glyph('A', FontSize::DEFAULT),
            Err(FetchError::Protocol(ProtocolError::Body(_)))
        ));
    }

    #[test]
    fn test_inconsistent_dimensions() {
        let body = r#"{"success": true, "bitmap": [[1,0]], "width": 2, "height": 3}"#;
        let mut client = FontServiceClient::new(MockHttp::replying(200, body), BASE);
        assert!(matches!(
            client.fetch_glyph('A', FontSize::DEFAULT),
            Err(FetchError::Protocol(ProtocolError::Body(_)))
        ));
    }

    #[test]
    fn test_application_error() {
        let body = r#"{"success": false, "error": "render failed"}"#;
        let mut client = FontServiceClient::new(MockHttp::replying(200, body), BASE);
        assert_eq!(
            client.fetch_glyph('A', FontSize::DEFAULT),
            Err(FetchError::Application(ApplicationError {
                message: String::from("render failed")
            }))
        );
    }
}
