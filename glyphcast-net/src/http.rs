//! Blocking HTTP transport over `ureq`

use std::io::{self, Read};
use std::time::Duration;

use glyphcast_core::{FontServiceClient, HttpClient, HttpResponse, NetworkError};
use log::{debug, warn};
use ureq::{Agent, ErrorKind, Transport};

/// Largest reply body accepted; a 128px glyph is well under this
pub const MAX_BODY_BYTES: u64 = 1024 * 1024;

/// [`HttpClient`] backed by a shared `ureq` agent
#[derive(Debug, Clone)]
pub struct UreqClient {
    agent: Agent,
}

impl Default for UreqClient {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Agent> for UreqClient {
    fn from(agent: Agent) -> Self {
        Self { agent }
    }
}

impl UreqClient {
    pub fn new() -> Self {
        Agent::new().into()
    }
}

impl HttpClient for UreqClient {
    fn get(&mut self, url: &str, timeout_ms: u32) -> Result<HttpResponse, NetworkError> {
        let request = self
            .agent
            .get(url)
            .timeout(Duration::from_millis(u64::from(timeout_ms)));

        let response = match request.call() {
            Ok(response) => response,
            // Error statuses still carry a body worth handing back
            Err(ureq::Error::Status(code, response)) => {
                debug!("{} answered {}", url, code);
                response
            }
            Err(ureq::Error::Transport(transport)) => {
                let error = classify(&transport);
                warn!("GET {} failed: {} ({})", url, error, transport);
                return Err(error);
            }
        };

        let status = response.status();
        let mut body = Vec::new();
        response
            .into_reader()
            .take(MAX_BODY_BYTES)
            .read_to_end(&mut body)
            .map_err(|e| {
                warn!("reading body of {} failed: {}", url, e);
                classify_io(&e)
            })?;

        Ok(HttpResponse { status, body })
    }
}

/// Client for the font service at `base_url` over a fresh agent
pub fn font_service(base_url: impl Into<String>) -> FontServiceClient<UreqClient> {
    FontServiceClient::new(UreqClient::new(), base_url)
}

fn classify(transport: &Transport) -> NetworkError {
    let timed_out = std::error::Error::source(transport)
        .and_then(|source| source.downcast_ref::<io::Error>())
        .is_some_and(is_timeout);
    if timed_out {
        return NetworkError::Timeout;
    }

    match transport.kind() {
        ErrorKind::Dns | ErrorKind::ConnectionFailed => NetworkError::Unreachable,
        _ => NetworkError::Io,
    }
}

fn classify_io(error: &io::Error) -> NetworkError {
    if is_timeout(error) {
        NetworkError::Timeout
    } else {
        NetworkError::Io
    }
}

fn is_timeout(error: &io::Error) -> bool {
    matches!(
        error.kind(),
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock
    )
}
