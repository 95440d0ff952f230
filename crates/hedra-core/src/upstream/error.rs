//! Upstream service error type, stringified for retry classification.

use std::fmt;

/// Cap on how much response body is carried in an error. Enough to keep the
/// vendor's error tokens visible to the classifier without dragging a whole
/// payload around.
const BODY_SNIPPET_LIMIT: usize = 512;

/// Error from a single upstream call. The Display form embeds the status
/// code and body snippet; the retry classifier matches on that string.
#[derive(Debug)]
pub enum UpstreamError {
    /// libcurl transport failure (timeout, connection, DNS, ...).
    Curl(curl::Error),
    /// Non-2xx HTTP response; body snippet kept for classification.
    Http { code: u32, body: String },
    /// 2xx response whose body did not contain usable candidate text.
    Malformed(String),
}

impl UpstreamError {
    /// Build an Http error, trimming the body to a bounded snippet.
    pub fn http(code: u32, body: &[u8]) -> Self {
        let text = String::from_utf8_lossy(body);
        let snippet: String = text.chars().take(BODY_SNIPPET_LIMIT).collect();
        UpstreamError::Http {
            code,
            body: snippet,
        }
    }
}

impl fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpstreamError::Curl(e) => write!(f, "{}", e),
            UpstreamError::Http { code, body } => write!(f, "HTTP {}: {}", code, body),
            UpstreamError::Malformed(m) => write!(f, "malformed upstream response: {}", m),
        }
    }
}

impl std::error::Error for UpstreamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UpstreamError::Curl(e) => Some(e),
            UpstreamError::Http { .. } | UpstreamError::Malformed(_) => None,
        }
    }
}
