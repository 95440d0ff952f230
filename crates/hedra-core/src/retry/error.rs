//! Terminal error surface of the retrying executor.

use thiserror::Error;

/// Failure propagated once the executor gives up. Exactly one of these is
/// produced per exhausted or terminal call; the underlying error is carried
/// unchanged so callers can inspect it.
#[derive(Debug, Error)]
pub enum RequestError<E> {
    /// Request body exceeded the service limit. Raised on first occurrence.
    #[error("payload too large: {0}")]
    PayloadTooLarge(E),
    /// Service rejected the request as malformed. Raised on first occurrence.
    #[error("invalid argument: {0}")]
    InvalidArgument(E),
    /// Rate/usage limit still hit after the whole retry budget was spent.
    /// Distinct from a generic failure so callers can suggest waiting.
    #[error("quota exhausted after {attempts} attempts: {last}")]
    QuotaExhausted { attempts: u32, last: E },
    /// Unclassified error, or a transient one that outlived the retry budget.
    #[error("{0}")]
    Upstream(E),
}

impl<E> RequestError<E> {
    /// The original upstream error, unchanged.
    pub fn into_inner(self) -> E {
        match self {
            RequestError::PayloadTooLarge(e)
            | RequestError::InvalidArgument(e)
            | RequestError::Upstream(e) => e,
            RequestError::QuotaExhausted { last, .. } => last,
        }
    }

    /// Human-readable message with no raw vendor payload in it.
    pub fn user_message(&self) -> &'static str {
        match self {
            RequestError::PayloadTooLarge(_) => {
                "The file is too large for the service. Try a smaller file."
            }
            RequestError::InvalidArgument(_) => {
                "The service rejected the request. Check the file and try again."
            }
            RequestError::QuotaExhausted { .. } => {
                "Usage quota exceeded. Wait a while before trying again."
            }
            RequestError::Upstream(_) => {
                "The service is unavailable right now. Try again later."
            }
        }
    }
}
