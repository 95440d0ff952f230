//! Classify stringified upstream errors into retry classes.
//!
//! The substring matching here is the single translation point from raw
//! vendor error text to the stable [`ErrorClass`] union; if the upstream
//! service rewords its failures, this is the only module that changes.

use super::policy::ErrorClass;
use std::fmt::Display;

/// Markers for failures presumed recoverable by retrying. Covers server-side
/// 5xx tokens, browser-era transport phrases the vendor still emits, and the
/// libcurl connection-failure phrasings produced by this client.
const TRANSIENT_MARKERS: &[&str] = &[
    "500",
    "503",
    "xhr error",
    "fetch failed",
    "timeout",
    "networkerror",
    "rpc failed",
    "couldn't connect",
    "couldn't resolve",
    "connection reset",
];

/// Classify a raw error message.
///
/// Matching is case-insensitive and checked in strict precedence order:
/// payload-too-large, then invalid-argument, then quota, then transient.
/// Anything unmatched is `Unknown`.
pub fn classify_message(raw: &str) -> ErrorClass {
    let msg = raw.to_lowercase();
    if msg.contains("413") || msg.contains("payload too large") {
        return ErrorClass::PayloadTooLarge;
    }
    if msg.contains("400") || msg.contains("invalid argument") {
        return ErrorClass::InvalidArgument;
    }
    if msg.contains("429") || msg.contains("resource_exhausted") || msg.contains("quota") {
        return ErrorClass::QuotaExceeded;
    }
    if TRANSIENT_MARKERS.iter().any(|m| msg.contains(m)) {
        return ErrorClass::Transient;
    }
    ErrorClass::Unknown
}

/// Classify any displayable error. Never mutates the original.
pub fn classify<E: Display + ?Sized>(err: &E) -> ErrorClass {
    classify_message(&err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quota_markers() {
        assert_eq!(classify_message("HTTP 429: slow down"), ErrorClass::QuotaExceeded);
        assert_eq!(classify_message("RESOURCE_EXHAUSTED"), ErrorClass::QuotaExceeded);
        assert_eq!(
            classify_message("You exceeded your current Quota, please check your plan"),
            ErrorClass::QuotaExceeded
        );
    }

    #[test]
    fn payload_too_large_markers() {
        assert_eq!(classify_message("HTTP 413"), ErrorClass::PayloadTooLarge);
        assert_eq!(
            classify_message("Request Entity Too Large: payload too large"),
            ErrorClass::PayloadTooLarge
        );
    }

    #[test]
    fn invalid_argument_markers() {
        assert_eq!(classify_message("HTTP 400: bad request"), ErrorClass::InvalidArgument);
        assert_eq!(
            classify_message("Invalid Argument: bad mime type"),
            ErrorClass::InvalidArgument
        );
    }

    #[test]
    fn transient_markers() {
        for msg in [
            "HTTP 500: internal",
            "503 Service Unavailable",
            "XHR error",
            "fetch failed",
            "Timeout was reached",
            "NetworkError when attempting to fetch resource",
            "RPC failed",
            "Couldn't connect to server",
            "Couldn't resolve host name",
        ] {
            assert_eq!(classify_message(msg), ErrorClass::Transient, "marker: {msg}");
        }
    }

    #[test]
    fn unknown_fallthrough() {
        assert_eq!(classify_message("HTTP 404: not found"), ErrorClass::Unknown);
        assert_eq!(classify_message("something odd happened"), ErrorClass::Unknown);
        assert_eq!(classify_message(""), ErrorClass::Unknown);
    }

    #[test]
    fn precedence_earlier_classes_win() {
        // A 413 body that also mentions quota must classify as PayloadTooLarge.
        assert_eq!(
            classify_message("413: payload too large, quota irrelevant"),
            ErrorClass::PayloadTooLarge
        );
        // 400 beats 429 when both appear.
        assert_eq!(
            classify_message("400 invalid argument (would otherwise hit 429)"),
            ErrorClass::InvalidArgument
        );
        // Quota beats transient markers.
        assert_eq!(
            classify_message("429 resource_exhausted after rpc failed"),
            ErrorClass::QuotaExceeded
        );
    }

    #[test]
    fn classify_accepts_any_display() {
        let curl_like = std::io::Error::new(std::io::ErrorKind::TimedOut, "read timeout");
        assert_eq!(classify(&curl_like), ErrorClass::Transient);
        assert_eq!(classify("quota"), ErrorClass::QuotaExceeded);
    }
}
