//! Client for the upstream generative-language API.
//!
//! Uses the curl crate (libcurl) for the HTTP POST; calls are blocking and
//! meant to be wrapped in `tokio::task::spawn_blocking` from async code.
//! Errors stringify with the raw status code and vendor body so the retry
//! classifier can see the vendor's own failure markers.

mod client;
mod error;

pub use client::{GenerateRequest, InlineData, UpstreamClient};
pub use error::UpstreamError;
