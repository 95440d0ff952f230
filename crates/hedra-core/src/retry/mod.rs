//! Retry and backoff around upstream generative-API calls.
//!
//! The upstream service fails in heterogeneous, vendor-specific ways
//! (string-embedded status codes rather than structured exceptions). This
//! module centralizes classification of those failures and the retry/backoff
//! decision so call sites never hand-roll their own heuristics.

mod classify;
mod error;
mod policy;
mod run;

pub use classify::{classify, classify_message};
pub use error::RequestError;
pub use policy::{ErrorClass, RetryDecision, RetryPolicy};
pub use run::run_with_retry;
