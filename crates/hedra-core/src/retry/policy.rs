use std::time::Duration;

/// Classification of a failed attempt for retry purposes.
///
/// Created fresh per failure from the stringified error; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Request body exceeded the service limit (413). Never retried.
    PayloadTooLarge,
    /// Service rejected the request as malformed (400). Never retried.
    InvalidArgument,
    /// Rate/usage limit hit (429, RESOURCE_EXHAUSTED). Retried with backoff;
    /// reported distinctly once the retry budget is spent.
    QuotaExceeded,
    /// Network or server-side failure presumed recoverable (5xx, timeouts).
    Transient,
    /// Anything else; re-raised immediately without retry.
    Unknown,
}

impl ErrorClass {
    /// True for classes where a retry can plausibly help.
    pub fn is_retryable(self) -> bool {
        matches!(self, ErrorClass::QuotaExceeded | ErrorClass::Transient)
    }
}

/// Decision returned by the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Do not retry this error.
    NoRetry,
    /// Retry after the given delay.
    RetryAfter(Duration),
}

/// Exponential backoff policy. Immutable; constructed once per call site.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Maximum number of retries (attempts beyond the first).
    pub max_retries: u32,
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Multiplier applied to the delay after each retry. Must be >= 1.
    pub backoff_factor: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(2000),
            backoff_factor: 2.0,
        }
    }
}

impl RetryPolicy {
    /// Decide what to do after the `attempt`-th failure (1-based).
    ///
    /// Terminal classes are never retried; retryable classes get an
    /// exponentially growing delay until `max_retries` is spent.
    pub fn decide(&self, attempt: u32, class: ErrorClass) -> RetryDecision {
        if !class.is_retryable() || attempt > self.max_retries {
            return RetryDecision::NoRetry;
        }
        RetryDecision::RetryAfter(self.delay_before_retry(attempt))
    }

    /// Delay before retry `n` (1-based): `initial_delay * backoff_factor^(n-1)`.
    pub fn delay_before_retry(&self, n: u32) -> Duration {
        let exp = self.backoff_factor.powi(n.saturating_sub(1) as i32);
        self.initial_delay.mul_f64(exp)
    }
}
