//! Retry loop: run an async operation until success or the policy says stop.

use std::fmt::Display;
use std::future::Future;

use super::classify;
use super::error::RequestError;
use super::policy::{ErrorClass, RetryDecision, RetryPolicy};

/// Runs `op` until it succeeds or the retry budget is spent.
///
/// Each failure is classified from its stringified form; terminal classes
/// propagate on first occurrence, retryable ones sleep for the backoff delay
/// (suspending the task, not blocking the runtime) and try again. Implemented
/// as an explicit loop so deep retry chains never grow the call stack.
pub async fn run_with_retry<T, E, F, Fut>(
    policy: &RetryPolicy,
    mut op: F,
) -> Result<T, RequestError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut attempt = 1u32;
    loop {
        let err = match op().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        let class = classify::classify(&err);
        match class {
            ErrorClass::PayloadTooLarge => return Err(RequestError::PayloadTooLarge(err)),
            ErrorClass::InvalidArgument => return Err(RequestError::InvalidArgument(err)),
            ErrorClass::Unknown => return Err(RequestError::Upstream(err)),
            ErrorClass::QuotaExceeded | ErrorClass::Transient => {
                match policy.decide(attempt, class) {
                    RetryDecision::RetryAfter(delay) => {
                        tracing::debug!(
                            attempt,
                            delay_ms = delay.as_millis() as u64,
                            class = ?class,
                            "upstream call failed, retrying: {err}"
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                    }
                    RetryDecision::NoRetry => {
                        return Err(match class {
                            ErrorClass::QuotaExceeded => RequestError::QuotaExhausted {
                                attempts: attempt,
                                last: err,
                            },
                            _ => RequestError::Upstream(err),
                        });
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    fn fast_policy(max_retries: u32) -> RetryPolicy {
        RetryPolicy {
            max_retries,
            initial_delay: Duration::from_millis(5),
            backoff_factor: 2.0,
        }
    }

    #[tokio::test]
    async fn success_passes_value_through() {
        let policy = fast_policy(3);
        let out: Result<u32, RequestError<String>> =
            run_with_retry(&policy, || async { Ok(42u32) }).await;
        assert_eq!(out.unwrap(), 42);
    }

    #[tokio::test]
    async fn transient_exhaustion_makes_n_plus_one_attempts() {
        let policy = fast_policy(3);
        let calls = Arc::new(AtomicU32::new(0));
        let calls_op = Arc::clone(&calls);
        let out: Result<(), RequestError<String>> = run_with_retry(&policy, move || {
            let calls = Arc::clone(&calls_op);
            async move {
                calls.fetch_add(1, Ordering::Relaxed);
                Err("503 Service Unavailable".to_string())
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::Relaxed), 4);
        // The original error comes back unchanged.
        match out.unwrap_err() {
            RequestError::Upstream(e) => assert_eq!(e, "503 Service Unavailable"),
            other => panic!("expected Upstream, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn recovers_after_two_transient_failures() {
        let policy = RetryPolicy {
            max_retries: 3,
            initial_delay: Duration::from_millis(100),
            backoff_factor: 2.0,
        };
        let calls = Arc::new(AtomicU32::new(0));
        let calls_op = Arc::clone(&calls);
        let start = Instant::now();
        let out: Result<&str, RequestError<String>> = run_with_retry(&policy, move || {
            let calls = Arc::clone(&calls_op);
            async move {
                if calls.fetch_add(1, Ordering::Relaxed) < 2 {
                    Err("503 Service Unavailable".to_string())
                } else {
                    Ok("transcript")
                }
            }
        })
        .await;
        assert_eq!(out.unwrap(), "transcript");
        assert_eq!(calls.load(Ordering::Relaxed), 3);
        // Two backoff sleeps: 100ms + 200ms.
        assert!(start.elapsed() >= Duration::from_millis(300));
    }

    #[tokio::test]
    async fn invalid_argument_is_immediate_single_attempt() {
        let policy = fast_policy(5);
        let calls = Arc::new(AtomicU32::new(0));
        let calls_op = Arc::clone(&calls);
        let start = Instant::now();
        let out: Result<(), RequestError<String>> = run_with_retry(&policy, move || {
            let calls = Arc::clone(&calls_op);
            async move {
                calls.fetch_add(1, Ordering::Relaxed);
                Err("Invalid Argument: bad mime type".to_string())
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::Relaxed), 1);
        assert!(start.elapsed() < Duration::from_millis(50));
        assert!(matches!(out.unwrap_err(), RequestError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn payload_too_large_ignores_retry_budget() {
        let policy = fast_policy(10);
        let calls = Arc::new(AtomicU32::new(0));
        let calls_op = Arc::clone(&calls);
        let out: Result<(), RequestError<String>> = run_with_retry(&policy, move || {
            let calls = Arc::clone(&calls_op);
            async move {
                calls.fetch_add(1, Ordering::Relaxed);
                Err("HTTP 413: payload too large".to_string())
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::Relaxed), 1);
        assert!(matches!(out.unwrap_err(), RequestError::PayloadTooLarge(_)));
    }

    #[tokio::test]
    async fn quota_exhaustion_is_reported_distinctly() {
        let policy = fast_policy(2);
        let out: Result<(), RequestError<String>> = run_with_retry(&policy, || async {
            Err("429 RESOURCE_EXHAUSTED".to_string())
        })
        .await;
        match out.unwrap_err() {
            RequestError::QuotaExhausted { attempts, last } => {
                assert_eq!(attempts, 3);
                assert_eq!(last, "429 RESOURCE_EXHAUSTED");
            }
            other => panic!("expected QuotaExhausted, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unknown_error_propagates_immediately() {
        let policy = fast_policy(5);
        let calls = Arc::new(AtomicU32::new(0));
        let calls_op = Arc::clone(&calls);
        let out: Result<(), RequestError<String>> = run_with_retry(&policy, move || {
            let calls = Arc::clone(&calls_op);
            async move {
                calls.fetch_add(1, Ordering::Relaxed);
                Err("HTTP 404: model not found".to_string())
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::Relaxed), 1);
        match out.unwrap_err() {
            RequestError::Upstream(e) => assert_eq!(e, "HTTP 404: model not found"),
            other => panic!("expected Upstream, got {other:?}"),
        }
    }
}
