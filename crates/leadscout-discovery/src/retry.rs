//! Retry with exponential back-off and jitter for outbound calls.
//!
//! [`retry_with_backoff`] wraps the search, page-fetch and language-model
//! calls. Only transient failures are retried; everything else is returned on
//! the first attempt so the caller can fall back to its sentinel quickly.

use std::future::Future;
use std::time::Duration;

use crate::error::DiscoveryError;

const MAX_DELAY_MS: u64 = 60_000;

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// **Retriable:**
/// - Network-level failures: timeout, connection refused or reset.
/// - [`DiscoveryError::RateLimited`]: HTTP 429.
/// - HTTP 5xx responses.
///
/// **Not retriable:** other 4xx statuses, malformed bodies, provider-reported
/// errors, unparsable model output, invalid URLs and candidate timeouts.
pub(crate) fn is_retriable(err: &DiscoveryError) -> bool {
    match err {
        DiscoveryError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        DiscoveryError::RateLimited { .. } => true,
        DiscoveryError::UnexpectedStatus { status, .. } => *status >= 500,
        DiscoveryError::Deserialize { .. }
        | DiscoveryError::SearchApi(_)
        | DiscoveryError::LanguageModel(_)
        | DiscoveryError::Parse(_)
        | DiscoveryError::InvalidUrl { .. }
        | DiscoveryError::Timeout { .. } => false,
    }
}

/// Delay before retry number `retry` (1-based): the base doubles per retry,
/// stops growing at [`MAX_DELAY_MS`], then `jitter` scales it.
fn backoff_delay(backoff_base_ms: u64, retry: u32, jitter: f64) -> Duration {
    let doubled = backoff_base_ms.saturating_mul(1u64 << retry.saturating_sub(1).min(10));
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let millis = (doubled.min(MAX_DELAY_MS) as f64 * jitter) as u64;
    Duration::from_millis(millis)
}

/// Calls `operation` until it succeeds, fails with a non-transient error, or
/// has been retried `max_retries` times.
///
/// With the default `LEADSCOUT_RETRY_BACKOFF_BASE_MS` of 500 and two retries,
/// a flaky search page waits roughly 0.5 s and then 1 s before giving up.
/// Each wait is randomised by up to a quarter either way so concurrent
/// candidates hitting the same host do not retry in lockstep.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, DiscoveryError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DiscoveryError>>,
{
    let mut retries = 0u32;
    let mut result = operation().await;
    while let Err(err) = &result {
        if retries == max_retries || !is_retriable(err) {
            break;
        }
        retries += 1;
        let delay = backoff_delay(backoff_base_ms, retries, rand::random_range(0.75..=1.25));
        tracing::warn!(
            retry = retries,
            max_retries,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            error = %err,
            "transient failure, backing off"
        );
        tokio::time::sleep(delay).await;
        result = operation().await;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn server_error() -> DiscoveryError {
        DiscoveryError::UnexpectedStatus {
            status: 503,
            url: "https://serpapi.com/search.json".to_owned(),
        }
    }

    #[test]
    fn rate_limited_is_retriable() {
        assert!(is_retriable(&DiscoveryError::RateLimited {
            url: "https://example.com".to_owned()
        }));
    }

    #[test]
    fn server_error_status_is_retriable() {
        assert!(is_retriable(&server_error()));
    }

    #[test]
    fn client_error_status_is_not_retriable() {
        assert!(!is_retriable(&DiscoveryError::UnexpectedStatus {
            status: 401,
            url: "https://serpapi.com/search.json".to_owned(),
        }));
    }

    #[test]
    fn parse_error_is_not_retriable() {
        assert!(!is_retriable(&DiscoveryError::Parse("no json".to_owned())));
    }

    #[test]
    fn backoff_doubles_per_retry_and_caps() {
        assert_eq!(backoff_delay(500, 1, 1.0), Duration::from_millis(500));
        assert_eq!(backoff_delay(500, 2, 1.0), Duration::from_millis(1_000));
        assert_eq!(backoff_delay(500, 3, 1.0), Duration::from_millis(2_000));
        assert_eq!(backoff_delay(500, 30, 1.0), Duration::from_millis(MAX_DELAY_MS));
    }

    #[test]
    fn backoff_applies_jitter_factor() {
        assert_eq!(backoff_delay(1_000, 1, 0.75), Duration::from_millis(750));
        assert_eq!(backoff_delay(1_000, 1, 1.25), Duration::from_millis(1_250));
        assert_eq!(backoff_delay(0, 4, 1.25), Duration::ZERO);
    }

    #[tokio::test]
    async fn succeeds_immediately_on_first_try() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Ok::<u32, DiscoveryError>(42)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_server_error_then_succeeds() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                let n = c.fetch_add(1, Ordering::SeqCst);
                if n < 2 {
                    Err(server_error())
                } else {
                    Ok::<u32, DiscoveryError>(99)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 99);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn propagates_last_error_after_exhausting_retries() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(2, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, DiscoveryError>(server_error())
            }
        })
        .await;
        // max_retries=2 → 3 total attempts
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(matches!(
            result,
            Err(DiscoveryError::UnexpectedStatus { status: 503, .. })
        ));
    }

    #[tokio::test]
    async fn does_not_retry_search_api_error() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, _>(DiscoveryError::SearchApi("Invalid API key".to_owned()))
            }
        })
        .await;
        assert_eq!(
            calls.load(Ordering::SeqCst),
            1,
            "SearchApi errors must not be retried"
        );
        assert!(matches!(result, Err(DiscoveryError::SearchApi(_))));
    }
}
