//! Retry with exponential back-off and jitter for gateway search calls.
//!
//! [`retry_with_backoff`] wraps a fallible async operation and retries on
//! transient errors (network failures, 5xx). Authentication failures and
//! malformed responses are returned immediately — retrying cannot fix them,
//! and re-sending credentials after a rejection only burns rate budget.

use std::future::Future;
use std::time::Duration;

use crate::error::DiscoveryError;

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// **Retriable:** network-level failures (timeout, connection reset) and
/// HTTP 5xx responses.
///
/// **Not retriable:** [`DiscoveryError::Auth`],
/// [`DiscoveryError::ApiError`], [`DiscoveryError::Deserialize`],
/// [`DiscoveryError::LookupTimeout`].
pub(crate) fn is_retriable(err: &DiscoveryError) -> bool {
    match err {
        DiscoveryError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        DiscoveryError::Auth(_)
        | DiscoveryError::ApiError(_)
        | DiscoveryError::Deserialize { .. }
        | DiscoveryError::LookupTimeout { .. }
        | DiscoveryError::InvalidBaseUrl { .. } => false,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on
/// transient errors.
///
/// Delay doubles per attempt from `backoff_base_ms`, with ±25 % jitter,
/// capped at 60 s. Non-retriable errors are returned immediately.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, DiscoveryError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DiscoveryError>>,
{
    const MAX_DELAY_MS: u64 = 60_000;
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let computed = backoff_base_ms.saturating_mul(1u64 << (attempt - 1).min(10));
                let capped = computed.min(MAX_DELAY_MS);
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let delay_ms = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "transient discovery error — retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[test]
    fn auth_error_is_not_retriable() {
        assert!(!is_retriable(&DiscoveryError::Auth("401".to_owned())));
    }

    #[test]
    fn api_error_is_not_retriable() {
        assert!(!is_retriable(&DiscoveryError::ApiError("bad".to_owned())));
    }

    #[test]
    fn lookup_timeout_is_not_retriable() {
        assert!(!is_retriable(&DiscoveryError::LookupTimeout {
            handle: "a".to_owned(),
            timeout_secs: 10
        }));
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
    async fn does_not_retry_auth_failure() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, _>(DiscoveryError::Auth("rejected".to_owned()))
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1, "Auth must not be retried");
        assert!(matches!(result, Err(DiscoveryError::Auth(_))));
    }

    #[tokio::test]
    async fn retries_transient_error_then_succeeds() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                let attempt = c.fetch_add(1, Ordering::SeqCst) + 1;
                if attempt < 3 {
                    // Simulate a retriable connect error.
                    let err = reqwest::Client::new()
                        .get("http://0.0.0.0:1")
                        .send()
                        .await
                        .unwrap_err();
                    Err::<u32, _>(DiscoveryError::Http(err))
                } else {
                    Ok(99)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 99);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
