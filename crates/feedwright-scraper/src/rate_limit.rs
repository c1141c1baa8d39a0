//! Retry policy for the HTTP layer.
//!
//! Routes never retry on their own; only [`crate::HttpClient`] does, and only
//! for conditions a second attempt can plausibly fix.

use std::future::Future;
use std::time::Duration;

use crate::error::ScraperError;

/// Transient conditions: HTTP 429 and network-level failures. Everything
/// else (404, other statuses, bad payloads) would fail the same way again.
fn is_retriable(err: &ScraperError) -> bool {
    matches!(
        err,
        ScraperError::RateLimited { .. } | ScraperError::Http(_)
    )
}

/// Runs `operation`, retrying transient errors up to `max_retries` extra times.
///
/// The wait before retry `n` (1-based) is `backoff_base_secs * 2^(n-1)` seconds.
/// A server-supplied `Retry-After` is honoured when it is longer.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, ScraperError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ScraperError>>,
{
    let mut attempt = 0u32;

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        if !is_retriable(&err) || attempt >= max_retries {
            return Err(err);
        }

        let backoff = backoff_base_secs.saturating_mul(1u64 << attempt.min(62));
        let delay_secs = match &err {
            ScraperError::RateLimited {
                retry_after_secs, ..
            } if backoff_base_secs > 0 => backoff.max(*retry_after_secs),
            _ => backoff,
        };
        tracing::warn!(
            attempt,
            max_retries,
            delay_secs,
            error = %err,
            "transient fetch error, retrying after backoff"
        );
        tokio::time::sleep(Duration::from_secs(delay_secs)).await;
        attempt += 1;
    }
}
