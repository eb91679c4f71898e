//! Retry with exponential backoff
//!
//! Browser interactions fail transiently (a re-render swaps the node out
//! between resolve and act). Flows wrap such calls in a bounded retry.

use crate::Result;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Run an async operation up to `max_retries + 1` times
///
/// The delay starts at `initial_delay` and doubles after every failed
/// attempt. The last error is returned when every attempt fails.
pub async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    initial_delay: Duration,
    mut operation: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut delay = initial_delay;

    for attempt in 0..=max_retries {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < max_retries => {
                debug!(attempt, "retrying after error: {e}");
                tokio::time::sleep(delay).await;
                delay *= 2;
            }
            Err(e) => return Err(e),
        }
    }

    unreachable!("loop returns on the last attempt")
}
