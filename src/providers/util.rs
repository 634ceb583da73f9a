use anyhow::Error;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Runs `operation`, retrying up to `retries` more times after a failure.
///
/// With `retries == 0` the request is attempted once and its error returned,
/// which is the default single-shot price fetch.
pub async fn with_retry<F, Fut, T>(
    mut operation: F,
    retries: usize,
    delay_ms: u64,
) -> Result<T, Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, reqwest::Error>>,
{
    let mut attempt = 0;
    loop {
        attempt += 1;
        match operation().await {
            Ok(val) => return Ok(val),
            Err(err) if attempt > retries => return Err(err.into()),
            Err(err) => {
                debug!(attempt, retries, error = %err, "Request failed, retrying");
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}
