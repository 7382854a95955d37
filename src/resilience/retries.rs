//! Bounded retry around launching the sync tool.
//!
//! # Responsibilities
//! - Re-attempt a failed spawn up to `retry.max_attempts` times
//! - Sleep with jittered exponential backoff between attempts
//!
//! # Design Decisions
//! - Only the spawn is retried. Once a child exists its outcome is final
//! - Retries are off by default (`max_attempts = 1`)

use std::io;
use std::future::Future;

use crate::config::RetryConfig;
use crate::resilience::backoff::launch_backoff;

/// A launch that exhausted its attempts.
#[derive(Debug)]
pub struct LaunchFailure {
    pub attempts: u32,
    pub last_error: io::Error,
}

/// Run `launch` until it succeeds or attempts run out.
///
/// `launch` receives the 1-based attempt number. Returns the value and the
/// number of attempts it took.
pub async fn retry_launch<T, F, Fut>(
    retry: &RetryConfig,
    mut launch: F,
) -> Result<(T, u32), LaunchFailure>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = io::Result<T>>,
{
    let max_attempts = retry.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match launch(attempt).await {
            Ok(value) => return Ok((value, attempt)),
            Err(e) if attempt < max_attempts => {
                let delay = launch_backoff(attempt + 1, retry);
                tracing::warn!(
                    attempt,
                    max_attempts,
                    retry_in_ms = delay.as_millis() as u64,
                    error = %e,
                    "Launch failed, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(last_error) => {
                return Err(LaunchFailure { attempts: attempt, last_error });
            }
        }
    }
}
