//! Exponential backoff with jitter.

use std::time::Duration;

use rand::Rng;

use crate::config::RetryConfig;

/// Delay to wait before launch attempt `attempt` (1-based).
///
/// The first attempt never waits. Later attempts double from
/// `base_delay_ms`, capped at `max_delay_ms`, plus up to 10% jitter.
pub fn launch_backoff(attempt: u32, retry: &RetryConfig) -> Duration {
    if attempt <= 1 {
        return Duration::ZERO;
    }

    let factor = 2u64.saturating_pow(attempt - 2);
    let capped = retry
        .base_delay_ms
        .saturating_mul(factor)
        .min(retry.max_delay_ms);

    let jitter_range = capped / 10;
    let jitter = if jitter_range > 0 {
        rand::thread_rng().gen_range(0..jitter_range)
    } else {
        0
    };

    Duration::from_millis(capped + jitter)
}
