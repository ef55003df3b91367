use super::Classification;
use std::time::Duration;

/// Retries allowed after the original attempt when not configured
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Backoff unit when not configured
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(1000);

/// Human-readable delay, e.g. `1s`, `2s`, `1.5s`, `250ms`
pub fn format_delay(delay: Duration) -> String {
    let millis = delay.as_millis();
    if millis < 1000 {
        format!("{}ms", millis)
    } else if millis % 1000 == 0 {
        format!("{}s", millis / 1000)
    } else {
        format!("{:.1}s", delay.as_secs_f64())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    Retry { next_attempt: u32, delay: Duration },
    Abort,
}

/// RetryPolicy caps and spaces out retries of transient failures.
///
/// The delay before retry `n + 1` is `base_delay * 2^n`, so with the
/// defaults the first retry waits 1s and the second 2s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u32,
    base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Delay to wait after a failed `attempt` (0-based)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }

    /// Retries only retryable classifications, and only while under the cap.
    pub fn decide(&self, classification: &Classification, attempt: u32) -> RetryDecision {
        if classification.retryable && attempt < self.max_retries {
            RetryDecision::Retry {
                next_attempt: attempt + 1,
                delay: self.delay_for(attempt),
            }
        } else {
            RetryDecision::Abort
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RETRIES, DEFAULT_BASE_DELAY)
    }
}
