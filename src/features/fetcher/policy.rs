use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::config::FetchSettings;
use crate::core::error::FetchFailure;

const BACKOFF_FACTOR: u32 = 2;

#[async_trait]
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
    async fn sleep(&self, duration: Duration);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// How many times to try a request and how long to wait between tries.
///
/// The wait between attempt `k` and `k + 1` is `base_delay * factor^(k - 1)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub factor: u32,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            factor: BACKOFF_FACTOR,
        }
    }

    pub fn from_settings(settings: &FetchSettings) -> Self {
        Self::new(settings.max_attempts, settings.base_backoff())
    }

    pub fn backoff_after(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1);
        let multiplier = self.factor.checked_pow(exponent).unwrap_or(u32::MAX);
        self.base_delay
            .checked_mul(multiplier)
            .unwrap_or(Duration::MAX)
    }

    pub fn should_retry(&self, attempt: u32, failure: &FetchFailure) -> bool {
        attempt < self.max_attempts && failure.is_retryable()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_from_base_delay() {
        let policy = RetryPolicy::new(4, Duration::from_secs(2));
        assert_eq!(policy.backoff_after(1), Duration::from_secs(2));
        assert_eq!(policy.backoff_after(2), Duration::from_secs(4));
        assert_eq!(policy.backoff_after(3), Duration::from_secs(8));
    }

    #[test]
    fn backoff_saturates_instead_of_overflowing() {
        let policy = RetryPolicy::new(100, Duration::from_secs(2));
        assert_eq!(
            policy.backoff_after(90),
            Duration::from_secs(2) * u32::MAX
        );
    }

    #[test]
    fn client_errors_are_not_retried() {
        let policy = RetryPolicy::default();
        assert!(!policy.should_retry(1, &FetchFailure::Status(404)));
        assert!(policy.should_retry(1, &FetchFailure::Status(503)));
        assert!(policy.should_retry(1, &FetchFailure::Status(429)));
        assert!(policy.should_retry(2, &FetchFailure::Network("reset".to_string())));
        assert!(!policy.should_retry(3, &FetchFailure::Status(503)));
    }

    #[test]
    fn zero_attempts_is_clamped_to_one() {
        assert_eq!(RetryPolicy::new(0, Duration::ZERO).max_attempts, 1);
    }
}
