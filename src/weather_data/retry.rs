//! Retry with exponential backoff for transient provider failures.

use crate::weather_data::error::WeatherDataError;
use log::warn;
use std::future::Future;
use std::time::Duration;

pub const DEFAULT_MAX_RETRIES: u32 = 5;
pub const DEFAULT_INITIAL_DELAY_MS: u64 = 200;
pub const DEFAULT_MAX_DELAY_MS: u64 = 5_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Maximum number of attempts after the first one.
    pub max_retries: u32,
    /// Delay before the first retry; doubles on every further attempt.
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            initial_delay: Duration::from_millis(DEFAULT_INITIAL_DELAY_MS),
            max_delay: Duration::from_millis(DEFAULT_MAX_DELAY_MS),
        }
    }
}

impl RetryConfig {
    pub fn new(max_retries: u32, initial_delay_ms: u64, max_delay_ms: u64) -> Self {
        Self {
            max_retries,
            initial_delay: Duration::from_millis(initial_delay_ms),
            max_delay: Duration::from_millis(max_delay_ms),
        }
    }

    /// No retries at all.
    pub fn disabled() -> Self {
        Self::new(0, 0, 0)
    }

    /// Delay before retry number `attempt` (0-based): `initial_delay * 2^attempt`, capped.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.initial_delay
            .saturating_mul(factor)
            .min(self.max_delay)
    }
}

/// Runs `operation` until it succeeds, fails permanently, or retries run out.
///
/// Only errors for which [`WeatherDataError::is_transient`] holds are retried. The last
/// error is returned once `config.max_retries` retries have failed.
pub async fn with_retry<T, F, Fut>(
    config: &RetryConfig,
    what: &str,
    mut operation: F,
) -> Result<T, WeatherDataError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, WeatherDataError>>,
{
    let mut attempt = 0;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() && attempt < config.max_retries => {
                let delay = config.delay_for_attempt(attempt);
                warn!(
                    "{} failed ({}), retry {}/{} in {:?}",
                    what,
                    e,
                    attempt + 1,
                    config.max_retries,
                    delay
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_delay_doubles_and_caps() {
        let config = RetryConfig::default();
        assert_eq!(config.delay_for_attempt(0), Duration::from_millis(200));
        assert_eq!(config.delay_for_attempt(1), Duration::from_millis(400));
        assert_eq!(config.delay_for_attempt(2), Duration::from_millis(800));
        assert_eq!(config.delay_for_attempt(10), Duration::from_millis(5_000));
        assert_eq!(config.delay_for_attempt(u32::MAX), Duration::from_millis(5_000));
    }

    #[tokio::test]
    async fn test_retries_transient_errors() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let config = RetryConfig::new(3, 1, 1);

        let result = with_retry(&config, "test", move || async move {
            if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(WeatherDataError::Unavailable("busy".into()))
            } else {
                Ok(42)
            }
        })
        .await;

        assert_eq!(result.ok(), Some(42));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let config = RetryConfig::new(2, 1, 1);

        let result: Result<(), _> = with_retry(&config, "test", move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(WeatherDataError::Unavailable("down".into()))
        })
        .await;

        assert!(matches!(result, Err(WeatherDataError::Unavailable(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_permanent_errors_are_not_retried() {
        let counter = AtomicU32::new(0);
        let calls = &counter;

        let result: Result<(), _> = with_retry(&RetryConfig::new(5, 1, 1), "test", move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(WeatherDataError::MissingBlock(crate::Frequency::Daily))
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
