//! Retry support for transient API failures.

use std::time::Duration;

use tracing::info;

use crate::error::Error;

/// Retry configuration for operations.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts.
    pub max_attempts: u32,
    /// Initial delay between retries.
    pub initial_delay: Duration,
    /// Maximum delay between retries.
    pub max_delay: Duration,
    /// Multiplier for exponential backoff.
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
        }
    }
}

/// Execute an async operation with retry on transient failures.
///
/// Only failures classified by [`Error::is_transient`] are retried;
/// anything else (4xx other than 429, parse errors, missing config) is
/// returned immediately.
///
/// # Errors
/// Returns the last error once attempts are exhausted, or the first
/// non-transient error.
pub async fn with_retry_async<T, F, Fut>(
    config: &RetryConfig,
    operation_name: &str,
    mut f: F,
) -> Result<T, Error>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, Error>>,
{
    let mut attempt = 0;
    let mut delay = config.initial_delay;

    loop {
        attempt += 1;
        match f().await {
            Ok(result) => return Ok(result),
            Err(e) if e.is_transient() && attempt < config.max_attempts => {
                info!(
                    "{operation_name} failed (attempt {attempt}/{}): {e}. Retrying in {delay:?}...",
                    config.max_attempts
                );

                tokio::time::sleep(delay).await;
                delay = std::cmp::min(
                    config.max_delay,
                    Duration::from_secs_f64(delay.as_secs_f64() * config.backoff_multiplier),
                );
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_config() -> RetryConfig {
        RetryConfig {
            max_attempts: 3,
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(4),
            backoff_multiplier: 2.0,
        }
    }

    #[test]
    fn test_retry_config_default() {
        let config = RetryConfig::default();
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.backoff_multiplier, 2.0);
    }

    #[tokio::test]
    async fn test_transient_errors_are_retried() {
        let mut calls = 0;
        let result = with_retry_async(&fast_config(), "flaky op", || {
            calls += 1;
            let attempt = calls;
            async move {
                if attempt < 3 {
                    Err(Error::Api {
                        status: 503,
                        message: "maintenance".to_string(),
                    })
                } else {
                    Ok(attempt)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls, 3);
    }

    #[tokio::test]
    async fn test_permanent_errors_fail_fast() {
        let mut calls = 0;
        let result: Result<(), Error> = with_retry_async(&fast_config(), "bad request", || {
            calls += 1;
            async {
                Err(Error::Api {
                    status: 400,
                    message: "jql is invalid".to_string(),
                })
            }
        })
        .await;

        assert!(matches!(result, Err(Error::Api { status: 400, .. })));
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn test_attempts_are_exhausted() {
        let mut calls = 0;
        let result: Result<(), Error> = with_retry_async(&fast_config(), "down", || {
            calls += 1;
            async {
                Err(Error::Api {
                    status: 502,
                    message: "bad gateway".to_string(),
                })
            }
        })
        .await;

        assert!(matches!(result, Err(Error::Api { status: 502, .. })));
        assert_eq!(calls, 3);
    }
}
