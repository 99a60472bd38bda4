//! Retry logic with exponential backoff for network operations.

use crate::error::Result;
use std::future::Future;
use tokio::time::Duration;

/// Delay schedule between attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    /// Wait before the first retry; doubled for each further retry
    pub base: Duration,
    /// Upper bound on any single wait
    pub max: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            base: Duration::from_secs(1),
            max: Duration::from_secs(30),
        }
    }
}

impl Backoff {
    /// Wait before retry number `attempt` (1-based): base, 2×base, 4×base, ...
    pub fn delay(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base.saturating_mul(factor).min(self.max)
    }
}

/// Retry an async operation with exponential backoff
///
/// Recoverable errors (see [`RevylError::is_recoverable`]) are retried up to
/// `max_retries` times; anything else is returned immediately.
///
/// # Arguments
/// * `operation` - Async closure producing one attempt
/// * `max_retries` - Maximum number of retry attempts (0 = try once, no retries)
/// * `operation_name` - Human-readable name for logging
/// * `backoff` - Delay schedule between attempts
///
/// [`RevylError::is_recoverable`]: crate::error::RevylError::is_recoverable
pub async fn retry_with_backoff<F, T, Fut>(
    mut operation: F,
    max_retries: u32,
    operation_name: &str,
    backoff: Backoff,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempts = 0;

    loop {
        match operation().await {
            Ok(result) => {
                if attempts > 0 {
                    log::info!("{} succeeded after {} retry(ies)", operation_name, attempts);
                }
                return Ok(result);
            }
            Err(e) => {
                if !e.is_recoverable() || attempts >= max_retries {
                    if attempts > 0 {
                        log::warn!("{} failed after {} attempt(s)", operation_name, attempts + 1);
                    }
                    return Err(e);
                }

                attempts += 1;
                let wait = backoff.delay(attempts);
                log::warn!(
                    "{} failed (attempt {}/{}): {}; retrying in {:.1}s",
                    operation_name,
                    attempts,
                    max_retries + 1,
                    e,
                    wait.as_secs_f64()
                );
                tokio::time::sleep(wait).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ContractError, HttpError, RevylError};
    use std::cell::Cell;

    fn instant() -> Backoff {
        Backoff {
            base: Duration::ZERO,
            max: Duration::ZERO,
        }
    }

    #[test]
    fn delay_doubles_and_caps() {
        let backoff = Backoff::default();
        assert_eq!(backoff.delay(1), Duration::from_secs(1));
        assert_eq!(backoff.delay(2), Duration::from_secs(2));
        assert_eq!(backoff.delay(4), Duration::from_secs(8));
        assert_eq!(backoff.delay(10), Duration::from_secs(30));
    }

    #[tokio::test]
    async fn retries_transient_failures_until_success() {
        let calls = Cell::new(0);
        let result = retry_with_backoff(
            || {
                calls.set(calls.get() + 1);
                let n = calls.get();
                async move {
                    if n < 3 {
                        Err(RevylError::from(HttpError::Status {
                            status: 502,
                            body: "bad gateway".to_string(),
                        }))
                    } else {
                        Ok(n)
                    }
                }
            },
            5,
            "resolve",
            instant(),
        )
        .await;
        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls.get(), 3);
    }

    #[tokio::test]
    async fn stops_at_retry_limit() {
        let calls = Cell::new(0);
        let result: Result<()> = retry_with_backoff(
            || {
                calls.set(calls.get() + 1);
                async {
                    Err(RevylError::from(HttpError::Timeout {
                        url: "http://x".to_string(),
                    }))
                }
            },
            2,
            "upload",
            instant(),
        )
        .await;
        assert!(result.is_err());
        assert_eq!(calls.get(), 3);
    }

    #[tokio::test]
    async fn does_not_retry_unrecoverable_errors() {
        let calls = Cell::new(0);
        let result: Result<()> = retry_with_backoff(
            || {
                calls.set(calls.get() + 1);
                async { Err(RevylError::from(ContractError::MissingVersion)) }
            },
            5,
            "resolve",
            instant(),
        )
        .await;
        assert!(result.is_err());
        assert_eq!(calls.get(), 1);
    }
}
