//! Retry for transient upstream failures.
//!
//! Retries timeouts, connect failures, 5xx responses, and 429; never retries
//! other client errors. A transient status on the final attempt is returned
//! as-is so the caller's status handling reports it.

use reqwest::{Response, StatusCode};
use std::future::Future;
use std::time::Duration;

/// Backoff policy: `base_delay * 2^attempt`, capped at `max_delay`.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retries after the first attempt. Zero disables retrying.
    pub attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 2,
            base_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(3),
        }
    }
}

impl RetryPolicy {
    /// Policy that never retries. Used by tests and impatient callers.
    pub fn none() -> Self {
        Self {
            attempts: 0,
            ..Self::default()
        }
    }

    fn delay(&self, attempt: u32) -> Duration {
        let factor = 2u64.saturating_pow(attempt);
        let millis = (self.base_delay.as_millis() as u64).saturating_mul(factor);
        Duration::from_millis(millis.min(self.max_delay.as_millis() as u64))
    }
}

fn transient_error(error: &reqwest::Error) -> bool {
    error.is_timeout() || error.is_connect()
}

fn transient_status(status: StatusCode) -> bool {
    status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS
}

/// Run `send` until it yields a non-transient outcome or the policy's
/// attempts are exhausted.
pub(crate) async fn send_with_retry<F, Fut>(
    policy: &RetryPolicy,
    send: F,
) -> Result<Response, reqwest::Error>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<Response, reqwest::Error>>,
{
    let mut attempt = 0;
    loop {
        match send().await {
            Ok(response) if transient_status(response.status()) && attempt < policy.attempts => {
                tracing::warn!(status = %response.status(), attempt, "transient upstream status");
            }
            Ok(response) => return Ok(response),
            Err(error) if transient_error(&error) && attempt < policy.attempts => {
                tracing::warn!(error = %error, attempt, "transient upstream error");
            }
            Err(error) => return Err(error),
        }

        let delay = policy.delay(attempt);
        attempt += 1;
        tracing::debug!(attempt, ?delay, "retrying upstream request");
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_doubles_and_caps() {
        let policy = RetryPolicy {
            attempts: 5,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_millis(500),
        };

        assert_eq!(policy.delay(0), Duration::from_millis(100));
        assert_eq!(policy.delay(1), Duration::from_millis(200));
        assert_eq!(policy.delay(2), Duration::from_millis(400));
        assert_eq!(policy.delay(3), Duration::from_millis(500));
        assert_eq!(policy.delay(10), Duration::from_millis(500));
    }

    #[test]
    fn transient_statuses() {
        assert!(transient_status(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(transient_status(StatusCode::SERVICE_UNAVAILABLE));
        assert!(transient_status(StatusCode::TOO_MANY_REQUESTS));

        assert!(!transient_status(StatusCode::OK));
        assert!(!transient_status(StatusCode::BAD_REQUEST));
        assert!(!transient_status(StatusCode::NOT_FOUND));
        assert!(!transient_status(StatusCode::FORBIDDEN));
    }

    #[test]
    fn none_policy_disables_retry() {
        assert_eq!(RetryPolicy::none().attempts, 0);
    }
}
