use std::{future::Future, time::Duration};

use thiserror::Error;
use tokio::time::sleep;

use crate::{config::HunterConfig, fragment::ProbeError};

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub attempts: u32,
    /// Wait after an attempt that failed outright.
    pub failure_delay: Duration,
    /// Wait after an attempt that came back empty.
    pub empty_delay: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &HunterConfig) -> Self {
        Self {
            attempts: config.attempts.max(1),
            failure_delay: config.failure_delay,
            empty_delay: config.empty_delay,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            failure_delay: Duration::from_secs(3),
            empty_delay: Duration::from_secs(2),
        }
    }
}

#[derive(Debug, Error)]
#[error("no usable response after {attempts} attempts")]
pub struct RetryExhausted {
    pub attempts: u32,
    #[source]
    pub last_error: Option<ProbeError>,
}

/// Runs `attempt` until it yields `Some`, at most `policy.attempts` times.
///
/// `Ok(None)` is an empty response and waits `empty_delay`; `Err` waits
/// `failure_delay`. No wait follows the final attempt.
pub async fn retry<T, F, Fut>(
    policy: &RetryPolicy,
    label: &str,
    mut attempt: F,
) -> Result<T, RetryExhausted>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Option<T>, ProbeError>>,
{
    let attempts = policy.attempts.max(1);
    let mut last_error = None;

    for n in 1..=attempts {
        let delay = match attempt(n).await {
            Ok(Some(value)) => return Ok(value),
            Ok(None) => {
                tracing::debug!(target: "retry", candidate = label, attempt = n, "empty response");
                last_error = None;
                policy.empty_delay
            }
            Err(err) => {
                tracing::warn!(
                    target: "retry",
                    candidate = label,
                    attempt = n,
                    error = %err,
                    "probe attempt failed"
                );
                last_error = Some(err);
                policy.failure_delay
            }
        };
        if n < attempts {
            sleep(delay).await;
        }
    }

    Err(RetryExhausted {
        attempts,
        last_error,
    })
}
