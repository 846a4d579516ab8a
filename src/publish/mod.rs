//! Publishing composed reports to social platforms
//!
//! Each platform implements [`Publisher`]. [`publish_with_retry`] retries only
//! the network call with the already-composed [`Report`]; statistics are
//! never recomputed between attempts. Retries are bounded by a
//! [`RetryPolicy`] in both single-shot and loop mode.

pub mod lemmy;
pub mod mastodon;

#[cfg(test)]
pub mod tests;

pub use lemmy::LemmyPublisher;
pub use mastodon::MastodonPublisher;

use crate::config::ScheduleConfig;
use crate::constants::{HTTP_TIMEOUT_SECONDS, USER_AGENT};
use crate::error::{DigestError, Result};
use crate::models::Report;
use reqwest::{Client, Response};
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// A platform that accepts a title and body
pub trait Publisher {
    /// Platform name for log lines
    fn name(&self) -> &str;

    fn publish(&self, report: &Report) -> impl Future<Output = Result<()>> + Send;
}

/// Fixed-interval retry with a bounded number of attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl RetryPolicy {
    pub fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts: max_attempts.max(1),
        }
    }
}

impl From<&ScheduleConfig> for RetryPolicy {
    fn from(schedule: &ScheduleConfig) -> Self {
        Self::new(schedule.retry_interval(), schedule.max_publish_attempts)
    }
}

/// Publish `report`, retrying retriable failures until the policy is exhausted.
///
/// Non-retriable failures and cancellation end the loop immediately. The
/// last error is returned for the caller to log.
pub async fn publish_with_retry<P: Publisher>(
    publisher: &P,
    report: &Report,
    policy: &RetryPolicy,
    cancel: &CancellationToken,
) -> Result<()> {
    let mut attempt = 1;

    loop {
        info!("Posting to {} (attempt {}/{})", publisher.name(), attempt, policy.max_attempts);

        let err = match publisher.publish(report).await {
            Ok(()) => {
                info!("Weather report posted to {}", publisher.name());
                return Ok(());
            }
            Err(err) => err,
        };

        if !err.is_retriable() {
            error!("{} post failed permanently: {}", publisher.name(), err);
            return Err(err);
        }
        if attempt >= policy.max_attempts {
            warn!(
                "{} post failed after {} attempts, giving up: {}",
                publisher.name(),
                attempt,
                err
            );
            return Err(err);
        }

        warn!(
            "{} post failed: {}. Retrying in {:?} (attempt {}/{})",
            publisher.name(),
            err,
            policy.interval,
            attempt,
            policy.max_attempts
        );

        tokio::select! {
            _ = tokio::time::sleep(policy.interval) => {}
            _ = cancel.cancelled() => {
                return Err(DigestError::interrupted(format!(
                    "{} retry cancelled",
                    publisher.name()
                )));
            }
        }
        attempt += 1;
    }
}

/// Shared HTTP client settings for all platforms
pub fn http_client() -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECONDS))
        .build()
        .map_err(|e| DigestError::http("HTTP", "cannot build client", e))
}

/// Join a server base URL and an API path without doubling slashes
pub fn endpoint(server: &str, path: &str) -> String {
    format!(
        "{}/{}",
        server.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Pass 2xx responses through, turn everything else into `PublishRejected`
pub(crate) async fn ensure_success(platform: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(DigestError::publish_rejected(platform, status.as_u16(), body))
}
