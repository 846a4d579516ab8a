//! Tests for retry behaviour and request payloads

use super::lemmy::{CreatePost, LoginRequest};
use super::mastodon::StatusRequest;
use super::*;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

/// Publisher that replays scripted outcomes
struct ScriptedPublisher {
    outcomes: Mutex<VecDeque<Result<()>>>,
    calls: AtomicU32,
    seen: Mutex<Vec<Report>>,
}

impl ScriptedPublisher {
    fn new(outcomes: Vec<Result<()>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            calls: AtomicU32::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Publisher for ScriptedPublisher {
    fn name(&self) -> &str {
        "Scripted"
    }

    async fn publish(&self, report: &Report) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(report.clone());
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(()))
    }
}

fn report() -> Report {
    Report {
        title: "☀️ Wetterstatistik".to_string(),
        body: "Niederschlag: 0.0 mm".to_string(),
    }
}

fn server_error() -> Result<()> {
    Err(DigestError::publish_rejected("Scripted", 503, "unavailable"))
}

fn immediate(max_attempts: u32) -> RetryPolicy {
    RetryPolicy::new(Duration::ZERO, max_attempts)
}

#[tokio::test]
async fn test_first_attempt_success() {
    let publisher = ScriptedPublisher::new(vec![Ok(())]);
    let result =
        publish_with_retry(&publisher, &report(), &immediate(3), &CancellationToken::new()).await;

    assert!(result.is_ok());
    assert_eq!(publisher.calls(), 1);
}

#[tokio::test]
async fn test_retries_until_success_with_same_report() {
    let publisher = ScriptedPublisher::new(vec![server_error(), server_error(), Ok(())]);
    let result =
        publish_with_retry(&publisher, &report(), &immediate(5), &CancellationToken::new()).await;

    assert!(result.is_ok());
    assert_eq!(publisher.calls(), 3);
    let seen = publisher.seen.lock().unwrap();
    assert!(seen.iter().all(|r| *r == report()));
}

#[tokio::test]
async fn test_gives_up_after_max_attempts() {
    let publisher = ScriptedPublisher::new((0..10).map(|_| server_error()).collect());
    let result =
        publish_with_retry(&publisher, &report(), &immediate(4), &CancellationToken::new()).await;

    assert!(matches!(
        result,
        Err(DigestError::PublishRejected { status: 503, .. })
    ));
    assert_eq!(publisher.calls(), 4);
}

#[tokio::test]
async fn test_non_retriable_error_stops_immediately() {
    let publisher = ScriptedPublisher::new(vec![Err(DigestError::publish_rejected(
        "Scripted",
        401,
        "incorrect_login",
    ))]);
    let result =
        publish_with_retry(&publisher, &report(), &immediate(48), &CancellationToken::new()).await;

    assert!(result.is_err());
    assert_eq!(publisher.calls(), 1);
}

#[tokio::test]
async fn test_cancellation_interrupts_wait() {
    let publisher = ScriptedPublisher::new(vec![server_error(), Ok(())]);
    let cancel = CancellationToken::new();
    cancel.cancel();
    let policy = RetryPolicy::new(Duration::from_secs(3600), 48);

    let result = publish_with_retry(&publisher, &report(), &policy, &cancel).await;

    assert!(matches!(result, Err(DigestError::Interrupted { .. })));
    assert_eq!(publisher.calls(), 1);
}

#[test]
fn test_retry_policy_from_schedule() {
    let policy = RetryPolicy::from(&ScheduleConfig::default());
    assert_eq!(policy.interval, Duration::from_secs(30 * 60));
    assert_eq!(policy.max_attempts, 48);
    assert_eq!(RetryPolicy::new(Duration::ZERO, 0).max_attempts, 1);
}

#[test]
fn test_endpoint_joins_without_double_slash() {
    assert_eq!(
        endpoint("https://natur.23.nu/", "/api/v3/post"),
        "https://natur.23.nu/api/v3/post"
    );
    assert_eq!(
        endpoint("https://example.social", "api/v1/statuses"),
        "https://example.social/api/v1/statuses"
    );
}

#[test]
fn test_lemmy_payloads() {
    let login = serde_json::to_value(LoginRequest {
        username_or_email: "wetterbot",
        password: "secret",
    })
    .unwrap();
    assert_eq!(
        login,
        serde_json::json!({"username_or_email": "wetterbot", "password": "secret"})
    );

    let post = serde_json::to_value(CreatePost {
        name: "Titel",
        body: "Text",
        community_id: 7,
    })
    .unwrap();
    assert_eq!(
        post,
        serde_json::json!({"name": "Titel", "body": "Text", "community_id": 7})
    );
}

#[test]
fn test_mastodon_payload() {
    let status = serde_json::to_value(StatusRequest {
        status: "Titel\nText",
        visibility: "unlisted",
    })
    .unwrap();
    assert_eq!(
        status,
        serde_json::json!({"status": "Titel\nText", "visibility": "unlisted"})
    );
}

#[test]
fn test_http_client_builds() {
    assert!(http_client().is_ok());
}
