use std::sync::atomic::{AtomicU32, Ordering};

use reqwest::header::HeaderValue;

use super::*;

fn fast(max_attempts: u32) -> RetryPolicy {
    RetryPolicy::new(max_attempts, Duration::from_millis(1))
}

#[test]
fn test_default_policy() {
    let policy = RetryPolicy::default();
    assert_eq!(policy.max_attempts, 5);
    assert_eq!(policy.base_delay, Duration::from_secs(1));
}

#[test]
fn test_delay_doubles_and_caps() {
    let policy = RetryPolicy {
        max_attempts: 10,
        base_delay: Duration::from_secs(1),
        max_delay: Duration::from_secs(10),
    };
    assert_eq!(policy.delay_for(1, None), Duration::from_secs(1));
    assert_eq!(policy.delay_for(2, None), Duration::from_secs(2));
    assert_eq!(policy.delay_for(3, None), Duration::from_secs(4));
    assert_eq!(policy.delay_for(4, None), Duration::from_secs(8));
    assert_eq!(policy.delay_for(5, None), Duration::from_secs(10));
    assert_eq!(policy.delay_for(40, None), Duration::from_secs(10));
}

#[test]
fn test_retry_after_only_extends_delay() {
    let policy = RetryPolicy::default();
    assert_eq!(
        policy.delay_for(1, Some(Duration::from_secs(7))),
        Duration::from_secs(7)
    );
    assert_eq!(
        policy.delay_for(3, Some(Duration::from_millis(10))),
        Duration::from_secs(4)
    );
    assert_eq!(
        policy.delay_for(1, Some(Duration::from_secs(3600))),
        policy.max_delay
    );
}

#[test]
fn test_retryable_statuses() {
    for code in [429, 500, 502, 503, 504] {
        assert!(RetryPolicy::is_retryable_status(StatusCode::from_u16(code).unwrap()));
    }
    for code in [400, 401, 403, 404, 501] {
        assert!(!RetryPolicy::is_retryable_status(StatusCode::from_u16(code).unwrap()));
    }
}

#[test]
fn test_safe_methods() {
    assert!(RetryPolicy::is_safe_method(&Method::GET));
    assert!(RetryPolicy::is_safe_method(&Method::HEAD));
    assert!(!RetryPolicy::is_safe_method(&Method::POST));
}

#[test]
fn test_parse_retry_after() {
    let mut headers = HeaderMap::new();
    assert_eq!(parse_retry_after(&headers), None);
    headers.insert(RETRY_AFTER, HeaderValue::from_static("12"));
    assert_eq!(parse_retry_after(&headers), Some(Duration::from_secs(12)));
    headers.insert(RETRY_AFTER, HeaderValue::from_static("Wed, 21 Oct 2015 07:28:00 GMT"));
    assert_eq!(parse_retry_after(&headers), None);
}

#[tokio::test]
async fn test_run_stops_at_ceiling_with_not_found() {
    let counter = AtomicU32::new(0);
    let calls = &counter;
    let outcome: Lookup<String> = fast(5)
        .run(&Method::GET, "test", move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Attempt::new(Lookup::TransientError("HTTP 503".into()))
        })
        .await;
    assert_eq!(calls.load(Ordering::SeqCst), 5);
    assert_eq!(outcome, Lookup::NotFound);
}

#[tokio::test]
async fn test_run_returns_first_non_transient() {
    let counter = AtomicU32::new(0);
    let calls = &counter;
    let outcome = fast(5)
        .run(&Method::GET, "test", move || async move {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            if n < 3 {
                Attempt::new(Lookup::TransientError("HTTP 429".into()))
            } else {
                Attempt::new(Lookup::Found("about"))
            }
        })
        .await;
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(outcome, Lookup::Found("about"));
}

#[tokio::test]
async fn test_run_does_not_retry_not_found() {
    let counter = AtomicU32::new(0);
    let calls = &counter;
    let outcome: Lookup<()> = fast(5)
        .run(&Method::GET, "test", move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Attempt::new(Lookup::NotFound)
        })
        .await;
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(outcome, Lookup::NotFound);
}

#[tokio::test]
async fn test_run_never_retries_unsafe_methods() {
    let counter = AtomicU32::new(0);
    let calls = &counter;
    let outcome: Lookup<()> = fast(5)
        .run(&Method::POST, "test", move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Attempt::new(Lookup::TransientError("HTTP 503".into()))
        })
        .await;
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(outcome, Lookup::NotFound);
}
