//! Retry behavior of the outbound HTTP client against misbehaving upstreams.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};

use skymint::outbound::{OutboundError, ResilientHttpClient, RetryPolicy};

mod common;

fn fast_client(max_retries: u32) -> ResilientHttpClient {
    ResilientHttpClient::new(
        Duration::from_millis(2000),
        RetryPolicy {
            max_retries,
            base_delay: Duration::from_millis(10),
        },
    )
    .unwrap()
}

/// Upstream that fails with `status` for the first `failures` calls, then
/// answers 200 with a small JSON body.
async fn flaky_upstream(status: StatusCode, failures: u32) -> (std::net::SocketAddr, Arc<AtomicU32>) {
    let calls = Arc::new(AtomicU32::new(0));
    let cc = calls.clone();
    let router = Router::new().route(
        "/",
        get(move || {
            let cc = cc.clone();
            async move {
                let n = cc.fetch_add(1, Ordering::SeqCst);
                if n < failures {
                    Err(status)
                } else {
                    Ok(Json(json!({ "ok": true })))
                }
            }
        }),
    );
    (common::spawn_upstream(router).await, calls)
}

#[tokio::test]
async fn succeeds_on_third_attempt_after_two_500s() {
    let (addr, calls) = flaky_upstream(StatusCode::INTERNAL_SERVER_ERROR, 2).await;
    let client = fast_client(3);

    let started = Instant::now();
    let body: Value = client
        .get_json(&format!("http://{addr}/"), &[])
        .await
        .unwrap();

    assert_eq!(body["ok"], true);
    assert_eq!(calls.load(Ordering::SeqCst), 3, "two retries, three attempts");
    // Linear backoff: retry 1 waits 1*base, retry 2 waits 2*base.
    assert!(started.elapsed() >= Duration::from_millis(30));
}

#[tokio::test]
async fn gives_up_after_retry_budget_on_persistent_500() {
    let (addr, calls) = flaky_upstream(StatusCode::INTERNAL_SERVER_ERROR, u32::MAX).await;
    let client = fast_client(3);

    let err = client
        .get_json::<Value>(&format!("http://{addr}/"), &[])
        .await
        .unwrap_err();

    assert_eq!(calls.load(Ordering::SeqCst), 4, "initial attempt plus three retries");
    assert_eq!(
        err.to_string(),
        "Error in GET request: request failed with status code 500"
    );
}

#[tokio::test]
async fn status_404_fails_immediately_without_retry() {
    let (addr, calls) = flaky_upstream(StatusCode::NOT_FOUND, u32::MAX).await;
    let client = fast_client(3);

    let err = client
        .get_json::<Value>(&format!("http://{addr}/"), &[])
        .await
        .unwrap_err();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(err
        .to_string()
        .starts_with("Error in GET request: request failed with status code 404"));
}

#[tokio::test]
async fn status_502_is_outside_the_retry_condition() {
    let (addr, calls) = flaky_upstream(StatusCode::BAD_GATEWAY, u32::MAX).await;
    let client = fast_client(3);

    let err = client
        .get_json::<Value>(&format!("http://{addr}/"), &[])
        .await
        .unwrap_err();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(matches!(err, OutboundError::Status { status: 502, .. }));
}

#[tokio::test]
async fn timeout_is_a_transport_error_and_not_retried() {
    let calls = Arc::new(AtomicU32::new(0));
    let cc = calls.clone();
    let router = Router::new().route(
        "/",
        get(move || {
            let cc = cc.clone();
            async move {
                cc.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(500)).await;
                Json(json!({ "ok": true }))
            }
        }),
    );
    let addr = common::spawn_upstream(router).await;

    let client = ResilientHttpClient::new(
        Duration::from_millis(50),
        RetryPolicy {
            max_retries: 3,
            base_delay: Duration::from_millis(10),
        },
    )
    .unwrap();

    let err = client
        .get_json::<Value>(&format!("http://{addr}/"), &[])
        .await
        .unwrap_err();

    assert!(matches!(err, OutboundError::Transport { .. }));
    assert!(err.to_string().starts_with("Error in GET request: "));
    assert_eq!(calls.load(Ordering::SeqCst), 1, "plain timeouts are not retried");
}
