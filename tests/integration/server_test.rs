use std::time::{Duration, Instant};

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use hwpulse::client::{HttpTransport, PollOutcome, Poller, SnapshotSource};
use hwpulse::core::config::PollConfig;
use hwpulse::core::system_monitor::Snapshot;
use hwpulse::server::{router, AppState};

use super::common::aggregator;

async fn body_bytes(body: Body) -> Vec<u8> {
    to_bytes(body, usize::MAX).await.unwrap().to_vec()
}

#[tokio::test]
async fn test_hwinfo_returns_valid_snapshot() {
    let app = router(AppState::new(aggregator(Some(70.0))));

    let response = app
        .oneshot(Request::get("/api/hwinfo").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"],
        "application/json"
    );

    let snapshot = Snapshot::from_json(&body_bytes(response.into_body()).await).unwrap();
    assert_eq!(snapshot.cpu.raw_usage, 42.0);
    assert_eq!(snapshot.gpu.unwrap().raw_usage, 70.0);
}

#[tokio::test]
async fn test_hwinfo_serializes_absent_gpu_as_null() {
    let app = router(AppState::new(aggregator(None)));

    let response = app
        .oneshot(Request::get("/api/hwinfo").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body: serde_json::Value =
        serde_json::from_slice(&body_bytes(response.into_body()).await).unwrap();

    assert!(body["gpu"].is_null());
    for key in ["cpu", "ram", "disk"] {
        assert!(body[key].is_object(), "{} missing", key);
    }
}

#[tokio::test]
async fn test_exit_notifies_shutdown() {
    let state = AppState::new(aggregator(None));
    let shutdown = state.shutdown.clone();
    let app = router(state);

    let response = app
        .oneshot(Request::post("/api/exit").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value =
        serde_json::from_slice(&body_bytes(response.into_body()).await).unwrap();
    assert_eq!(body["status"], "shutting down");

    tokio::time::timeout(Duration::from_secs(1), shutdown.notified())
        .await
        .expect("shutdown was not signalled");
}

#[tokio::test]
async fn test_health_and_unknown_routes() {
    let app = router(AppState::new(aggregator(None)));

    let response = app
        .clone()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response.into_body()).await, b"OK");

    let response = app
        .clone()
        .oneshot(Request::get("/api/exit").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    let response = app
        .oneshot(Request::get("/api/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_poller_against_live_server() {
    let state = AppState::new(aggregator(None));
    let shutdown = state.shutdown.clone();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let server = tokio::spawn(async move {
        axum::serve(listener, router(state))
            .with_graceful_shutdown(async move { shutdown.notified().await })
            .await
    });

    // The blocking client must be created and dropped off the async workers.
    let snapshot = tokio::task::spawn_blocking(move || {
        let config = PollConfig::default();
        let transport = HttpTransport::new(&base_url, config.request_timeout).unwrap();
        let mut poller = Poller::new(transport, &config, Instant::now());

        let outcome = poller.tick(Instant::now());
        assert!(matches!(outcome, Some(PollOutcome::Updated)));
        poller.source_mut().request_exit();
        poller.latest().cloned().unwrap()
    })
    .await
    .unwrap();

    assert_eq!(snapshot.disk.main_metric, 75.0);
    assert!(snapshot.gpu.is_none());

    tokio::time::timeout(Duration::from_secs(5), server)
        .await
        .expect("server did not stop after exit request")
        .unwrap()
        .unwrap();
}

#[test]
fn test_unreachable_server_is_a_transport_failure() {
    // Port 9 (discard) is closed on test machines.
    let mut transport =
        HttpTransport::new("http://127.0.0.1:9/", Duration::from_millis(500)).unwrap();
    assert_eq!(transport.base_url(), "http://127.0.0.1:9");

    let err = transport.fetch().unwrap_err();
    assert!(err.is_transport_failure());
}
