//! Notification feed tests: SSE stream from a stand-in server

mod common;

use axum::http::{header, StatusCode};
use axum::routing::get;
use axum::Router;
use beltwatch_core::{ApiClient, FeedEvent, Notification, NotificationFeed};
use std::time::Duration;
use tokio::time::timeout;

const STREAM_BODY: &str = concat!(
    ": connected\n\n",
    "data: {\"title\":\"New defect\",\"text\":\"Defect id=12 on belt\"}\n\n",
    "data: not a notification\n\n",
    "data: {\"title\":\"Conveyor\",\n",
    "data: \"text\":\"critical\"}\n\n",
);

async fn next(rx: &mut tokio::sync::broadcast::Receiver<FeedEvent>) -> FeedEvent {
    timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("feed event within timeout")
        .expect("channel open")
}

#[tokio::test]
async fn feed_broadcasts_stream_then_closes() {
    let app = Router::new().route(
        "/api/v1/maintenance/get_events",
        get(|| async { ([(header::CONTENT_TYPE, "text/event-stream")], STREAM_BODY) }),
    );
    let client = ApiClient::new(common::serve(app).await);
    let feed = NotificationFeed::new(16);
    let mut rx = feed.subscribe();

    let handle = feed.spawn(client);

    assert_eq!(
        next(&mut rx).await,
        FeedEvent::Notification(Notification {
            title: "New defect".into(),
            text: "Defect id=12 on belt".into(),
        })
    );
    assert!(matches!(
        next(&mut rx).await,
        FeedEvent::Malformed { raw, .. } if raw == "not a notification"
    ));
    assert_eq!(
        next(&mut rx).await,
        FeedEvent::Notification(Notification {
            title: "Conveyor".into(),
            text: "critical".into(),
        })
    );
    assert!(matches!(next(&mut rx).await, FeedEvent::Closed { .. }));

    handle.await.expect("feed task").expect("clean end of stream");
}

#[tokio::test]
async fn failed_connection_closes_feed_with_error() {
    let app = Router::new().route(
        "/api/v1/maintenance/get_events",
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down") }),
    );
    let client = ApiClient::new(common::serve(app).await);
    let feed = NotificationFeed::new(4);
    let mut rx = feed.subscribe();

    let result = feed.run(&client).await;

    assert!(result.is_err());
    match next(&mut rx).await {
        FeedEvent::Closed { reason } => assert!(reason.contains("down")),
        other => panic!("unexpected event: {other:?}"),
    }
}
