// Live notification feed
//
// Tails the server's event stream and fans notifications out to any number
// of local subscribers through a tokio broadcast channel.

use super::sse::{SseFrame, SseParser};
use crate::client::ApiClient;
use crate::model::Notification;
use crate::{BeltwatchError, Result};
use reqwest::header::ACCEPT;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

pub const EVENTS_PATH: &str = "/maintenance/get_events";

/// What subscribers of the feed receive
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FeedEvent {
    Notification(Notification),
    /// A frame whose data was not a notification; the stream carries on
    Malformed { raw: String, error: String },
    /// Transport failure or end of stream; no further events follow
    Closed { reason: String },
}

/// Broadcaster for server-sent notifications
#[derive(Clone)]
pub struct NotificationFeed {
    sender: broadcast::Sender<FeedEvent>,
}

impl Default for NotificationFeed {
    fn default() -> Self {
        Self::new(256)
    }
}

impl NotificationFeed {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<FeedEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    fn broadcast(&self, event: FeedEvent) {
        // Ignore error if no subscribers
        let _ = self.sender.send(event);
    }

    /// Decode one frame and broadcast the result
    pub fn publish_frame(&self, frame: &SseFrame) {
        match serde_json::from_str::<Notification>(&frame.data) {
            Ok(notification) => {
                debug!(target: "events", title = %notification.title, "Notification received");
                self.broadcast(FeedEvent::Notification(notification));
            }
            Err(e) => {
                warn!(target: "events", error = %e, "Undecodable notification frame");
                self.broadcast(FeedEvent::Malformed {
                    raw: frame.data.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    fn close(&self, reason: impl Into<String>) {
        let reason = reason.into();
        info!(target: "events", reason = %reason, "Notification stream closed");
        self.broadcast(FeedEvent::Closed { reason });
    }

    /// Connect and pump frames until the stream ends or fails. Always ends
    /// with a `Closed` event; there is no reconnect.
    pub async fn run(&self, client: &ApiClient) -> Result<()> {
        let builder = client
            .stream_request(EVENTS_PATH)
            .header(ACCEPT, "text/event-stream");
        let mut response = match client.send(builder).await {
            Ok(response) => response,
            Err(e) => {
                self.close(e.to_string());
                return Err(e);
            }
        };
        info!(target: "events", url = %response.url(), "Notification stream connected");

        let mut parser = SseParser::new();
        loop {
            match response.chunk().await {
                Ok(Some(chunk)) => {
                    for frame in parser.feed(&chunk) {
                        self.publish_frame(&frame);
                    }
                }
                Ok(None) => {
                    self.close("stream ended");
                    return Ok(());
                }
                Err(e) => {
                    self.close(e.to_string());
                    return Err(BeltwatchError::StreamError(e.to_string()));
                }
            }
        }
    }

    /// Run the feed on a background task
    pub fn spawn(&self, client: ApiClient) -> JoinHandle<Result<()>> {
        let feed = self.clone();
        tokio::spawn(async move { feed.run(&client).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(data: &str) -> SseFrame {
        SseFrame {
            data: data.to_string(),
            ..SseFrame::default()
        }
    }

    #[tokio::test]
    async fn decodes_notifications_for_every_subscriber() {
        let feed = NotificationFeed::new(8);
        let mut rx1 = feed.subscribe();
        let mut rx2 = feed.subscribe();
        assert_eq!(feed.subscriber_count(), 2);

        feed.publish_frame(&frame(r#"{"title":"New defect","text":"id=12"}"#));

        let expected = FeedEvent::Notification(Notification {
            title: "New defect".into(),
            text: "id=12".into(),
        });
        assert_eq!(rx1.try_recv().unwrap(), expected);
        assert_eq!(rx2.try_recv().unwrap(), expected);
    }

    #[tokio::test]
    async fn malformed_frame_does_not_stop_the_feed() {
        let feed = NotificationFeed::new(8);
        let mut rx = feed.subscribe();

        feed.publish_frame(&frame("not json"));
        feed.publish_frame(&frame(r#"{"title":"a","text":"b"}"#));

        assert!(matches!(rx.try_recv().unwrap(), FeedEvent::Malformed { raw, .. } if raw == "not json"));
        assert!(matches!(rx.try_recv().unwrap(), FeedEvent::Notification(_)));
    }

    #[test]
    fn publishing_without_subscribers_is_harmless() {
        let feed = NotificationFeed::default();
        feed.publish_frame(&frame(r#"{"title":"a","text":"b"}"#));
        assert_eq!(feed.subscriber_count(), 0);
    }
}
