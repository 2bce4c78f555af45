// Server-sent events
//
// Decoding of the monitoring server's notification stream.

mod feed;
mod sse;

pub use feed::{FeedEvent, NotificationFeed, EVENTS_PATH};
pub use sse::{SseFrame, SseParser};
