//! Buildboard feed: push-feed connection lifecycle on a background runtime.
mod client;
mod handle;
mod settings;
mod types;

pub use client::{ChannelEventSink, EventSink, FeedConnector, LiveFeed};
pub use handle::FeedHandle;
pub use settings::{feed_url, FeedSettings, Handshake, DEFAULT_ENVIRONMENT, FEED_PATH};
pub use types::{CloseReason, FeedError, FeedEvent};
