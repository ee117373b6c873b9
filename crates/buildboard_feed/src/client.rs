use std::sync::mpsc;

use board_logging::{board_debug, board_info, board_warn};
use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;

use crate::{CloseReason, FeedEvent, FeedSettings, Handshake};

pub trait EventSink: Send + Sync {
    fn emit(&self, event: FeedEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<FeedEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<FeedEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: FeedEvent) {
        let _ = self.tx.send(event);
    }
}

/// One push-feed session: connect, handshake, forward frames until closed.
///
/// Implementations must emit exactly one [`FeedEvent::Closed`] as their
/// last event.
#[async_trait::async_trait]
pub trait FeedConnector: Send + Sync {
    async fn run(&self, sink: &dyn EventSink, cancel: &CancellationToken);
}

#[derive(Debug, Clone)]
pub struct LiveFeed {
    settings: FeedSettings,
}

impl LiveFeed {
    pub fn new(settings: FeedSettings) -> Self {
        Self { settings }
    }

    async fn session(&self, sink: &dyn EventSink, cancel: &CancellationToken) -> CloseReason {
        let url = match self.settings.feed_url() {
            Ok(url) => url,
            Err(err) => return CloseReason::ConnectFailed(err.to_string()),
        };
        board_info!("Connecting to push feed at {}", url);

        let connect = tokio::time::timeout(
            self.settings.connect_timeout,
            connect_async(url.as_str()),
        );
        let mut ws = tokio::select! {
            _ = cancel.cancelled() => return CloseReason::Shutdown,
            result = connect => match result {
                Err(_) => return CloseReason::ConnectTimeout,
                Ok(Err(err)) => return CloseReason::ConnectFailed(err.to_string()),
                Ok(Ok((ws, _response))) => ws,
            },
        };

        let handshake = match Handshake::open().to_json() {
            Ok(text) => text,
            Err(err) => return CloseReason::HandshakeFailed(err.to_string()),
        };
        if let Err(err) = ws.send(Message::Text(handshake)).await {
            return CloseReason::HandshakeFailed(err.to_string());
        }
        board_info!("Server connected. Sent handshake for the selected environment.");
        sink.emit(FeedEvent::Opened);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    let grace = self.settings.close_grace;
                    if tokio::time::timeout(grace, ws.close(None)).await.is_err() {
                        board_warn!("Close handshake did not finish within {:?}", grace);
                    }
                    return CloseReason::Shutdown;
                }
                next = ws.next() => match next {
                    Some(Ok(Message::Text(text))) => {
                        board_debug!("Frame received ({} bytes)", text.len());
                        sink.emit(FeedEvent::Frame(text));
                    }
                    Some(Ok(Message::Close(frame))) => {
                        let reason = frame
                            .map(|frame| frame.reason.into_owned())
                            .filter(|reason| !reason.is_empty());
                        return CloseReason::ServerClosed(reason);
                    }
                    // Binary, ping and pong frames carry nothing for the dashboard.
                    Some(Ok(_)) => {}
                    Some(Err(err)) => return CloseReason::Transport(err.to_string()),
                    None => return CloseReason::StreamEnded,
                },
            }
        }
    }
}

#[async_trait::async_trait]
impl FeedConnector for LiveFeed {
    async fn run(&self, sink: &dyn EventSink, cancel: &CancellationToken) {
        let reason = self.session(sink, cancel).await;
        match reason {
            CloseReason::Shutdown => board_info!("Feed shut down"),
            ref other => board_warn!("Feed disconnected: {}", other),
        }
        sink.emit(FeedEvent::Closed { reason });
    }
}
