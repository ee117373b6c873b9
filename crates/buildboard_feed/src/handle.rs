use std::sync::mpsc;
use std::thread;

use board_logging::{board_debug, board_error};
use tokio_util::sync::CancellationToken;

use crate::client::{ChannelEventSink, FeedConnector, LiveFeed};
use crate::{FeedError, FeedEvent, FeedSettings};

/// Owned push-feed connection.
///
/// The connection lives on a background runtime for as long as the handle
/// does. Dropping the handle cancels the session and joins the worker, and
/// takes the event receiver with it, so nothing is delivered after teardown.
pub struct FeedHandle {
    event_rx: mpsc::Receiver<FeedEvent>,
    cancel: CancellationToken,
    worker: Option<thread::JoinHandle<()>>,
}

impl FeedHandle {
    /// Open the live push feed described by `settings`.
    pub fn connect(settings: FeedSettings) -> Result<Self, FeedError> {
        settings.feed_url()?;
        Self::spawn(LiveFeed::new(settings))
    }

    /// Run any connector on a dedicated worker thread.
    pub fn spawn<C>(connector: C) -> Result<Self, FeedError>
    where
        C: FeedConnector + 'static,
    {
        let (event_tx, event_rx) = mpsc::channel();
        let cancel = CancellationToken::new();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(FeedError::Runtime)?;

        let worker_cancel = cancel.clone();
        let worker = thread::Builder::new()
            .name("buildboard-feed".to_string())
            .spawn(move || {
                let sink = ChannelEventSink::new(event_tx);
                runtime.block_on(connector.run(&sink, &worker_cancel));
            })
            .map_err(FeedError::Runtime)?;

        Ok(Self {
            event_rx,
            cancel,
            worker: Some(worker),
        })
    }

    pub fn try_recv(&self) -> Option<FeedEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Release the connection now instead of at drop.
    pub fn close(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.cancel.cancel();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                board_error!("Feed worker panicked during shutdown");
            } else {
                board_debug!("Feed worker joined");
            }
        }
    }
}

impl Drop for FeedHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}
