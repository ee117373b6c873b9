use board_logging::{board_error, board_info, board_warn};
use buildboard_core::{Effect, Msg};
use buildboard_feed::{FeedEvent, FeedHandle, FeedSettings};
use chrono::Local;

/// Executes core effects against the push feed and turns feed events back
/// into messages.
pub struct FeedRunner {
    settings: FeedSettings,
    feed: Option<FeedHandle>,
    pending: Vec<Msg>,
}

impl FeedRunner {
    pub fn new(settings: FeedSettings) -> Self {
        Self {
            settings,
            feed: None,
            pending: Vec::new(),
        }
    }

    pub fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartFeed => self.start(),
                Effect::StopFeed => self.stop(),
            }
        }
    }

    fn start(&mut self) {
        if self.feed.is_some() {
            board_warn!("StartFeed while a feed is live; keeping the existing connection");
            return;
        }
        match FeedHandle::connect(self.settings.clone()) {
            Ok(handle) => {
                board_info!("Feed started for {}", self.settings.server);
                self.feed = Some(handle);
            }
            Err(err) => {
                board_error!("Feed could not start: {}", err);
                self.pending.push(Msg::FeedClosed {
                    reason: err.to_string(),
                });
            }
        }
    }

    fn stop(&mut self) {
        if let Some(feed) = self.feed.take() {
            feed.close();
            board_info!("Feed released");
        }
    }

    /// Move every available feed event into `inbox` without blocking.
    pub fn poll(&mut self, inbox: &mut Vec<Msg>) {
        inbox.append(&mut self.pending);
        let Some(feed) = &self.feed else {
            return;
        };

        let mut closed = false;
        while let Some(event) = feed.try_recv() {
            match event {
                FeedEvent::Opened => inbox.push(Msg::FeedOpened),
                FeedEvent::Frame(frame) => inbox.push(Msg::FrameReceived {
                    frame,
                    received_at: Local::now().format("%H:%M:%S").to_string(),
                }),
                FeedEvent::Closed { reason } => {
                    inbox.push(Msg::FeedClosed {
                        reason: reason.to_string(),
                    });
                    closed = true;
                    break;
                }
            }
        }

        if closed {
            // The session is over; release the worker right away.
            self.stop();
        }
    }
}
