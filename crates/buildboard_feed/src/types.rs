use std::fmt;
use std::io;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEvent {
    /// Connection established and handshake sent.
    Opened,
    /// One inbound text frame, undecoded.
    Frame(String),
    /// The connection is gone; no further events follow.
    Closed { reason: CloseReason },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseReason {
    ConnectFailed(String),
    ConnectTimeout,
    HandshakeFailed(String),
    ServerClosed(Option<String>),
    StreamEnded,
    Transport(String),
    Shutdown,
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CloseReason::ConnectFailed(message) => write!(f, "connect failed: {message}"),
            CloseReason::ConnectTimeout => write!(f, "connect timed out"),
            CloseReason::HandshakeFailed(message) => write!(f, "handshake failed: {message}"),
            CloseReason::ServerClosed(Some(reason)) => write!(f, "server closed: {reason}"),
            CloseReason::ServerClosed(None) => write!(f, "server closed"),
            CloseReason::StreamEnded => write!(f, "connection ended"),
            CloseReason::Transport(message) => write!(f, "transport error: {message}"),
            CloseReason::Shutdown => write!(f, "shut down"),
        }
    }
}

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("invalid server url: {0}")]
    InvalidUrl(String),
    #[error("unsupported server url scheme `{0}`")]
    UnsupportedScheme(String),
    #[error("failed to encode handshake: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to start feed runtime: {0}")]
    Runtime(#[source] io::Error),
}
