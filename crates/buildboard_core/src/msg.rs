#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The dashboard was attached to its screen.
    Mounted,
    /// The dashboard is being torn down (user quit).
    Unmounted,
    /// The push feed connected and the handshake went out.
    FeedOpened,
    /// Raw text frame from the push feed.
    FrameReceived { frame: String, received_at: String },
    /// The push feed terminated. No reconnect follows.
    FeedClosed { reason: String },
    /// Terminal size changed; forces a repaint.
    Resized,
    /// UI/render tick to coalesce rendering.
    Tick,
}
