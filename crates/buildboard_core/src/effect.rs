/// Side effects requested by [`crate::update`]; executed by the app shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Acquire the push-feed connection.
    StartFeed,
    /// Release the push-feed connection.
    StopFeed,
}
