use std::time::Duration;

use serde::Serialize;
use url::Url;

use crate::FeedError;

/// Path of the push-feed endpoint on the build server.
pub const FEED_PATH: &str = "/get_info";

/// Environment whose builds the dashboard asks for.
pub const DEFAULT_ENVIRONMENT: &str = "Prod";

#[derive(Debug, Clone)]
pub struct FeedSettings {
    /// Base URL of the build server, as the dashboard page would see it.
    pub server: Url,
    pub connect_timeout: Duration,
    /// Upper bound on the close handshake during teardown.
    pub close_grace: Duration,
}

impl FeedSettings {
    pub fn new(server: Url) -> Self {
        Self {
            server,
            connect_timeout: Duration::from_secs(10),
            close_grace: Duration::from_secs(1),
        }
    }

    pub fn feed_url(&self) -> Result<Url, FeedError> {
        feed_url(&self.server)
    }
}

/// Derive the websocket endpoint from the server base URL.
///
/// `http` maps to `ws` and `https` to `wss`; the base path is replaced with
/// [`FEED_PATH`], matching a page that connects to `<host>/get_info`.
pub fn feed_url(base: &Url) -> Result<Url, FeedError> {
    let scheme = match base.scheme() {
        "http" | "ws" => "ws",
        "https" | "wss" => "wss",
        other => return Err(FeedError::UnsupportedScheme(other.to_string())),
    };
    if base.host_str().is_none() {
        return Err(FeedError::InvalidUrl(format!("{base} has no host")));
    }

    let mut url = base.clone();
    url.set_scheme(scheme)
        .map_err(|()| FeedError::UnsupportedScheme(base.scheme().to_string()))?;
    url.set_path(FEED_PATH);
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

/// First message on a fresh connection: tells the server which environment to stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Handshake {
    pub status: &'static str,
    pub environment: &'static str,
}

impl Handshake {
    pub fn open() -> Self {
        Self {
            status: "open",
            environment: DEFAULT_ENVIRONMENT,
        }
    }

    pub fn to_json(&self) -> Result<String, FeedError> {
        Ok(serde_json::to_string(self)?)
    }
}
