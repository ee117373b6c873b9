use crate::view_model::{AppViewModel, BuildTable};
use crate::BuildList;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    #[default]
    Idle,
    Connecting,
    Open,
    Closed {
        reason: String,
    },
}

/// View state owned by the app shell. Only [`crate::update`] mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    builds: BuildList,
    connection: ConnectionStatus,
    mounted: bool,
    frames_received: u64,
    last_update: Option<String>,
    last_error: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            connection: self.connection.clone(),
            table: BuildTable::from_builds(&self.builds),
            build_count: self.builds.len(),
            frames_received: self.frames_received,
            last_update: self.last_update.clone(),
            last_error: self.last_error.clone(),
            dirty: self.dirty,
        }
    }

    pub fn builds(&self) -> &BuildList {
        &self.builds
    }

    pub fn connection(&self) -> &ConnectionStatus {
        &self.connection
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Returns whether a repaint is pending and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn mount(&mut self) {
        self.mounted = true;
        self.connection = ConnectionStatus::Connecting;
        self.mark_dirty();
    }

    pub(crate) fn unmount(&mut self) {
        self.mounted = false;
    }

    pub(crate) fn set_connection(&mut self, connection: ConnectionStatus) {
        self.connection = connection;
        self.mark_dirty();
    }

    pub(crate) fn replace_builds(&mut self, builds: BuildList, received_at: String) {
        self.frames_received += 1;
        self.builds = builds;
        self.last_update = Some(received_at);
        self.last_error = None;
        self.mark_dirty();
    }

    pub(crate) fn record_decode_error(&mut self, message: String) {
        self.frames_received += 1;
        self.last_error = Some(message);
        self.mark_dirty();
    }
}
