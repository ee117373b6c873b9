use url::Url;

use crate::{Build, Change, ConnectionStatus};

pub const RUNNING_STATE: &str = "running";
pub const STATUS_SUCCESS: &str = "SUCCESS";
pub const STATUS_FAILURE: &str = "FAILURE";

pub const TABLE_HEADER: [&str; 4] = ["STATUS", "CHANGES", "AUTHOR", ""];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusToken {
    /// Build still running; carries the server's progress text.
    InProgress { text: String },
    Success,
    Failure,
}

/// Map a build's run state and result to its display token.
///
/// Anything that is neither running nor `SUCCESS` shows as a failure.
pub fn status_token(state: &str, status: &str, status_text: &str) -> StatusToken {
    if state == RUNNING_STATE {
        StatusToken::InProgress {
            text: status_text.to_string(),
        }
    } else if status == STATUS_SUCCESS {
        StatusToken::Success
    } else {
        StatusToken::Failure
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogCell {
    Link { path: String },
    Blank,
}

impl LogCell {
    pub fn for_build(build: &Build) -> Self {
        if build.status == STATUS_FAILURE {
            LogCell::Link {
                path: format!("/build_log/{}", build.id),
            }
        } else {
            LogCell::Blank
        }
    }

    /// Absolute log URL against the dashboard's server base.
    pub fn resolve(&self, base: &Url) -> Option<Url> {
        match self {
            LogCell::Link { path } => base.join(path).ok(),
            LogCell::Blank => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRow {
    pub status: StatusToken,
    pub comment: String,
    pub author: String,
    pub log: LogCell,
}

impl BuildRow {
    pub fn new(build: &Build, change: &Change) -> Self {
        Self {
            status: status_token(&build.state, &build.status, &build.status_text),
            comment: change.comment.clone(),
            author: change.username.clone(),
            log: LogCell::for_build(build),
        }
    }
}

/// Header plus one row per change of every build, in snapshot order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BuildTable {
    pub rows: Vec<BuildRow>,
}

impl BuildTable {
    pub fn from_builds(builds: &[Build]) -> Self {
        let rows = builds
            .iter()
            .flat_map(|build| {
                build
                    .changes
                    .change
                    .iter()
                    .map(move |change| BuildRow::new(build, change))
            })
            .collect();
        Self { rows }
    }

    pub fn header(&self) -> [&'static str; 4] {
        TABLE_HEADER
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub connection: ConnectionStatus,
    pub table: BuildTable,
    pub build_count: usize,
    pub frames_received: u64,
    pub last_update: Option<String>,
    pub last_error: Option<String>,
    pub dirty: bool,
}
