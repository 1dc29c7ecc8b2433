use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_SESSION_TITLE;

/// Timestamps the backend attaches to a session or project, in epoch
/// milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTime {
    pub created: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<u64>,
}

impl SessionTime {
    /// Timestamp used for recency ordering: `updated` when present,
    /// `created` otherwise.
    pub fn last_touched(&self) -> u64 {
        self.updated.unwrap_or(self.created)
    }
}

/// A single conversation thread owned by the external backend, identified by
/// an id within a project directory. Read-only from this subsystem's
/// perspective; mutations go through the session CRUD client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    /// May be empty; display falls back to [`DEFAULT_SESSION_TITLE`].
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub time: SessionTime,
}

impl Session {
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            DEFAULT_SESSION_TITLE
        } else {
            &self.title
        }
    }
}

/// A known project/workspace as reported by the sync client. The worktree
/// path is the partitioning key for sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub worktree: String,
    #[serde(default)]
    pub time: SessionTime,
}
