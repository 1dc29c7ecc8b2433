use async_trait::async_trait;
use serde::Serialize;

use crate::error::ApiError;

/// Patch applied to a session's time record through the remote update call.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct SessionTimePatch {
    /// Epoch milliseconds at which the session was archived.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<u64>,
}

impl SessionTimePatch {
    pub fn archived_at(millis: u64) -> Self {
        Self {
            archived: Some(millis),
        }
    }
}

/// The session CRUD collaborator.
///
/// Implemented by the external client SDK; this subsystem only consumes it.
/// Network timeout and retry policy belong to the implementor.
#[async_trait]
pub trait SessionApi: Send + Sync {
    /// Update a session's time record. Succeeds, or fails with a
    /// human-readable message suitable for an error notification.
    async fn update_session(
        &self,
        directory: &str,
        session_id: &str,
        patch: SessionTimePatch,
    ) -> Result<(), ApiError>;
}
