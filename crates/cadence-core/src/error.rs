use thiserror::Error;

/// Failure of a remote session CRUD call.
///
/// Carries a human-readable message suitable for direct display in an
/// error notification; transport/retry policy lives in the SDK behind
/// the [`crate::api::SessionApi`] seam, not here.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Failure of an export operation.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The session's messages have not been loaded/synced yet. Exporting
    /// would produce an empty, misleading file.
    #[error("messages for this session are not loaded yet")]
    NotReady,
    #[error("failed to serialize export payload: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Failure while writing persisted state to disk.
///
/// Load-side failures are deliberately not represented: a missing,
/// corrupt, or version-mismatched file falls back to the default state.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to serialize state: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write state file: {0}")]
    Io(#[from] std::io::Error),
}
