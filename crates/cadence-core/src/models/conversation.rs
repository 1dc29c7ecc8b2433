use serde::{Deserialize, Serialize};

/// Composite identity of a conversation: the owning project directory plus
/// the session id within it. Two keys are equal iff both fields match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationKey {
    pub directory: String,
    pub session_id: String,
}

impl ConversationKey {
    pub fn new(directory: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            session_id: session_id.into(),
        }
    }
}

/// Local-only annotation (pin state, folder assignment) for one conversation.
///
/// Created lazily on the first pin or folder assignment. Never deleted when
/// the underlying session disappears: orphaned entries are inert because
/// views only resolve meta through live sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMeta {
    pub key: ConversationKey,
    /// Assigned folder, if any. `None` means "unfiled".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
    /// Absent in persisted state deserializes to `false`.
    #[serde(default)]
    pub pinned: bool,
    /// Epoch milliseconds of the last metadata mutation.
    pub updated_at: u64,
}
