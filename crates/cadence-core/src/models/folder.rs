use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User-defined named grouping for conversations, independent of the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: String,
    pub name: String,
    /// Epoch milliseconds at creation time. Preserved across renames.
    pub created_at: u64,
}

/// Input to `ConversationStore::upsert_folder`.
///
/// With `id = None` a new folder is minted; with an `id` the named folder is
/// renamed (or created with that id if it no longer exists).
#[derive(Debug, Clone, Default)]
pub struct FolderUpsert {
    pub id: Option<String>,
    pub name: String,
}

impl FolderUpsert {
    pub fn create(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    pub fn rename(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: name.into(),
        }
    }
}

/// Generate a unique folder ID using UUID v4
pub(crate) fn mint_folder_id() -> String {
    Uuid::new_v4().to_string()
}
