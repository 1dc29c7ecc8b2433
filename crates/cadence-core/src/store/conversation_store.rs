use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{CONVERSATION_NAMESPACE, CONVERSATION_SCHEMA_VERSION};
use crate::models::folder::mint_folder_id;
use crate::models::{ConversationKey, ConversationMeta, Folder, FolderUpsert};
use crate::store::persist::{self, now_millis, Flusher};

/// Persisted portion of the Conversation Store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationState {
    #[serde(default)]
    pub folders: Vec<Folder>,
    #[serde(default)]
    pub meta: Vec<ConversationMeta>,
}

/// Single source of truth for folders and per-conversation metadata.
///
/// The canonical collections are plain vectors ordered most-recently-created
/// first; derived id → position indices give O(1) lookups and are rebuilt
/// inside the mutation that changes the backing collection, so reads never
/// observe a stale index. All mutations are synchronous; each one queues a
/// full-state flush to the background persister.
pub struct ConversationStore {
    folders: Vec<Folder>,
    meta: Vec<ConversationMeta>,
    folder_index: HashMap<String, usize>,
    meta_index: HashMap<ConversationKey, usize>,
    flusher: Option<Flusher<ConversationState>>,
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationStore {
    /// An empty, non-persisting store.
    pub fn new() -> Self {
        Self::from_state(ConversationState::default())
    }

    pub fn from_state(state: ConversationState) -> Self {
        let mut store = Self {
            folders: state.folders,
            meta: state.meta,
            folder_index: HashMap::new(),
            meta_index: HashMap::new(),
            flusher: None,
        };
        store.reindex_folders();
        store.reindex_meta();
        store
    }

    /// Restore persisted state from `data_dir` without write-back.
    pub fn load(data_dir: &Path) -> Self {
        let path = persist::state_path(data_dir, CONVERSATION_NAMESPACE);
        Self::from_state(persist::load(
            &path,
            CONVERSATION_NAMESPACE,
            CONVERSATION_SCHEMA_VERSION,
        ))
    }

    /// Restore persisted state and attach a background flusher so every
    /// mutation is written back. Must be called from within a tokio runtime.
    pub fn with_persistence(data_dir: &Path) -> Self {
        let mut store = Self::load(data_dir);
        store.flusher = Some(Flusher::spawn(
            persist::state_path(data_dir, CONVERSATION_NAMESPACE),
            CONVERSATION_NAMESPACE,
            CONVERSATION_SCHEMA_VERSION,
        ));
        store
    }

    // ===== Folder mutations =====

    /// Create or rename a folder. Returns the folder id, or `None` when the
    /// name trims to empty (the store rejects empty names; the call is a
    /// no-op).
    ///
    /// Without an id a new folder is prepended with `created_at = now`. With
    /// an id the existing folder keeps its identity and `created_at` and only
    /// the name changes; an unknown id creates a folder with that id.
    pub fn upsert_folder(&mut self, input: FolderUpsert) -> Option<String> {
        let name = input.name.trim();
        if name.is_empty() {
            return None;
        }

        let id = input.id.unwrap_or_else(mint_folder_id);
        match self.folder_index.get(&id).copied() {
            Some(idx) => {
                self.folders[idx].name = name.to_string();
            }
            None => {
                self.folders.insert(
                    0,
                    Folder {
                        id: id.clone(),
                        name: name.to_string(),
                        created_at: now_millis(),
                    },
                );
                self.reindex_folders();
            }
        }

        self.flush();
        Some(id)
    }

    /// Remove a folder and unfile every conversation that referenced it.
    /// Unknown ids are an idempotent no-op.
    ///
    /// The cascade is what keeps the referential invariant: after this
    /// returns, no meta entry references `id`.
    pub fn remove_folder(&mut self, id: &str) {
        let Some(&idx) = self.folder_index.get(id) else {
            return;
        };
        self.folders.remove(idx);
        self.reindex_folders();

        for entry in self.meta.iter_mut() {
            if entry.folder_id.as_deref() == Some(id) {
                entry.folder_id = None;
            }
        }

        self.flush();
    }

    // ===== Conversation metadata mutations =====

    /// Assign a conversation to a folder (or unfile it with `None`). Creates
    /// the meta entry lazily on first assignment; pin state is preserved.
    pub fn set_conversation_folder(&mut self, key: ConversationKey, folder_id: Option<String>) {
        let now = now_millis();
        match self.meta_index.get(&key).copied() {
            Some(idx) => {
                let entry = &mut self.meta[idx];
                entry.folder_id = folder_id;
                entry.updated_at = now;
            }
            None => {
                self.meta.insert(
                    0,
                    ConversationMeta {
                        key,
                        folder_id,
                        pinned: false,
                        updated_at: now,
                    },
                );
                self.reindex_meta();
            }
        }

        self.flush();
    }

    /// Flip a conversation's pin state, creating the meta entry (pinned) on
    /// first use.
    pub fn toggle_pinned(&mut self, key: ConversationKey) {
        let now = now_millis();
        match self.meta_index.get(&key).copied() {
            Some(idx) => {
                let entry = &mut self.meta[idx];
                entry.pinned = !entry.pinned;
                entry.updated_at = now;
            }
            None => {
                self.meta.insert(
                    0,
                    ConversationMeta {
                        key,
                        folder_id: None,
                        pinned: true,
                        updated_at: now,
                    },
                );
                self.reindex_meta();
            }
        }

        self.flush();
    }

    // ===== Lookups =====

    pub fn meta_for(&self, key: &ConversationKey) -> Option<&ConversationMeta> {
        self.meta_index.get(key).map(|&idx| &self.meta[idx])
    }

    pub fn folder_by_id(&self, id: &str) -> Option<&Folder> {
        self.folder_index.get(id).map(|&idx| &self.folders[idx])
    }

    pub fn is_pinned(&self, key: &ConversationKey) -> bool {
        self.meta_for(key).map(|m| m.pinned).unwrap_or(false)
    }

    pub fn folder_of(&self, key: &ConversationKey) -> Option<&str> {
        self.meta_for(key).and_then(|m| m.folder_id.as_deref())
    }

    /// All folders, most recently created first. Display callers re-sort by
    /// name themselves.
    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    /// All metadata entries. List order carries no meaning for consumers.
    pub fn meta(&self) -> &[ConversationMeta] {
        &self.meta
    }

    /// Clone of the persisted state (what the flusher writes).
    pub fn snapshot(&self) -> ConversationState {
        ConversationState {
            folders: self.folders.clone(),
            meta: self.meta.clone(),
        }
    }

    // ===== Internals =====

    /// Rebuild the id → position index after a structural change. Positions
    /// shift on prepend/remove; in-place field updates don't need this.
    fn reindex_folders(&mut self) {
        self.folder_index = self
            .folders
            .iter()
            .enumerate()
            .map(|(idx, folder)| (folder.id.clone(), idx))
            .collect();
    }

    fn reindex_meta(&mut self) {
        self.meta_index = self
            .meta
            .iter()
            .enumerate()
            .map(|(idx, entry)| (entry.key.clone(), idx))
            .collect();
    }

    fn flush(&self) {
        if let Some(flusher) = &self.flusher {
            flusher.flush(self.snapshot());
        }
    }
}
