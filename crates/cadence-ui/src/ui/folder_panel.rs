//! Folder panel view logic: filter selection with live counts, folder
//! create/rename dialogs, and the delete confirmation gate.

use cadence_core::models::{ConversationKey, Folder, FolderUpsert, Session};
use cadence_core::store::ConversationStore;

/// The single active filter choice for the conversation list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FolderFilterKey {
    #[default]
    All,
    Pinned,
    Folder(String),
}

/// Open name-prompt dialog. Enter or the submit button commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolderDialog {
    Create { input: String },
    Rename { folder_id: String, input: String },
}

impl FolderDialog {
    pub fn input(&self) -> &str {
        match self {
            FolderDialog::Create { input } | FolderDialog::Rename { input, .. } => input,
        }
    }

    fn input_mut(&mut self) -> &mut String {
        match self {
            FolderDialog::Create { input } | FolderDialog::Rename { input, .. } => input,
        }
    }
}

/// Destructive-action confirmation gate for folder deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub folder_id: String,
    pub name: String,
}

impl PendingDelete {
    pub fn prompt(&self) -> String {
        format!(
            "Delete folder \"{}\"? Conversations inside move back to \"All\".",
            self.name
        )
    }
}

/// One selectable row in the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRow {
    pub key: FolderFilterKey,
    pub label: String,
    pub count: usize,
    pub selected: bool,
}

#[derive(Debug)]
pub struct FolderPanel {
    filter: FolderFilterKey,
    pub expanded: bool,
    dialog: Option<FolderDialog>,
    pending_delete: Option<PendingDelete>,
}

impl Default for FolderPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl FolderPanel {
    pub fn new() -> Self {
        Self {
            filter: FolderFilterKey::All,
            expanded: true,
            dialog: None,
            pending_delete: None,
        }
    }

    pub fn filter(&self) -> &FolderFilterKey {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: FolderFilterKey) {
        self.filter = filter;
    }

    pub fn toggle_expanded(&mut self) {
        self.expanded = !self.expanded;
    }

    fn session_matches(
        filter: &FolderFilterKey,
        directory: &str,
        session: &Session,
        conversations: &ConversationStore,
    ) -> bool {
        let key = ConversationKey::new(directory, session.id.clone());
        match filter {
            FolderFilterKey::All => true,
            FolderFilterKey::Pinned => conversations.is_pinned(&key),
            FolderFilterKey::Folder(id) => conversations.folder_of(&key) == Some(id.as_str()),
        }
    }

    /// Count of sessions in the given project matching a filter.
    pub fn count_for(
        filter: &FolderFilterKey,
        directory: &str,
        sessions: &[Session],
        conversations: &ConversationStore,
    ) -> usize {
        sessions
            .iter()
            .filter(|s| Self::session_matches(filter, directory, s, conversations))
            .count()
    }

    /// All filter rows: "All", "Pinned", then folders sorted by name.
    pub fn rows(
        &self,
        directory: &str,
        sessions: &[Session],
        conversations: &ConversationStore,
    ) -> Vec<FilterRow> {
        let mut rows = Vec::with_capacity(conversations.folders().len() + 2);
        for (key, label) in [
            (FolderFilterKey::All, "All conversations"),
            (FolderFilterKey::Pinned, "Pinned"),
        ] {
            rows.push(FilterRow {
                count: Self::count_for(&key, directory, sessions, conversations),
                selected: self.filter == key,
                label: label.to_string(),
                key,
            });
        }

        let mut folders: Vec<&Folder> = conversations.folders().iter().collect();
        folders.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
        });
        for folder in folders {
            let key = FolderFilterKey::Folder(folder.id.clone());
            rows.push(FilterRow {
                count: Self::count_for(&key, directory, sessions, conversations),
                selected: self.filter == key,
                label: folder.name.clone(),
                key,
            });
        }
        rows
    }

    /// Whether the active filter still points at an existing folder.
    ///
    /// When it does not (deleted here or by another client), the caller
    /// renders the explicit "folder deleted" state; the selection itself is
    /// not auto-reset.
    pub fn active_folder_exists(&self, conversations: &ConversationStore) -> bool {
        match &self.filter {
            FolderFilterKey::Folder(id) => conversations.folder_by_id(id).is_some(),
            _ => true,
        }
    }

    /// Apply the active filter to the project's session list.
    pub fn filter_sessions<'a>(
        &self,
        directory: &str,
        sessions: &'a [Session],
        conversations: &ConversationStore,
    ) -> Vec<&'a Session> {
        sessions
            .iter()
            .filter(|s| Self::session_matches(&self.filter, directory, s, conversations))
            .collect()
    }

    // ===== Dialog state machine =====

    pub fn dialog(&self) -> Option<&FolderDialog> {
        self.dialog.as_ref()
    }

    pub fn open_create_dialog(&mut self) {
        self.dialog = Some(FolderDialog::Create {
            input: String::new(),
        });
    }

    /// Open the rename dialog prefilled with the current name. No-op when
    /// the folder no longer exists.
    pub fn open_rename_dialog(&mut self, conversations: &ConversationStore, folder_id: &str) {
        if let Some(folder) = conversations.folder_by_id(folder_id) {
            self.dialog = Some(FolderDialog::Rename {
                folder_id: folder_id.to_string(),
                input: folder.name.clone(),
            });
        }
    }

    pub fn set_dialog_input(&mut self, input: impl Into<String>) {
        if let Some(dialog) = &mut self.dialog {
            *dialog.input_mut() = input.into();
        }
    }

    pub fn cancel_dialog(&mut self) {
        self.dialog = None;
    }

    /// Commit the open dialog.
    ///
    /// Input that trims to empty keeps the dialog open and mutates nothing
    /// (the store rejects it as well). Creation switches the active filter
    /// to the new folder.
    pub fn submit_dialog(&mut self, conversations: &mut ConversationStore) -> bool {
        let Some(dialog) = &self.dialog else {
            return false;
        };

        let (upsert, switch_to_new) = match dialog {
            FolderDialog::Create { input } => (FolderUpsert::create(input.clone()), true),
            FolderDialog::Rename { folder_id, input } => (
                FolderUpsert::rename(folder_id.clone(), input.clone()),
                false,
            ),
        };

        match conversations.upsert_folder(upsert) {
            Some(id) => {
                if switch_to_new {
                    self.filter = FolderFilterKey::Folder(id);
                }
                self.dialog = None;
                true
            }
            None => false,
        }
    }

    // ===== Delete confirmation gate =====

    pub fn pending_delete(&self) -> Option<&PendingDelete> {
        self.pending_delete.as_ref()
    }

    pub fn request_delete(&mut self, conversations: &ConversationStore, folder_id: &str) {
        if let Some(folder) = conversations.folder_by_id(folder_id) {
            self.pending_delete = Some(PendingDelete {
                folder_id: folder_id.to_string(),
                name: folder.name.clone(),
            });
        }
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Confirmed deletion. When the active filter targets the doomed folder
    /// it is reset to "All" first, then the store cascade runs.
    pub fn confirm_delete(&mut self, conversations: &mut ConversationStore) {
        let Some(pending) = self.pending_delete.take() else {
            return;
        };
        if self.filter == FolderFilterKey::Folder(pending.folder_id.clone()) {
            self.filter = FolderFilterKey::All;
        }
        conversations.remove_folder(&pending.folder_id);
    }
}
