//! Search page view state over the core search pipeline.

use cadence_core::search::{self, FolderConstraint, SearchRequest, SearchResults, SearchScope};
use cadence_core::store::{ConversationStore, WorkspaceStore};

#[derive(Debug)]
pub struct SearchView {
    pub scope: SearchScope,
    pub query: String,
    pub pinned_only: bool,
    pub folder: FolderConstraint,
    load_all_projects: bool,
    pub active_directory: Option<String>,
}

impl SearchView {
    pub fn new(active_directory: Option<String>) -> Self {
        Self {
            scope: SearchScope::CurrentProject,
            query: String::new(),
            pinned_only: false,
            folder: FolderConstraint::All,
            load_all_projects: false,
            active_directory,
        }
    }

    fn request(&self) -> SearchRequest {
        SearchRequest {
            scope: self.scope,
            query: self.query.clone(),
            pinned_only: self.pinned_only,
            folder: self.folder.clone(),
            load_all_projects: self.load_all_projects,
            active_directory: self.active_directory.clone(),
        }
    }

    pub fn results(
        &self,
        workspaces: &WorkspaceStore,
        conversations: &ConversationStore,
    ) -> SearchResults {
        search::search(workspaces, conversations, &self.request())
    }

    /// Label for the folder dropdown trigger.
    pub fn folder_label(&self, conversations: &ConversationStore) -> String {
        match &self.folder {
            FolderConstraint::All => "All folders".to_string(),
            FolderConstraint::Unfiled => "Unfiled".to_string(),
            FolderConstraint::Folder(id) => conversations
                .folder_by_id(id)
                .map(|f| f.name.clone())
                .unwrap_or_else(|| "Folder".to_string()),
        }
    }

    /// Whether the clear-filters affordance should show.
    pub fn has_active_filters(&self) -> bool {
        self.pinned_only
            || self.folder != FolderConstraint::All
            || !self.query.trim().is_empty()
    }

    pub fn clear_filters(&mut self) {
        self.folder = FolderConstraint::All;
        self.pinned_only = false;
        self.query.clear();
    }

    /// Hint shown when the all-projects directory set was capped; pairs with
    /// the explicit [`Self::request_all_projects`] action.
    pub fn project_hint(&self, results: &SearchResults) -> Option<String> {
        let coverage = results.coverage?;
        Some(format!(
            "Only sessions from the {} most recently used of {} projects are loaded.",
            coverage.loaded, coverage.total
        ))
    }

    /// Opt in to pulling every known project's session list.
    pub fn request_all_projects(&mut self) {
        self.load_all_projects = true;
    }

    /// Navigation target for Enter: the top ranked row.
    pub fn first_result(
        &self,
        workspaces: &WorkspaceStore,
        conversations: &ConversationStore,
    ) -> Option<(String, String)> {
        self.results(workspaces, conversations)
            .rows
            .into_iter()
            .next()
            .map(|row| (row.directory, row.session_id))
    }
}
