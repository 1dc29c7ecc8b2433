use std::collections::HashMap;

use crate::models::{Message, MessagePart, Project, Session};

/// One project directory's slice of synced data.
#[derive(Debug, Clone, Default)]
pub struct WorkspaceData {
    /// Sessions ordered most recently touched first.
    pub sessions: Vec<Session>,
    pub messages_by_session: HashMap<String, Vec<Message>>,
    pub parts_by_message: HashMap<String, Vec<MessagePart>>,
}

impl WorkspaceData {
    /// Messages for a session, or `None` when they have not been synced yet.
    pub fn messages_for(&self, session_id: &str) -> Option<&[Message]> {
        self.messages_by_session
            .get(session_id)
            .map(|m| m.as_slice())
    }

    pub fn parts_for(&self, message_id: &str) -> &[MessagePart] {
        self.parts_by_message
            .get(message_id)
            .map(|p| p.as_slice())
            .unwrap_or(&[])
    }
}

/// Local mirror of the external synchronization client — the single source
/// of truth for session, message, and part data per project directory.
///
/// The sync client feeds it through the `upsert_*`/`set_*` methods; this
/// subsystem otherwise treats the contents as read-only. The one exception
/// is `remove_session`, the local half of archiving, which runs only after
/// the remote update succeeded.
#[derive(Debug, Default)]
pub struct WorkspaceStore {
    projects: Vec<Project>,
    workspaces: HashMap<String, WorkspaceData>,
}

impl WorkspaceStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Feed side (called by the sync client glue) =====

    pub fn upsert_project(&mut self, project: Project) {
        if let Some(existing) = self
            .projects
            .iter_mut()
            .find(|p| p.worktree == project.worktree)
        {
            *existing = project;
        } else {
            self.projects.push(project);
        }
    }

    pub fn upsert_session(&mut self, directory: &str, session: Session) {
        let workspace = self.workspaces.entry(directory.to_string()).or_default();

        if let Some(existing) = workspace.sessions.iter_mut().find(|s| s.id == session.id) {
            *existing = session;
        } else {
            // Insert in sorted position (most recently touched first)
            let touched = session.time.last_touched();
            let pos = workspace
                .sessions
                .partition_point(|s| s.time.last_touched() > touched);
            workspace.sessions.insert(pos, session);
        }
    }

    pub fn set_messages(&mut self, directory: &str, session_id: &str, messages: Vec<Message>) {
        self.workspaces
            .entry(directory.to_string())
            .or_default()
            .messages_by_session
            .insert(session_id.to_string(), messages);
    }

    pub fn set_parts(&mut self, directory: &str, message_id: &str, parts: Vec<MessagePart>) {
        self.workspaces
            .entry(directory.to_string())
            .or_default()
            .parts_by_message
            .insert(message_id.to_string(), parts);
    }

    // ===== Read side =====

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn workspace(&self, directory: &str) -> Option<&WorkspaceData> {
        self.workspaces.get(directory)
    }

    pub fn sessions(&self, directory: &str) -> &[Session] {
        self.workspaces
            .get(directory)
            .map(|w| w.sessions.as_slice())
            .unwrap_or(&[])
    }

    /// Known project directories, most recently updated first.
    pub fn directories_by_recency(&self) -> Vec<String> {
        let mut projects: Vec<&Project> = self.projects.iter().collect();
        projects.sort_by(|a, b| b.time.last_touched().cmp(&a.time.last_touched()));
        projects.iter().map(|p| p.worktree.clone()).collect()
    }

    /// Remove a session from the local cache (the local half of archiving).
    /// Returns whether anything was removed. Conversation metadata is left
    /// alone; orphaned entries are inert.
    pub fn remove_session(&mut self, directory: &str, session_id: &str) -> bool {
        let Some(workspace) = self.workspaces.get_mut(directory) else {
            return false;
        };
        let before = workspace.sessions.len();
        workspace.sessions.retain(|s| s.id != session_id);
        workspace.sessions.len() != before
    }
}
