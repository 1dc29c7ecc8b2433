//! Conversation list view logic: ordering and per-session actions
//! (pin toggle, export, archive).

use std::path::Path;

use chrono::Local;
use parking_lot::RwLock;

use cadence_core::api::{SessionApi, SessionTimePatch};
use cadence_core::error::ExportError;
use cadence_core::export::{self, ExportFormat};
use cadence_core::models::{ConversationKey, Session};
use cadence_core::store::{now_millis, ConversationStore, WorkspaceStore};

use crate::download::{self, DownloadedFile};
use crate::notifications::{Notification, Notifier};

/// Total order over a project's session list: pinned sessions first, then
/// most recently touched first. The sort is stable, so equal keys keep their
/// incoming relative order.
pub fn order_sessions<'a>(
    directory: &str,
    sessions: &'a [Session],
    conversations: &ConversationStore,
) -> Vec<&'a Session> {
    let mut ordered: Vec<&Session> = sessions.iter().collect();
    ordered.sort_by(|a, b| {
        let a_pinned = conversations.is_pinned(&ConversationKey::new(directory, a.id.clone()));
        let b_pinned = conversations.is_pinned(&ConversationKey::new(directory, b.id.clone()));
        b_pinned
            .cmp(&a_pinned)
            .then(b.time.last_touched().cmp(&a.time.last_touched()))
    });
    ordered
}

pub fn toggle_pinned(
    conversations: &mut ConversationStore,
    directory: &str,
    session: &Session,
) {
    conversations.toggle_pinned(ConversationKey::new(directory, session.id.clone()));
}

/// Render a session export and write it into `target_dir`.
///
/// Messages that have not been synced yet are a recoverable precondition
/// failure: the user gets a "nothing to export yet" notification with
/// guidance instead of an empty file.
pub fn export_session_to(
    target_dir: &Path,
    workspaces: &WorkspaceStore,
    notifier: &Notifier,
    directory: &str,
    session: &Session,
    format: ExportFormat,
) -> Option<DownloadedFile> {
    let payload = match workspaces
        .workspace(directory)
        .ok_or(ExportError::NotReady)
        .and_then(|workspace| export::payload_for(workspace, directory, session))
    {
        Ok(payload) => payload,
        Err(ExportError::NotReady) => {
            notifier.notify(
                Notification::error("Nothing to export yet")
                    .with_description("Open the conversation once first, then export."),
            );
            return None;
        }
        Err(err) => {
            notifier.notify(Notification::error("Export failed").with_description(err.to_string()));
            return None;
        }
    };

    let now = Local::now();
    let contents = match export::render(&payload, format, now) {
        Ok(contents) => contents,
        Err(err) => {
            notifier.notify(Notification::error("Export failed").with_description(err.to_string()));
            return None;
        }
    };

    let filename = export::export_filename(session.display_title(), format, now);
    match download::save_text(target_dir, &filename, &contents, format.mime()) {
        Ok(file) => Some(file),
        Err(err) => {
            notifier.notify(Notification::error("Export failed").with_description(err.to_string()));
            None
        }
    }
}

/// Export into the platform downloads directory.
pub fn export_session(
    workspaces: &WorkspaceStore,
    notifier: &Notifier,
    directory: &str,
    session: &Session,
    format: ExportFormat,
) -> Option<DownloadedFile> {
    export_session_to(
        &download::download_dir(),
        workspaces,
        notifier,
        directory,
        session,
        format,
    )
}

/// Archive a session: remote first, local second.
///
/// The session disappears from local views only after the remote update
/// succeeds. On failure the cache is untouched (the remote session still
/// exists, so no inconsistency is introduced) and the error is surfaced via
/// the notifier. Returns whether the archive went through.
pub async fn archive_session(
    api: &dyn SessionApi,
    workspaces: &RwLock<WorkspaceStore>,
    notifier: &Notifier,
    directory: &str,
    session_id: &str,
) -> bool {
    let patch = SessionTimePatch::archived_at(now_millis());
    match api.update_session(directory, session_id, patch).await {
        Ok(()) => {
            workspaces.write().remove_session(directory, session_id);
            true
        }
        Err(err) => {
            notifier.notify(
                Notification::error("Archive failed").with_description(err.to_string()),
            );
            false
        }
    }
}
