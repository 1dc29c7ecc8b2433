//! Sidebar UI state: the collapsed flag and the quick filter, persisted in
//! their own namespace so they survive restarts independently of the
//! conversation data.

use std::path::Path;

use serde::{Deserialize, Serialize};

use cadence_core::constants::{SIDEBAR_NAMESPACE, SIDEBAR_SCHEMA_VERSION};
use cadence_core::models::Session;
use cadence_core::search::text_contains_term;
use cadence_core::store::persist;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SidebarUi {
    #[serde(default)]
    pub collapsed: bool,
    #[serde(default)]
    pub query: String,
}

impl SidebarUi {
    pub fn load(data_dir: &Path) -> Self {
        persist::load(
            &persist::state_path(data_dir, SIDEBAR_NAMESPACE),
            SIDEBAR_NAMESPACE,
            SIDEBAR_SCHEMA_VERSION,
        )
    }

    pub fn save(&self, data_dir: &Path) {
        let path = persist::state_path(data_dir, SIDEBAR_NAMESPACE);
        if let Err(err) = persist::save(&path, SIDEBAR_NAMESPACE, SIDEBAR_SCHEMA_VERSION, self) {
            tracing::warn!("sidebar: failed to persist ui state: {err}");
        }
    }

    pub fn toggle_collapsed(&mut self) {
        self.collapsed = !self.collapsed;
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Quick filter over the active project's sessions by case-insensitive
    /// title substring. An empty query passes everything through.
    pub fn filter_sessions<'a>(&self, sessions: &'a [Session]) -> Vec<&'a Session> {
        let query = self.query.trim();
        if query.is_empty() {
            return sessions.iter().collect();
        }
        sessions
            .iter()
            .filter(|s| text_contains_term(s.display_title(), query))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_core::models::SessionTime;
    use tempfile::tempdir;

    fn session(id: &str, title: &str) -> Session {
        Session {
            id: id.to_string(),
            title: title.to_string(),
            time: SessionTime::default(),
        }
    }

    #[test]
    fn test_quick_filter_by_title() {
        let sidebar = SidebarUi {
            collapsed: false,
            query: "parse".to_string(),
        };
        let sessions = vec![
            session("a", "Parser bug"),
            session("b", "Deployment"),
            session("c", ""),
        ];

        let ids: Vec<&str> = sidebar
            .filter_sessions(&sessions)
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a"]);
    }

    #[test]
    fn test_empty_query_passes_everything() {
        let sidebar = SidebarUi::default();
        let sessions = vec![session("a", "One"), session("b", "Two")];
        assert_eq!(sidebar.filter_sessions(&sessions).len(), 2);
    }

    #[test]
    fn test_state_survives_reload() {
        let dir = tempdir().unwrap();
        let mut sidebar = SidebarUi::default();
        sidebar.toggle_collapsed();
        sidebar.set_query("alpha");
        sidebar.save(dir.path());

        let restored = SidebarUi::load(dir.path());
        assert!(restored.collapsed);
        assert_eq!(restored.query, "alpha");
    }
}
