//! Cross-project conversation search.
//!
//! Filters are applied per session in a fixed order — pinned-only, folder
//! constraint, then title substring — and the surviving rows from every
//! resolved directory are merged and ranked pinned-first, then by recency.

use crate::constants::{BROWSE_RESULT_CAP, MAX_RECENT_PROJECTS, QUERY_RESULT_CAP};
use crate::models::ConversationKey;
use crate::store::{ConversationStore, WorkspaceStore};

/// Breadth of directories considered during a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    CurrentProject,
    AllProjects,
}

/// Folder constraint of a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolderConstraint {
    All,
    /// Conversations without a folder assignment.
    Unfiled,
    Folder(String),
}

impl FolderConstraint {
    fn admits(&self, folder_id: Option<&str>) -> bool {
        match self {
            FolderConstraint::All => true,
            FolderConstraint::Unfiled => folder_id.is_none(),
            FolderConstraint::Folder(id) => folder_id == Some(id.as_str()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub scope: SearchScope,
    /// Free-text query matched case-insensitively against session titles.
    pub query: String,
    pub pinned_only: bool,
    pub folder: FolderConstraint,
    /// Opt-in to searching every known project instead of the
    /// [`MAX_RECENT_PROJECTS`] most recent ones.
    pub load_all_projects: bool,
    pub active_directory: Option<String>,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            scope: SearchScope::CurrentProject,
            query: String::new(),
            pinned_only: false,
            folder: FolderConstraint::All,
            load_all_projects: false,
            active_directory: None,
        }
    }
}

/// One ranked search result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRow {
    pub directory: String,
    pub session_id: String,
    pub title: String,
    pub updated: u64,
    pub pinned: bool,
    /// Resolved display name of the assigned folder, if any.
    pub folder_name: Option<String>,
}

/// Loaded/total project counts, present when the all-projects directory set
/// was capped. Drives the "load all projects" hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectCoverage {
    pub loaded: usize,
    pub total: usize,
}

#[derive(Debug, Clone)]
pub struct SearchResults {
    pub rows: Vec<SearchRow>,
    pub coverage: Option<ProjectCoverage>,
}

/// Case-insensitive substring match (ASCII case folding).
pub fn text_contains_term(text: &str, term: &str) -> bool {
    let text: Vec<char> = text.chars().collect();
    let term: Vec<char> = term.chars().collect();

    if term.is_empty() {
        return true;
    }
    if text.len() < term.len() {
        return false;
    }

    (0..=text.len() - term.len()).any(|start| {
        term.iter()
            .enumerate()
            .all(|(i, tc)| text[start + i].eq_ignore_ascii_case(tc))
    })
}

/// The set of directories a request covers, in search order.
///
/// Current-project scope resolves to the active directory alone (empty set
/// when none). All-projects scope resolves to every known directory by
/// recency, capped unless `load_all_projects` is set.
pub fn resolve_directories(workspaces: &WorkspaceStore, request: &SearchRequest) -> Vec<String> {
    match request.scope {
        SearchScope::CurrentProject => request.active_directory.iter().cloned().collect(),
        SearchScope::AllProjects => {
            let directories = workspaces.directories_by_recency();
            if request.load_all_projects {
                directories
            } else {
                directories
                    .into_iter()
                    .take(MAX_RECENT_PROJECTS)
                    .collect()
            }
        }
    }
}

pub fn search(
    workspaces: &WorkspaceStore,
    conversations: &ConversationStore,
    request: &SearchRequest,
) -> SearchResults {
    let query = request.query.trim();
    let directories = resolve_directories(workspaces, request);

    let coverage = match request.scope {
        SearchScope::AllProjects => {
            let total = workspaces.projects().len();
            (directories.len() < total).then_some(ProjectCoverage {
                loaded: directories.len(),
                total,
            })
        }
        SearchScope::CurrentProject => None,
    };

    let mut rows = Vec::new();
    for directory in &directories {
        for session in workspaces.sessions(directory) {
            let key = ConversationKey::new(directory.clone(), session.id.clone());
            let meta = conversations.meta_for(&key);
            let pinned = meta.map(|m| m.pinned).unwrap_or(false);

            if request.pinned_only && !pinned {
                continue;
            }
            let folder_id = meta.and_then(|m| m.folder_id.as_deref());
            if !request.folder.admits(folder_id) {
                continue;
            }
            let title = session.display_title();
            if !query.is_empty() && !text_contains_term(title, query) {
                continue;
            }

            let folder_name = folder_id
                .and_then(|id| conversations.folder_by_id(id))
                .map(|f| f.name.clone());

            rows.push(SearchRow {
                directory: directory.clone(),
                session_id: session.id.clone(),
                title: title.to_string(),
                updated: session.time.last_touched(),
                pinned,
                folder_name,
            });
        }
    }

    // Pinned first, then most recent; stable, so same-key rows keep
    // their per-directory order.
    rows.sort_by(|a, b| b.pinned.cmp(&a.pinned).then(b.updated.cmp(&a.updated)));

    let cap = if query.is_empty() {
        BROWSE_RESULT_CAP
    } else {
        QUERY_RESULT_CAP
    };
    rows.truncate(cap);

    SearchResults { rows, coverage }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FolderUpsert, Project, Session, SessionTime};

    fn session(id: &str, title: &str, updated: u64) -> Session {
        Session {
            id: id.to_string(),
            title: title.to_string(),
            time: SessionTime {
                created: updated,
                updated: Some(updated),
                archived: None,
            },
        }
    }

    fn project(worktree: &str, updated: u64) -> Project {
        Project {
            worktree: worktree.to_string(),
            time: SessionTime {
                created: updated,
                updated: Some(updated),
                archived: None,
            },
        }
    }

    fn current_project(directory: &str) -> SearchRequest {
        SearchRequest {
            active_directory: Some(directory.to_string()),
            ..SearchRequest::default()
        }
    }

    fn titles(results: &SearchResults) -> Vec<&str> {
        results.rows.iter().map(|r| r.title.as_str()).collect()
    }

    #[test]
    fn test_text_contains_term() {
        assert!(text_contains_term("Hello World", "hello"));
        assert!(text_contains_term("Hello World", "WORLD"));
        assert!(text_contains_term("Hello World", "lo Wo"));
        assert!(!text_contains_term("Hello World", "xyz"));
        assert!(text_contains_term("Hello World", ""));
        assert!(!text_contains_term("Hi", "Hello"));
    }

    #[test]
    fn test_filter_composition() {
        let mut workspaces = WorkspaceStore::new();
        let mut conversations = ConversationStore::new();

        workspaces.upsert_session("/proj", session("s1", "Alpha", 200));
        workspaces.upsert_session("/proj", session("s2", "Beta", 100));

        conversations.toggle_pinned(ConversationKey::new("/proj", "s1"));
        let folder = conversations
            .upsert_folder(FolderUpsert::create("F"))
            .unwrap();
        conversations
            .set_conversation_folder(ConversationKey::new("/proj", "s2"), Some(folder.clone()));

        // pinned-only, any folder
        let request = SearchRequest {
            pinned_only: true,
            ..current_project("/proj")
        };
        let results = search(&workspaces, &conversations, &request);
        assert_eq!(titles(&results), vec!["Alpha"]);

        // specific folder, no pin constraint
        let request = SearchRequest {
            folder: FolderConstraint::Folder(folder),
            ..current_project("/proj")
        };
        let results = search(&workspaces, &conversations, &request);
        assert_eq!(titles(&results), vec!["Beta"]);
    }

    #[test]
    fn test_unfiled_matches_absent_folder_only() {
        let mut workspaces = WorkspaceStore::new();
        let mut conversations = ConversationStore::new();

        workspaces.upsert_session("/proj", session("s1", "Filed", 200));
        workspaces.upsert_session("/proj", session("s2", "Loose", 100));
        // Pinned but never filed: meta exists with folder_id = None
        workspaces.upsert_session("/proj", session("s3", "Pinned loose", 50));

        let folder = conversations
            .upsert_folder(FolderUpsert::create("F"))
            .unwrap();
        conversations.set_conversation_folder(ConversationKey::new("/proj", "s1"), Some(folder));
        conversations.toggle_pinned(ConversationKey::new("/proj", "s3"));

        let request = SearchRequest {
            folder: FolderConstraint::Unfiled,
            ..current_project("/proj")
        };
        let results = search(&workspaces, &conversations, &request);
        assert_eq!(titles(&results), vec!["Loose", "Pinned loose"]);
    }

    #[test]
    fn test_query_matches_untitled_fallback() {
        let mut workspaces = WorkspaceStore::new();
        let conversations = ConversationStore::new();

        workspaces.upsert_session("/proj", session("s1", "", 100));

        let request = SearchRequest {
            query: "untitled".to_string(),
            ..current_project("/proj")
        };
        let results = search(&workspaces, &conversations, &request);
        assert_eq!(titles(&results), vec!["Untitled conversation"]);
    }

    #[test]
    fn test_ranking_across_directories() {
        let mut workspaces = WorkspaceStore::new();
        let mut conversations = ConversationStore::new();

        workspaces.upsert_project(project("/a", 500));
        workspaces.upsert_project(project("/b", 400));
        workspaces.upsert_session("/a", session("s1", "Old pinned", 100));
        workspaces.upsert_session("/b", session("s2", "Fresh", 300));
        workspaces.upsert_session("/b", session("s3", "Stale", 200));

        conversations.toggle_pinned(ConversationKey::new("/a", "s1"));

        let request = SearchRequest {
            scope: SearchScope::AllProjects,
            ..SearchRequest::default()
        };
        let results = search(&workspaces, &conversations, &request);
        assert_eq!(titles(&results), vec!["Old pinned", "Fresh", "Stale"]);
    }

    #[test]
    fn test_all_projects_capped_with_coverage_hint() {
        let mut workspaces = WorkspaceStore::new();
        let conversations = ConversationStore::new();

        for i in 0..(MAX_RECENT_PROJECTS + 3) {
            let dir = format!("/proj{i}");
            workspaces.upsert_project(project(&dir, 1000 + i as u64));
            workspaces.upsert_session(&dir, session("s", "Session", 100));
        }

        let request = SearchRequest {
            scope: SearchScope::AllProjects,
            ..SearchRequest::default()
        };
        let results = search(&workspaces, &conversations, &request);
        assert_eq!(results.rows.len(), MAX_RECENT_PROJECTS);
        assert_eq!(
            results.coverage,
            Some(ProjectCoverage {
                loaded: MAX_RECENT_PROJECTS,
                total: MAX_RECENT_PROJECTS + 3,
            })
        );

        // Explicitly loading everything clears the hint
        let request = SearchRequest {
            load_all_projects: true,
            ..request
        };
        let results = search(&workspaces, &conversations, &request);
        assert_eq!(results.rows.len(), MAX_RECENT_PROJECTS + 3);
        assert!(results.coverage.is_none());
    }

    #[test]
    fn test_result_caps() {
        let mut workspaces = WorkspaceStore::new();
        let conversations = ConversationStore::new();

        for i in 0..250 {
            workspaces.upsert_session("/proj", session(&format!("s{i}"), "Match", i as u64));
        }

        let browse = search(&workspaces, &conversations, &current_project("/proj"));
        assert_eq!(browse.rows.len(), BROWSE_RESULT_CAP);

        let request = SearchRequest {
            query: "match".to_string(),
            ..current_project("/proj")
        };
        let queried = search(&workspaces, &conversations, &request);
        assert_eq!(queried.rows.len(), QUERY_RESULT_CAP);
    }

    #[test]
    fn test_no_active_directory_yields_empty() {
        let workspaces = WorkspaceStore::new();
        let conversations = ConversationStore::new();

        let results = search(&workspaces, &conversations, &SearchRequest::default());
        assert!(results.rows.is_empty());
        assert!(results.coverage.is_none());
    }
}
