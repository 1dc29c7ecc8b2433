//! Application-wide constants
//!
//! Centralized location for magic strings and configuration values
//! that are used across multiple modules.

/// Display fallback for sessions with an empty title.
pub const DEFAULT_SESSION_TITLE: &str = "Untitled conversation";

/// Filename prefix for exported conversations.
pub const EXPORT_FILE_PREFIX: &str = "cadence";

// Persistence namespaces. Each namespace is versioned independently;
// bumping a version discards the previously persisted state for that
// namespace on the next load.
pub const CONVERSATION_NAMESPACE: &str = "cadence.conversation";
pub const CONVERSATION_SCHEMA_VERSION: u32 = 1;
pub const SIDEBAR_NAMESPACE: &str = "cadence.sidebar";
pub const SIDEBAR_SCHEMA_VERSION: u32 = 1;

// Search limits
/// In all-projects scope, only this many most-recently-updated projects are
/// searched unless the user explicitly asks to load the rest.
pub const MAX_RECENT_PROJECTS: usize = 12;

/// Result cap when the query is empty (browsing mode).
pub const BROWSE_RESULT_CAP: usize = 80;

/// Result cap when a query is present.
pub const QUERY_RESULT_CAP: usize = 200;
