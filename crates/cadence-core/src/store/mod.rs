pub mod conversation_store;
pub mod persist;
pub mod workspace_store;

pub use conversation_store::{ConversationState, ConversationStore};
pub use persist::{default_data_dir, now_millis, state_path, Flusher};
pub use workspace_store::{WorkspaceData, WorkspaceStore};
