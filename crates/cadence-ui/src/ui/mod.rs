pub mod conversation_list;
pub mod folder_panel;
pub mod search_view;
pub mod sidebar;

pub use folder_panel::{FolderFilterKey, FolderPanel};
pub use search_view::SearchView;
pub use sidebar::SidebarUi;
