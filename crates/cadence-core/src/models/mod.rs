pub mod conversation;
pub mod folder;
pub mod message;
pub mod session;

pub use conversation::{ConversationKey, ConversationMeta};
pub use folder::{Folder, FolderUpsert};
pub use message::{Message, MessagePart, Role};
pub use session::{Project, Session, SessionTime};
