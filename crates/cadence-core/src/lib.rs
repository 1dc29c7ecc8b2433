pub mod api;
pub mod constants;
pub mod error;
pub mod export;
pub mod models;
pub mod search;
pub mod store;

pub use api::{SessionApi, SessionTimePatch};
pub use error::{ApiError, ExportError, PersistError};
