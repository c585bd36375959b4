pub mod cli;
pub mod config;
pub mod entity;
pub mod error;
pub mod session;
pub mod storage;
pub mod store;

pub use config::Config;
pub use entity::{Note, NoteForm, SortOrder};
pub use error::{NoteError, Result};
pub use session::Session;
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::NoteStore;
