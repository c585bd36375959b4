use thiserror::Error;

#[derive(Error, Debug)]
pub enum NoteError {
    #[error("Not in a notepin project. Run 'notepin init' first.")]
    NotInitialized,

    #[error("Already initialized. Remove .notepin/ to reinitialize.")]
    AlreadyInitialized,

    #[error("Invalid note: {0}")]
    Validation(String),

    #[error("Note not found: {0}")]
    NotFound(String),

    #[error("Ambiguous note id '{0}'. Type more characters.")]
    AmbiguousId(String),

    #[error("Unreadable note data: {0}")]
    StorageRead(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NoteError>;
