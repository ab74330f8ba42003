use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("record set not found: {id}")]
    NotFound { id: String },

    #[error("invalid record set identifier (path traversal?): {id}")]
    InvalidIdentifier { id: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("write failed for {id}: {reason}")]
    WriteFailed { id: String, reason: String },
}

pub type StorageResult<T> = Result<T, StorageError>;
