use thiserror::Error;

use crate::storage::StorageError;

#[derive(Error, Debug)]
pub enum CodecError {
    /// Nothing is stored under the requested identifier.
    #[error("record set not found: {id}")]
    NotFound { id: String },

    /// Bytes do not decode into caption -> list of records.
    #[error("malformed record set: {reason}")]
    Malformed { reason: String },

    #[error("failed to serialize record set: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type CodecResult<T> = Result<T, CodecError>;
