use thiserror::Error;

use crate::codec::CodecError;

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("caption not found in record set: '{caption}'")]
    UnknownCaption { caption: String },

    /// Writing the record set failed; in-memory labels are kept.
    #[error("failed to persist record set {id}: {source}")]
    Persist {
        id: String,
        #[source]
        source: CodecError,
    },
}

pub type MergeResult<T> = Result<T, MergeError>;
