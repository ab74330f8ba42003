use thiserror::Error;

use crate::codec::CodecError;
use crate::merge::MergeError;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("no record set is loaded")]
    NoRecordSet,

    #[error("no caption is selected")]
    NoCaption,

    #[error("caption not found in record set: '{caption}'")]
    UnknownCaption { caption: String },

    /// Loading or encoding failed; the previously loaded record set, if any, is kept.
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Merge(#[from] MergeError),
}

pub type SessionResult<T> = Result<T, SessionError>;
