//! Record store codec: bytes <-> [`RecordSet`].
//!
//! Parsing normalizes every record up front (missing votes become an empty
//! list, a missing or `null` label becomes unset) so nothing downstream has to
//! distinguish "field absent" from "field null". Serialization always writes the
//! label key, as `null` when unset, with two-space indentation.

pub mod error;


pub use error::{CodecError, CodecResult};

use tracing::{info, instrument, warn};

use crate::record::RecordSet;
use crate::storage::{RecordStore, StorageError};

/// Parses raw bytes into a record set.
///
/// Fails with [`CodecError::Malformed`] when the bytes are not a map of caption
/// to a list of objects each carrying a non-empty path.
pub fn parse(bytes: &[u8]) -> CodecResult<RecordSet> {
    let set: RecordSet = serde_json::from_slice(bytes).map_err(|e| CodecError::Malformed {
        reason: e.to_string(),
    })?;

    for group in set.groups() {
        if let Some(position) = group.records.iter().position(|r| r.path.is_empty()) {
            return Err(CodecError::Malformed {
                reason: format!(
                    "record {} under caption '{}' has an empty path",
                    position, group.caption
                ),
            });
        }
    }

    Ok(set)
}

/// Renders a record set back to bytes, captions in insertion order.
pub fn serialize(set: &RecordSet) -> CodecResult<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(set).map_err(CodecError::Serialize)?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Reads and parses the record set stored under `id`.
#[instrument(skip(store))]
pub fn load<S: RecordStore>(store: &S, id: &str) -> CodecResult<RecordSet> {
    let bytes = store.read(id).map_err(|e| match e {
        StorageError::NotFound { id } => CodecError::NotFound { id },
        other => CodecError::Storage(other),
    })?;

    let set = parse(&bytes)?;

    let duplicates = set.duplicate_paths();
    if !duplicates.is_empty() {
        warn!(
            count = duplicates.len(),
            first = %duplicates[0],
            "Record set reuses image paths; labels resolve per caption"
        );
    }

    info!(
        captions = set.len(),
        records = set.record_count(),
        "Loaded record set"
    );
    Ok(set)
}

/// Serializes `set` and writes it under `id`.
#[instrument(skip(store, set), fields(captions = set.len()))]
pub fn save<S: RecordStore>(store: &S, id: &str, set: &RecordSet) -> CodecResult<()> {
    let bytes = serialize(set)?;
    store.write(id, &bytes)?;
    info!(bytes = bytes.len(), "Saved record set");
    Ok(())
}
