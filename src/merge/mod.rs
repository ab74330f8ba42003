//! Merge-and-persist: folds a batch of label edits into the record set and
//! writes it back only when something actually changed.
//!
//! Edits are keyed by image path. Positions in a filtered or paged view are
//! never used to locate records.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::{MergeError, MergeResult};

use std::collections::BTreeMap;

use tracing::{debug, info, instrument, warn};

use crate::codec;
use crate::record::{Label, RecordSet};
use crate::storage::RecordStore;

/// Labels chosen for one rendered page, keyed by image path.
pub type PendingEdits = BTreeMap<String, Label>;

/// An edit referenced a path that is not among the caption's records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsistencyFault {
    pub caption: String,
    pub path: String,
}

impl std::fmt::Display for ConsistencyFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "image path {} is not stored under caption '{}'",
            self.path, self.caption
        )
    }
}

/// Result of folding one edit batch into the record set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// Number of records whose label changed.
    pub updated: usize,
    /// Paths whose label changed, in edit order.
    pub changed_paths: Vec<String>,
    /// Edits that were skipped because their path is unknown.
    pub faults: Vec<ConsistencyFault>,
}

impl ReconcileOutcome {
    pub fn has_changes(&self) -> bool {
        self.updated > 0
    }
}

/// Applies `edits` to the records stored under `caption`.
///
/// Each edit is matched by path against the caption's full, unfiltered record
/// list. A record whose label already equals the edit is left alone and not
/// counted. Unknown paths are collected as faults; the rest of the batch still
/// applies.
#[instrument(skip(set, edits), fields(edit_count = edits.len()))]
pub fn reconcile(
    set: &mut RecordSet,
    caption: &str,
    edits: &PendingEdits,
) -> MergeResult<ReconcileOutcome> {
    let records = set
        .get_mut(caption)
        .ok_or_else(|| MergeError::UnknownCaption {
            caption: caption.to_string(),
        })?;

    let mut outcome = ReconcileOutcome::default();

    for (path, label) in edits {
        match records.iter_mut().find(|r| &r.path == path) {
            Some(record) => {
                if record.label != Some(*label) {
                    debug!(path = %path, from = ?record.label, to = %label, "Label changed");
                    record.label = Some(*label);
                    outcome.updated += 1;
                    outcome.changed_paths.push(path.clone());
                }
            }
            None => {
                let fault = ConsistencyFault {
                    caption: caption.to_string(),
                    path: path.clone(),
                };
                warn!(%fault, "Skipping edit for unknown image");
                outcome.faults.push(fault);
            }
        }
    }

    Ok(outcome)
}

/// What a save did at the storage boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveReport {
    pub outcome: ReconcileOutcome,
    /// `true` if the record set was written.
    pub written: bool,
}

/// Reconciles `edits` and persists the whole set under `id` if any label changed.
///
/// A write failure leaves the in-memory changes in place so the save can be
/// retried; see [`persist`].
pub fn reconcile_and_persist<S: RecordStore>(
    store: &S,
    id: &str,
    set: &mut RecordSet,
    caption: &str,
    edits: &PendingEdits,
) -> MergeResult<SaveReport> {
    let outcome = reconcile(set, caption, edits)?;

    if !outcome.has_changes() {
        debug!(caption, "No label changes; skipping write");
        return Ok(SaveReport {
            outcome,
            written: false,
        });
    }

    persist(store, id, set)?;
    info!(caption, updated = outcome.updated, "Persisted label changes");
    Ok(SaveReport {
        outcome,
        written: true,
    })
}

/// Writes the whole record set under `id`.
pub fn persist<S: RecordStore>(store: &S, id: &str, set: &RecordSet) -> MergeResult<()> {
    codec::save(store, id, set).map_err(|source| MergeError::Persist {
        id: id.to_string(),
        source,
    })
}
