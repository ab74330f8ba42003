//! Review engine for human verification of voter-scored image-caption pairs.
//!
//! A reviewer opens a record set (caption -> images, each with the automated
//! voters that picked it), narrows one caption's images by voter and by vote
//! count, pages through them, labels each image `True`, `False` or
//! `Ambiguous`, and saves. Saving folds only the changed labels back into the
//! record set by image path and writes it atomically, and only when something
//! changed.
//!
//! # Public API Surface
//!
//! ## Data model
//! - [`RecordSet`], [`ImageRecord`], [`Label`]
//!
//! ## Engine
//! - [`codec`] - parse/serialize record sets, load/save through a store
//! - [`extract_voters`] - voter index
//! - [`FilterSelection`], [`filter()`], [`vote_count_options`] - filtering
//! - [`default_label`], [`displayed_label`] - unreviewed-label suggestion
//! - [`Pager`] - one-based pagination
//! - [`reconcile`], [`reconcile_and_persist`] - merge-and-persist
//! - [`ReviewSession`] - the above wired together as one reviewer's state
//!
//! ## Storage
//! - [`RecordStore`], [`RecordSetLister`], [`FsRecordStore`]
//!
//! ## Test/Mock Support
//! [`MockRecordStore`] is available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod codec;
pub mod config;
pub mod constants;
pub mod filter;
pub mod merge;
pub mod pager;
pub mod policy;
pub mod record;
pub mod session;
pub mod storage;
pub mod voters;

pub use codec::{CodecError, CodecResult};
pub use config::{Config, ConfigError};
pub use filter::{FilterSelection, filter, vote_count_options};
pub use merge::{
    ConsistencyFault, MergeError, MergeResult, PendingEdits, ReconcileOutcome, SaveReport,
    reconcile, reconcile_and_persist,
};
pub use pager::Pager;
pub use policy::{DisplayedLabel, default_label, displayed_label};
pub use record::{ImageRecord, LABEL_OPTIONS, Label, ParseLabelError, RecordSet};
pub use session::{PageItem, PageView, ReviewSession, SessionError, SessionResult};
#[cfg(any(test, feature = "mock"))]
pub use storage::MockRecordStore;
pub use storage::{FsRecordStore, RecordSetLister, RecordStore, StorageError, StorageResult};
pub use voters::extract_voters;
