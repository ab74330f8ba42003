//! Byte-level storage for record sets.
//!
//! The engine only needs "read bytes for an identifier", "write bytes for an
//! identifier" and "list identifiers"; [`FsRecordStore`] provides them over a
//! directory, [`MockRecordStore`] in memory for tests.

pub mod error;
pub mod fs;
#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use error::{StorageError, StorageResult};
pub use fs::FsRecordStore;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockRecordStore;

/// Reads and writes the raw bytes of a record set.
///
/// `write` must replace the previous content atomically: after a failed write
/// the old bytes are still readable.
pub trait RecordStore: Send + Sync {
    /// Returns the bytes stored under `id`, or [`StorageError::NotFound`].
    fn read(&self, id: &str) -> StorageResult<Vec<u8>>;

    /// Replaces the bytes stored under `id`.
    fn write(&self, id: &str, data: &[u8]) -> StorageResult<()>;
}

/// Lists the record sets available for review.
pub trait RecordSetLister: Send + Sync {
    /// Returns the available identifiers, sorted.
    fn list(&self) -> StorageResult<Vec<String>>;
}
