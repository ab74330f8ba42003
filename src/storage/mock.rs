use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use super::{RecordSetLister, RecordStore, StorageError, StorageResult};

/// In-memory [`RecordStore`] with switchable write failures.
#[derive(Debug, Default, Clone)]
pub struct MockRecordStore {
    entries: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    fail_writes: Arc<AtomicBool>,
    writes: Arc<AtomicUsize>,
}

impl MockRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, id: &str, data: impl Into<Vec<u8>>) {
        self.entries
            .write()
            .expect("lock poisoned")
            .insert(id.to_string(), data.into());
    }

    pub fn get(&self, id: &str) -> Option<Vec<u8>> {
        self.entries.read().expect("lock poisoned").get(id).cloned()
    }

    /// Makes every subsequent write fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl RecordStore for MockRecordStore {
    fn read(&self, id: &str) -> StorageResult<Vec<u8>> {
        self.get(id)
            .ok_or_else(|| StorageError::NotFound { id: id.to_string() })
    }

    fn write(&self, id: &str, data: &[u8]) -> StorageResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::WriteFailed {
                id: id.to_string(),
                reason: "simulated write failure".to_string(),
            });
        }
        self.insert(id, data);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl RecordSetLister for MockRecordStore {
    fn list(&self) -> StorageResult<Vec<String>> {
        let mut ids: Vec<String> = self
            .entries
            .read()
            .expect("lock poisoned")
            .keys()
            .cloned()
            .collect();
        ids.sort();
        Ok(ids)
    }
}
