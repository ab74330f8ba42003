//! Test fixtures for integration tests.

#![allow(dead_code)]

use std::num::NonZeroUsize;

use review::record::{ImageRecord, Label, RecordSet};
use review::storage::FsRecordStore;
use review::{Pager, ReviewSession};
use tempfile::TempDir;

pub const SET_ID: &str = "review.json";

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Default)]
pub struct RecordSetBuilder {
    groups: Vec<(String, Vec<ImageRecord>)>,
}

impl RecordSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn caption(mut self, caption: &str) -> Self {
        self.groups.push((caption.to_string(), Vec::new()));
        self
    }

    /// Adds an unreviewed record to the last caption.
    pub fn image(mut self, path: &str, votes: &[&str]) -> Self {
        self.push(ImageRecord::new(path).with_votes(votes.iter().copied()));
        self
    }

    /// Adds a reviewed record to the last caption.
    pub fn labeled(mut self, path: &str, votes: &[&str], label: Label) -> Self {
        self.push(
            ImageRecord::new(path)
                .with_votes(votes.iter().copied())
                .with_label(label),
        );
        self
    }

    pub fn build(self) -> RecordSet {
        self.groups.into_iter().collect()
    }

    fn push(&mut self, record: ImageRecord) {
        match self.groups.last_mut() {
            Some((_, records)) => records.push(record),
            None => panic!("call caption() before adding images"),
        }
    }
}

/// Generates `count` unreviewed records `img_000.png`.. with voters cycling
/// through `m0`..`m3` and vote counts 0..=4.
pub fn generate_records(count: usize) -> Vec<ImageRecord> {
    (0..count)
        .map(|i| {
            let votes: Vec<String> = (0..(i % 5)).map(|v| format!("m{}", (i + v) % 4)).collect();
            ImageRecord::new(format!("img_{:03}.png", i)).with_votes(votes)
        })
        .collect()
}

/// A temp directory holding `set` under [`SET_ID`], and a session over it.
pub fn session_over(
    set: &RecordSet,
    page_size: usize,
) -> (ReviewSession<FsRecordStore>, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = FsRecordStore::new(dir.path().to_path_buf());
    review::codec::save(&store, SET_ID, set).expect("Failed to seed record set");

    let pager = Pager::new(NonZeroUsize::new(page_size).expect("non-zero page size"));
    (ReviewSession::new(store, pager), dir)
}
