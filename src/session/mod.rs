//! Review session: the explicit state of one reviewer working through one
//! record set.
//!
//! Every interaction (open, select a caption, change a filter, turn a page,
//! save) is a method that runs to completion on `&mut self`. The session owns
//! its [`RecordSet`] exclusively and replaces it wholesale on the next open.

pub mod error;
pub mod types;


pub use error::{SessionError, SessionResult};
pub use types::{PageItem, PageView};

use std::collections::BTreeSet;

use tracing::{debug, error, info, instrument, warn};

use crate::codec::{self, CodecError};
use crate::filter::{self, FilterSelection};
use crate::merge::{self, PendingEdits, SaveReport};
use crate::pager::Pager;
use crate::policy::displayed_label;
use crate::record::{ImageRecord, RecordSet};
use crate::storage::RecordStore;
use crate::voters::extract_voters;

#[derive(Debug)]
struct LoadedSet {
    id: String,
    records: RecordSet,
    voters: Vec<String>,
    caption: Option<String>,
    selection: FilterSelection,
    page: usize,
    /// Set when in-memory labels differ from what was last written.
    dirty: bool,
}

impl LoadedSet {
    fn caption_records(&self) -> SessionResult<(&str, &[ImageRecord])> {
        let caption = self.caption.as_deref().ok_or(SessionError::NoCaption)?;
        let records = self
            .records
            .get(caption)
            .ok_or_else(|| SessionError::UnknownCaption {
                caption: caption.to_string(),
            })?;
        Ok((caption, records))
    }

    fn filtered_len(&self) -> usize {
        self.caption_records()
            .map(|(_, records)| filter::filter(records, &self.selection).len())
            .unwrap_or(0)
    }

    fn vote_count_options(&self) -> Vec<usize> {
        self.caption_records()
            .map(|(_, records)| filter::vote_count_options(records, &self.selection.voters))
            .unwrap_or_default()
    }

    /// Drops vote counts no longer offered, then keeps the page in range.
    fn settle(&mut self, pager: &Pager) {
        let options = self.vote_count_options();
        if self.selection.retain_available(&options) {
            debug!(remaining = ?self.selection.vote_counts, "Dropped stale vote-count selections");
            self.page = 1;
        }
        self.page = pager.clamp_page(self.page, self.filtered_len());
    }
}

/// One reviewer's working state over a [`RecordStore`].
#[derive(Debug)]
pub struct ReviewSession<S> {
    store: S,
    pager: Pager,
    loaded: Option<LoadedSet>,
}

impl<S: RecordStore> ReviewSession<S> {
    pub fn new(store: S, pager: Pager) -> Self {
        Self {
            store,
            pager,
            loaded: None,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    /// Loads the record set `id`, replacing whatever was loaded before and
    /// resetting caption, filters and page.
    ///
    /// On failure nothing changes.
    #[instrument(skip(self))]
    pub fn open(&mut self, id: &str) -> SessionResult<()> {
        let records = codec::load(&self.store, id)?;

        if let Some(previous) = &self.loaded
            && previous.dirty
        {
            warn!(previous = %previous.id, "Discarding unsaved labels from previous record set");
        }

        let voters = extract_voters(&records);
        info!(voters = voters.len(), "Record set opened");
        self.loaded = Some(LoadedSet {
            id: id.to_string(),
            records,
            voters,
            caption: None,
            selection: FilterSelection::default(),
            page: 1,
            dirty: false,
        });
        Ok(())
    }

    /// Drops the loaded record set.
    pub fn close(&mut self) {
        self.loaded = None;
    }

    pub fn is_open(&self) -> bool {
        self.loaded.is_some()
    }

    pub fn record_set_id(&self) -> Option<&str> {
        self.loaded.as_ref().map(|l| l.id.as_str())
    }

    pub fn record_set(&self) -> Option<&RecordSet> {
        self.loaded.as_ref().map(|l| &l.records)
    }

    /// `true` after a failed write until the next successful one.
    pub fn has_unsaved_changes(&self) -> bool {
        self.loaded.as_ref().is_some_and(|l| l.dirty)
    }

    /// Every voter in the loaded record set, sorted.
    pub fn voters(&self) -> &[String] {
        self.loaded.as_ref().map(|l| l.voters.as_slice()).unwrap_or(&[])
    }

    pub fn captions(&self) -> Vec<&str> {
        self.loaded
            .as_ref()
            .map(|l| l.records.captions().collect())
            .unwrap_or_default()
    }

    pub fn caption(&self) -> Option<&str> {
        self.loaded.as_ref().and_then(|l| l.caption.as_deref())
    }

    pub fn selection(&self) -> Option<&FilterSelection> {
        self.loaded.as_ref().map(|l| &l.selection)
    }

    /// Current one-based page number (1 when nothing is loaded).
    pub fn page(&self) -> usize {
        self.loaded.as_ref().map_or(1, |l| l.page)
    }

    /// Switches to `caption`. A different caption resets the page and the
    /// vote-count filter; the voter filter is kept.
    pub fn select_caption(&mut self, caption: &str) -> SessionResult<()> {
        let loaded = self.loaded_mut()?;
        if !loaded.records.contains_caption(caption) {
            return Err(SessionError::UnknownCaption {
                caption: caption.to_string(),
            });
        }

        if loaded.caption.as_deref() != Some(caption) {
            debug!(caption, "Caption selected");
            loaded.caption = Some(caption.to_string());
            loaded.page = 1;
            loaded.selection.vote_counts.clear();
        }
        Ok(())
    }

    /// Replaces the voter filter. A change resets the page and drops vote
    /// counts the narrowed records no longer offer.
    pub fn set_voters<I, V>(&mut self, voters: I) -> SessionResult<()>
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let pager = self.pager;
        let loaded = self.loaded_mut()?;
        let voters: BTreeSet<String> = voters.into_iter().map(Into::into).collect();

        if loaded.selection.voters != voters {
            debug!(?voters, "Voter filter changed");
            loaded.selection.voters = voters;
            loaded.page = 1;
        }
        loaded.settle(&pager);
        Ok(())
    }

    /// Replaces the vote-count filter. Counts not offered for the current
    /// caption are dropped.
    pub fn set_vote_counts<I: IntoIterator<Item = usize>>(
        &mut self,
        counts: I,
    ) -> SessionResult<()> {
        let pager = self.pager;
        let loaded = self.loaded_mut()?;
        let counts: BTreeSet<usize> = counts.into_iter().collect();

        if loaded.selection.vote_counts != counts {
            debug!(?counts, "Vote-count filter changed");
            loaded.selection.vote_counts = counts;
            loaded.page = 1;
        }
        loaded.settle(&pager);
        Ok(())
    }

    /// Vote counts selectable for the current caption under the voter filter.
    pub fn vote_count_options(&self) -> SessionResult<Vec<usize>> {
        let loaded = self.loaded()?;
        let (_, records) = loaded.caption_records()?;
        Ok(filter::vote_count_options(records, &loaded.selection.voters))
    }

    /// The current caption's records that pass the filter, in stored order.
    pub fn filtered(&self) -> SessionResult<Vec<&ImageRecord>> {
        let loaded = self.loaded()?;
        let (_, records) = loaded.caption_records()?;
        Ok(filter::filter(records, &loaded.selection))
    }

    pub fn total_pages(&self) -> SessionResult<usize> {
        Ok(self.pager.total_pages(self.filtered()?.len()))
    }

    /// Moves to `page`, clamped into range. Returns the page actually selected.
    pub fn go_to_page(&mut self, page: usize) -> SessionResult<usize> {
        let pager = self.pager;
        let loaded = self.loaded_mut()?;
        loaded.page = pager.clamp_page(page, loaded.filtered_len());
        Ok(loaded.page)
    }

    /// Advances one page; stays put on the last page.
    pub fn next_page(&mut self) -> SessionResult<usize> {
        let page = self.page();
        self.go_to_page(page.saturating_add(1))
    }

    /// Goes back one page; stays put on the first page.
    pub fn previous_page(&mut self) -> SessionResult<usize> {
        let page = self.page();
        self.go_to_page(page.saturating_sub(1))
    }

    /// Builds the page to render: each record with its stored label, or the
    /// default suggestion when unreviewed.
    pub fn current_page(&self) -> SessionResult<PageView> {
        let loaded = self.loaded()?;
        let (caption, records) = loaded.caption_records()?;
        let filtered = filter::filter(records, &loaded.selection);

        let number = self.pager.clamp_page(loaded.page, filtered.len());
        let range = self.pager.bounds(number, filtered.len());
        let items = filtered[range.clone()]
            .iter()
            .zip(range)
            .map(|(record, index)| {
                let shown = displayed_label(record);
                PageItem {
                    index,
                    path: record.path.clone(),
                    votes: record.votes.clone(),
                    label: shown.label,
                    explicit: shown.explicit,
                }
            })
            .collect();

        Ok(PageView {
            caption: caption.to_string(),
            number,
            total_pages: self.pager.total_pages(filtered.len()),
            total_items: filtered.len(),
            items,
        })
    }

    /// Merges `edits` into the current caption and writes the record set if
    /// any label changed, or if an earlier write failed.
    ///
    /// When the write fails the merged labels stay in memory, so calling
    /// `save` again retries without re-entering them.
    #[instrument(skip(self, edits), fields(edit_count = edits.len()))]
    pub fn save(&mut self, edits: &PendingEdits) -> SessionResult<SaveReport> {
        let loaded = self.loaded.as_mut().ok_or(SessionError::NoRecordSet)?;
        let caption = loaded.caption.clone().ok_or(SessionError::NoCaption)?;

        let outcome = merge::reconcile(&mut loaded.records, &caption, edits)?;
        if outcome.has_changes() {
            loaded.dirty = true;
        }

        if !loaded.dirty {
            info!(caption = %caption, "No label changes detected");
            return Ok(SaveReport {
                outcome,
                written: false,
            });
        }

        if let Err(e) = merge::persist(&self.store, &loaded.id, &loaded.records) {
            error!(id = %loaded.id, error = %e, "Save failed; labels kept in memory");
            return Err(e.into());
        }

        loaded.dirty = false;
        info!(caption = %caption, updated = outcome.updated, "Labels saved");
        Ok(SaveReport {
            outcome,
            written: true,
        })
    }

    /// The current caption's records as pretty JSON, for inspection.
    pub fn raw_caption(&self) -> SessionResult<String> {
        let loaded = self.loaded()?;
        let (_, records) = loaded.caption_records()?;
        serde_json::to_string_pretty(records)
            .map_err(|e| SessionError::Codec(CodecError::Serialize(e)))
    }

    fn loaded(&self) -> SessionResult<&LoadedSet> {
        self.loaded.as_ref().ok_or(SessionError::NoRecordSet)
    }

    fn loaded_mut(&mut self) -> SessionResult<&mut LoadedSet> {
        self.loaded.as_mut().ok_or(SessionError::NoRecordSet)
    }
}
