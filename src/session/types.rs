use tracing::warn;

use crate::merge::PendingEdits;
use crate::record::Label;

/// One record as handed to the rendering surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageItem {
    /// Position in the filtered sequence (zero-based, across pages).
    pub index: usize,
    pub path: String,
    pub votes: Vec<String>,
    /// Stored label, or the default suggestion when unreviewed.
    pub label: Label,
    /// `true` if `label` was set by a reviewer.
    pub explicit: bool,
}

/// A rendered page of the current caption's filtered records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub caption: String,
    /// One-based page number, already clamped.
    pub number: usize,
    pub total_pages: usize,
    /// Number of records matching the filter.
    pub total_items: usize,
    pub items: Vec<PageItem>,
}

impl PageView {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    /// Items grouped into rows of `width` (the last row may be shorter).
    pub fn rows(&self, width: usize) -> impl Iterator<Item = &[PageItem]> + '_ {
        self.items.chunks(width.max(1))
    }

    /// The labels as currently shown for every item on the page.
    pub fn shown_labels(&self) -> PendingEdits {
        self.items
            .iter()
            .map(|item| (item.path.clone(), item.label))
            .collect()
    }

    /// Converts page-local choices (position on this page, label) into edits
    /// keyed by path. Positions past the end of the page are ignored.
    pub fn edits_from_positions<I>(&self, choices: I) -> PendingEdits
    where
        I: IntoIterator<Item = (usize, Label)>,
    {
        choices
            .into_iter()
            .filter_map(|(position, label)| match self.items.get(position) {
                Some(item) => Some((item.path.clone(), label)),
                None => {
                    warn!(position, page = self.number, "Ignoring choice outside the page");
                    None
                }
            })
            .collect()
    }
}
