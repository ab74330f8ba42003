//! Default label policy for unreviewed records.
//!
//! The suggestion is display-only: it preselects a choice in the edit control
//! and is never written into a record's stored label.

use crate::constants::{AMBIGUOUS_VOTE_COUNT, TRUE_VOTE_THRESHOLD};
use crate::record::{ImageRecord, Label};

/// Suggests a label from the number of voters that picked the image.
pub fn default_label(vote_count: usize) -> Label {
    if vote_count >= TRUE_VOTE_THRESHOLD {
        Label::True
    } else if vote_count == AMBIGUOUS_VOTE_COUNT {
        Label::Ambiguous
    } else {
        Label::False
    }
}

/// Label to preselect for a record, and whether it was set by a reviewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayedLabel {
    pub label: Label,
    pub explicit: bool,
}

/// The stored label when present, otherwise the policy suggestion.
pub fn displayed_label(record: &ImageRecord) -> DisplayedLabel {
    match record.label {
        Some(label) => DisplayedLabel {
            label,
            explicit: true,
        },
        None => DisplayedLabel {
            label: default_label(record.vote_count()),
            explicit: false,
        },
    }
}
