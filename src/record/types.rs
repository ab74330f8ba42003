use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Label;

/// One image under a caption, with the voters that selected it and its human label.
///
/// On the wire the path is stored under `img_path` and the label under
/// `human_annotation`; `path` and `label` are accepted when reading. Any other
/// keys on the object are kept in `extra` and written back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Identity key of the record within its record set.
    #[serde(rename = "img_path", alias = "path")]
    pub path: String,

    /// Voter identifiers, in stored order.
    #[serde(default)]
    pub votes: Vec<String>,

    /// Explicit label, `None` when unreviewed. Always written, as `null` when unset.
    #[serde(rename = "human_annotation", alias = "label", default)]
    pub label: Option<Label>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ImageRecord {
    /// Creates an unreviewed record with no votes.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            votes: Vec::new(),
            label: None,
            extra: Map::new(),
        }
    }

    pub fn with_votes<I, V>(mut self, votes: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.votes = votes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_label(mut self, label: Label) -> Self {
        self.label = Some(label);
        self
    }

    /// Number of voters recorded for this image.
    pub fn vote_count(&self) -> usize {
        self.votes.len()
    }

    /// Returns `true` if `voter` appears among the votes.
    pub fn has_vote_from(&self, voter: &str) -> bool {
        self.votes.iter().any(|v| v == voter)
    }

    pub fn is_reviewed(&self) -> bool {
        self.label.is_some()
    }
}
