use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Human verification outcome for one image record.
///
/// The stored form of a record's label is `Option<Label>`; `None` means the
/// record has not been reviewed yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Label {
    True,
    False,
    Ambiguous,
}

/// Choices offered by the edit control, in display order.
pub const LABEL_OPTIONS: [Label; 3] = [Label::True, Label::False, Label::Ambiguous];

impl Label {
    /// Returns the wire/display spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::True => "True",
            Label::False => "False",
            Label::Ambiguous => "Ambiguous",
        }
    }

    /// Position of this label in [`LABEL_OPTIONS`].
    pub fn option_index(&self) -> usize {
        match self {
            Label::True => 0,
            Label::False => 1,
            Label::Ambiguous => 2,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown label '{value}': expected True, False or Ambiguous")]
pub struct ParseLabelError {
    pub value: String,
}

impl FromStr for Label {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "True" => Ok(Label::True),
            "False" => Ok(Label::False),
            "Ambiguous" => Ok(Label::Ambiguous),
            other => Err(ParseLabelError {
                value: other.to_string(),
            }),
        }
    }
}
