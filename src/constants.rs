//! Shared defaults for the review engine.
//!
//! Runtime overrides live in [`crate::config::Config`]; these are the values it
//! falls back to.

/// Directory scanned for record sets when `REVIEW_ANNOTATIONS_DIR` is unset.
pub const DEFAULT_ANNOTATIONS_DIR: &str = "annotations";

/// Number of records shown per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Number of records rendered side by side in one row of a page.
pub const DEFAULT_ROW_WIDTH: usize = 3;

/// File extension (without the dot) that marks a record set on disk.
pub const DEFAULT_EXTENSION: &str = "json";

/// Suffix appended to a record set's file name while it is being rewritten.
pub const TEMP_SUFFIX: &str = "tmp";

/// Vote count at or above which an unreviewed record is suggested as `True`.
pub const TRUE_VOTE_THRESHOLD: usize = 3;

/// Vote count at which an unreviewed record is suggested as `Ambiguous`.
pub const AMBIGUOUS_VOTE_COUNT: usize = 2;
