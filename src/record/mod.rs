//! In-memory data model: labels, image records, and the caption-ordered record set.

pub mod label;
pub mod set;
pub mod types;


pub use label::{LABEL_OPTIONS, Label, ParseLabelError};
pub use set::{CaptionGroup, RecordSet};
pub use types::ImageRecord;
