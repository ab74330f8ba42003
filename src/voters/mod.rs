//! Voter index: the distinct voter identifiers present in a record set.

use std::collections::BTreeSet;

use crate::record::RecordSet;

/// Returns every voter appearing in `set`, deduplicated and sorted.
pub fn extract_voters(set: &RecordSet) -> Vec<String> {
    set.records()
        .flat_map(|(_, record)| record.votes.iter())
        .map(String::as_str)
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
