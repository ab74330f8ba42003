//! Filter engine: narrows a caption's records by voter and by vote count.
//!
//! Both criteria are OR within themselves and AND with each other. An empty
//! criterion does not restrict.


use std::collections::BTreeSet;

use crate::record::ImageRecord;

/// Voter and vote-count selections; empty sets mean "no restriction".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub voters: BTreeSet<String>,
    pub vote_counts: BTreeSet<usize>,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_voters<I, V>(mut self, voters: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.voters = voters.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_vote_counts<I: IntoIterator<Item = usize>>(mut self, counts: I) -> Self {
        self.vote_counts = counts.into_iter().collect();
        self
    }

    /// Returns `true` when neither criterion restricts anything.
    pub fn is_unrestricted(&self) -> bool {
        self.voters.is_empty() && self.vote_counts.is_empty()
    }

    /// Passes if no voter is selected or any selected voter voted for `record`.
    pub fn matches_voters(&self, record: &ImageRecord) -> bool {
        matches_voters(&self.voters, record)
    }

    /// Passes if no count is selected or the record's vote count is selected.
    pub fn matches_vote_count(&self, record: &ImageRecord) -> bool {
        self.vote_counts.is_empty() || self.vote_counts.contains(&record.vote_count())
    }

    pub fn matches(&self, record: &ImageRecord) -> bool {
        self.matches_voters(record) && self.matches_vote_count(record)
    }

    /// Drops selected vote counts that are not in `options`. Returns `true` if
    /// anything was dropped.
    pub fn retain_available(&mut self, options: &[usize]) -> bool {
        let before = self.vote_counts.len();
        self.vote_counts.retain(|count| options.contains(count));
        self.vote_counts.len() != before
    }
}

fn matches_voters(voters: &BTreeSet<String>, record: &ImageRecord) -> bool {
    voters.is_empty() || record.votes.iter().any(|v| voters.contains(v))
}

/// Order-preserving subsequence of `records` matching `selection`.
pub fn filter<'a, I>(records: I, selection: &FilterSelection) -> Vec<&'a ImageRecord>
where
    I: IntoIterator<Item = &'a ImageRecord>,
{
    records
        .into_iter()
        .filter(|record| selection.matches(record))
        .collect()
}

/// Vote counts worth offering once `voters` is applied, ascending.
///
/// Options come from the voter-filtered records only, so selecting a voter can
/// remove counts that were valid before. Records without any vote contribute
/// no option.
pub fn vote_count_options<'a, I>(records: I, voters: &BTreeSet<String>) -> Vec<usize>
where
    I: IntoIterator<Item = &'a ImageRecord>,
{
    records
        .into_iter()
        .filter(|record| matches_voters(voters, record))
        .map(ImageRecord::vote_count)
        .filter(|count| *count > 0)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
