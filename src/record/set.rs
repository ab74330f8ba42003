use std::collections::{BTreeSet, HashMap};
use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::ImageRecord;

/// Records grouped under one caption.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionGroup {
    pub caption: String,
    pub records: Vec<ImageRecord>,
}

/// Caption-keyed record set. Caption order is insertion order and is kept
/// through serialization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    groups: Vec<CaptionGroup>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of captions.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of records across all captions.
    pub fn record_count(&self) -> usize {
        self.groups.iter().map(|g| g.records.len()).sum()
    }

    /// Captions in insertion order.
    pub fn captions(&self) -> impl Iterator<Item = &str> + '_ {
        self.groups.iter().map(|g| g.caption.as_str())
    }

    pub fn contains_caption(&self, caption: &str) -> bool {
        self.group(caption).is_some()
    }

    /// Returns the records stored under `caption`.
    pub fn get(&self, caption: &str) -> Option<&[ImageRecord]> {
        self.group(caption).map(|g| g.records.as_slice())
    }

    pub fn get_mut(&mut self, caption: &str) -> Option<&mut Vec<ImageRecord>> {
        self.groups
            .iter_mut()
            .find(|g| g.caption == caption)
            .map(|g| &mut g.records)
    }

    /// Inserts or replaces the records for `caption`. A new caption is
    /// appended; an existing one keeps its position. Returns the previous records.
    pub fn insert(
        &mut self,
        caption: impl Into<String>,
        records: Vec<ImageRecord>,
    ) -> Option<Vec<ImageRecord>> {
        let caption = caption.into();
        match self.get_mut(&caption) {
            Some(existing) => Some(std::mem::replace(existing, records)),
            None => {
                self.groups.push(CaptionGroup { caption, records });
                None
            }
        }
    }

    pub fn groups(&self) -> &[CaptionGroup] {
        &self.groups
    }

    /// Iterates every record with its caption, captions in order.
    pub fn records(&self) -> impl Iterator<Item = (&str, &ImageRecord)> + '_ {
        self.groups
            .iter()
            .flat_map(|g| g.records.iter().map(move |r| (g.caption.as_str(), r)))
    }

    /// Paths that occur more than once anywhere in the set, sorted.
    ///
    /// Label merges look records up by path within a single caption, so a path
    /// shared between captions resolves independently under each of them.
    pub fn duplicate_paths(&self) -> Vec<String> {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        for (_, record) in self.records() {
            *seen.entry(record.path.as_str()).or_default() += 1;
        }
        seen.into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(path, _)| path.to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    fn group(&self, caption: &str) -> Option<&CaptionGroup> {
        self.groups.iter().find(|g| g.caption == caption)
    }
}

impl FromIterator<(String, Vec<ImageRecord>)> for RecordSet {
    fn from_iter<T: IntoIterator<Item = (String, Vec<ImageRecord>)>>(iter: T) -> Self {
        let mut set = RecordSet::new();
        for (caption, records) in iter {
            set.insert(caption, records);
        }
        set
    }
}

impl Serialize for RecordSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for group in &self.groups {
            map.serialize_entry(&group.caption, &group.records)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RecordSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RecordSetVisitor)
    }
}

struct RecordSetVisitor;

impl<'de> Visitor<'de> for RecordSetVisitor {
    type Value = RecordSet;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map from caption to a list of image records")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut set = RecordSet::new();
        while let Some(caption) = access.next_key::<String>()? {
            let records: Vec<ImageRecord> = access.next_value()?;
            if set.contains_caption(&caption) {
                return Err(de::Error::custom(format!(
                    "duplicate caption '{}'",
                    caption
                )));
            }
            set.groups.push(CaptionGroup { caption, records });
        }
        Ok(set)
    }
}
