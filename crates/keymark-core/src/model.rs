//! Shared data model: question ids, option sets and ordered question maps

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Opaque question identifier as printed in the documents.
///
/// Ordering is plain string ordering and is only meant for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QuestionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for QuestionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Set of option tokens (e.g. `{"1", "3"}`), iterated in sorted order
pub type OptionSet = BTreeSet<String>;

/// Build an option set from string slices
pub fn option_set<I, S>(options: I) -> OptionSet
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    options.into_iter().map(Into::into).collect()
}

/// Render an option set the way reports show it: sorted, `", "`-joined
pub fn join_options(options: &OptionSet) -> String {
    options
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Map from question id to option set that remembers first-insertion order.
///
/// Keys keep the position where they were first inserted, so iteration follows
/// document order even when a later entry replaces an earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionMap {
    entries: Vec<(QuestionId, OptionSet)>,
    index: HashMap<QuestionId, usize>,
}

impl QuestionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the options for `id`
    pub fn insert(&mut self, id: QuestionId, options: OptionSet) {
        match self.index.get(&id) {
            Some(&pos) => self.entries[pos].1 = options,
            None => {
                self.index.insert(id.clone(), self.entries.len());
                self.entries.push((id, options));
            }
        }
    }

    /// Options for `id`, inserting an empty set first if it is missing
    pub fn entry_or_default(&mut self, id: QuestionId) -> &mut OptionSet {
        let pos = match self.index.get(&id) {
            Some(&pos) => pos,
            None => {
                let pos = self.entries.len();
                self.index.insert(id.clone(), pos);
                self.entries.push((id, OptionSet::new()));
                pos
            }
        };
        &mut self.entries[pos].1
    }

    pub fn get(&self, id: &QuestionId) -> Option<&OptionSet> {
        self.index.get(id).map(|&pos| &self.entries[pos].1)
    }

    pub fn contains(&self, id: &QuestionId) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, &OptionSet)> {
        self.entries.iter().map(|(id, options)| (id, options))
    }
}

impl<Q: Into<QuestionId>> FromIterator<(Q, OptionSet)> for QuestionMap {
    fn from_iter<T: IntoIterator<Item = (Q, OptionSet)>>(iter: T) -> Self {
        let mut map = QuestionMap::new();
        for (id, options) in iter {
            map.insert(id.into(), options);
        }
        map
    }
}

impl Serialize for QuestionMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, options) in &self.entries {
            map.serialize_entry(id, options)?;
        }
        map.end()
    }
}

/// Chosen options per question, extracted from a response sheet
pub type ResponseMap = QuestionMap;

/// Highlighted (correct) options per question, extracted from an answer key
pub type AnswerKeyMap = QuestionMap;

/// Questions whose key grants full marks for any correct option
pub type AmbiguousSet = BTreeSet<QuestionId>;
