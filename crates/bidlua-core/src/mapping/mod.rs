//! Ordered substitution tables.
//!
//! A `Mapping` is a list of unique `key → value` pairs. Before it reaches the
//! scanner it is sorted by descending key length, so a longer key is always
//! tried before any key that is one of its prefixes. `MapBuilder` merges the
//! built-in names, an optional external map file and inline `#add`
//! directives into one such table.

mod builder;
#[cfg(test)]
mod tests;

pub use builder::{
    extract_inline_directives, parse_map_entries, BuiltMapping, ExternalMap, MapBuildError,
    MapBuilder,
};

use std::collections::HashMap;
use std::path::Path;

use crate::unicode::text_len;

/// Which way the mapping is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Dialect source → target script (`key → value`).
    Forward,
    /// Target script → dialect source (`value → key`).
    Reverse,
}

impl Direction {
    pub const DIALECT_EXTENSION: &'static str = "blya";
    pub const TARGET_EXTENSION: &'static str = "lua";

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            Self::DIALECT_EXTENSION => Some(Direction::Forward),
            Self::TARGET_EXTENSION => Some(Direction::Reverse),
            _ => None,
        }
    }

    /// Derive the direction from the kind of the *input* file.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    pub fn reversed(self) -> Self {
        match self {
            Direction::Forward => Direction::Reverse,
            Direction::Reverse => Direction::Forward,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapEntry {
    pub key: String,
    pub value: String,
    /// Write order: bumped on every insert or overwrite.
    rank: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mapping {
    entries: Vec<MapEntry>,
    /// key → position in `entries`; rebuilt after every reorder.
    index: HashMap<String, usize>,
    next_rank: u64,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite. An existing key keeps its position and gets the
    /// new value; the previous value is returned.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        let rank = self.next_rank;
        self.next_rank += 1;
        if let Some(&pos) = self.index.get(&key) {
            let entry = &mut self.entries[pos];
            entry.rank = rank;
            return Some(std::mem::replace(&mut entry.value, value));
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push(MapEntry { key, value, rank });
        None
    }

    /// Overlay `other` on top of `self`: entries of `other` win on collision,
    /// for keys and for shared values alike.
    pub fn merge(&mut self, other: &Mapping) {
        let mut incoming: Vec<&MapEntry> = other.entries.iter().collect();
        incoming.sort_by_key(|e| e.rank);
        for entry in incoming {
            self.insert(entry.key.as_str(), entry.value.as_str());
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.index
            .get(key)
            .map(|&pos| self.entries[pos].value.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|e| (e.key.as_str(), e.value.as_str()))
    }

    pub fn entries(&self) -> &[MapEntry] {
        &self.entries
    }

    /// Stable sort by descending key length. Equal-length keys keep their
    /// insertion order, so sorting twice is a no-op.
    pub fn sort_by_key_len(&mut self) {
        self.entries
            .sort_by_key(|e| std::cmp::Reverse(text_len(&e.key)));
        self.reindex();
    }

    pub fn is_sorted_by_key_len(&self) -> bool {
        self.entries
            .windows(2)
            .all(|w| text_len(&w[0].key) >= text_len(&w[1].key))
    }

    /// `(pattern, replacement)` pairs in the order the scanner must try them.
    ///
    /// Forward matches keys, Reverse matches values. Either way the list is
    /// ordered by descending pattern length; ties keep mapping order. Empty
    /// patterns are dropped since they would match everywhere.
    ///
    /// When several keys share a value, Reverse keeps only the most recently
    /// written one, so a later layer wins in both directions.
    pub fn patterns(&self, direction: Direction) -> Vec<(&str, &str)> {
        let mut pairs: Vec<(&str, &str)> = match direction {
            Direction::Forward => self.iter().collect(),
            Direction::Reverse => {
                let mut latest: HashMap<&str, u64> = HashMap::new();
                for e in &self.entries {
                    let rank = latest.entry(e.value.as_str()).or_insert(e.rank);
                    *rank = (*rank).max(e.rank);
                }
                self.entries
                    .iter()
                    .filter(|e| latest.get(e.value.as_str()) == Some(&e.rank))
                    .map(|e| (e.value.as_str(), e.key.as_str()))
                    .collect()
            }
        };
        pairs.retain(|(pattern, _)| !pattern.is_empty());
        pairs.sort_by_key(|(pattern, _)| std::cmp::Reverse(text_len(pattern)));
        pairs
    }

    fn reindex(&mut self) {
        self.index.clear();
        for (pos, entry) in self.entries.iter().enumerate() {
            self.index.insert(entry.key.clone(), pos);
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mapping = Mapping::new();
        for (k, v) in iter {
            mapping.insert(k, v);
        }
        mapping
    }
}
