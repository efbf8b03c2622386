//! Insertion-ordered counters

use rustc_hash::FxHashMap;

/// Integer counters keyed by an opaque id, iterated in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct OrderedTotals {
    entries: Vec<(String, u64)>,
    index: FxHashMap<String, usize>,
}

impl OrderedTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bump the counter for `key`, starting it at 1. Returns the new count.
    pub fn increment(&mut self, key: &str) -> u64 {
        if let Some(&slot) = self.index.get(key) {
            let entry = &mut self.entries[slot];
            entry.1 += 1;
            return entry.1;
        }

        self.index.insert(key.to_owned(), self.entries.len());
        self.entries.push((key.to_owned(), 1));
        1
    }

    pub fn get(&self, key: &str) -> Option<u64> {
        self.index.get(key).map(|&slot| self.entries[slot].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.entries
            .iter()
            .map(|(key, count)| (key.as_str(), *count))
    }
}
