//! Hash-based column index.
//!
//! Baseline implementation of spec.md §4.3: a `value → set<base_RID>`
//! mapping. The primary-key index additionally enforces uniqueness — it
//! is represented as the same structure with insert rejecting a second
//! RID for a value already present (see [`HashIndex::insert_unique`]).

use std::collections::{HashMap, HashSet};

use crate::common::Rid;

/// A secondary (non-unique) index over one column.
#[derive(Debug, Default)]
pub struct HashIndex {
    map: HashMap<i64, HashSet<Rid>>,
}

impl HashIndex {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn insert(&mut self, value: i64, rid: Rid) {
        self.map.entry(value).or_default().insert(rid);
    }

    pub fn remove(&mut self, value: i64, rid: Rid) {
        if let Some(set) = self.map.get_mut(&value) {
            set.remove(&rid);
            if set.is_empty() {
                self.map.remove(&value);
            }
        }
    }

    /// Move a RID from `old_value` to `new_value` (spec.md §4.3
    /// `update_entry`).
    pub fn update_entry(&mut self, old_value: i64, new_value: i64, rid: Rid) {
        self.remove(old_value, rid);
        self.insert(new_value, rid);
    }

    pub fn locate(&self, value: i64) -> HashSet<Rid> {
        self.map.get(&value).cloned().unwrap_or_default()
    }

    /// Linear scan over entries whose key falls in `[lo, hi]`. A
    /// B+-tree-backed index (out of scope per spec.md §1) would make
    /// this an ordered-structure range lookup instead.
    pub fn locate_range(&self, lo: i64, hi: i64) -> HashSet<Rid> {
        let mut out = HashSet::new();
        for (&value, rids) in &self.map {
            if value >= lo && value <= hi {
                out.extend(rids.iter().copied());
            }
        }
        out
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }
}

/// The primary-key index: a bijection between live base RIDs and their
/// key values (I3). Insert rejects a duplicate key.
#[derive(Debug, Default)]
pub struct PrimaryIndex {
    map: HashMap<i64, Rid>,
}

impl PrimaryIndex {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn contains(&self, value: i64) -> bool {
        self.map.contains_key(&value)
    }

    /// Insert a new key/RID pair.
    ///
    /// Returns `false` without mutating state if `value` is already
    /// present — callers translate that into `Error::DuplicateKey`.
    pub fn insert_unique(&mut self, value: i64, rid: Rid) -> bool {
        if self.map.contains_key(&value) {
            return false;
        }
        self.map.insert(value, rid);
        true
    }

    pub fn remove(&mut self, value: i64) {
        self.map.remove(&value);
    }

    pub fn locate(&self, value: i64) -> Option<Rid> {
        self.map.get(&value).copied()
    }

    /// All (key, rid) pairs with `key` in `[lo, hi]`, for `sum` range
    /// scans. Unordered, since the underlying map is a hash map.
    pub fn locate_range(&self, lo: i64, hi: i64) -> Vec<(i64, Rid)> {
        self.map
            .iter()
            .filter(|(&k, _)| k >= lo && k <= hi)
            .map(|(&k, &rid)| (k, rid))
            .collect()
    }
}
