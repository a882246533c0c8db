//! Generic time-series container.
//!
//! `TimeSeries<K, V>` is an ordered map from a time key to a value. Feature
//! columns, grid rows, and the spot trajectory are all keyed this way so that
//! horizontal concatenation and as-of lookups work on sorted keys.

use std::collections::BTreeMap;

/// A generic time-indexed container backed by a `BTreeMap`.
///
/// Missing keys simply return `None`; there is no null sentinel.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries<K: Ord + Clone, V: Clone> {
    data: BTreeMap<K, V>,
}

impl<K: Ord + Clone, V: Clone> Default for TimeSeries<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Clone, V: Clone> std::iter::FromIterator<(K, V)> for TimeSeries<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

impl<K: Ord + Clone, V: Clone> TimeSeries<K, V> {
    // ── Constructors ─────────────────────────────────────────────────────

    /// Create an empty time series.
    pub fn new() -> Self {
        Self {
            data: BTreeMap::new(),
        }
    }

    /// Build from an iterator of `(K, V)` pairs. Later duplicates overwrite
    /// earlier ones.
    pub fn from_pairs(iter: impl IntoIterator<Item = (K, V)>) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }

    // ── Inspectors ───────────────────────────────────────────────────────

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the series is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    // ── Element access ───────────────────────────────────────────────────

    /// Look up a value by key.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.data.get(key)
    }

    /// The entry with the greatest key `<= key` (backward as-of lookup).
    pub fn asof(&self, key: &K) -> Option<(&K, &V)> {
        self.data.range(..=key.clone()).next_back()
    }

    /// Insert or overwrite a value, returning the previous one.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.data.insert(key, value)
    }

    // ── Bulk access ──────────────────────────────────────────────────────

    /// All keys in ascending order.
    pub fn keys(&self) -> Vec<K> {
        self.data.keys().cloned().collect()
    }

    /// All values in key-ascending order.
    pub fn values(&self) -> Vec<V> {
        self.data.values().cloned().collect()
    }

    /// Iterate over `(&K, &V)` in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.data.iter()
    }
}

impl<K: Ord + Clone, V: Clone> std::ops::Index<&K> for TimeSeries<K, V> {
    type Output = V;

    fn index(&self, key: &K) -> &V {
        &self.data[key]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
