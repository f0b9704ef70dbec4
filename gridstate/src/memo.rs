//! Single-slot derivation cache.

/// A one-entry cache for a derived value, keyed by an identity stamp.
///
/// Derivations in this crate are memoized per stage: a stage recomputes only
/// when the versions of its inputs change. `Memo` holds the last key/value
/// pair; a lookup with the same key returns the cached value, a lookup with
/// any other key recomputes and replaces the slot.
///
/// Version stamps stand in for the reference-identity checks a garbage
/// collected runtime would use: every mutation of a state container bumps a
/// monotonic counter, and the cache key is the tuple of counters the stage
/// depends on.
#[derive(Debug)]
pub struct Memo<K, V> {
    slot: Option<(K, V)>,
}

impl<K, V> Memo<K, V> {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self { slot: None }
    }

    /// Drop the cached entry.
    pub fn invalidate(&mut self) {
        self.slot = None;
    }
}

impl<K: PartialEq, V> Memo<K, V> {
    /// Return the cached value for `key`, computing and storing it on miss.
    pub fn get_or_compute(&mut self, key: K, compute: impl FnOnce() -> V) -> &V {
        if !matches!(&self.slot, Some((k, _)) if *k == key) {
            self.slot = Some((key, compute()));
        }
        match &self.slot {
            Some((_, value)) => value,
            // the slot is filled right above on every path
            None => unreachable!(),
        }
    }

    /// Peek at the cached value for `key` without computing.
    pub fn get(&self, key: &K) -> Option<&V> {
        match &self.slot {
            Some((k, value)) if k == key => Some(value),
            _ => None,
        }
    }
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
