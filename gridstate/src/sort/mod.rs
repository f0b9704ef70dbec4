//! Sort engine: ordered multi-key sorting with stable tie-breaks.

use std::cmp::Ordering as CmpOrdering;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use crate::row::Row;

/// A per-field comparator: `(row_a, row_b) -> ordering`.
///
/// A registered comparator's result is used as-is; the key's direction does
/// not flip it. Callers that want a descending custom order encode it in the
/// comparator itself.
pub type SortFn<T> = Box<dyn Fn(&T, &T) -> CmpOrdering + Send + Sync>;

/// Table of registered per-field comparators.
pub type SortFns<T> = HashMap<String, SortFn<T>>;

/// Sort direction for a single key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Smaller values first.
    Asc,
    /// Larger values first.
    Desc,
}

/// One entry of the sort specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortKey {
    /// Field the key sorts by.
    pub field: String,
    /// Direction for this key.
    pub dir: Direction,
}

impl SortKey {
    /// Create a sort key.
    pub fn new(field: impl Into<String>, dir: Direction) -> Self {
        Self {
            field: field.into(),
            dir,
        }
    }
}

/// Derive a stably sorted copy of `rows`.
///
/// With `keys` absent or empty the input passes through untouched. Otherwise
/// the keys are chained in sequence order: the first key is the primary sort,
/// later keys break ties. Rows equal under every key keep their input order
/// (the sort is stable).
///
/// Per key, a registered comparator for the field is authoritative and its
/// result is not flipped by the direction; the fallback compares the field
/// values and orients the result by the direction. Incomparable values tie.
pub fn sorted_rows<T: Row>(
    rows: &[T],
    keys: Option<&[SortKey]>,
    comparators: &SortFns<T>,
) -> Vec<T> {
    let Some(keys) = keys else {
        return rows.to_vec();
    };
    if keys.is_empty() {
        return rows.to_vec();
    }
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| compare_rows(a, b, keys, comparators));
    sorted
}

fn compare_rows<T: Row>(a: &T, b: &T, keys: &[SortKey], comparators: &SortFns<T>) -> CmpOrdering {
    for key in keys {
        let ord = match comparators.get(&key.field) {
            Some(compare) => compare(a, b),
            None => {
                let (va, vb) = (a.field(&key.field), b.field(&key.field));
                match va.compare(&vb) {
                    Some(ord) if key.dir == Direction::Desc => ord.reverse(),
                    Some(ord) => ord,
                    None => CmpOrdering::Equal,
                }
            }
        };
        if ord != CmpOrdering::Equal {
            return ord;
        }
    }
    CmpOrdering::Equal
}

struct SortInner<T> {
    keys: Vec<SortKey>,
    comparators: SortFns<T>,
    version: u64,
}

/// Sort state container.
///
/// Owns an ordered sequence of `(field, direction)` keys and derives a
/// stably sorted copy of a row collection. Cheap to clone; clones share the
/// same state.
///
/// Setting a field that is already sorted moves it to the end of the
/// sequence, i.e. to lowest tie-break priority.
pub struct Sort<T: Row> {
    inner: Arc<RwLock<SortInner<T>>>,
    dirty: Arc<AtomicBool>,
}

impl<T: Row> Sort<T> {
    /// Create an unsorted state with no custom comparators.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(SortInner {
                keys: Vec::new(),
                comparators: SortFns::new(),
                version: 0,
            })),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Seed the sort with an initial key sequence.
    pub fn with_keys(self, keys: Vec<SortKey>) -> Self {
        if let Ok(mut guard) = self.inner.write() {
            guard.keys = keys;
            guard.version += 1;
        }
        self
    }

    /// Register a custom comparator for `field`.
    ///
    /// The comparator replaces the default value comparison; its result is
    /// used as-is regardless of the key's direction.
    pub fn with_comparator(
        self,
        field: impl Into<String>,
        f: impl Fn(&T, &T) -> CmpOrdering + Send + Sync + 'static,
    ) -> Self {
        self.add_comparator(field, f);
        self
    }

    pub(crate) fn add_comparator(
        &self,
        field: impl Into<String>,
        f: impl Fn(&T, &T) -> CmpOrdering + Send + Sync + 'static,
    ) {
        if let Ok(mut guard) = self.inner.write() {
            guard.comparators.insert(field.into(), Box::new(f));
            guard.version += 1;
        }
    }

    /// Sort by `field` in the given direction.
    ///
    /// Any existing key for the field is removed first, and the new key is
    /// appended at the end of the sequence.
    pub fn set(&self, field: impl Into<String>, dir: Direction) {
        let field = field.into();
        if let Ok(mut guard) = self.inner.write() {
            guard.keys.retain(|key| key.field != field);
            guard.keys.push(SortKey { field, dir });
            guard.version += 1;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Stop sorting by `field`.
    pub fn clear(&self, field: &str) {
        if let Ok(mut guard) = self.inner.write() {
            guard.keys.retain(|key| key.field != field);
            guard.version += 1;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Toggle the sort on `field`.
    ///
    /// An unsorted field is appended ascending; a sorted field flips its
    /// direction in place, keeping its tie-break priority.
    pub fn toggle(&self, field: impl Into<String>) -> Direction {
        let field = field.into();
        let mut dir = Direction::Asc;
        if let Ok(mut guard) = self.inner.write() {
            match guard.keys.iter().position(|key| key.field == field) {
                Some(pos) => {
                    dir = match guard.keys[pos].dir {
                        Direction::Asc => Direction::Desc,
                        Direction::Desc => Direction::Asc,
                    };
                    guard.keys[pos].dir = dir;
                }
                None => guard.keys.push(SortKey { field, dir }),
            }
            guard.version += 1;
            self.dirty.store(true, Ordering::SeqCst);
        }
        dir
    }

    /// Snapshot of the key sequence, in tie-break priority order.
    pub fn state(&self) -> Vec<SortKey> {
        self.inner
            .read()
            .map(|g| g.keys.clone())
            .unwrap_or_default()
    }

    /// The direction currently set for `field`, if it is sorted.
    pub fn direction(&self, field: &str) -> Option<Direction> {
        self.inner.read().ok().and_then(|g| {
            g.keys
                .iter()
                .find(|key| key.field == field)
                .map(|key| key.dir)
        })
    }

    /// Per-field direction projection of the key sequence.
    pub fn directions(&self) -> BTreeMap<String, Direction> {
        self.inner
            .read()
            .map(|g| {
                g.keys
                    .iter()
                    .map(|key| (key.field.clone(), key.dir))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Monotonic mutation counter.
    pub fn version(&self) -> u64 {
        self.inner.read().map(|g| g.version).unwrap_or(0)
    }

    /// Derive a stably sorted copy of `rows` under the current keys.
    pub fn apply(&self, rows: &[T]) -> Vec<T> {
        match self.inner.read() {
            Ok(guard) => sorted_rows(rows, Some(&guard.keys), &guard.comparators),
            Err(_) => rows.to_vec(),
        }
    }

    /// Check if the keys changed since last check.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

impl<T: Row> Clone for Sort<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

impl<T: Row> Default for Sort<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Row> fmt::Debug for Sort<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sort")
            .field("keys", &self.state())
            .field("version", &self.version())
            .finish()
    }
}
