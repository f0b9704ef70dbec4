//! Filter engine: per-field criteria over in-memory rows.

pub mod text;

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use crate::row::Row;
use crate::value::Value;

/// A per-field filter predicate: `(row, criterion) -> passes`.
///
/// Registered matchers are only called for non-empty criteria; an empty
/// criterion never constrains its field.
pub type FilterFn<T> = Box<dyn Fn(&T, &Value) -> bool + Send + Sync>;

/// Table of registered per-field matchers.
pub type FilterFns<T> = HashMap<String, FilterFn<T>>;

/// Sparse per-field criteria, in insertion order.
///
/// At most one entry exists per field; re-setting a field replaces its
/// criterion in place. An absent entry and an empty criterion are
/// equivalent: neither constrains the field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    entries: Vec<(String, Value)>,
}

impl FilterState {
    /// Create an empty criteria set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a criterion for `field`, replacing any existing entry.
    pub fn set(&mut self, field: impl Into<String>, value: Value) {
        let field = field.into();
        match self.entries.iter().position(|(f, _)| *f == field) {
            Some(pos) => self.entries[pos].1 = value,
            None => self.entries.push((field, value)),
        }
    }

    /// Get the criterion for `field`, if one was set.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, v)| v)
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> &[(String, Value)] {
        &self.entries
    }

    /// Number of entries (including vacuous ones).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no entry was ever set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Derive the filtered subset of `rows`.
///
/// With `criteria` absent the input passes through untouched (same elements,
/// same order). Otherwise every entry acts as an AND-combined predicate:
///
/// - an empty criterion (null, `""`, `[]`) is vacuously true;
/// - else a registered matcher for the field is authoritative;
/// - else the row field must equal the criterion exactly.
///
/// Evaluation short-circuits on the first failing field. A panicking matcher
/// propagates to the caller; no state is touched here.
pub fn filtered_rows<T: Row>(
    rows: &[T],
    criteria: Option<&FilterState>,
    matchers: &FilterFns<T>,
) -> Vec<T> {
    let Some(criteria) = criteria else {
        return rows.to_vec();
    };
    rows.iter()
        .filter(|row| row_passes(*row, criteria, matchers))
        .cloned()
        .collect()
}

fn row_passes<T: Row>(row: &T, criteria: &FilterState, matchers: &FilterFns<T>) -> bool {
    criteria.entries().iter().all(|(field, value)| {
        if value.is_empty() {
            return true;
        }
        match matchers.get(field) {
            Some(matcher) => matcher(row, value),
            None => row.field(field) == *value,
        }
    })
}

struct FilterInner<T> {
    state: FilterState,
    matchers: FilterFns<T>,
    version: u64,
}

/// Filter state container.
///
/// Owns a sparse set of per-field criteria and derives the matching subset
/// of a row collection. Cheap to clone; clones share the same state.
///
/// # Example
///
/// ```ignore
/// let filter = Filter::new()
///     .with_matcher("age", |row: &Person, min: &Value| {
///         row.field("age").compare(min) != Some(std::cmp::Ordering::Less)
///     });
///
/// filter.set("name", "Zola Ray");
/// let matching = filter.apply(&people);
/// ```
pub struct Filter<T: Row> {
    inner: Arc<RwLock<FilterInner<T>>>,
    dirty: Arc<AtomicBool>,
}

impl<T: Row> Filter<T> {
    /// Create a filter with no criteria and no custom matchers.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(FilterInner {
                state: FilterState::new(),
                matchers: FilterFns::new(),
                version: 0,
            })),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Seed the filter with initial criteria.
    pub fn with_state(self, state: FilterState) -> Self {
        if let Ok(mut guard) = self.inner.write() {
            guard.state = state;
            guard.version += 1;
        }
        self
    }

    /// Register a custom matcher for `field`.
    ///
    /// The matcher replaces the default equality check whenever the field's
    /// criterion is non-empty.
    pub fn with_matcher(
        self,
        field: impl Into<String>,
        f: impl Fn(&T, &Value) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.add_matcher(field, f);
        self
    }

    pub(crate) fn add_matcher(
        &self,
        field: impl Into<String>,
        f: impl Fn(&T, &Value) -> bool + Send + Sync + 'static,
    ) {
        if let Ok(mut guard) = self.inner.write() {
            guard.matchers.insert(field.into(), Box::new(f));
            guard.version += 1;
        }
    }

    /// Merge a criterion for `field`, replacing any existing entry.
    ///
    /// Passing [`Value::Null`] (or any empty value) lifts the constraint.
    pub fn set(&self, field: impl Into<String>, value: impl Into<Value>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.state.set(field, value.into());
            guard.version += 1;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Lift the constraint on `field`.
    pub fn clear(&self, field: impl Into<String>) {
        self.set(field, Value::Null);
    }

    /// Snapshot of the current criteria.
    pub fn state(&self) -> FilterState {
        self.inner
            .read()
            .map(|g| g.state.clone())
            .unwrap_or_default()
    }

    /// The criterion currently set for `field`.
    pub fn criterion(&self, field: &str) -> Option<Value> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.state.get(field).cloned())
    }

    /// Monotonic mutation counter.
    pub fn version(&self) -> u64 {
        self.inner.read().map(|g| g.version).unwrap_or(0)
    }

    /// Derive the subset of `rows` matching the current criteria.
    pub fn apply(&self, rows: &[T]) -> Vec<T> {
        match self.inner.read() {
            Ok(guard) => filtered_rows(rows, Some(&guard.state), &guard.matchers),
            Err(_) => rows.to_vec(),
        }
    }

    /// Check if the criteria changed since last check.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

impl<T: Row> Clone for Filter<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

impl<T: Row> Default for Filter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Row> fmt::Debug for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("state", &self.state())
            .field("version", &self.version())
            .finish()
    }
}
