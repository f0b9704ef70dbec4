//! Form values state.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use crate::value::Value;

#[derive(Debug, Default)]
struct FormInner {
    values: BTreeMap<String, Value>,
    initial: BTreeMap<String, Value>,
}

/// Named form values with reset-to-initial semantics.
///
/// A `Form` holds the working copy of a set of named [`Value`]s next to the
/// baseline it was created (or last re-seeded) from. Field edits merge into
/// the working copy; `reset` throws the edits away. Cheap to clone; clones
/// share the same state.
#[derive(Debug, Default)]
pub struct Form {
    inner: Arc<RwLock<FormInner>>,
    dirty: Arc<AtomicBool>,
}

impl Form {
    /// Create an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a form seeded with initial values.
    pub fn with_values<K, V>(values: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let initial: BTreeMap<String, Value> = values
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            inner: Arc::new(RwLock::new(FormInner {
                values: initial.clone(),
                initial,
            })),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Set a single field, replacing any existing value.
    pub fn set(&self, name: impl Into<String>, value: impl Into<Value>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.values.insert(name.into(), value.into());
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// The current value of a field, if set.
    pub fn value(&self, name: &str) -> Option<Value> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.values.get(name).cloned())
    }

    /// Snapshot of all current values.
    pub fn values(&self) -> BTreeMap<String, Value> {
        self.inner
            .read()
            .map(|g| g.values.clone())
            .unwrap_or_default()
    }

    /// Throw away edits and restore the initial values.
    pub fn reset(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.values = guard.initial.clone();
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Replace the baseline and reset the working copy to it.
    pub fn set_initial<K, V>(&self, values: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<Value>,
    {
        if let Ok(mut guard) = self.inner.write() {
            guard.initial = values
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect();
            guard.values = guard.initial.clone();
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Check if the working copy differs from the baseline.
    pub fn is_modified(&self) -> bool {
        self.inner
            .read()
            .map(|g| g.values != g.initial)
            .unwrap_or(false)
    }

    /// Check if the form changed since last check.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

impl Clone for Form {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
        }
    }
}
