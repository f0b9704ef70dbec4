//! Multi-select set state.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

#[derive(Debug, Default)]
struct SelectionInner {
    selected: HashSet<String>,
    anchor: Option<String>,
}

/// Id-based multi-select state.
///
/// Tracks a set of selected string ids plus an anchor for range selection.
/// Ids are caller-supplied, which keeps the selection stable when the
/// underlying items are re-filtered or re-sorted. Cheap to clone; clones
/// share the same state.
#[derive(Debug, Default)]
pub struct Selection {
    inner: Arc<RwLock<SelectionInner>>,
    dirty: Arc<AtomicBool>,
}

impl Selection {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// All selected ids, sorted for deterministic ordering.
    pub fn selected(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .inner
            .read()
            .map(|g| g.selected.iter().cloned().collect())
            .unwrap_or_default();
        ids.sort();
        ids
    }

    /// Check if an id is selected.
    pub fn is_selected(&self, id: &str) -> bool {
        self.inner
            .read()
            .map(|g| g.selected.contains(id))
            .unwrap_or(false)
    }

    /// Number of selected ids.
    pub fn len(&self) -> usize {
        self.inner.read().map(|g| g.selected.len()).unwrap_or(0)
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The anchor id for range selection, if any.
    pub fn anchor(&self) -> Option<String> {
        self.inner.read().ok().and_then(|g| g.anchor.clone())
    }

    /// Add an id to the selection, keeping existing ones.
    ///
    /// Unlike [`toggle`](Selection::toggle) this does not move the range
    /// anchor.
    pub fn add(&self, id: &str) {
        if let Ok(mut guard) = self.inner.write() {
            guard.selected.insert(id.to_string());
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Remove an id from the selection.
    pub fn remove(&self, id: &str) {
        if let Ok(mut guard) = self.inner.write() {
            guard.selected.remove(id);
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Select a single id, clearing all others.
    pub fn select(&self, id: &str) {
        if let Ok(mut guard) = self.inner.write() {
            guard.selected.clear();
            guard.selected.insert(id.to_string());
            guard.anchor = Some(id.to_string());
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Toggle an id in or out of the selection.
    ///
    /// Returns `true` if the id is selected afterwards.
    pub fn toggle(&self, id: &str) -> bool {
        let Ok(mut guard) = self.inner.write() else {
            return false;
        };
        let now_selected = if guard.selected.remove(id) {
            false
        } else {
            guard.selected.insert(id.to_string());
            true
        };
        guard.anchor = Some(id.to_string());
        self.dirty.store(true, Ordering::SeqCst);
        now_selected
    }

    /// Select every id in the given list.
    pub fn select_all(&self, ids: &[String]) {
        if let Ok(mut guard) = self.inner.write() {
            guard.selected.extend(ids.iter().cloned());
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Clear all selection. Returns the ids that were deselected, sorted.
    pub fn clear(&self) -> Vec<String> {
        let Ok(mut guard) = self.inner.write() else {
            return Vec::new();
        };
        let mut removed: Vec<String> = guard.selected.drain().collect();
        removed.sort();
        guard.anchor = None;
        self.dirty.store(true, Ordering::SeqCst);
        removed
    }

    /// Range select from the anchor to `target_id` over an ordered id list.
    ///
    /// With `extend` false, ids outside the range are deselected first.
    /// Falls back to a single exclusive select when the anchor or target is
    /// not in the list.
    pub fn range_select(&self, target_id: &str, ordered_ids: &[String], extend: bool) {
        let anchor_id = self
            .anchor()
            .unwrap_or_else(|| target_id.to_string());

        let anchor_pos = ordered_ids.iter().position(|id| id == &anchor_id);
        let target_pos = ordered_ids.iter().position(|id| id == target_id);

        let (start, end) = match (anchor_pos, target_pos) {
            (Some(a), Some(t)) => (a.min(t), a.max(t)),
            _ => {
                self.select(target_id);
                return;
            }
        };

        if let Ok(mut guard) = self.inner.write() {
            let range: HashSet<&String> = ordered_ids[start..=end].iter().collect();
            if !extend {
                guard.selected.retain(|id| range.contains(id));
            }
            for id in &ordered_ids[start..=end] {
                guard.selected.insert(id.clone());
            }
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Check if the selection changed since last check.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

impl Clone for Selection {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
        }
    }
}
