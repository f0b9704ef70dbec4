//! Pagination engine: page-window slicing over in-memory rows.

mod pager;

pub use pager::Pager;

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

/// Pagination cursor: 1-based page index plus page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    /// 1-based page index.
    pub index: usize,
    /// Rows per page.
    pub limit: usize,
}

impl PageState {
    /// Create a cursor.
    pub fn new(index: usize, limit: usize) -> Self {
        Self { index, limit }
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            index: 1,
            limit: 10,
        }
    }
}

/// Derive the page window of `rows`.
///
/// With `state` absent the input passes through untouched. Otherwise the
/// window is `[(index - 1) * limit, index * limit)` — pages are 1-based.
/// An out-of-range index (including index 0) yields an empty page; a partial
/// last page is returned as-is.
pub fn paged_rows<T: Clone>(rows: &[T], state: Option<&PageState>) -> Vec<T> {
    let Some(state) = state else {
        return rows.to_vec();
    };
    if state.index == 0 {
        return Vec::new();
    }
    let start = (state.index - 1).saturating_mul(state.limit).min(rows.len());
    let end = state.index.saturating_mul(state.limit).min(rows.len());
    rows[start..end].to_vec()
}

struct PaginateInner {
    state: PageState,
    version: u64,
}

/// Pagination state container.
///
/// Owns the page cursor and derives the visible window of a row collection.
/// The cursor is not clamped against the collection: the engine does not
/// know the row count at mutation time, and an out-of-range page simply
/// derives empty. Use [`Pager`] when a bounded navigator is wanted.
pub struct Paginate {
    inner: Arc<RwLock<PaginateInner>>,
    dirty: Arc<AtomicBool>,
}

impl Paginate {
    /// Create a cursor at page 1 with the default limit of 10.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(PaginateInner {
                state: PageState::default(),
                version: 0,
            })),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Seed the cursor with an initial state.
    pub fn with_state(self, state: PageState) -> Self {
        if let Ok(mut guard) = self.inner.write() {
            guard.state = state;
            guard.version += 1;
        }
        self
    }

    /// Jump to a page. No bounds checking.
    pub fn go_to(&self, index: usize) {
        if let Ok(mut guard) = self.inner.write() {
            guard.state.index = index;
            guard.version += 1;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Change the page size. No validation.
    pub fn set_limit(&self, limit: usize) {
        if let Ok(mut guard) = self.inner.write() {
            guard.state.limit = limit;
            guard.version += 1;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Snapshot of the cursor.
    pub fn state(&self) -> PageState {
        self.inner
            .read()
            .map(|g| g.state)
            .unwrap_or_default()
    }

    /// Monotonic mutation counter.
    pub fn version(&self) -> u64 {
        self.inner.read().map(|g| g.version).unwrap_or(0)
    }

    /// Derive the current page window of `rows`.
    pub fn apply<T: Clone>(&self, rows: &[T]) -> Vec<T> {
        let state = self.state();
        paged_rows(rows, Some(&state))
    }

    /// Check if the cursor changed since last check.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

impl Clone for Paginate {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

impl Default for Paginate {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Paginate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Paginate")
            .field("state", &self.state())
            .field("version", &self.version())
            .finish()
    }
}
