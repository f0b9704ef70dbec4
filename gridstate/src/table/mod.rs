//! Table coordinator: filter → sort → paginate over one row collection.

use std::cmp::Ordering as CmpOrdering;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use crate::filter::{Filter, FilterState};
use crate::memo::Memo;
use crate::paginate::{PageState, Paginate};
use crate::row::Row;
use crate::sort::{Direction, Sort, SortKey};
use crate::value::Value;

/// Combined snapshot of a table's state.
///
/// `sort_dir` is a read-only projection of `sort`: the direction currently
/// set for each sorted field, for per-column indicator lookups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableState {
    /// Per-field filter criteria.
    pub filter: FilterState,
    /// Sort keys in tie-break priority order.
    pub sort: Vec<SortKey>,
    /// Field → direction projection of `sort`.
    pub sort_dir: BTreeMap<String, Direction>,
    /// Pagination cursor.
    pub pagination: PageState,
}

struct TableInner<T> {
    rows: Vec<T>,
    data_version: u64,
    filtered: Memo<(u64, u64), Vec<T>>,
    sorted: Memo<(u64, u64, u64), Vec<T>>,
    paged: Memo<(u64, u64, u64, u64), Vec<T>>,
}

/// Composed table state: one row collection run through filtering, sorting,
/// and pagination, with a merged state/mutator surface.
///
/// The pipeline is fixed: filter over the full input, sort over the filtered
/// rows, paginate over the sorted rows. [`rows`](Table::rows) is the final
/// window; [`total`](Table::total) counts rows after filtering but before
/// pagination (the number a "page X of N" control needs).
///
/// Each stage caches its output keyed on the versions of its inputs, so a
/// page change re-slices cached sorted rows while a filter change recomputes
/// the whole pipeline.
///
/// # Example
///
/// ```ignore
/// let table = Table::new(people)
///     .with_matcher("name", text::contains("name"));
///
/// table.filter("name", "ray");
/// table.sort("age", Direction::Asc);
/// table.set_limit(25);
///
/// let visible = table.rows();
/// let badge = format!("{} matches", table.total());
/// ```
pub struct Table<T: Row> {
    filter: Filter<T>,
    sort: Sort<T>,
    paginate: Paginate,
    inner: Arc<RwLock<TableInner<T>>>,
    dirty: Arc<AtomicBool>,
}

impl<T: Row> Table<T> {
    /// Create a table over the given rows with empty filter and sort state
    /// and the default pagination cursor (page 1, limit 10).
    pub fn new(rows: Vec<T>) -> Self {
        Self {
            filter: Filter::new(),
            sort: Sort::new(),
            paginate: Paginate::new(),
            inner: Arc::new(RwLock::new(TableInner {
                rows,
                data_version: 0,
                filtered: Memo::new(),
                sorted: Memo::new(),
                paged: Memo::new(),
            })),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Seed the table with an initial combined state.
    ///
    /// The `sort_dir` projection of the given state is ignored; it is
    /// rebuilt from the sort keys on every snapshot.
    pub fn with_state(self, state: TableState) -> Self {
        let filter = self.filter.clone().with_state(state.filter);
        let sort = self.sort.clone().with_keys(state.sort);
        let paginate = self.paginate.clone().with_state(state.pagination);
        Self {
            filter,
            sort,
            paginate,
            ..self
        }
    }

    /// Register a custom filter matcher for `field`.
    pub fn with_matcher(
        self,
        field: impl Into<String>,
        f: impl Fn(&T, &Value) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.filter.add_matcher(field, f);
        self
    }

    /// Register a custom sort comparator for `field`.
    pub fn with_comparator(
        self,
        field: impl Into<String>,
        f: impl Fn(&T, &T) -> CmpOrdering + Send + Sync + 'static,
    ) -> Self {
        self.sort.add_comparator(field, f);
        self
    }

    // -------------------------------------------------------------------------
    // Source rows
    // -------------------------------------------------------------------------

    /// Replace the source rows.
    pub fn set_rows(&self, rows: Vec<T>) {
        let mut guard = match self.inner.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.rows = rows;
        guard.data_version += 1;
        self.dirty.store(true, Ordering::SeqCst);
    }

    /// Number of source rows, before any filtering.
    pub fn len(&self) -> usize {
        match self.inner.read() {
            Ok(guard) => guard.rows.len(),
            Err(poisoned) => poisoned.into_inner().rows.len(),
        }
    }

    /// Check if the table has no source rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // -------------------------------------------------------------------------
    // Mutators (delegated to the engines)
    // -------------------------------------------------------------------------

    /// Merge a filter criterion for `field`.
    pub fn filter(&self, field: impl Into<String>, value: impl Into<Value>) {
        self.filter.set(field, value);
    }

    /// Lift the filter constraint on `field`.
    pub fn clear_filter(&self, field: impl Into<String>) {
        self.filter.clear(field);
    }

    /// Sort by `field`, moving it to lowest tie-break priority.
    pub fn sort(&self, field: impl Into<String>, dir: Direction) {
        self.sort.set(field, dir);
    }

    /// Stop sorting by `field`.
    pub fn clear_sort(&self, field: &str) {
        self.sort.clear(field);
    }

    /// Toggle the sort direction on `field` (appends ascending when unsorted).
    pub fn toggle_sort(&self, field: impl Into<String>) -> Direction {
        self.sort.toggle(field)
    }

    /// Jump to a page (1-based, unclamped).
    pub fn go_to(&self, index: usize) {
        self.paginate.go_to(index);
    }

    /// Change the page size.
    pub fn set_limit(&self, limit: usize) {
        self.paginate.set_limit(limit);
    }

    // -------------------------------------------------------------------------
    // Derived output
    // -------------------------------------------------------------------------

    /// The visible window: filtered, sorted, and paginated rows.
    ///
    /// A panic in a custom matcher or comparator propagates out of this call
    /// with the caches untouched; the panicking stage simply reruns next
    /// time.
    pub fn rows(&self) -> Vec<T> {
        let fv = self.filter.version();
        let sv = self.sort.version();
        let pv = self.paginate.version();
        let mut guard = match self.inner.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let dv = guard.data_version;
        let TableInner {
            rows,
            filtered,
            sorted,
            paged,
            ..
        } = &mut *guard;
        let filtered = filtered.get_or_compute((dv, fv), || {
            log::trace!("recomputing filtered rows (data v{dv}, filter v{fv})");
            self.filter.apply(rows)
        });
        let sorted = sorted.get_or_compute((dv, fv, sv), || {
            log::trace!("recomputing sorted rows (sort v{sv})");
            self.sort.apply(filtered)
        });
        let paged = paged.get_or_compute((dv, fv, sv, pv), || self.paginate.apply(sorted));
        paged.clone()
    }

    /// Count of rows after filtering, before pagination.
    pub fn total(&self) -> usize {
        let fv = self.filter.version();
        let mut guard = match self.inner.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let dv = guard.data_version;
        let TableInner { rows, filtered, .. } = &mut *guard;
        filtered
            .get_or_compute((dv, fv), || {
                log::trace!("recomputing filtered rows (data v{dv}, filter v{fv})");
                self.filter.apply(rows)
            })
            .len()
    }

    /// Combined snapshot of filter, sort, projection, and pagination state.
    pub fn state(&self) -> TableState {
        TableState {
            filter: self.filter.state(),
            sort: self.sort.state(),
            sort_dir: self.sort.directions(),
            pagination: self.paginate.state(),
        }
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if any state slice changed since last check.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
            || self.filter.is_dirty()
            || self.sort.is_dirty()
            || self.paginate.is_dirty()
    }

    /// Clear all dirty flags.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
        self.filter.clear_dirty();
        self.sort.clear_dirty();
        self.paginate.clear_dirty();
    }
}

impl<T: Row> Clone for Table<T> {
    fn clone(&self) -> Self {
        Self {
            filter: self.filter.clone(),
            sort: self.sort.clone(),
            paginate: self.paginate.clone(),
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

impl<T: Row> fmt::Debug for Table<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("len", &self.len())
            .field("state", &self.state())
            .finish()
    }
}
