//! Async operation state with stale-completion protection.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use thiserror::Error;

/// Error produced by a failed query.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct QueryError {
    /// Error message.
    pub message: String,
}

impl QueryError {
    /// Create a new query error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for QueryError {
    fn from(err: std::io::Error) -> Self {
        Self::new(err.to_string())
    }
}

impl From<String> for QueryError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for QueryError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// The state of an async operation.
#[derive(Debug, Clone, Default)]
pub enum QueryState<T> {
    /// The operation has not started.
    #[default]
    Idle,
    /// The operation is in flight.
    Loading,
    /// The operation completed with a value.
    Ready(T),
    /// The operation failed.
    Failed(QueryError),
}

impl<T> QueryState<T> {
    /// Check if the operation has not started.
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Check if the operation is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Check if the operation completed.
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Check if the operation failed.
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Get a reference to the completed value.
    pub fn as_ready(&self) -> Option<&T> {
        match self {
            Self::Ready(v) => Some(v),
            _ => None,
        }
    }

    /// Get the error if present.
    pub fn as_error(&self) -> Option<&QueryError> {
        match self {
            Self::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// Map the completed value.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> QueryState<U> {
        match self {
            Self::Idle => QueryState::Idle,
            Self::Loading => QueryState::Loading,
            Self::Ready(v) => QueryState::Ready(f(v)),
            Self::Failed(e) => QueryState::Failed(e),
        }
    }
}

/// Async operation state machine with interior mutability.
///
/// `Query<T>` tracks one logical async operation — a fetch, a save, a
/// long-running action — without owning the transport or the executor. The
/// caller calls [`start`](Query::start) before launching the work and
/// completes the returned [`QueryRun`] from wherever the work finishes.
///
/// Starting again or cancelling supersedes any in-flight run: a superseded
/// run's completion is silently dropped, so a slow response can never
/// overwrite the result of a newer request.
///
/// # Example
///
/// ```
/// use gridstate::query::Query;
///
/// let query: Query<Vec<String>> = Query::new();
///
/// let stale = query.start();
/// let current = query.start();
///
/// assert!(!stale.finish(vec!["old".into()]));
/// assert!(current.finish(vec!["new".into()]));
/// assert_eq!(query.value().as_deref(), Some(&["new".to_string()][..]));
/// ```
#[derive(Debug)]
pub struct Query<T> {
    inner: Arc<RwLock<QueryState<T>>>,
    generation: Arc<AtomicU64>,
    dirty: Arc<AtomicBool>,
}

/// Handle for completing one run of a [`Query`].
#[derive(Debug)]
pub struct QueryRun<T> {
    query: Query<T>,
    generation: u64,
}

impl<T> Query<T> {
    /// Create a query in idle state.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(QueryState::Idle)),
            generation: Arc::new(AtomicU64::new(0)),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get a clone of the current state.
    pub fn get(&self) -> QueryState<T>
    where
        T: Clone,
    {
        self.inner
            .read()
            .map(|guard| guard.clone())
            .unwrap_or(QueryState::Idle)
    }

    /// Begin a new run: supersede any in-flight run and switch to loading.
    pub fn start(&self) -> QueryRun<T> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if let Ok(mut guard) = self.inner.write() {
            *guard = QueryState::Loading;
            self.dirty.store(true, Ordering::SeqCst);
        }
        QueryRun {
            query: self.clone(),
            generation,
        }
    }

    /// Cancel the in-flight run, if any.
    ///
    /// In-flight completions become stale and are dropped; a loading state
    /// returns to idle. A settled state (ready or failed) is left alone.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut guard) = self.inner.write() {
            if guard.is_loading() {
                *guard = QueryState::Idle;
                self.dirty.store(true, Ordering::SeqCst);
            }
        }
    }

    /// Check if the query has not started.
    pub fn is_idle(&self) -> bool {
        self.inner.read().map(|g| g.is_idle()).unwrap_or(true)
    }

    /// Check if a run is in flight.
    pub fn is_loading(&self) -> bool {
        self.inner.read().map(|g| g.is_loading()).unwrap_or(false)
    }

    /// Check if the latest run completed.
    pub fn is_ready(&self) -> bool {
        self.inner.read().map(|g| g.is_ready()).unwrap_or(false)
    }

    /// Check if the latest run failed.
    pub fn is_failed(&self) -> bool {
        self.inner.read().map(|g| g.is_failed()).unwrap_or(false)
    }

    /// Get a clone of the completed value, if any.
    pub fn value(&self) -> Option<T>
    where
        T: Clone,
    {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.as_ready().cloned())
    }

    /// Get the error of the latest run, if it failed.
    pub fn error(&self) -> Option<QueryError> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.as_error().cloned())
    }

    /// Check if the query changed since last check.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }

    fn commit(&self, generation: u64, state: QueryState<T>) -> bool {
        if self.generation.load(Ordering::SeqCst) != generation {
            log::debug!("dropping completion from superseded query run {generation}");
            return false;
        }
        if let Ok(mut guard) = self.inner.write() {
            *guard = state;
            self.dirty.store(true, Ordering::SeqCst);
            return true;
        }
        false
    }
}

impl<T> QueryRun<T> {
    /// Check if this run is still the current one.
    pub fn is_current(&self) -> bool {
        self.query.generation.load(Ordering::SeqCst) == self.generation
    }

    /// Complete the run with a value.
    ///
    /// Returns `false` (and leaves the query untouched) when the run was
    /// superseded or cancelled.
    pub fn finish(self, value: T) -> bool {
        self.query.commit(self.generation, QueryState::Ready(value))
    }

    /// Complete the run with an error.
    ///
    /// Returns `false` (and leaves the query untouched) when the run was
    /// superseded or cancelled.
    pub fn fail(self, error: impl Into<QueryError>) -> bool {
        self.query
            .commit(self.generation, QueryState::Failed(error.into()))
    }
}

impl<T> Default for Query<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Query<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            generation: Arc::clone(&self.generation),
            dirty: Arc::clone(&self.dirty),
        }
    }
}
