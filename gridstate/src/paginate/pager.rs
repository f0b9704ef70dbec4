//! Bounded page navigator.

use crate::state::State;

/// Page navigator with a known page count.
///
/// Unlike [`Paginate`](super::Paginate), a `Pager` knows how many pages
/// exist and clamps every jump into `[1, max_page]`. It tracks navigation
/// only; callers window their data themselves (typically because the data
/// lives behind an external paged source).
///
/// Changing `max_page` does not move the current page; clamping happens on
/// the next jump.
#[derive(Debug, Clone)]
pub struct Pager {
    page: State<usize>,
    max_page: State<usize>,
}

impl Pager {
    /// Create a pager on page 1 of 1.
    pub fn new() -> Self {
        Self::with_page(1)
    }

    /// Create a pager starting on the given page.
    pub fn with_page(initial: usize) -> Self {
        Self {
            page: State::new(initial),
            max_page: State::new(1),
        }
    }

    /// Current page (1-based).
    pub fn page(&self) -> usize {
        self.page.get()
    }

    /// Last navigable page.
    pub fn max_page(&self) -> usize {
        self.max_page.get()
    }

    /// Set the last navigable page. The current page is left alone.
    pub fn set_max_page(&self, max_page: usize) {
        self.max_page.set(max_page);
    }

    /// Jump to a page, clamped into `[1, max_page]`.
    pub fn go_to(&self, page: usize) {
        let clamped = page.min(self.max_page.get()).max(1);
        self.page.set(clamped);
    }

    /// Jump to the first page.
    pub fn first(&self) {
        self.go_to(1);
    }

    /// Step back one page.
    pub fn previous(&self) {
        self.go_to(self.page.get().saturating_sub(1));
    }

    /// Step forward one page.
    pub fn next(&self) {
        self.go_to(self.page.get().saturating_add(1));
    }

    /// Jump to the last page.
    pub fn last(&self) {
        self.go_to(self.max_page.get());
    }

    /// Check if a previous page exists.
    pub fn can_previous(&self) -> bool {
        self.page.get() > 1
    }

    /// Check if a next page exists.
    pub fn can_next(&self) -> bool {
        self.page.get() < self.max_page.get()
    }

    /// Check if the pager changed since last check.
    pub fn is_dirty(&self) -> bool {
        self.page.is_dirty() || self.max_page.is_dirty()
    }

    /// Clear the dirty flags.
    pub fn clear_dirty(&self) {
        self.page.clear_dirty();
        self.max_page.clear_dirty();
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self::new()
    }
}
