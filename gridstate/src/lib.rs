//! Composable state containers for table UIs: filtering, sorting,
//! pagination, and the small pieces of reactive state around them.

pub mod dialog;
pub mod filter;
pub mod form;
pub mod memo;
pub mod paginate;
pub mod query;
pub mod row;
pub mod selection;
pub mod sort;
pub mod state;
pub mod table;
pub mod value;

pub use table::Table;

pub mod prelude {
    pub use crate::dialog::Dialog;
    pub use crate::filter::{Filter, FilterFn, FilterState};
    pub use crate::form::Form;
    pub use crate::paginate::{PageState, Pager, Paginate};
    pub use crate::query::{Query, QueryError, QueryRun, QueryState};
    pub use crate::row::Row;
    pub use crate::selection::Selection;
    pub use crate::sort::{Direction, Sort, SortFn, SortKey};
    pub use crate::state::State;
    pub use crate::table::{Table, TableState};
    pub use crate::value::Value;
}
