//! Row trait for generic field access.

use crate::value::Value;

/// Trait for items the engines can filter, sort, and paginate.
///
/// A row exposes its attributes as dynamic [`Value`]s keyed by field name.
/// Unknown field names return [`Value::Null`]: equality against `Null` fails
/// (no rows match) and ordering against `Null` ties, so a typo degrades
/// gracefully instead of panicking.
///
/// # Example
///
/// ```
/// use gridstate::row::Row;
/// use gridstate::value::Value;
///
/// #[derive(Clone)]
/// struct Person {
///     name: String,
///     age: i64,
/// }
///
/// impl Row for Person {
///     fn field(&self, name: &str) -> Value {
///         match name {
///             "name" => Value::from(self.name.clone()),
///             "age" => Value::from(self.age),
///             _ => Value::Null,
///         }
///     }
/// }
/// ```
pub trait Row: Clone + Send + Sync + 'static {
    /// Read the named field as a dynamic value.
    fn field(&self, name: &str) -> Value;
}
