mod common;

use std::cmp::Ordering;

use common::{names, people};
use gridstate::filter::{Filter, FilterFns, FilterState, filtered_rows};
use gridstate::row::Row;
use gridstate::value::Value;

#[test]
fn test_absent_criteria_pass_through() {
    let data = people();
    let rows = filtered_rows(&data, None, &FilterFns::new());
    assert_eq!(rows, data);
}

#[test]
fn test_exact_match() {
    let filter = Filter::new();
    filter.set("name", "Zola Ray");

    let rows = filter.apply(&people());
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Zola Ray");
    assert_eq!(rows[0].age, 30);
}

#[test]
fn test_empty_criteria_are_vacuous() {
    let data = people();
    let filter = Filter::new();

    filter.set("name", "");
    assert_eq!(filter.apply(&data).len(), 17);

    filter.set("name", Value::Null);
    assert_eq!(filter.apply(&data).len(), 17);

    filter.set("name", Value::List(vec![]));
    assert_eq!(filter.apply(&data).len(), 17);
}

#[test]
fn test_entries_combine_with_and() {
    let data = people();
    let filter = Filter::new();

    filter.set("age", 30);
    filter.set("active", true);
    assert_eq!(
        names(&filter.apply(&data)),
        vec!["Sterling Pugh", "Olivia Camacho", "Zola Ray"]
    );

    filter.set("name", "Zola Ray");
    assert_eq!(names(&filter.apply(&data)), vec!["Zola Ray"]);

    filter.set("age", 31);
    assert!(filter.apply(&data).is_empty());
}

#[test]
fn test_custom_matcher_takes_precedence() {
    // Criterion acts as a minimum age instead of an exact age.
    let filter = Filter::new().with_matcher("age", |row: &common::Person, min: &Value| {
        row.field("age").compare(min) != Some(Ordering::Less)
    });

    filter.set("age", 30);
    let rows = filter.apply(&people());
    assert_eq!(rows.len(), 9);
    assert!(rows.iter().all(|p| p.age >= 30));
}

#[test]
fn test_matcher_skipped_for_empty_criterion() {
    let filter =
        Filter::new().with_matcher("name", |_: &common::Person, _: &Value| panic!("called"));

    filter.set("name", Value::Null);
    assert_eq!(filter.apply(&people()).len(), 17);
}

#[test]
#[should_panic(expected = "matcher blew up")]
fn test_matcher_panic_propagates() {
    let filter = Filter::new().with_matcher("name", |_: &common::Person, _: &Value| {
        panic!("matcher blew up")
    });
    filter.set("name", "x");
    let _ = filter.apply(&people());
}

#[test]
fn test_unknown_field_matches_nothing() {
    let filter = Filter::new();
    filter.set("city", "Lisbon");
    assert!(filter.apply(&people()).is_empty());
}

#[test]
fn test_setting_same_value_is_idempotent() {
    let data = people();
    let filter = Filter::new();

    filter.set("name", "Zola Ray");
    let state_first = filter.state();
    let rows_first = filter.apply(&data);

    filter.set("name", "Zola Ray");
    assert_eq!(filter.state(), state_first);
    assert_eq!(filter.apply(&data), rows_first);
}

#[test]
fn test_clear_lifts_constraint() {
    let data = people();
    let filter = Filter::new();

    filter.set("name", "Zola Ray");
    assert_eq!(filter.apply(&data).len(), 1);

    filter.clear("name");
    assert_eq!(filter.apply(&data).len(), 17);
    assert_eq!(filter.criterion("name"), Some(Value::Null));
}

#[test]
fn test_seeded_state() {
    let mut state = FilterState::new();
    state.set("active", Value::from(false));

    let filter = Filter::<common::Person>::new().with_state(state);
    assert_eq!(
        names(&filter.apply(&people())),
        vec!["Colette Marsh", "Greta Lund", "Jonas Reed", "Pia Sandoval"]
    );
}

#[test]
fn test_dirty_tracking() {
    let filter = Filter::<common::Person>::new();
    assert!(!filter.is_dirty());

    filter.set("age", 30);
    assert!(filter.is_dirty());

    filter.clear_dirty();
    assert!(!filter.is_dirty());
}
