mod common;

use common::people;
use gridstate::filter::Filter;
use gridstate::filter::text::{contains, fuzzy, fuzzy_rank};

#[test]
fn test_empty_query_returns_all() {
    let labels = vec!["apple".to_string(), "banana".to_string()];
    let matches = fuzzy_rank("", &labels);
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].index, 0);
    assert_eq!(matches[1].index, 1);
}

#[test]
fn test_fuzzy_matching() {
    let labels = vec![
        "apple".to_string(),
        "banana".to_string(),
        "apricot".to_string(),
    ];
    let matches = fuzzy_rank("ap", &labels);
    assert_eq!(matches.len(), 2);
    let indices: Vec<usize> = matches.iter().map(|m| m.index).collect();
    assert!(indices.contains(&0)); // apple
    assert!(indices.contains(&2)); // apricot
}

#[test]
fn test_no_matches() {
    let labels = vec!["apple".to_string(), "banana".to_string()];
    let matches = fuzzy_rank("xyz", &labels);
    assert!(matches.is_empty());
}

#[test]
fn test_case_insensitive() {
    let labels = vec!["Apple".to_string(), "BANANA".to_string()];
    let matches = fuzzy_rank("apple", &labels);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].index, 0);
}

#[test]
fn test_fuzzy_matcher_on_a_text_field() {
    let filter = Filter::new().with_matcher("name", fuzzy("name"));
    filter.set("name", "zola");

    let rows = filter.apply(&people());
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Zola Ray");
}

#[test]
fn test_contains_matcher_is_case_insensitive() {
    let filter = Filter::new().with_matcher("name", contains("name"));
    filter.set("name", "STOKES");

    let rows = filter.apply(&people());
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Harvey Stokes");
}

#[test]
fn test_non_text_criterion_never_matches() {
    let filter = Filter::new().with_matcher("name", contains("name"));
    filter.set("name", 42);

    assert!(filter.apply(&people()).is_empty());
}
