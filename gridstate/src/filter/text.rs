//! Text matchers built on nucleo-matcher.

use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};

use super::FilterFn;
use crate::row::Row;
use crate::value::Value;

/// Result of ranking labels against a query.
#[derive(Debug, Clone)]
pub struct TextMatch {
    /// Index of the matched label in the original list.
    pub index: usize,
    /// Match score (higher is better).
    pub score: u32,
}

/// Rank `labels` against a fuzzy `query`.
///
/// Returns matches sorted by score (highest first). An empty query matches
/// every label with score 0, in input order.
pub fn fuzzy_rank(query: &str, labels: &[String]) -> Vec<TextMatch> {
    if query.is_empty() {
        return labels
            .iter()
            .enumerate()
            .map(|(index, _)| TextMatch { index, score: 0 })
            .collect();
    }

    let mut matcher = Matcher::new(Config::DEFAULT);
    let pattern = Pattern::new(
        query,
        CaseMatching::Ignore,
        Normalization::Smart,
        AtomKind::Fuzzy,
    );

    let mut matches: Vec<TextMatch> = labels
        .iter()
        .enumerate()
        .filter_map(|(index, label)| {
            let mut buf = Vec::new();
            let haystack = Utf32Str::new(label, &mut buf);
            pattern
                .score(haystack, &mut matcher)
                .map(|score| TextMatch { index, score })
        })
        .collect();

    matches.sort_by(|a, b| b.score.cmp(&a.score));

    matches
}

fn fuzzy_matches(query: &str, label: &str) -> bool {
    let mut matcher = Matcher::new(Config::DEFAULT);
    let pattern = Pattern::new(
        query,
        CaseMatching::Ignore,
        Normalization::Smart,
        AtomKind::Fuzzy,
    );
    let mut buf = Vec::new();
    pattern
        .score(Utf32Str::new(label, &mut buf), &mut matcher)
        .is_some()
}

/// A filter matcher that fuzzy-matches a text field against a text criterion.
///
/// Non-text fields and non-text criteria never match.
pub fn fuzzy<T: Row>(field: impl Into<String>) -> FilterFn<T> {
    let field = field.into();
    Box::new(move |row: &T, value: &Value| {
        let Some(query) = value.as_text() else {
            return false;
        };
        match row.field(&field).as_text() {
            Some(label) => fuzzy_matches(query, label),
            None => false,
        }
    })
}

/// A filter matcher that does case-insensitive substring matching on a text
/// field.
pub fn contains<T: Row>(field: impl Into<String>) -> FilterFn<T> {
    let field = field.into();
    Box::new(move |row: &T, value: &Value| {
        let Some(needle) = value.as_text() else {
            return false;
        };
        match row.field(&field).as_text() {
            Some(label) => label.to_lowercase().contains(&needle.to_lowercase()),
            None => false,
        }
    })
}
