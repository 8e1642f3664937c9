/// Administration list filtering
///
/// Client-side search and attribute filtering for table rows: one search
/// box matched against the row text plus any number of dropdown filters
/// matched against row data attributes, combined conjunctively. Matching
/// is case- and diacritic-insensitive so "jose" finds "José".
use std::collections::HashMap;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// One data row: its visible text and its data attributes
/// (e.g. "election" -> "5", "status" -> "approved").
#[derive(Debug, Clone, Default)]
pub struct TableRow {
    pub text: String,
    pub attrs: HashMap<String, String>,
}

impl TableRow {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            attrs: HashMap::new(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }
}

/// The current filter controls: the search term and the selected value per
/// dropdown. An empty dropdown value means "no filter".
#[derive(Debug, Clone, Default)]
pub struct FilterSpec {
    pub search: String,
    pub selections: HashMap<String, String>,
}

impl FilterSpec {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: term.into(),
            selections: HashMap::new(),
        }
    }

    pub fn with_selection(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.selections.insert(field.into(), value.into());
        self
    }
}

/// Per-row visibility plus the two table states the page distinguishes:
/// "no results" (rows exist, all filtered out) and the empty state
/// (the table never had rows).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome {
    pub visible: Vec<bool>,
    pub visible_count: usize,
    pub show_no_results: bool,
}

/// Lowercase, strip diacritics, collapse whitespace.
fn normalize(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
}

/// Apply the filter controls to the rows.
pub fn apply(rows: &[TableRow], spec: &FilterSpec) -> FilterOutcome {
    let needle = normalize(&spec.search);

    let visible: Vec<bool> = rows
        .iter()
        .map(|row| {
            let matches_search = needle.is_empty() || normalize(&row.text).contains(&needle);

            let matches_filters = spec.selections.iter().all(|(field, wanted)| {
                wanted.is_empty() || row.attrs.get(field).map(String::as_str) == Some(wanted)
            });

            matches_search && matches_filters
        })
        .collect();

    let visible_count = visible.iter().filter(|v| **v).count();
    FilterOutcome {
        show_no_results: !rows.is_empty() && visible_count == 0,
        visible,
        visible_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<TableRow> {
        vec![
            TableRow::new("José Rizal  BS Computer Science  Approved")
                .with_attr("election", "1")
                .with_attr("status", "approved"),
            TableRow::new("Ana Lim  BS Biology  Pending")
                .with_attr("election", "1")
                .with_attr("status", "pending"),
            TableRow::new("Marco Cruz  BS Physics  Approved")
                .with_attr("election", "2")
                .with_attr("status", "approved"),
        ]
    }

    #[test]
    fn test_no_controls_shows_everything() {
        let outcome = apply(&rows(), &FilterSpec::default());
        assert_eq!(outcome.visible, vec![true, true, true]);
        assert!(!outcome.show_no_results);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let outcome = apply(&rows(), &FilterSpec::search("ana lim"));
        assert_eq!(outcome.visible, vec![false, true, false]);
    }

    #[test]
    fn test_search_is_diacritic_insensitive() {
        let outcome = apply(&rows(), &FilterSpec::search("jose"));
        assert_eq!(outcome.visible, vec![true, false, false]);
    }

    #[test]
    fn test_attribute_filters_combine_with_search() {
        let spec = FilterSpec::search("approved").with_selection("election", "2");
        let outcome = apply(&rows(), &spec);
        assert_eq!(outcome.visible, vec![false, false, true]);
        assert_eq!(outcome.visible_count, 1);
    }

    #[test]
    fn test_empty_dropdown_value_is_no_filter() {
        let spec = FilterSpec::default().with_selection("status", "");
        let outcome = apply(&rows(), &spec);
        assert_eq!(outcome.visible_count, 3);
    }

    #[test]
    fn test_no_results_vs_empty_state() {
        let outcome = apply(&rows(), &FilterSpec::search("nobody"));
        assert!(outcome.show_no_results);

        // An empty table is the empty state, never "no results".
        let outcome = apply(&[], &FilterSpec::search("nobody"));
        assert!(!outcome.show_no_results);
        assert_eq!(outcome.visible_count, 0);
    }
}
