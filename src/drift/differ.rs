use std::collections::HashSet;

use crate::drift::{DriftField, DriftRow};
use crate::state::{Row, State};

pub const FIELD_DELIMITER: &str = "|";

/// Rows of `other` that do not appear in `reference`, decomposed field by
/// field. Output follows the row order of `other`.
///
/// Field counts are not re-checked here; callers compare only states that
/// passed `check_comparable`.
pub fn diff(reference: &State, other: &State) -> Vec<DriftRow> {
    let known: HashSet<&Row> = reference.results.iter().collect();
    other
        .results
        .iter()
        .filter(|row| !known.contains(row))
        .map(|row| decompose_row(row))
        .collect()
}

pub fn decompose_row(row: &[String]) -> DriftRow {
    row.iter().map(|field| decompose_field(field)).collect()
}

/// A literal `|` is indistinguishable from a multi-value separator.
pub fn decompose_field(field: &str) -> DriftField {
    let parts: Vec<&str> = field.split(FIELD_DELIMITER).collect();
    if parts.len() > 1 {
        DriftField::Parts(parts.into_iter().map(str::to_string).collect())
    } else {
        DriftField::Value(field.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{decompose_field, diff};
    use crate::drift::DriftField;
    use crate::state::State;

    fn state(results: &[&[&str]]) -> State {
        State::new(
            "check",
            "MATCH (n) RETURN n.a, n.b",
            vec!["n.a".to_string(), "n.b".to_string()],
            results
                .iter()
                .map(|row| row.iter().map(|f| f.to_string()).collect())
                .collect(),
        )
    }

    fn value(v: &str) -> DriftField {
        DriftField::Value(v.to_string())
    }

    #[test]
    fn state_has_no_drift_against_itself() {
        let s = state(&[&["a", "b"], &["c", "d|e"]]);
        assert!(diff(&s, &s).is_empty());
    }

    #[test]
    fn identical_results_are_empty_both_ways() {
        let a = state(&[&["a", "b"], &["c", "d"]]);
        let b = state(&[&["c", "d"], &["a", "b"]]);
        assert!(diff(&a, &b).is_empty());
        assert!(diff(&b, &a).is_empty());
    }

    #[test]
    fn decomposes_multi_value_fields() {
        assert_eq!(decompose_field("plain"), value("plain"));
        assert_eq!(
            decompose_field("a|b"),
            DriftField::Parts(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(
            decompose_field("|"),
            DriftField::Parts(vec![String::new(), String::new()])
        );
        assert_eq!(decompose_field(""), value(""));
    }

    #[test]
    fn reports_only_rows_missing_from_reference() {
        let start = state(&[&["a", "b"]]);
        let end = state(&[&["a", "b"], &["c", "d|e"]]);
        assert_eq!(
            diff(&start, &end),
            vec![vec![
                value("c"),
                DriftField::Parts(vec!["d".to_string(), "e".to_string()])
            ]]
        );
        assert!(diff(&end, &start).is_empty());
    }

    #[test]
    fn output_follows_other_state_order() {
        let start = state(&[]);
        let end = state(&[&["z", "1"], &["a", "2"]]);
        let drift = diff(&start, &end);
        assert_eq!(drift[0][0], value("z"));
        assert_eq!(drift[1][0], value("a"));
    }

    #[test]
    fn rows_compare_by_full_field_sequence() {
        let start = state(&[&["a", "b"]]);
        let end = state(&[&["b", "a"]]);
        assert_eq!(diff(&start, &end), vec![vec![value("b"), value("a")]]);
    }
}
