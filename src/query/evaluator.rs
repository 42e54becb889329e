//! Query evaluation against an in-memory record set
//!
//! Evaluation is pure: each node's result is a function of the expression,
//! the dataset, and the query context, with no side effects on any of
//! them. Per-record lookup failures (missing field, non-numeric value in a
//! comparison) are soft non-matches, never errors, so malformed records
//! degrade gracefully instead of aborting the query.

use std::collections::{HashMap, HashSet};

use crate::core::record::{FieldValue, Record};
use crate::query::ast::{CompareOp, Expr};

/// Per-query evaluation context.
///
/// Holds variable bindings for future query parameterization. No query
/// syntax references variables yet; the map is an extension point kept so
/// callers can prepare contexts ahead of the syntax existing.
#[derive(Debug, Clone, Default)]
pub struct QueryContext {
    variables: HashMap<String, FieldValue>,
}

impl QueryContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a variable in the context.
    pub fn set_variable(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.variables.insert(name.into(), value.into());
    }

    /// Look up a variable binding.
    pub fn variable(&self, name: &str) -> Option<&FieldValue> {
        self.variables.get(name)
    }
}

/// Evaluator for expression trees over a borrowed dataset.
pub struct Evaluator<'a> {
    records: &'a [Record],
    #[allow(unused)]
    context: &'a QueryContext,
}

impl<'a> Evaluator<'a> {
    /// Create an evaluator over a dataset and context.
    pub fn new(records: &'a [Record], context: &'a QueryContext) -> Self {
        Self { records, context }
    }

    /// Evaluate an expression, returning the indices of matching records.
    ///
    /// Ordering rules:
    /// - terminals and `NOT` preserve dataset order
    /// - `AND` keeps the left side's order, restricted to membership in
    ///   the right side's result
    /// - `OR` appends right-side results not already seen on the left
    ///
    /// Both sides of a binary combinator are evaluated independently
    /// against the full dataset, which keeps `OR`'s first-seen ordering
    /// well-defined regardless of evaluation order.
    pub fn evaluate(&self, expr: &Expr) -> Vec<usize> {
        match expr {
            Expr::Field { field, value } => {
                let needle = value.to_lowercase();
                self.filter(|record| Self::field_matches(record, field, &needle))
            }
            Expr::Comparison { field, op, value } => {
                self.filter(|record| Self::comparison_matches(record, field, *op, *value))
            }
            Expr::Wildcard => (0..self.records.len()).collect(),
            Expr::And(left, right) => {
                let left_indices = self.evaluate(left);
                let right_set: HashSet<usize> = self.evaluate(right).into_iter().collect();
                left_indices
                    .into_iter()
                    .filter(|idx| right_set.contains(idx))
                    .collect()
            }
            Expr::Or(left, right) => {
                let mut result = self.evaluate(left);
                let mut seen: HashSet<usize> = result.iter().copied().collect();
                for idx in self.evaluate(right) {
                    if seen.insert(idx) {
                        result.push(idx);
                    }
                }
                result
            }
            Expr::Not(inner) => {
                let excluded: HashSet<usize> = self.evaluate(inner).into_iter().collect();
                (0..self.records.len())
                    .filter(|idx| !excluded.contains(idx))
                    .collect()
            }
        }
    }

    fn filter(&self, predicate: impl Fn(&Record) -> bool) -> Vec<usize> {
        self.records
            .iter()
            .enumerate()
            .filter_map(|(idx, record)| predicate(record).then_some(idx))
            .collect()
    }

    /// Case-insensitive substring containment; `needle` is pre-lowercased.
    fn field_matches(record: &Record, field: &str, needle: &str) -> bool {
        match record.get(field) {
            Some(value) => value.as_text().to_lowercase().contains(needle),
            None => false,
        }
    }

    fn comparison_matches(record: &Record, field: &str, op: CompareOp, value: f64) -> bool {
        record
            .get(field)
            .and_then(FieldValue::as_number)
            .map(|n| op.compare(n, value))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::lexer_parser::{Lexer, Parser};

    fn dataset() -> Vec<Record> {
        vec![
            Record::new().with_field("author", "John Smith").with_field("year", 2023),
            Record::new().with_field("author", "Jane Doe").with_field("year", 2024),
            Record::new().with_field("author", "Johnny Cash").with_field("year", 2025),
            Record::new().with_field("title", "untitled"),
        ]
    }

    fn eval(records: &[Record], query: &str) -> Vec<usize> {
        let tokens = Lexer::new(query).tokenize().unwrap();
        let expr = Parser::new(tokens).parse().unwrap();
        let context = QueryContext::new();
        Evaluator::new(records, &context).evaluate(&expr)
    }

    #[test]
    fn test_field_match_case_insensitive_substring() {
        let records = dataset();
        assert_eq!(eval(&records, "author:john"), vec![0, 2]);
        assert_eq!(eval(&records, "author:JOHN"), vec![0, 2]);
    }

    #[test]
    fn test_missing_field_is_soft_non_match() {
        let records = dataset();
        // record 3 has no author field; no error, just no match
        assert_eq!(eval(&records, "author:untitled"), Vec::<usize>::new());
    }

    #[test]
    fn test_comparison_skips_non_numeric() {
        let records = dataset();
        assert_eq!(eval(&records, "year >= 2024"), vec![1, 2]);
        // author is textual; comparison matches nothing rather than erroring
        assert_eq!(eval(&records, "author > 1"), Vec::<usize>::new());
    }

    #[test]
    fn test_wildcard_returns_everything_in_order() {
        let records = dataset();
        assert_eq!(eval(&records, "*"), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_and_keeps_left_order() {
        let records = dataset();
        assert_eq!(eval(&records, "author:john AND year >= 2024"), vec![2]);
    }

    #[test]
    fn test_or_dedups_first_seen() {
        let records = dataset();
        // record 2 matches both sides; it appears once, at its left-side slot
        assert_eq!(eval(&records, "author:john OR year >= 2025"), vec![0, 2]);
    }

    #[test]
    fn test_not_preserves_dataset_order() {
        let records = dataset();
        assert_eq!(eval(&records, "NOT author:john"), vec![1, 3]);
    }

    #[test]
    fn test_empty_dataset() {
        let records: Vec<Record> = Vec::new();
        assert_eq!(eval(&records, "*"), Vec::<usize>::new());
        assert_eq!(eval(&records, "author:john"), Vec::<usize>::new());
        assert_eq!(eval(&records, "NOT author:john"), Vec::<usize>::new());
    }

    #[test]
    fn test_context_variables_round_trip() {
        let mut context = QueryContext::new();
        context.set_variable("min_year", 2024i64);
        assert_eq!(
            context.variable("min_year"),
            Some(&FieldValue::Number(2024.0))
        );
        assert_eq!(context.variable("other"), None);
    }
}
