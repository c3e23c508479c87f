//! Filter condition parsing and evaluation
//!
//! A condition is a single `<column> <operator> <value>` clause with no
//! separators beyond the operator token itself. Parsing scans a fixed
//! priority list of operators and splits the clause at the first operator
//! whose first occurrence sits past the start of the clause, so `>=` is
//! never mis-split into `>` and `=`.
//!
//! The scan looks at the first occurrence of each operator only. A value
//! that itself contains an operator-like substring before the intended
//! operator will mis-parse; that behavior is pinned by tests below and
//! must not change without a compatibility decision.

use crate::table::{parse_number, Row, Value};

use super::errors::{AggregateError, AggregateResult};

/// Supported comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    GreaterOrEqual,
    LessOrEqual,
    NotEqual,
    Greater,
    Less,
    Equal,
    Like,
    In,
}

/// Operator tokens in scan priority order. Two-character tokens come
/// before their one-character prefixes.
const OPERATOR_PRIORITY: &[(&str, CompareOp)] = &[
    (">=", CompareOp::GreaterOrEqual),
    ("<=", CompareOp::LessOrEqual),
    ("<>", CompareOp::NotEqual),
    ("!=", CompareOp::NotEqual),
    (">", CompareOp::Greater),
    ("<", CompareOp::Less),
    ("=", CompareOp::Equal),
    ("LIKE", CompareOp::Like),
    ("IN", CompareOp::In),
];

/// A parsed filter clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub column: String,
    pub op: CompareOp,
    /// Raw value text; interpretation depends on the operator
    pub value: String,
}

impl Condition {
    /// Parses a clause of the form `<column> <operator> <value>`.
    ///
    /// Operator matching is case-insensitive. An operator whose first
    /// occurrence is at index 0 is skipped (there would be no column text
    /// before it) and the scan moves to the next operator in priority
    /// order.
    pub fn parse(condition: &str) -> AggregateResult<Condition> {
        let trimmed = condition.trim();
        let upper = trimmed.to_ascii_uppercase();

        for (token, op) in OPERATOR_PRIORITY {
            let Some(index) = upper.find(token) else {
                continue;
            };
            if index == 0 {
                continue;
            }

            let column = trimmed[..index].trim();
            let value = trimmed[index + token.len()..].trim();

            if column.is_empty() {
                return Err(AggregateError::condition_parse(
                    condition,
                    "column name is empty",
                ));
            }
            if value.is_empty() {
                return Err(AggregateError::condition_parse(
                    condition,
                    "filter value is empty",
                ));
            }

            return Ok(Condition {
                column: column.to_string(),
                op: *op,
                value: value.to_string(),
            });
        }

        Err(AggregateError::condition_parse(
            condition,
            "no supported operator found (=, <>, !=, >, <, >=, <=, LIKE, IN)",
        ))
    }

    /// Evaluates this condition against a row.
    ///
    /// A row without the column never matches, regardless of operator.
    pub fn matches(&self, row: &Row) -> bool {
        let Some(cell) = row.get(&self.column) else {
            return false;
        };

        match self.op {
            CompareOp::Equal => equal(cell, &self.value),
            CompareOp::NotEqual => !equal(cell, &self.value),
            CompareOp::Greater => greater(cell, &self.value),
            CompareOp::Less => less(cell, &self.value),
            CompareOp::GreaterOrEqual => greater(cell, &self.value) || equal(cell, &self.value),
            CompareOp::LessOrEqual => less(cell, &self.value) || equal(cell, &self.value),
            CompareOp::Like => like(cell, &self.value),
            CompareOp::In => in_list(cell, &self.value),
        }
    }
}

/// Numeric-aware equality. A null cell matches only the exact literal
/// `NULL` or `null`.
fn equal(cell: &Value, filter: &str) -> bool {
    if cell.is_null() {
        return filter == "NULL" || filter == "null";
    }

    if let (Some(a), Some(b)) = (cell.as_number(), parse_number(filter)) {
        return a == b;
    }

    cell.render().to_lowercase() == filter.to_lowercase()
}

/// Numeric comparison when both sides parse, else case-insensitive
/// lexicographic. Null never satisfies an ordering.
fn greater(cell: &Value, filter: &str) -> bool {
    if cell.is_null() {
        return false;
    }

    if let (Some(a), Some(b)) = (cell.as_number(), parse_number(filter)) {
        return a > b;
    }

    cell.render().to_lowercase() > filter.to_lowercase()
}

fn less(cell: &Value, filter: &str) -> bool {
    if cell.is_null() {
        return false;
    }

    if let (Some(a), Some(b)) = (cell.as_number(), parse_number(filter)) {
        return a < b;
    }

    cell.render().to_lowercase() < filter.to_lowercase()
}

/// `%` is a prefix/suffix wildcard only, never embedded:
/// `%x%` contains, `%x` ends-with, `x%` starts-with, `x` exact.
/// All matching is case-insensitive. Null never matches.
fn like(cell: &Value, pattern: &str) -> bool {
    if cell.is_null() {
        return false;
    }

    let text = cell.render().to_lowercase();
    let starts_with_wildcard = pattern.starts_with('%');
    let ends_with_wildcard = pattern.ends_with('%');
    let needle = pattern.trim_matches('%').to_lowercase();

    if starts_with_wildcard && ends_with_wildcard {
        text.contains(&needle)
    } else if starts_with_wildcard {
        text.ends_with(&needle)
    } else if ends_with_wildcard {
        text.starts_with(&needle)
    } else {
        text == needle
    }
}

/// Comma-separated literal list. A numeric cell is matched numerically
/// against elements that also parse; if none match, the case-insensitive
/// text match still runs. Null never matches.
fn in_list(cell: &Value, list: &str) -> bool {
    if cell.is_null() {
        return false;
    }

    let elements: Vec<&str> = list.split(',').map(str::trim).collect();

    if let Some(n) = cell.as_number() {
        let numeric_hit = elements
            .iter()
            .filter_map(|e| parse_number(e))
            .any(|m| m == n);
        if numeric_hit {
            return true;
        }
    }

    let text = cell.render().to_lowercase();
    elements.iter().any(|e| e.to_lowercase() == text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: Vec<(&str, Value)>) -> Row {
        Row::from_pairs(pairs)
    }

    #[test]
    fn test_parse_simple_equality() {
        let cond = Condition::parse("id = 2").unwrap();
        assert_eq!(cond.column, "id");
        assert_eq!(cond.op, CompareOp::Equal);
        assert_eq!(cond.value, "2");
    }

    #[test]
    fn test_parse_greater_or_equal_not_split() {
        // ">=" must win over ">" and "="
        let cond = Condition::parse("salary >= 60000").unwrap();
        assert_eq!(cond.op, CompareOp::GreaterOrEqual);
        assert_eq!(cond.value, "60000");
    }

    #[test]
    fn test_parse_like_case_insensitive() {
        let cond = Condition::parse("name like %li%").unwrap();
        assert_eq!(cond.op, CompareOp::Like);
        assert_eq!(cond.value, "%li%");
    }

    #[test]
    fn test_parse_in_list() {
        let cond = Condition::parse("id IN 1,3,4").unwrap();
        assert_eq!(cond.op, CompareOp::In);
        assert_eq!(cond.value, "1,3,4");
    }

    #[test]
    fn test_parse_no_operator_fails() {
        let result = Condition::parse("salary");
        assert!(matches!(
            result,
            Err(AggregateError::ConditionParse { .. })
        ));
    }

    #[test]
    fn test_parse_empty_value_fails() {
        let result = Condition::parse("salary >");
        assert!(matches!(
            result,
            Err(AggregateError::ConditionParse { .. })
        ));
    }

    #[test]
    fn test_parse_operator_at_start_skipped() {
        // "=" at index 0 leaves no column text; scan must not select it
        let result = Condition::parse("= 5");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_value_containing_operator_misparses() {
        // First-occurrence scan: the ">" inside the value wins over the
        // intended "=". Pinned behavior.
        let cond = Condition::parse("note = a>b").unwrap();
        assert_eq!(cond.op, CompareOp::Greater);
        assert_eq!(cond.column, "note = a");
        assert_eq!(cond.value, "b");
    }

    #[test]
    fn test_numeric_greater_than() {
        let cond = Condition::parse("salary > 60000").unwrap();
        assert!(cond.matches(&row(vec![("salary", Value::Integer(75000))])));
        assert!(!cond.matches(&row(vec![("salary", Value::Integer(60000))])));
        assert!(!cond.matches(&row(vec![("salary", Value::Integer(50000))])));
    }

    #[test]
    fn test_text_numbers_compare_numerically() {
        // Checkpoint reloads produce text; comparisons must still be numeric
        let cond = Condition::parse("salary > 60000").unwrap();
        assert!(cond.matches(&row(vec![("salary", Value::from("75000"))])));
        assert!(!cond.matches(&row(vec![("salary", Value::from("9"))])));
    }

    #[test]
    fn test_equality_is_case_insensitive_text() {
        let cond = Condition::parse("name = ALICE").unwrap();
        assert!(cond.matches(&row(vec![("name", Value::from("Alice"))])));
    }

    #[test]
    fn test_null_equality_literal() {
        let cond = Condition::parse("name = NULL").unwrap();
        assert!(cond.matches(&row(vec![("name", Value::Null)])));

        let cond = Condition::parse("name = Alice").unwrap();
        assert!(!cond.matches(&row(vec![("name", Value::Null)])));
    }

    #[test]
    fn test_null_never_satisfies_ordering() {
        let cond = Condition::parse("salary > 0").unwrap();
        assert!(!cond.matches(&row(vec![("salary", Value::Null)])));
        let cond = Condition::parse("salary < 0").unwrap();
        assert!(!cond.matches(&row(vec![("salary", Value::Null)])));
    }

    #[test]
    fn test_missing_column_excludes_row() {
        let cond = Condition::parse("salary > 0").unwrap();
        assert!(!cond.matches(&row(vec![("name", Value::from("Alice"))])));
    }

    #[test]
    fn test_not_equal() {
        let cond = Condition::parse("id <> 2").unwrap();
        assert!(cond.matches(&row(vec![("id", Value::Integer(1))])));
        assert!(!cond.matches(&row(vec![("id", Value::Integer(2))])));
    }

    #[test]
    fn test_like_contains() {
        let cond = Condition::parse("name LIKE %li%").unwrap();
        assert!(cond.matches(&row(vec![("name", Value::from("Alice"))])));
        assert!(cond.matches(&row(vec![("name", Value::from("Charlie"))])));
        assert!(!cond.matches(&row(vec![("name", Value::from("Bob"))])));
    }

    #[test]
    fn test_like_prefix_and_suffix() {
        let starts = Condition::parse("name LIKE Al%").unwrap();
        assert!(starts.matches(&row(vec![("name", Value::from("Alice"))])));
        assert!(!starts.matches(&row(vec![("name", Value::from("Bob"))])));

        let ends = Condition::parse("name LIKE %ie").unwrap();
        assert!(ends.matches(&row(vec![("name", Value::from("Charlie"))])));
        assert!(!ends.matches(&row(vec![("name", Value::from("Alice"))])));
    }

    #[test]
    fn test_like_without_wildcard_is_exact() {
        let cond = Condition::parse("name LIKE alice").unwrap();
        assert!(cond.matches(&row(vec![("name", Value::from("Alice"))])));
        assert!(!cond.matches(&row(vec![("name", Value::from("Alice Smith"))])));
    }

    #[test]
    fn test_in_numeric_and_text() {
        let cond = Condition::parse("id IN 1,3,4").unwrap();
        assert!(cond.matches(&row(vec![("id", Value::Integer(1))])));
        assert!(cond.matches(&row(vec![("id", Value::from("3"))])));
        assert!(!cond.matches(&row(vec![("id", Value::Integer(2))])));

        let cond = Condition::parse("name IN alice, bob").unwrap();
        assert!(cond.matches(&row(vec![("name", Value::from("Bob"))])));
        assert!(!cond.matches(&row(vec![("name", Value::from("Carol"))])));
    }

    #[test]
    fn test_in_null_never_matches() {
        let cond = Condition::parse("id IN 1,2").unwrap();
        assert!(!cond.matches(&row(vec![("id", Value::Null)])));
    }
}
