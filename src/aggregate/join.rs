//! Equality joins between row sets
//!
//! For every left row, all right rows satisfying the conjunction of join
//! conditions are found. Each match emits one projected output row (a
//! genuine fan-out, not first-match-wins). An unmatched left row emits
//! nothing for an inner join and exactly one null-right-padded row for a
//! left join.
//!
//! The right side is indexed into a hash multimap keyed by the canonical
//! spelling of the join-key tuple, so the cost is near O(left + right)
//! while output order and semantics stay identical to the naive
//! nested-loop scan: left order outermost, right order within one left
//! row's matches.

use std::collections::HashMap;

use crate::config::{JoinCondition, SelectColumn, SelectSide};
use crate::table::{Row, RowSet, Value};

use super::errors::{AggregateError, AggregateResult};

/// Join flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    /// Unmatched left rows are dropped
    Inner,
    /// Unmatched left rows emit one row with null right-side columns
    Left,
}

/// Joins `left` and `right` on the conjunction of `conditions`,
/// projecting each output row through `select`.
///
/// Every condition operator must be `=`; anything else fails before any
/// output row is produced.
pub fn join(
    left: &RowSet,
    right: &RowSet,
    conditions: &[JoinCondition],
    select: &[SelectColumn],
    kind: JoinKind,
) -> AggregateResult<RowSet> {
    for cond in conditions {
        if cond.operator != "=" {
            return Err(AggregateError::UnsupportedOperation(format!(
                "join operator '{}' (only '=' is supported)",
                cond.operator
            )));
        }
    }

    // Index right rows by canonical join key. Rows with a null or absent
    // key column are left out: null never satisfies equality.
    let mut by_key: HashMap<Vec<String>, Vec<usize>> = HashMap::new();
    for (index, row) in right.iter().enumerate() {
        if let Some(key) = join_key(row, conditions, |c| &c.right_column) {
            by_key.entry(key).or_default().push(index);
        }
    }

    let mut result = RowSet::new();
    for left_row in left {
        let matches = join_key(left_row, conditions, |c| &c.left_column)
            .and_then(|key| by_key.get(&key));

        match matches {
            Some(indices) => {
                for &index in indices {
                    result.push(project(left_row, Some(&right[index]), select));
                }
            }
            None => {
                if kind == JoinKind::Left {
                    result.push(project(left_row, None, select));
                }
            }
        }
    }

    Ok(result)
}

/// Canonical key for one row over the join-condition columns, or None if
/// any key cell is null or absent.
///
/// Numeric cells collapse to one spelling so `Integer(1)` and `Text("1.0")`
/// key identically; everything else keys by rendered text. The class
/// prefix keeps numeric and text keys from colliding.
fn join_key<'a>(
    row: &Row,
    conditions: &'a [JoinCondition],
    column: impl Fn(&'a JoinCondition) -> &'a String,
) -> Option<Vec<String>> {
    conditions
        .iter()
        .map(|cond| {
            let value = row.get(column(cond))?;
            if value.is_null() {
                return None;
            }
            Some(match value.as_number() {
                Some(n) => format!("n:{}", n),
                None => format!("t:{}", value.render()),
            })
        })
        .collect()
}

/// Builds one output row by pulling each selected column from its side.
/// An absent column projects to null; for an unmatched left join row the
/// whole right side is absent.
fn project(left_row: &Row, right_row: Option<&Row>, select: &[SelectColumn]) -> Row {
    let mut out = Row::new();
    for sc in select {
        let value = match sc.side {
            SelectSide::Left => left_row.get(&sc.column).cloned().unwrap_or(Value::Null),
            SelectSide::Right => right_row
                .and_then(|row| row.get(&sc.column))
                .cloned()
                .unwrap_or(Value::Null),
        };
        out.set(sc.column.clone(), value);
    }
    out
}
