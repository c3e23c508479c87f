//! Ordered-operation interpreter for aggregations
//!
//! Maintains a running row set, starting empty, and applies each
//! configured operation in declared order. Unions and joins source their
//! operands from the registry of already-computed datasets; filters apply
//! to the running set.

use crate::config::OperationConfig;
use crate::table::RowSet;

use super::condition::Condition;
use super::errors::{AggregateError, AggregateResult};
use super::join::{join, JoinKind};

/// Read access to named datasets computed earlier in the pipeline.
pub trait DatasetLookup {
    fn dataset(&self, name: &str) -> Option<&RowSet>;
}

/// Applies aggregation operations against a dataset registry.
pub struct Aggregator<'a, R: DatasetLookup> {
    registry: &'a R,
}

impl<'a, R: DatasetLookup> Aggregator<'a, R> {
    pub fn new(registry: &'a R) -> Self {
        Self { registry }
    }

    /// Applies `operations` in order and returns the final row set.
    ///
    /// The result is deterministic: same registry contents + same
    /// operations = same rows in the same order.
    pub fn apply(&self, operations: &[OperationConfig]) -> AggregateResult<RowSet> {
        let mut current = RowSet::new();

        for op in operations {
            current = match op {
                OperationConfig::Union { query_names } => self.union(query_names)?,
                OperationConfig::Filter { condition } => Self::filter(current, condition)?,
                OperationConfig::InnerJoin {
                    left,
                    right,
                    join_conditions,
                    select_columns,
                } => self.join_from_registry(
                    left,
                    right,
                    join_conditions,
                    select_columns,
                    JoinKind::Inner,
                )?,
                OperationConfig::LeftJoin {
                    left,
                    right,
                    join_conditions,
                    select_columns,
                } => self.join_from_registry(
                    left,
                    right,
                    join_conditions,
                    select_columns,
                    JoinKind::Left,
                )?,
            };
        }

        Ok(current)
    }

    /// Concatenates the named datasets in declared order.
    fn union(&self, query_names: &[String]) -> AggregateResult<RowSet> {
        let mut result = RowSet::new();
        for name in query_names {
            let rows = self.lookup(name)?;
            result.extend(rows.iter().cloned());
        }
        Ok(result)
    }

    /// Keeps the rows of `current` satisfying the parsed clause. A blank
    /// condition is the identity transform.
    fn filter(current: RowSet, condition: &str) -> AggregateResult<RowSet> {
        if condition.trim().is_empty() {
            return Ok(current);
        }

        let parsed = Condition::parse(condition)?;
        Ok(current
            .into_iter()
            .filter(|row| parsed.matches(row))
            .collect())
    }

    /// Joins two named datasets. Join operands always come from the
    /// registry, never from the running set.
    fn join_from_registry(
        &self,
        left: &str,
        right: &str,
        conditions: &[crate::config::JoinCondition],
        select: &[crate::config::SelectColumn],
        kind: JoinKind,
    ) -> AggregateResult<RowSet> {
        let left_rows = self.lookup(left)?;
        let right_rows = self.lookup(right)?;
        join(left_rows, right_rows, conditions, select, kind)
    }

    fn lookup(&self, name: &str) -> AggregateResult<&'a RowSet> {
        self.registry
            .dataset(name)
            .ok_or_else(|| AggregateError::MissingDataset(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{JoinCondition, SelectColumn, SelectSide};
    use crate::table::{Row, Value};
    use std::collections::HashMap;

    /// Mock registry for testing
    struct MockRegistry {
        datasets: HashMap<String, RowSet>,
    }

    impl MockRegistry {
        fn new() -> Self {
            Self {
                datasets: HashMap::new(),
            }
        }

        fn with(mut self, name: &str, rows: RowSet) -> Self {
            self.datasets.insert(name.to_string(), rows);
            self
        }
    }

    impl DatasetLookup for MockRegistry {
        fn dataset(&self, name: &str) -> Option<&RowSet> {
            self.datasets.get(name)
        }
    }

    fn employees() -> RowSet {
        vec![
            Row::from_pairs([
                ("id", Value::Integer(1)),
                ("name", Value::from("Alice")),
                ("salary", Value::Integer(50000)),
            ]),
            Row::from_pairs([
                ("id", Value::Integer(2)),
                ("name", Value::from("Bob")),
                ("salary", Value::Integer(60000)),
            ]),
            Row::from_pairs([
                ("id", Value::Integer(3)),
                ("name", Value::from("Charlie")),
                ("salary", Value::Integer(75000)),
            ]),
            Row::from_pairs([
                ("id", Value::Integer(4)),
                ("name", Value::from("David")),
                ("salary", Value::Integer(55000)),
            ]),
        ]
    }

    fn contractors() -> RowSet {
        vec![Row::from_pairs([
            ("id", Value::Integer(9)),
            ("name", Value::from("Eve")),
            ("salary", Value::Integer(70000)),
        ])]
    }

    #[test]
    fn test_union_concatenates_in_declared_order() {
        let registry = MockRegistry::new()
            .with("employees", employees())
            .with("contractors", contractors());
        let aggregator = Aggregator::new(&registry);

        let result = aggregator
            .apply(&[OperationConfig::Union {
                query_names: vec!["employees".to_string(), "contractors".to_string()],
            }])
            .unwrap();

        assert_eq!(result.len(), 5);
        assert_eq!(result[0].get("name"), Some(&Value::from("Alice")));
        assert_eq!(result[4].get("name"), Some(&Value::from("Eve")));
    }

    #[test]
    fn test_union_missing_dataset_fails() {
        let registry = MockRegistry::new();
        let aggregator = Aggregator::new(&registry);

        let result = aggregator.apply(&[OperationConfig::Union {
            query_names: vec!["absent".to_string()],
        }]);

        assert!(matches!(
            result,
            Err(AggregateError::MissingDataset(name)) if name == "absent"
        ));
    }

    #[test]
    fn test_filter_after_union() {
        let registry = MockRegistry::new().with("employees", employees());
        let aggregator = Aggregator::new(&registry);

        let result = aggregator
            .apply(&[
                OperationConfig::Union {
                    query_names: vec!["employees".to_string()],
                },
                OperationConfig::Filter {
                    condition: "salary > 60000".to_string(),
                },
            ])
            .unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].get("name"), Some(&Value::from("Charlie")));
    }

    #[test]
    fn test_blank_filter_is_identity() {
        let registry = MockRegistry::new().with("employees", employees());
        let aggregator = Aggregator::new(&registry);

        let result = aggregator
            .apply(&[
                OperationConfig::Union {
                    query_names: vec!["employees".to_string()],
                },
                OperationConfig::Filter {
                    condition: "   ".to_string(),
                },
            ])
            .unwrap();

        assert_eq!(result.len(), 4);
    }

    #[test]
    fn test_empty_operation_list_yields_empty_set() {
        let registry = MockRegistry::new();
        let aggregator = Aggregator::new(&registry);
        assert!(aggregator.apply(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_join_sources_from_registry_not_running_set() {
        let departments = vec![Row::from_pairs([
            ("dept_id", Value::Integer(10)),
            ("dept_name", Value::from("IT")),
        ])];
        let staff = vec![Row::from_pairs([
            ("name", Value::from("Alice")),
            ("dept_id", Value::Integer(10)),
        ])];

        let registry = MockRegistry::new()
            .with("employees", employees())
            .with("staff", staff)
            .with("departments", departments);
        let aggregator = Aggregator::new(&registry);

        // The union result is discarded by the join; operands are named
        let result = aggregator
            .apply(&[
                OperationConfig::Union {
                    query_names: vec!["employees".to_string()],
                },
                OperationConfig::InnerJoin {
                    left: "staff".to_string(),
                    right: "departments".to_string(),
                    join_conditions: vec![JoinCondition {
                        left_column: "dept_id".to_string(),
                        right_column: "dept_id".to_string(),
                        operator: "=".to_string(),
                    }],
                    select_columns: vec![
                        SelectColumn {
                            side: SelectSide::Left,
                            column: "name".to_string(),
                        },
                        SelectColumn {
                            side: SelectSide::Right,
                            column: "dept_name".to_string(),
                        },
                    ],
                },
            ])
            .unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].get("name"), Some(&Value::from("Alice")));
        assert_eq!(result[0].get("dept_name"), Some(&Value::from("IT")));
    }

    #[test]
    fn test_filter_in_list() {
        let registry = MockRegistry::new().with("employees", employees());
        let aggregator = Aggregator::new(&registry);

        let result = aggregator
            .apply(&[
                OperationConfig::Union {
                    query_names: vec!["employees".to_string()],
                },
                OperationConfig::Filter {
                    condition: "id IN 1,3,4".to_string(),
                },
            ])
            .unwrap();

        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_filter_like() {
        let registry = MockRegistry::new().with("employees", employees());
        let aggregator = Aggregator::new(&registry);

        let result = aggregator
            .apply(&[
                OperationConfig::Union {
                    query_names: vec!["employees".to_string()],
                },
                OperationConfig::Filter {
                    condition: "name LIKE %li%".to_string(),
                },
            ])
            .unwrap();

        let names: Vec<String> = result
            .iter()
            .map(|r| r.get("name").unwrap().render())
            .collect();
        assert_eq!(names, vec!["Alice", "Charlie"]);
    }
}
