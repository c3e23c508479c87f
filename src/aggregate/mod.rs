//! Aggregation pipeline operations
//!
//! Interprets an ordered list of union/filter/join operations against a
//! registry of named row sets, producing one derived row set. Composes the
//! condition evaluator and the join engine.

mod condition;
mod engine;
mod errors;
mod join;

pub use condition::{CompareOp, Condition};
pub use engine::{Aggregator, DatasetLookup};
pub use errors::{AggregateError, AggregateResult};
pub use join::{join, JoinKind};
