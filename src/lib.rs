//! blendpipe - resumable aggregation of query results from multiple
//! relational sources
//!
//! Raw source queries are executed once and cached as delimited-text
//! checkpoints; derived datasets are computed in memory by an ordered
//! pipeline of union/filter/join operations over the cached row sets.

pub mod aggregate;
pub mod checkpoint;
pub mod cli;
pub mod config;
pub mod observability;
pub mod pipeline;
pub mod source;
pub mod table;
