//! Durable row set checkpoints
//!
//! Each dataset is cached as `<results_dir>/<name>.csv` in a
//! `;`-delimited text format. The presence of the file is the resume
//! signal: a checkpointed dataset is never recomputed.

mod codec;
mod errors;
mod store;

pub use codec::{decode, encode};
pub use errors::{CheckpointError, CheckpointResult};
pub use store::CheckpointStore;
