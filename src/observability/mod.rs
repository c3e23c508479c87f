//! Observability for pipeline runs

mod logger;

pub use logger::{Logger, Severity};
