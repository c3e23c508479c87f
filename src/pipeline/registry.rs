//! Write-once dataset registry
//!
//! Run-scoped map from dataset name to its row set. Once a name is
//! populated — by execution or by checkpoint load — it is never mutated
//! or recomputed during that run. This is the invariant that makes a
//! partially completed run resumable.

use std::collections::HashMap;

use crate::aggregate::DatasetLookup;
use crate::table::RowSet;

use super::errors::{PipelineError, PipelineResult};

/// Run-scoped, write-once map from dataset name to row set.
#[derive(Default)]
pub struct Registry {
    datasets: HashMap<String, RowSet>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            datasets: HashMap::new(),
        }
    }

    /// Registers a dataset. A second insert under the same name is an
    /// invariant violation and fails without touching the existing entry.
    pub fn insert(&mut self, name: impl Into<String>, rows: RowSet) -> PipelineResult<()> {
        let name = name.into();
        if self.datasets.contains_key(&name) {
            return Err(PipelineError::DatasetAlreadyRegistered(name));
        }
        self.datasets.insert(name, rows);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&RowSet> {
        self.datasets.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.datasets.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

impl DatasetLookup for Registry {
    fn dataset(&self, name: &str) -> Option<&RowSet> {
        self.get(name)
    }
}
