//! Data source boundary
//!
//! The wire protocol for each relational backend lives outside this
//! crate. The pipeline only needs one capability: run this query text,
//! return rows. Embedders implement [`DataSourceClient`] per backend and
//! bind instances into a [`ClientRegistry`] under the connection names
//! the configuration declares.

mod errors;

pub use errors::{SourceError, SourceResult};

use std::collections::HashMap;

use crate::table::RowSet;

/// One configured backend, reduced to query execution.
///
/// Implementations acquire a connection for the duration of a single
/// call and release it on every exit path, success or failure. Timeouts,
/// cancellation, and retries are the implementation's responsibility;
/// the pipeline never retries and propagates failures as-is.
pub trait DataSourceClient {
    /// Executes one query text against the backend and returns all rows.
    fn execute_query(&self, query: &str) -> SourceResult<RowSet>;
}

/// Clients bound by connection name.
#[derive(Default)]
pub struct ClientRegistry {
    clients: HashMap<String, Box<dyn DataSourceClient>>,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self {
            clients: HashMap::new(),
        }
    }

    /// Binds a client under a connection name. Rebinding a name replaces
    /// the previous client.
    pub fn bind(&mut self, name: impl Into<String>, client: Box<dyn DataSourceClient>) {
        self.clients.insert(name.into(), client);
    }

    pub fn get(&self, name: &str) -> Option<&dyn DataSourceClient> {
        self.clients.get(name).map(Box::as_ref)
    }

    pub fn is_bound(&self, name: &str) -> bool {
        self.clients.contains_key(name)
    }
}
