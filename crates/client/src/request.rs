use crate::ClientError;
use serde::{Deserialize, Serialize};

/// A single SPARQL query against one database, with pagination.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct QueryRequest {
    /// Database to query. Must not be empty.
    pub database: String,
    /// SPARQL query text, sent to the server as-is.
    pub query: String,
    /// Maximum number of solutions to return.
    pub limit: u64,
    /// Number of leading solutions to skip.
    pub offset: u64,
}

impl QueryRequest {
    pub const DEFAULT_LIMIT: u64 = 100;

    /// Create a request for the first [`Self::DEFAULT_LIMIT`] solutions.
    pub fn new(database: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            query: query.into(),
            limit: Self::DEFAULT_LIMIT,
            offset: 0,
        }
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    /// The request for the page following this one.
    pub fn next_page(&self) -> Self {
        Self {
            offset: self.offset.saturating_add(self.limit),
            ..self.clone()
        }
    }

    /// Checks that can be made without contacting the server.
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.database.trim().is_empty() {
            return Err(ClientError::InvalidRequest(
                "database name must not be empty".to_string(),
            ));
        }
        if self.query.trim().is_empty() {
            return Err(ClientError::InvalidRequest(
                "query text must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
