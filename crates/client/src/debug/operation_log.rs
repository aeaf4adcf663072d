//! In-memory operation log for debugging recent client operations

use crate::ReasoningLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

/// Type of operation performed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum OperationType {
    Query,
    ListDatabases,
    OnlineDatabase,
    OfflineDatabase,
    DatabaseSize,
}

impl std::fmt::Display for OperationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationType::Query => write!(f, "query"),
            OperationType::ListDatabases => write!(f, "list_databases"),
            OperationType::OnlineDatabase => write!(f, "online_database"),
            OperationType::OfflineDatabase => write!(f, "offline_database"),
            OperationType::DatabaseSize => write!(f, "database_size"),
        }
    }
}

/// A single operation entry in the log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationEntry {
    /// When the operation was started
    pub timestamp: DateTime<Utc>,
    pub operation_type: OperationType,
    /// Path the request was sent to, relative to the endpoint
    pub endpoint: String,
    pub database: Option<String>,
    /// Reasoning level in effect (queries only)
    pub reasoning: Option<ReasoningLevel>,
    pub success: bool,
    /// Number of bindings returned (queries only)
    pub result_count: Option<usize>,
    pub duration_ms: u64,
    pub error: Option<String>,
    /// SPARQL text (queries only)
    pub query: Option<String>,
}

impl OperationEntry {
    pub fn new(operation_type: OperationType, endpoint: String) -> Self {
        Self {
            timestamp: Utc::now(),
            operation_type,
            endpoint,
            database: None,
            reasoning: None,
            success: false,
            result_count: None,
            duration_ms: 0,
            error: None,
            query: None,
        }
    }

    pub fn with_database(mut self, database: &str) -> Self {
        self.database = Some(database.to_string());
        self
    }

    pub fn with_query(mut self, query: &str, reasoning: Option<ReasoningLevel>) -> Self {
        self.query = Some(query.to_string());
        self.reasoning = reasoning;
        self
    }

    /// Mark the operation as successful
    pub fn success(mut self, result_count: Option<usize>, duration_ms: u64) -> Self {
        self.success = true;
        self.result_count = result_count;
        self.duration_ms = duration_ms;
        self
    }

    /// Mark the operation as failed
    pub fn failure(mut self, error: String, duration_ms: u64) -> Self {
        self.success = false;
        self.error = Some(error);
        self.duration_ms = duration_ms;
        self
    }
}

/// Thread-safe ring buffer for storing recent operations.
///
/// Cloning shares the underlying buffer.
#[derive(Clone, Debug)]
pub struct OperationLog {
    entries: Arc<RwLock<VecDeque<OperationEntry>>>,
    max_size: usize,
}

impl OperationLog {
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: Arc::new(RwLock::new(VecDeque::with_capacity(max_size))),
            max_size,
        }
    }

    /// Add an operation, evicting the oldest one when full
    pub fn push(&self, entry: OperationEntry) {
        if self.max_size == 0 {
            return;
        }
        if let Ok(mut entries) = self.entries.write() {
            if entries.len() >= self.max_size {
                entries.pop_front();
            }
            entries.push_back(entry);
        }
    }

    /// All entries, newest last
    pub fn get_all(&self) -> Vec<OperationEntry> {
        if let Ok(entries) = self.entries.read() {
            entries.iter().cloned().collect()
        } else {
            Vec::new()
        }
    }

    /// The most recent `n` entries, newest last
    pub fn get_recent(&self, n: usize) -> Vec<OperationEntry> {
        if let Ok(entries) = self.entries.read() {
            let skip = entries.len().saturating_sub(n);
            entries.iter().skip(skip).cloned().collect()
        } else {
            Vec::new()
        }
    }

    pub fn last(&self) -> Option<OperationEntry> {
        self.entries
            .read()
            .ok()
            .and_then(|entries| entries.back().cloned())
    }

    /// SPARQL text of the most recent query operation
    pub fn get_last_query(&self) -> Option<String> {
        if let Ok(entries) = self.entries.read() {
            entries
                .iter()
                .rev()
                .find(|entry| matches!(entry.operation_type, OperationType::Query))
                .and_then(|entry| entry.query.clone())
        } else {
            None
        }
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }

    pub fn len(&self) -> usize {
        if let Ok(entries) = self.entries.read() {
            entries.len()
        } else {
            0
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }
}

impl Default for OperationLog {
    fn default() -> Self {
        Self::new(super::DEFAULT_OPERATION_LOG_SIZE)
    }
}
