//! Debugging support for the Stardog client
//!
//! Every client keeps an in-memory ring buffer of its recent operations,
//! including timing, result counts and failures. Clones of a client share
//! the same log.

pub mod operation_log;

pub use operation_log::{OperationEntry, OperationLog, OperationType};

/// Number of operations kept by a client's log unless configured otherwise.
pub const DEFAULT_OPERATION_LOG_SIZE: usize = 50;
