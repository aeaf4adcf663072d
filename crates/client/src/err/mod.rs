mod server;

pub use server::*;

use thiserror::Error;

/// Failure cause behind every error returned by the client.
///
/// Operations return `anyhow::Result`, so match on the kind with
/// `err.downcast_ref::<ClientError>()`.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The endpoint could not be reached or the exchange broke off midway.
    #[error("could not reach Stardog at {url}: {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server rejected the configured credentials.
    #[error("authentication failed for user '{user}' (HTTP {status})")]
    Authentication { user: String, status: u16 },

    #[error("database '{0}' does not exist")]
    UnknownDatabase(String),

    /// The server refused the query itself, e.g. malformed SPARQL.
    #[error("query rejected by server (HTTP {status}): {message}")]
    Query {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("server error (HTTP {status}): {message}")]
    Server { status: u16, message: String },

    #[error("unexpected response from {url}: {reason}")]
    InvalidResponse { url: String, reason: String },

    /// Rejected before anything was sent.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ClientError::Connection { source, .. } if source.is_timeout())
    }

    /// HTTP status the server answered with, if it answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Authentication { status, .. }
            | ClientError::Query { status, .. }
            | ClientError::Server { status, .. } => Some(*status),
            ClientError::UnknownDatabase(_) => Some(404),
            _ => None,
        }
    }
}
