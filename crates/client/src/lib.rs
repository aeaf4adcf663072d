//! Asynchronous HTTP client for the Stardog graph database.
//!
//! The central type is [`QueryClient`], which holds the connection settings
//! (endpoint, credentials, reasoning level) and submits SPARQL queries to a
//! database on the server:
//!
//! ```rust,no_run
//! use stardog_client::{QueryClient, QueryRequest, ReasoningLevel};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let mut client = QueryClient::new("http://localhost:5820/", "admin", "admin")?;
//! client.set_reasoning(Some(ReasoningLevel::QL));
//!
//! let request = QueryRequest::new(
//!     "nodeDBReasoning",
//!     "prefix : <http://example.org/vehicles/> select distinct ?s where { ?s a :Vehicle }",
//! )
//! .limit(20)
//! .offset(0);
//!
//! let result = client.query(&request).await?;
//! for binding in result.bindings() {
//!     println!("{}", binding["s"]);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Every operation returns `anyhow::Result`; the underlying cause is a
//! [`ClientError`] that callers can recover with `downcast_ref`.

pub use {config::*, err::*, http::*, reasoning::*, request::*, result::*};

pub mod config;
pub mod debug;
pub mod err;
mod http;
pub mod reasoning;
mod request;
pub mod result;

/// Media type of SPARQL 1.1 JSON query results.
pub const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";

/// Header carrying per-request connection options such as the reasoning level.
pub const CONNECTION_STRING_HEADER: &str = "SD-Connection-String";

/// Header the server uses to report its own error code.
pub const ERROR_CODE_HEADER: &str = "SD-Error-Code";
