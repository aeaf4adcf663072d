//! Stardog HTTP Client Module
//!
//! ## Module Organization
//!
//! - `client`: Core client struct, constructors and configuration setters
//! - `query`: SPARQL query execution
//! - `database`: Database administration (listing, online/offline, size)
//! - `response`: Status checking and response parsing
//! - `url_builder`: URL construction utilities

pub mod client;
pub mod database;
pub mod query;
pub mod response;
pub mod url_builder;

pub use client::{QueryClient, StardogHttpClient};
pub use database::OnlineStrategy;
pub use url_builder::UrlBuilder;
