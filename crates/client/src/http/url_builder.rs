//! URL building utilities for Stardog HTTP endpoints

use url::Url;

/// Builds request URLs relative to the configured endpoint.
///
/// Path segments are percent-encoded; the endpoint always ends in `/`, so
/// segments are appended directly beneath it.
#[derive(Debug)]
pub struct UrlBuilder<'a> {
    endpoint: &'a Url,
    parts: Vec<String>,
    query_params: Vec<(String, String)>,
}

impl<'a> UrlBuilder<'a> {
    pub fn new(endpoint: &'a Url) -> Self {
        Self {
            endpoint,
            parts: Vec::new(),
            query_params: Vec::new(),
        }
    }

    /// Add a fixed path segment (`query`, `size`, `online`, ...)
    pub fn endpoint(mut self, endpoint: &str) -> Self {
        self.parts.push(endpoint.to_string());
        self
    }

    /// Add a database name as a path segment
    pub fn database(mut self, db: &str) -> Self {
        self.parts.push(urlencoding::encode(db).into_owned());
        self
    }

    /// Prefix for the administration API: `admin/databases`
    pub fn admin_databases(self) -> Self {
        self.endpoint("admin").endpoint("databases")
    }

    /// Add a query parameter with URL encoding
    pub fn query_encoded(mut self, key: &str, value: &str) -> Self {
        self.query_params
            .push((key.to_string(), urlencoding::encode(value).into_owned()));
        self
    }

    /// Add `limit` and `offset` parameters
    pub fn pagination(mut self, limit: u64, offset: u64) -> Self {
        self.query_params.extend([
            ("limit".to_string(), limit.to_string()),
            ("offset".to_string(), offset.to_string()),
        ]);
        self
    }

    /// Build the final URL string
    pub fn build(self) -> String {
        let mut url = format!("{}{}", self.endpoint, self.parts.join("/"));

        if !self.query_params.is_empty() {
            let query_string = self
                .query_params
                .into_iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<_>>()
                .join("&");
            url.push('?');
            url.push_str(&query_string);
        }

        url
    }
}
