//! SPARQL query execution

use {
    crate::{
        debug::{OperationEntry, OperationType},
        ClientError, QueryRequest, QueryResult, RequestKind, CONNECTION_STRING_HEADER, SPARQL_RESULTS_JSON,
    },
    reqwest::{header::ACCEPT, Method},
    std::time::Instant,
    tap::TapFallible,
    tracing::{debug, instrument, trace, warn},
};

/// Query execution methods for the Stardog HTTP client
impl super::client::QueryClient {
    /// Executes a SPARQL query and returns its solutions.
    ///
    /// The request goes to `{endpoint}{database}/query` with the configured
    /// credentials and, when set, the reasoning level. The returned result
    /// never holds more than `request.limit` bindings; an empty result is a
    /// success, not an error.
    ///
    /// # Errors
    /// The error wraps a [`ClientError`]: `InvalidRequest` for an empty
    /// database name or query, `Connection` when the server cannot be
    /// reached, `Authentication` for rejected credentials, `UnknownDatabase`
    /// and `Query` for requests the server refuses.
    ///
    /// # Example
    /// ```rust,no_run
    /// # use stardog_client::*;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = QueryClient::local_node()?;
    /// let request = QueryRequest::new("nodeDB", "select distinct ?s where { ?s ?p ?o }")
    ///     .limit(20)
    ///     .offset(0);
    /// let result = client.query(&request).await?;
    /// assert!(result.len() <= 20);
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(
        name = "stardog.query.execute",
        skip(self, request),
        fields(
            db = %request.database,
            limit = request.limit,
            offset = request.offset,
            reasoning = ?self.reasoning()
        ),
        err
    )]
    pub async fn query(&self, request: &QueryRequest) -> anyhow::Result<QueryResult> {
        request.validate()?;

        let start = Instant::now();
        let entry = OperationEntry::new(
            OperationType::Query,
            format!("/{}/query", request.database),
        )
        .with_database(&request.database)
        .with_query(&request.query, self.reasoning());

        let outcome = self.execute_query(request).await;

        self.record_operation(entry, start, &outcome, |result| Some(result.len()));

        outcome
    }

    /// Runs `query` against the configured default database.
    pub async fn query_with_default(
        &self,
        query: &str,
        limit: u64,
        offset: u64,
    ) -> anyhow::Result<QueryResult> {
        let database = self.config.database().clone().ok_or_else(|| {
            ClientError::InvalidRequest("no default database configured".to_string())
        })?;

        let request = QueryRequest::new(database, query).limit(limit).offset(offset);
        self.query(&request).await
    }

    async fn execute_query(&self, request: &QueryRequest) -> anyhow::Result<QueryResult> {
        let uri = self
            .build_url()
            .database(&request.database)
            .endpoint("query")
            .query_encoded("query", &request.query)
            .pagination(request.limit, request.offset)
            .build();

        debug!("GET {}", &uri);

        let mut builder = self
            .request(Method::GET, &uri)
            .header(ACCEPT, SPARQL_RESULTS_JSON);

        if let Some(connection) = self.reasoning().and_then(|level| level.connection_string()) {
            builder = builder.header(CONNECTION_STRING_HEADER, connection);
        }

        let _permit = self.acquire_slot().await?;

        let res = self
            .send(builder, &uri)
            .await
            .tap_err(|err| debug!("query transport failure: {}", err))?;
        let res = self
            .check_status(res, Some(&request.database), RequestKind::Query)
            .await?;
        let mut result: QueryResult = self.parse_response(res).await?;

        let limit = usize::try_from(request.limit).unwrap_or(usize::MAX);
        if result.len() > limit {
            warn!(
                "server returned {} bindings for limit {}, truncating",
                result.len(),
                limit
            );
            result.truncate(limit);
        }

        trace!("query returned {} bindings", result.len());

        Ok(result)
    }
}
