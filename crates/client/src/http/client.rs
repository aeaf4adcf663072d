//! Core HTTP client struct and constructors

use {
    crate::{
        debug::{OperationEntry, OperationLog},
        ClientError, ConnectionConfig, ReasoningLevel,
    },
    reqwest::{Client, Method, RequestBuilder},
    std::{sync::Arc, time::Duration, time::Instant},
    tokio::sync::{OwnedSemaphorePermit, Semaphore},
    tracing::debug,
    url::Url,
};

use super::url_builder::UrlBuilder;

/// Client for a single Stardog server.
///
/// Configuration is changed through `&mut self` setters and read by every
/// request, so a request always sees one consistent configuration. Cloning
/// is cheap and clones share the connection pool, the operation log and the
/// concurrency limit, which makes it easy to issue queries in parallel.
#[derive(Clone, Debug)]
pub struct QueryClient {
    pub(crate) config: ConnectionConfig,
    pub(crate) http: Client,
    pub(crate) operation_log: OperationLog,
    pub(crate) limiter: Option<Arc<Semaphore>>,
}

/// Alternative name matching the HTTP module layout.
pub type StardogHttpClient = QueryClient;

impl QueryClient {
    /// Creates a client for `endpoint` using basic-auth credentials.
    ///
    /// No request is made; an unreachable server only shows up on the first
    /// operation.
    ///
    /// # Example
    /// ```rust
    /// # use stardog_client::QueryClient;
    /// let client = QueryClient::new("http://localhost:5820/", "admin", "admin")?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn new(endpoint: &str, user: &str, pass: &str) -> anyhow::Result<Self> {
        Self::from_config(ConnectionConfig::new(endpoint, user, pass)?)
    }

    /// Creates a client connected to a local Stardog instance
    /// (`http://localhost:5820/`) with the default admin account.
    pub fn local_node() -> anyhow::Result<Self> {
        Self::from_config(ConnectionConfig::local()?)
    }

    /// Creates a client from the `STARDOG_*` environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_config(ConnectionConfig::from_env()?)
    }

    pub fn from_config(config: ConnectionConfig) -> anyhow::Result<Self> {
        let http = Client::builder().build()?;

        let limiter = match config.max_concurrent_requests() {
            Some(max) if max > Semaphore::MAX_PERMITS => {
                return Err(ClientError::InvalidRequest(format!(
                    "max_concurrent_requests must be at most {}, got {}",
                    Semaphore::MAX_PERMITS,
                    max
                ))
                .into())
            }
            Some(max) => Some(Arc::new(Semaphore::new(max))),
            None => None,
        };

        debug!("created Stardog client for {}", config.endpoint());

        Ok(Self {
            config,
            http,
            operation_log: OperationLog::default(),
            limiter,
        })
    }

    /// Sets the base address of the server.
    ///
    /// Only an empty or unparseable address is rejected; a trailing `/` is
    /// added when missing.
    pub fn set_endpoint(&mut self, endpoint: &str) -> anyhow::Result<()> {
        self.config.set_endpoint(endpoint)?;
        debug!("endpoint set to {}", self.config.endpoint());
        Ok(())
    }

    /// Sets the basic-auth credentials sent with every subsequent request.
    pub fn set_credentials(&mut self, user: &str, pass: &str) {
        self.config.set_credentials(user, pass);
    }

    /// Sets the reasoning level applied to subsequent queries.
    /// `None` (or [`ReasoningLevel::None`]) disables reasoning.
    #[pseudonym::alias(set_reasoning_level)]
    pub fn set_reasoning(&mut self, reasoning: Option<ReasoningLevel>) {
        self.config.set_reasoning(reasoning);
    }

    /// Sets the database used by [`QueryClient::query_with_default`].
    pub fn set_default_database(&mut self, database: Option<String>) {
        self.config.set_database(database);
    }

    /// Sets a per-request timeout. There is none by default.
    pub fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.config.set_timeout(timeout);
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    pub fn endpoint(&self) -> &Url {
        self.config.endpoint()
    }

    pub fn reasoning(&self) -> Option<ReasoningLevel> {
        self.config.reasoning()
    }

    /// Recent operations made through this client and its clones.
    pub fn operation_log(&self) -> &OperationLog {
        &self.operation_log
    }

    pub fn last_operation(&self) -> Option<OperationEntry> {
        self.operation_log.last()
    }

    /// Returns true when the server answers authenticated requests.
    pub async fn is_running(&self) -> bool {
        self.list_dbs().await.is_ok()
    }

    pub(crate) fn build_url(&self) -> UrlBuilder {
        UrlBuilder::new(self.config.endpoint())
    }

    /// Starts a request carrying the configured credentials and timeout.
    pub(crate) fn request(&self, method: Method, uri: &str) -> RequestBuilder {
        let builder = self
            .http
            .request(method, uri)
            .basic_auth(self.config.username(), Some(self.config.password()));

        match self.config.timeout() {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        }
    }

    /// Sends a request, mapping transport failures to [`ClientError::Connection`].
    pub(crate) async fn send(
        &self,
        request: RequestBuilder,
        uri: &str,
    ) -> Result<reqwest::Response, ClientError> {
        request.send().await.map_err(|source| ClientError::Connection {
            url: uri.to_string(),
            source,
        })
    }

    /// Waits for a free request slot when a concurrency limit is configured.
    pub(crate) async fn acquire_slot(&self) -> anyhow::Result<Option<OwnedSemaphorePermit>> {
        match &self.limiter {
            Some(limiter) => Ok(Some(limiter.clone().acquire_owned().await?)),
            None => Ok(None),
        }
    }

    /// Stores the outcome of an operation in the operation log.
    pub(crate) fn record_operation<T>(
        &self,
        entry: OperationEntry,
        start: Instant,
        outcome: &anyhow::Result<T>,
        result_count: impl FnOnce(&T) -> Option<usize>,
    ) {
        let duration_ms = start.elapsed().as_millis() as u64;
        let entry = match outcome {
            Ok(value) => entry.success(result_count(value), duration_ms),
            Err(err) => entry.failure(format!("{:#}", err), duration_ms),
        };
        self.operation_log.push(entry);
    }
}
