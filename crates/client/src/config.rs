//! Connection settings shared by every request a client makes.

use {
    crate::{ClientError, ReasoningLevel},
    anyhow::Context,
    derive_getters::Getters,
    std::{fmt::Debug, time::Duration},
    tracing::debug,
    url::Url,
};

pub const ENV_ENDPOINT: &str = "STARDOG_ENDPOINT";
pub const ENV_USER: &str = "STARDOG_USER";
pub const ENV_PASS: &str = "STARDOG_PASS";
pub const ENV_REASONING: &str = "STARDOG_REASONING";
pub const ENV_DATABASE: &str = "STARDOG_DATABASE";
pub const ENV_TIMEOUT_SECS: &str = "STARDOG_TIMEOUT_SECS";
pub const ENV_MAX_CONCURRENT_REQUESTS: &str = "STARDOG_MAX_CONCURRENT_REQUESTS";

#[derive(Clone, Getters)]
pub struct ConnectionConfig {
    /// Base address of the server, always ending in `/`
    endpoint: Url,
    username: String,
    #[getter(skip)]
    password: String,
    #[getter(skip)]
    reasoning: Option<ReasoningLevel>,
    /// Database used by `query_with_default`
    database: Option<String>,
    #[getter(skip)]
    timeout: Option<Duration>,
    #[getter(skip)]
    max_concurrent_requests: Option<usize>,
}

impl ConnectionConfig {
    pub const DEFAULT_ENDPOINT: &'static str = "http://localhost:5820/";
    pub const DEFAULT_USER: &'static str = "admin";
    pub const DEFAULT_PASS: &'static str = "admin";

    pub fn new(endpoint: &str, user: &str, pass: &str) -> Result<Self, ClientError> {
        Ok(Self {
            endpoint: Self::parse_endpoint(endpoint)?,
            username: user.to_string(),
            password: pass.to_string(),
            reasoning: None,
            database: None,
            timeout: None,
            max_concurrent_requests: None,
        })
    }

    /// Settings for a server on this machine with the stock admin account.
    pub fn local() -> Result<Self, ClientError> {
        Self::new(Self::DEFAULT_ENDPOINT, Self::DEFAULT_USER, Self::DEFAULT_PASS)
    }

    /// Reads the `STARDOG_*` environment variables, falling back to
    /// [`ConnectionConfig::local`] values for anything unset.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`ConnectionConfig::from_env`] but reads variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint = lookup(ENV_ENDPOINT).unwrap_or_else(|| Self::DEFAULT_ENDPOINT.to_string());
        let user = lookup(ENV_USER).unwrap_or_else(|| Self::DEFAULT_USER.to_string());
        let pass = lookup(ENV_PASS).unwrap_or_else(|| Self::DEFAULT_PASS.to_string());

        let mut config = Self::new(&endpoint, &user, &pass)?;

        if let Some(level) = lookup(ENV_REASONING) {
            config.reasoning = Some(
                level
                    .parse::<ReasoningLevel>()
                    .with_context(|| format!("invalid {}", ENV_REASONING))?,
            );
        }

        config.database = lookup(ENV_DATABASE).filter(|db| !db.trim().is_empty());

        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            let secs = secs
                .trim()
                .parse::<u64>()
                .with_context(|| format!("{} must be a whole number of seconds", ENV_TIMEOUT_SECS))?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        if let Some(max) = lookup(ENV_MAX_CONCURRENT_REQUESTS) {
            let max = max.trim().parse::<usize>().with_context(|| {
                format!("{} must be a positive integer", ENV_MAX_CONCURRENT_REQUESTS)
            })?;
            config.max_concurrent_requests = Some(max).filter(|&n| n > 0);
        }

        debug!("loaded connection config from environment: {:?}", &config);

        Ok(config)
    }

    /// Parses an endpoint, appending a trailing `/` so that relative paths
    /// resolve beneath it.
    pub fn parse_endpoint(raw: &str) -> Result<Url, ClientError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ClientError::InvalidRequest(
                "endpoint must not be empty".to_string(),
            ));
        }

        let mut url = Url::parse(raw).map_err(|err| {
            ClientError::InvalidRequest(format!("invalid endpoint '{}': {}", raw, err))
        })?;

        if url.cannot_be_a_base() {
            return Err(ClientError::InvalidRequest(format!(
                "endpoint '{}' cannot be used as a base address",
                raw
            )));
        }

        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(url)
    }

    pub fn with_reasoning(mut self, reasoning: Option<ReasoningLevel>) -> Self {
        self.reasoning = reasoning;
        self
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Caps in-flight requests per client; clones of the client share the cap.
    pub fn with_max_concurrent_requests(mut self, max: usize) -> Self {
        self.max_concurrent_requests = Some(max).filter(|&n| n > 0);
        self
    }

    /// Effective reasoning level, `None` when reasoning is off.
    pub fn reasoning(&self) -> Option<ReasoningLevel> {
        self.reasoning.filter(ReasoningLevel::is_enabled)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn max_concurrent_requests(&self) -> Option<usize> {
        self.max_concurrent_requests
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }

    pub(crate) fn set_endpoint(&mut self, endpoint: &str) -> Result<(), ClientError> {
        self.endpoint = Self::parse_endpoint(endpoint)?;
        Ok(())
    }

    pub(crate) fn set_credentials(&mut self, user: &str, pass: &str) {
        self.username = user.to_string();
        self.password = pass.to_string();
    }

    pub(crate) fn set_reasoning(&mut self, reasoning: Option<ReasoningLevel>) {
        self.reasoning = reasoning;
    }

    pub(crate) fn set_database(&mut self, database: Option<String>) {
        self.database = database;
    }

    pub(crate) fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }
}

impl Debug for ConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("endpoint", &self.endpoint.as_str())
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("reasoning", &self.reasoning)
            .field("database", &self.database)
            .field("timeout", &self.timeout)
            .field("max_concurrent_requests", &self.max_concurrent_requests)
            .finish()
    }
}
