//! Database administration operations

use {
    crate::{
        debug::{OperationEntry, OperationType},
        ClientError, RequestKind,
    },
    reqwest::{header::ACCEPT, Method},
    serde::{Deserialize, Serialize},
    serde_json::json,
    std::time::{Duration, Instant},
    tracing::{debug, instrument},
};

/// How the server treats open connections when a database changes state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OnlineStrategy {
    /// Wait for open connections to finish
    Wait,
    /// Proceed immediately
    #[default]
    NoWait,
}

#[derive(Debug, Deserialize)]
struct DatabaseList {
    databases: Vec<String>,
}

/// Database administration methods for the Stardog HTTP client
impl super::client::QueryClient {
    /// Lists the databases on the server.
    #[instrument(name = "stardog.database.list", skip(self), err)]
    pub async fn list_dbs(&self) -> anyhow::Result<Vec<String>> {
        let start = Instant::now();
        let uri = self.build_url().admin_databases().build();
        let entry = OperationEntry::new(OperationType::ListDatabases, "/admin/databases".to_string());

        let outcome = async {
            debug!("GET {}", &uri);
            let _permit = self.acquire_slot().await?;
            let builder = self
                .request(Method::GET, &uri)
                .header(ACCEPT, "application/json");
            let res = self.send(builder, &uri).await?;
            let res = self.check_status(res, None, RequestKind::Admin).await?;
            let list: DatabaseList = self.parse_response(res).await?;
            Ok::<_, anyhow::Error>(list.databases)
        }
        .await;

        self.record_operation(entry, start, &outcome, |dbs| Some(dbs.len()));
        outcome
    }

    /// Brings a database online.
    ///
    /// # Example
    /// ```rust,no_run
    /// # use stardog_client::*;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = QueryClient::local_node()?;
    /// client.online_db("nodeDB", OnlineStrategy::NoWait).await?;
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(name = "stardog.database.online", skip(self), fields(db = %db), err)]
    pub async fn online_db(&self, db: &str, strategy: OnlineStrategy) -> anyhow::Result<()> {
        let body = json!({ "strategy": strategy });
        self.change_db_state(db, "online", OperationType::OnlineDatabase, body)
            .await
    }

    /// Takes a database offline, giving open connections up to `timeout`
    /// when the strategy is [`OnlineStrategy::Wait`].
    #[instrument(name = "stardog.database.offline", skip(self), fields(db = %db), err)]
    pub async fn offline_db(
        &self,
        db: &str,
        strategy: OnlineStrategy,
        timeout: Duration,
    ) -> anyhow::Result<()> {
        self.change_db_state(
            db,
            "offline",
            OperationType::OfflineDatabase,
            offline_body(strategy, timeout),
        )
            .await
    }

    /// Number of triples stored in a database.
    #[instrument(name = "stardog.database.size", skip(self), fields(db = %db), err)]
    pub async fn get_db_size(&self, db: &str) -> anyhow::Result<u64> {
        require_database(db)?;

        let start = Instant::now();
        let uri = self.build_url().database(db).endpoint("size").build();
        let entry = OperationEntry::new(OperationType::DatabaseSize, format!("/{}/size", db))
            .with_database(db);

        let outcome = async {
            debug!("GET {}", &uri);
            let _permit = self.acquire_slot().await?;
            let res = self.send(self.request(Method::GET, &uri), &uri).await?;
            let res = self.check_status(res, Some(db), RequestKind::Admin).await?;
            let text = self.read_text(res).await?;
            let size = text
                .trim()
                .parse::<u64>()
                .map_err(|err| ClientError::InvalidResponse {
                    url: uri.clone(),
                    reason: format!("expected a triple count, got '{}': {}", text.trim(), err),
                })?;
            Ok::<_, anyhow::Error>(size)
        }
        .await;

        self.record_operation(entry, start, &outcome, |_| None);
        outcome
    }

    async fn change_db_state(
        &self,
        db: &str,
        state: &str,
        operation_type: OperationType,
        body: serde_json::Value,
    ) -> anyhow::Result<()> {
        require_database(db)?;

        let start = Instant::now();
        let uri = self
            .build_url()
            .admin_databases()
            .database(db)
            .endpoint(state)
            .build();
        let entry = OperationEntry::new(operation_type, format!("/admin/databases/{}/{}", db, state))
            .with_database(db);

        let outcome = async {
            debug!("PUT {} {}", &uri, &body);
            let _permit = self.acquire_slot().await?;
            let builder = self.request(Method::PUT, &uri).json(&body);
            let res = self.send(builder, &uri).await?;
            self.check_status(res, Some(db), RequestKind::Admin).await?;
            debug!("database {} is now {}", db, state);
            Ok::<_, anyhow::Error>(())
        }
        .await;

        self.record_operation(entry, start, &outcome, |_| None);
        outcome
    }
}

/// Request body for taking a database offline; the timeout is sent in
/// milliseconds, saturating at `u64::MAX`.
fn offline_body(strategy: OnlineStrategy, timeout: Duration) -> serde_json::Value {
    json!({
        "strategy": strategy,
        "timeout": u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
    })
}

fn require_database(db: &str) -> Result<(), ClientError> {
    if db.trim().is_empty() {
        return Err(ClientError::InvalidRequest(
            "database name must not be empty".to_string(),
        ));
    }
    Ok(())
}
