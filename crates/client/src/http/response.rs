//! Response parsing utilities for the HTTP client

use {
    crate::{ClientError, RequestKind, ServerErrorBody, ERROR_CODE_HEADER},
    reqwest::Response,
    serde::de::DeserializeOwned,
    std::fmt::Debug,
    tracing::{debug, trace},
};

/// Response handling methods for the Stardog HTTP client
impl super::client::QueryClient {
    /// Passes successful responses through and turns every other status
    /// into the matching [`ClientError`].
    ///
    /// `database` is the database the request addressed, used to report a
    /// 404 as an unknown database; `kind` decides whether a 400 blames the
    /// query text.
    pub(crate) async fn check_status(
        &self,
        res: Response,
        database: Option<&str>,
        kind: RequestKind,
    ) -> Result<Response, ClientError> {
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }

        let url = res.url().to_string();
        let code_header = res
            .headers()
            .get(ERROR_CODE_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(|s| s.to_string());

        // the body only adds detail, losing it must not hide the status
        let body = res.text().await.unwrap_or_default();

        debug!(
            "request to {} failed with status {} (code {:?}): {}",
            &url, status, code_header, &body
        );

        Err(ServerErrorBody::parse(&body)
            .with_code_header(code_header)
            .into_error(status, self.config.username(), database, kind))
    }

    /// Reads the body as JSON into `T`.
    pub(crate) async fn parse_response<T: DeserializeOwned + Debug>(
        &self,
        res: Response,
    ) -> Result<T, ClientError> {
        let url = res.url().to_string();
        let text = self.read_text(res).await?;

        trace!("[QueryClient] response from {}: {}", &url, &text);

        serde_json::from_str::<T>(&text).map_err(|err| ClientError::InvalidResponse {
            url,
            reason: err.to_string(),
        })
    }

    pub(crate) async fn read_text(&self, res: Response) -> Result<String, ClientError> {
        let url = res.url().to_string();
        res.text()
            .await
            .map_err(|source| ClientError::Connection { url, source })
    }
}
