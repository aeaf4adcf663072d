use crate::ClientError;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// What kind of request a failed response answered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestKind {
    /// A SPARQL query; a 400 means the query text was refused
    Query,
    /// Administration and metadata calls
    Admin,
}

/// Error payload sent by the server alongside a non-success status.
///
/// ```json
/// { "message": "Database 'nodeDB' does not exist.", "code": "0D0DU2" }
/// ```
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

impl ServerErrorBody {
    /// Reads an error body leniently: JSON when it parses, otherwise the raw
    /// text becomes the message.
    pub fn parse(body: &str) -> Self {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            return Self::default();
        }

        serde_json::from_str::<ServerErrorBody>(trimmed)
            .ok()
            .filter(|parsed| parsed.message.is_some() || parsed.code.is_some())
            .unwrap_or_else(|| Self {
                message: Some(trimmed.to_string()),
                code: None,
            })
    }

    /// Fills in the code from the `SD-Error-Code` header when the body had none.
    pub fn with_code_header(mut self, header: Option<String>) -> Self {
        if self.code.is_none() {
            self.code = header;
        }
        self
    }

    /// Maps the status the body arrived with onto a [`ClientError`].
    ///
    /// `database` is the database the request addressed, if any; a 404 on
    /// such a request means the database is unknown. Only query requests
    /// turn a 400 into [`ClientError::Query`].
    pub fn into_error(
        self,
        status: StatusCode,
        user: &str,
        database: Option<&str>,
        kind: RequestKind,
    ) -> ClientError {
        let ServerErrorBody { message, code } = self;
        let message = message.unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("no details provided")
                .to_string()
        });

        match status.as_u16() {
            401 | 403 => ClientError::Authentication {
                user: user.to_string(),
                status: status.as_u16(),
            },
            404 => match database {
                Some(db) => ClientError::UnknownDatabase(db.to_string()),
                None => ClientError::Server {
                    status: 404,
                    message,
                },
            },
            400 if kind == RequestKind::Query => ClientError::Query {
                status: 400,
                code,
                message,
            },
            other => ClientError::Server {
                status: other,
                message,
            },
        }
    }
}
