use crate::ClientError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// OWL 2 profile the server applies while answering a query.
///
/// Reasoning happens entirely server-side; the client only forwards the
/// chosen level with each query. `None` and an absent level both mean plain
/// query evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReasoningLevel {
    #[default]
    None,
    QL,
    RL,
    EL,
}

impl ReasoningLevel {
    /// Levels that actually enable reasoning on the server.
    pub const PROFILES: [ReasoningLevel; 3] =
        [ReasoningLevel::QL, ReasoningLevel::RL, ReasoningLevel::EL];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReasoningLevel::None => "NONE",
            ReasoningLevel::QL => "QL",
            ReasoningLevel::RL => "RL",
            ReasoningLevel::EL => "EL",
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self, ReasoningLevel::None)
    }

    /// Value for the connection string header, `None` when reasoning is off.
    pub fn connection_string(&self) -> Option<String> {
        self.is_enabled()
            .then(|| format!("reasoning={}", self.as_str()))
    }
}

impl Display for ReasoningLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReasoningLevel {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "" | "NONE" => Ok(ReasoningLevel::None),
            "QL" => Ok(ReasoningLevel::QL),
            "RL" => Ok(ReasoningLevel::RL),
            "EL" => Ok(ReasoningLevel::EL),
            other => Err(ClientError::InvalidRequest(format!(
                "unknown reasoning level '{}', expected one of NONE, QL, RL, EL",
                other
            ))),
        }
    }
}
