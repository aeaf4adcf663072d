//! SPARQL 1.1 query results in their JSON serialization.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{Display, Formatter};

/// One solution: variable name to bound term. Unbound variables are absent.
pub type Binding = HashMap<String, RdfTerm>;

/// Result of a query, as returned by the server.
///
/// SELECT queries fill [`results`](Self::results); ASK queries set
/// [`boolean`](Self::boolean) instead.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    #[serde(default)]
    pub head: ResultHead,
    #[serde(default)]
    pub results: ResultSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boolean: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultHead {
    /// Projected variables, in projection order.
    #[serde(default)]
    pub vars: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub link: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    #[serde(default)]
    pub bindings: Vec<Binding>,
}

impl QueryResult {
    pub fn bindings(&self) -> &[Binding] {
        &self.results.bindings
    }

    pub fn into_bindings(self) -> Vec<Binding> {
        self.results.bindings
    }

    pub fn len(&self) -> usize {
        self.results.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.bindings.is_empty()
    }

    pub fn vars(&self) -> &[String] {
        &self.head.vars
    }

    /// Answer of an ASK query.
    pub fn boolean(&self) -> Option<bool> {
        self.boolean
    }

    /// Values bound to `var`, skipping solutions that leave it unbound.
    pub fn column<'a>(&'a self, var: &'a str) -> impl Iterator<Item = &'a RdfTerm> + 'a {
        self.results
            .bindings
            .iter()
            .filter_map(move |binding| binding.get(var))
    }

    /// Keeps only the first `limit` solutions.
    pub fn truncate(&mut self, limit: usize) {
        self.results.bindings.truncate(limit);
    }
}

/// An RDF term as encoded in SPARQL JSON results.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum RdfTerm {
    Uri {
        value: String,
    },
    Literal {
        value: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        datatype: Option<String>,
        #[serde(default, rename = "xml:lang", skip_serializing_if = "Option::is_none")]
        lang: Option<String>,
    },
    /// Pre-standard encoding of a datatyped literal some servers still emit.
    TypedLiteral {
        value: String,
        datatype: String,
    },
    Bnode {
        value: String,
    },
}

impl RdfTerm {
    pub fn iri(value: impl Into<String>) -> Self {
        RdfTerm::Uri {
            value: value.into(),
        }
    }

    pub fn literal(value: impl Into<String>) -> Self {
        RdfTerm::Literal {
            value: value.into(),
            datatype: None,
            lang: None,
        }
    }

    /// Lexical value: the IRI, the literal text or the blank node label.
    pub fn value(&self) -> &str {
        match self {
            RdfTerm::Uri { value }
            | RdfTerm::Literal { value, .. }
            | RdfTerm::TypedLiteral { value, .. }
            | RdfTerm::Bnode { value } => value,
        }
    }

    pub fn datatype(&self) -> Option<&str> {
        match self {
            RdfTerm::Literal { datatype, .. } => datatype.as_deref(),
            RdfTerm::TypedLiteral { datatype, .. } => Some(datatype),
            _ => None,
        }
    }

    pub fn is_iri(&self) -> bool {
        matches!(self, RdfTerm::Uri { .. })
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, RdfTerm::Literal { .. } | RdfTerm::TypedLiteral { .. })
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, RdfTerm::Bnode { .. })
    }
}

/// N-Triples style rendering.
impl Display for RdfTerm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RdfTerm::Uri { value } => write!(f, "<{}>", value),
            RdfTerm::Bnode { value } => write!(f, "_:{}", value),
            RdfTerm::Literal {
                value,
                lang: Some(lang),
                ..
            } => write!(f, "{:?}@{}", value, lang),
            RdfTerm::Literal {
                value,
                datatype: Some(datatype),
                ..
            }
            | RdfTerm::TypedLiteral { value, datatype } => write!(f, "{:?}^^<{}>", value, datatype),
            RdfTerm::Literal { value, .. } => write!(f, "{:?}", value),
        }
    }
}
