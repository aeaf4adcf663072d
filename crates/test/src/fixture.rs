//! Fixture databases and the small query evaluator behind the fake server.
//!
//! Only two query shapes are understood, which is all the client tests
//! need:
//!
//! ```sparql
//! select distinct ?s where { ?s ?p ?o }
//! prefix : <http://example.org/vehicles/> select distinct ?s where { ?s a :Vehicle }
//! ```
//!
//! Anything else is answered like a syntax error.

use std::collections::{HashMap, HashSet};

pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
pub const RDFS_SUBCLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";
pub const VEHICLES: &str = "http://example.org/vehicles/";
pub const PEOPLE: &str = "http://example.org/people/";

/// Name of the plain fixture database.
pub const NODE_DB: &str = "nodeDB";
/// Name of the fixture database with a class hierarchy.
pub const NODE_DB_REASONING: &str = "nodeDBReasoning";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Object {
    Iri(String),
    Literal(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Triple {
    pub subject: String,
    pub predicate: String,
    pub object: Object,
}

/// An in-memory database served by the fake server.
#[derive(Clone, Debug)]
pub struct Dataset {
    pub name: String,
    pub triples: Vec<Triple>,
    pub online: bool,
}

impl Dataset {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            triples: Vec::new(),
            online: true,
        }
    }

    pub fn with_triple(mut self, subject: &str, predicate: &str, object: Object) -> Self {
        self.triples.push(Triple {
            subject: subject.to_string(),
            predicate: predicate.to_string(),
            object,
        });
        self
    }

    /// Three people: `select distinct ?s where { ?s ?p ?o }` yields 3 rows.
    pub fn node_db() -> Self {
        let person = |local: &str| format!("{}{}", PEOPLE, local);
        let foaf = |local: &str| format!("http://xmlns.com/foaf/0.1/{}", local);

        Self::new(NODE_DB)
            .with_triple(&person("alice"), &foaf("name"), Object::Literal("Alice".into()))
            .with_triple(&person("alice"), &foaf("knows"), Object::Iri(person("bob")))
            .with_triple(&person("bob"), &foaf("name"), Object::Literal("Bob".into()))
            .with_triple(&person("carol"), &foaf("age"), Object::Literal("42".into()))
    }

    /// `SportsCar ⊑ Car ⊑ Vehicle` with one sports car and two plain cars.
    ///
    /// With reasoning, `:Vehicle` and `:Car` have 3 instances and
    /// `:SportsCar` has 1. Without it, only the asserted types count:
    /// 0, 2 and 1.
    pub fn node_db_reasoning() -> Self {
        let vehicle = |local: &str| format!("{}{}", VEHICLES, local);

        Self::new(NODE_DB_REASONING)
            .with_triple(&vehicle("SportsCar"), RDFS_SUBCLASS_OF, Object::Iri(vehicle("Car")))
            .with_triple(&vehicle("Car"), RDFS_SUBCLASS_OF, Object::Iri(vehicle("Vehicle")))
            .with_triple(&vehicle("porsche"), RDF_TYPE, Object::Iri(vehicle("SportsCar")))
            .with_triple(&vehicle("civic"), RDF_TYPE, Object::Iri(vehicle("Car")))
            .with_triple(&vehicle("golf"), RDF_TYPE, Object::Iri(vehicle("Car")))
    }

    /// Subject IRIs answering `query`, in insertion order.
    pub fn evaluate(&self, query: &FixtureQuery, reasoning: bool) -> Vec<String> {
        let subjects: Vec<&str> = match &query.pattern {
            Pattern::AnyTriple => self.triples.iter().map(|t| t.subject.as_str()).collect(),
            Pattern::InstancesOf(class) => {
                let classes = if reasoning {
                    self.subclasses_of(class)
                } else {
                    HashSet::from([class.clone()])
                };
                self.triples
                    .iter()
                    .filter(|t| t.predicate == RDF_TYPE)
                    .filter(|t| matches!(&t.object, Object::Iri(o) if classes.contains(o)))
                    .map(|t| t.subject.as_str())
                    .collect()
            }
        };

        if query.distinct {
            let mut seen = HashSet::new();
            subjects
                .into_iter()
                .filter(|s| seen.insert(*s))
                .map(str::to_string)
                .collect()
        } else {
            subjects.into_iter().map(str::to_string).collect()
        }
    }

    /// `class` and every class below it in the `subClassOf` hierarchy.
    fn subclasses_of(&self, class: &str) -> HashSet<String> {
        let mut found = HashSet::from([class.to_string()]);
        let mut pending = vec![class.to_string()];

        while let Some(current) = pending.pop() {
            for triple in self.triples.iter().filter(|t| t.predicate == RDFS_SUBCLASS_OF) {
                if matches!(&triple.object, Object::Iri(o) if *o == current)
                    && found.insert(triple.subject.clone())
                {
                    pending.push(triple.subject.clone());
                }
            }
        }

        found
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Pattern {
    /// `{ ?s ?p ?o }`
    AnyTriple,
    /// `{ ?s a <class> }`, holding the expanded class IRI
    InstancesOf(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixtureQuery {
    /// Projected variable, without the leading `?`
    pub var: String,
    pub distinct: bool,
    pub pattern: Pattern,
}

impl FixtureQuery {
    pub fn parse(text: &str) -> Result<Self, String> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let mut prefixes: HashMap<String, String> = HashMap::new();
        let mut rest = tokens.as_slice();

        while let [keyword, name, iri, tail @ ..] = rest {
            if !keyword.eq_ignore_ascii_case("prefix") {
                break;
            }
            let name = name
                .strip_suffix(':')
                .ok_or_else(|| format!("malformed prefix name '{}'", name))?;
            let iri = iri
                .strip_prefix('<')
                .and_then(|i| i.strip_suffix('>'))
                .ok_or_else(|| format!("malformed prefix IRI '{}'", iri))?;
            prefixes.insert(name.to_string(), iri.to_string());
            rest = tail;
        }

        let (select, rest) = rest
            .split_first()
            .ok_or_else(|| "empty query".to_string())?;
        if !select.eq_ignore_ascii_case("select") {
            return Err(format!("expected SELECT, found '{}'", select));
        }

        let (distinct, rest) = match rest {
            [first, tail @ ..] if first.eq_ignore_ascii_case("distinct") => (true, tail),
            _ => (false, rest),
        };

        let [var, where_kw, "{", subject, predicate, object, "}"] = rest else {
            return Err(format!("unsupported query shape: {}", rest.join(" ")));
        };

        if !where_kw.eq_ignore_ascii_case("where") {
            return Err(format!("expected WHERE, found '{}'", where_kw));
        }
        let var = var
            .strip_prefix('?')
            .ok_or_else(|| format!("expected a variable, found '{}'", var))?;
        if subject.strip_prefix('?') != Some(var) {
            return Err(format!("pattern subject '{}' is not the projected variable", subject));
        }

        let pattern = if predicate.starts_with('?') && object.starts_with('?') {
            Pattern::AnyTriple
        } else if *predicate == "a" {
            Pattern::InstancesOf(expand(object, &prefixes)?)
        } else {
            return Err(format!("unsupported predicate '{}'", predicate));
        };

        Ok(Self {
            var: var.to_string(),
            distinct,
            pattern,
        })
    }
}

fn expand(term: &str, prefixes: &HashMap<String, String>) -> Result<String, String> {
    if let Some(iri) = term.strip_prefix('<').and_then(|t| t.strip_suffix('>')) {
        return Ok(iri.to_string());
    }
    let (prefix, local) = term
        .split_once(':')
        .ok_or_else(|| format!("expected an IRI or prefixed name, found '{}'", term))?;
    let namespace = prefixes
        .get(prefix)
        .ok_or_else(|| format!("unknown prefix '{}:'", prefix))?;
    Ok(format!("{}{}", namespace, local))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicles_query(class: &str) -> FixtureQuery {
        FixtureQuery::parse(&format!(
            "prefix : <{}> select distinct ?s where {{ ?s a :{} }}",
            VEHICLES, class
        ))
        .unwrap()
    }

    #[test]
    fn parses_both_shapes() {
        let any = FixtureQuery::parse("select distinct ?s where { ?s ?p ?o }").unwrap();
        assert_eq!(any.pattern, Pattern::AnyTriple);
        assert!(any.distinct);
        assert_eq!(any.var, "s");

        assert_eq!(
            vehicles_query("Car").pattern,
            Pattern::InstancesOf(format!("{}Car", VEHICLES))
        );
    }

    #[test]
    fn rejects_malformed_queries() {
        assert!(FixtureQuery::parse("selec distinct ?s wher { ?s ?p ?o }").is_err());
        assert!(FixtureQuery::parse("select ?s where { ?s a :Car }").is_err());
        assert!(FixtureQuery::parse("").is_err());
    }

    #[test]
    fn reasoning_expands_subclasses() {
        let db = Dataset::node_db_reasoning();
        let count = |class: &str, reasoning: bool| db.evaluate(&vehicles_query(class), reasoning).len();

        assert_eq!((count("Vehicle", true), count("Car", true), count("SportsCar", true)), (3, 3, 1));
        assert_eq!((count("Vehicle", false), count("Car", false), count("SportsCar", false)), (0, 2, 1));
    }

    #[test]
    fn distinct_removes_repeated_subjects() {
        let db = Dataset::node_db();
        let distinct = FixtureQuery::parse("select distinct ?s where { ?s ?p ?o }").unwrap();
        let all = FixtureQuery::parse("select ?s where { ?s ?p ?o }").unwrap();
        assert_eq!(db.evaluate(&distinct, false).len(), 3);
        assert_eq!(db.evaluate(&all, false).len(), 4);
    }
}
