//! Declarative data checks.
//!
//! A [`DataCheck`] pairs a read-only scalar query with its expected result.
//! The two check families the warehouse needs, non-emptiness and
//! referential integrity, are generated from data (relation names and
//! [`ReferentialLink`] triples), never hand-written per relation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A scalar value returned by evaluating a check query.
///
/// Comparison against the expected value uses strict equality; there is no
/// numeric coercion between variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scalar {
    /// SQL NULL
    Null,
    /// Boolean result, the usual shape for assertion queries
    Bool(bool),
    /// Any integer width, widened to i64
    Int(i64),
    /// Any floating-point width, widened to f64
    Float(f64),
    /// Textual result
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => write!(f, "NULL"),
            Scalar::Bool(v) => write!(f, "{v}"),
            Scalar::Int(v) => write!(f, "{v}"),
            Scalar::Float(v) => write!(f, "{v}"),
            Scalar::Text(v) => write!(f, "{v}"),
        }
    }
}

/// A referential-integrity link between two relations.
///
/// Asserts that every `key` value in `dependent` has a matching row in
/// `referenced` (anti-join cardinality zero).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferentialLink {
    /// Relation whose keys must all resolve
    pub dependent: String,

    /// Relation the keys must resolve against
    pub referenced: String,

    /// Shared join key column
    pub key: String,
}

impl ReferentialLink {
    /// Creates a link between a dependent and a referenced relation.
    pub fn new(
        dependent: impl Into<String>,
        referenced: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            dependent: dependent.into(),
            referenced: referenced.into(),
            key: key.into(),
        }
    }
}

/// A single declarative data check.
///
/// The query must be read-only and yield exactly one row with one scalar
/// column; the engine trusts the author on the read-only part. Identity is
/// the description; checks are independent and order only affects
/// diagnostic ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataCheck {
    /// Human-readable description, used verbatim in findings
    pub description: String,

    /// Scalar query to execute
    pub query: String,

    /// Expected scalar result, compared with strict equality
    pub expected: Scalar,
}

impl DataCheck {
    /// Creates a check from its raw parts.
    pub fn new(description: impl Into<String>, query: impl Into<String>, expected: Scalar) -> Self {
        Self {
            description: description.into(),
            query: query.into(),
            expected,
        }
    }

    /// Non-emptiness check for a (namespace-qualified) relation.
    pub fn non_empty(relation: &str) -> Self {
        Self {
            description: format!("{relation} should not be empty"),
            query: format!("SELECT COUNT(*) > 0 FROM {relation};"),
            expected: Scalar::Bool(true),
        }
    }

    /// Referential-integrity check for a link between two relations.
    ///
    /// Counts rows in the dependent relation whose key has no match in the
    /// referenced relation; the count must be zero.
    pub fn referential(dependent: &str, referenced: &str, key: &str) -> Self {
        Self {
            description: format!("All {key}s in {dependent} must exist in {referenced}"),
            query: format!(
                "SELECT COUNT(*) = 0 FROM {dependent} d \
                 LEFT JOIN {referenced} r USING ({key}) \
                 WHERE r.{key} IS NULL;"
            ),
            expected: Scalar::Bool(true),
        }
    }
}
