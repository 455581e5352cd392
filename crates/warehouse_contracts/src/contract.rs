//! Relation contract types.
//!
//! This module contains the declarative contract model: which relations the
//! warehouse must contain, which columns each relation must carry, and the
//! namespace each relation group lives in.

use serde::{Deserialize, Serialize};

/// Group a relation belongs to.
///
/// Base ("warehouse") relations are produced directly by the transformation
/// pipeline; mart relations are derived, denormalized views built on top of
/// them. The two groups may live in different database namespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationGroup {
    /// Base fact and dimension relations
    Warehouse,
    /// Derived relations for direct consumption
    Mart,
}

impl RelationGroup {
    /// Human-readable group label used in diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            RelationGroup::Warehouse => "warehouse",
            RelationGroup::Mart => "mart",
        }
    }
}

/// A single required column in a relation contract.
///
/// If `expected_type` is `None`, only presence is checked. The type string
/// is a logical type tag (e.g. `INTEGER`, `VARCHAR`, `DOUBLE`, `TIMESTAMP`)
/// compared against the live type with a case-insensitive containment
/// check, so `VARCHAR` is compatible with `VARCHAR(255)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Column name
    pub name: String,

    /// Expected logical type tag, if the type should be checked
    pub expected_type: Option<String>,
}

impl ColumnSpec {
    /// Creates a column spec with a type expectation.
    pub fn typed(name: impl Into<String>, expected_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            expected_type: Some(expected_type.into()),
        }
    }

    /// Creates a presence-only column spec.
    pub fn untyped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            expected_type: None,
        }
    }
}

/// Contract for a single relation the warehouse must contain.
///
/// Identity is `(group, name)`; a contract is immutable once declared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationContract {
    /// Relation name as it appears in the database
    pub name: String,

    /// Which group (and therefore namespace) the relation belongs to
    pub group: RelationGroup,

    /// Required columns in declaration order
    pub columns: Vec<ColumnSpec>,
}

/// Maps relation groups to database namespaces.
///
/// DuckDB's default schema is `main` for both groups; deployments that
/// separate base and mart relations into different schemas override this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceMap {
    /// Namespace holding base relations
    pub warehouse: String,

    /// Namespace holding mart relations
    pub mart: String,
}

impl Default for NamespaceMap {
    fn default() -> Self {
        Self {
            warehouse: "main".to_string(),
            mart: "main".to_string(),
        }
    }
}

impl NamespaceMap {
    /// Returns the namespace for a relation group.
    pub fn namespace(&self, group: RelationGroup) -> &str {
        match group {
            RelationGroup::Warehouse => &self.warehouse,
            RelationGroup::Mart => &self.mart,
        }
    }

    /// Returns the namespace-qualified name for a contract.
    pub fn qualify(&self, contract: &RelationContract) -> String {
        format!("{}.{}", self.namespace(contract.group), contract.name)
    }
}
