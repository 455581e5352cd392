//! The introspection capability interface.

use std::collections::BTreeSet;

use warehouse_contracts::Scalar;

use crate::AdapterError;

/// Kind of relation to list within a namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    /// Base table
    Table,
    /// Derived view
    View,
}

/// A column as it exists in the live database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveColumn {
    /// Column name
    pub name: String,

    /// Engine type string, e.g. `VARCHAR(255)` or `BIGINT`
    pub type_name: String,
}

/// Read-only introspection over a live database.
///
/// Implementations must not mutate the database. The connection behind an
/// implementation is opened once per validation run and released exactly
/// once regardless of outcome.
pub trait Introspect {
    /// Returns the names of relations of the given kind within a namespace.
    fn list_relations(
        &self,
        namespace: &str,
        kind: RelationKind,
    ) -> Result<BTreeSet<String>, AdapterError>;

    /// Returns the live column shape of a relation, in ordinal order.
    fn describe_columns(
        &self,
        namespace: &str,
        relation: &str,
    ) -> Result<Vec<LiveColumn>, AdapterError>;

    /// Executes a read query expected to return exactly one row with one
    /// scalar column.
    fn evaluate_scalar(&self, query: &str) -> Result<Scalar, AdapterError>;
}
