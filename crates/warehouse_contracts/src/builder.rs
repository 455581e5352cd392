//! Builder for relation contracts.
//!
//! Keeps the registry declaration readable: one chained expression per
//! relation instead of nested struct literals.

use crate::{ColumnSpec, RelationContract, RelationGroup};

/// Builder for creating a [`RelationContract`].
///
/// # Example
///
/// ```rust
/// use warehouse_contracts::{RelationBuilder, RelationGroup};
///
/// let contract = RelationBuilder::new("dim_occupation", RelationGroup::Warehouse)
///     .column("occupation_id", "VARCHAR")
///     .column("occupation", "VARCHAR")
///     .column_untyped("notes")
///     .build();
/// ```
#[derive(Debug)]
pub struct RelationBuilder {
    name: String,
    group: RelationGroup,
    columns: Vec<ColumnSpec>,
}

impl RelationBuilder {
    /// Creates a builder for a relation in the given group.
    pub fn new(name: impl Into<String>, group: RelationGroup) -> Self {
        Self {
            name: name.into(),
            group,
            columns: Vec::new(),
        }
    }

    /// Adds a column with a type expectation.
    pub fn column(mut self, name: impl Into<String>, expected_type: impl Into<String>) -> Self {
        self.columns.push(ColumnSpec::typed(name, expected_type));
        self
    }

    /// Adds a presence-only column.
    pub fn column_untyped(mut self, name: impl Into<String>) -> Self {
        self.columns.push(ColumnSpec::untyped(name));
        self
    }

    /// Builds the contract.
    pub fn build(self) -> RelationContract {
        RelationContract {
            name: self.name,
            group: self.group,
            columns: self.columns,
        }
    }
}
