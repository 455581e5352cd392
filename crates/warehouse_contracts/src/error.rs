//! Error types for contract declaration.

use thiserror::Error;

use crate::RelationGroup;

/// Errors raised while assembling a contract registry.
///
/// These are configuration mistakes by the author of the contract tables,
/// not runtime validation failures, so they surface at construction time.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Two contracts share the same (group, name) identity
    #[error("Duplicate {} relation contract '{name}'", .group.label())]
    DuplicateRelation {
        /// Group the duplicate was declared in
        group: RelationGroup,
        /// Duplicated relation name
        name: String,
    },

    /// A contract declared the same column twice
    #[error("Duplicate column '{column}' in relation contract '{relation}'")]
    DuplicateColumn {
        /// Relation contract with the duplicate
        relation: String,
        /// Duplicated column name
        column: String,
    },
}
