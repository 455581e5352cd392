//! Error types for the introspection adapter.

use thiserror::Error;

/// Errors raised by an [`Introspect`](crate::Introspect) implementation.
///
/// Only `Unreachable` is fatal to a validation run; the other variants are
/// caught at the validator boundary and converted into findings.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// The database could not be opened at all
    #[error("Cannot open database at '{path}': {message}")]
    Unreachable {
        /// Location that was attempted
        path: String,
        /// Engine-provided cause
        message: String,
    },

    /// A relation exists but could not be described
    #[error("Could not describe relation '{relation}': {message}")]
    Introspection {
        /// Relation that failed to describe
        relation: String,
        /// Engine-provided cause
        message: String,
    },

    /// A scalar query failed to execute or returned an unexpected shape
    #[error("Query failed: {message}")]
    Query {
        /// Engine-provided cause or shape description
        message: String,
    },
}

impl AdapterError {
    /// Creates an unreachable-database error.
    pub fn unreachable(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Unreachable {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates an introspection failure for a relation.
    pub fn introspection(relation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Introspection {
            relation: relation.into(),
            message: message.into(),
        }
    }

    /// Creates a query failure.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}
