//! In-memory adapter fixture for validator unit tests.

use std::collections::{BTreeMap, BTreeSet};

use warehouse_contracts::Scalar;
use warehouse_introspect::{AdapterError, Introspect, LiveColumn, RelationKind};

struct MockRelation {
    namespace: String,
    name: String,
    kind: RelationKind,
    columns: Vec<LiveColumn>,
}

/// Scripted [`Introspect`] implementation backed by in-memory tables.
#[derive(Default)]
pub struct MockAdapter {
    relations: Vec<MockRelation>,
    scalars: BTreeMap<String, Scalar>,
    broken_queries: BTreeSet<String>,
    describe_failures: BTreeSet<String>,
    listing_failures: BTreeSet<String>,
}

impl MockAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a relation with its live columns.
    pub fn with_relation(
        mut self,
        namespace: &str,
        name: &str,
        kind: RelationKind,
        columns: &[(&str, &str)],
    ) -> Self {
        self.relations.push(MockRelation {
            namespace: namespace.to_string(),
            name: name.to_string(),
            kind,
            columns: columns
                .iter()
                .map(|(name, type_name)| LiveColumn {
                    name: name.to_string(),
                    type_name: type_name.to_string(),
                })
                .collect(),
        });
        self
    }

    /// Scripts the result of a scalar query.
    pub fn with_scalar(mut self, query: &str, value: Scalar) -> Self {
        self.scalars.insert(query.to_string(), value);
        self
    }

    /// Makes a scalar query fail with a query error.
    pub fn with_broken_query(mut self, query: &str) -> Self {
        self.broken_queries.insert(query.to_string());
        self
    }

    /// Makes describing a relation fail with an introspection error.
    pub fn with_describe_failure(mut self, relation: &str) -> Self {
        self.describe_failures.insert(relation.to_string());
        self
    }

    /// Makes listing a namespace fail with a query error.
    pub fn with_listing_failure(mut self, namespace: &str) -> Self {
        self.listing_failures.insert(namespace.to_string());
        self
    }
}

impl Introspect for MockAdapter {
    fn list_relations(
        &self,
        namespace: &str,
        kind: RelationKind,
    ) -> Result<BTreeSet<String>, AdapterError> {
        if self.listing_failures.contains(namespace) {
            return Err(AdapterError::query(format!(
                "scripted listing failure for '{namespace}'"
            )));
        }

        Ok(self
            .relations
            .iter()
            .filter(|r| r.namespace == namespace && r.kind == kind)
            .map(|r| r.name.clone())
            .collect())
    }

    fn describe_columns(
        &self,
        namespace: &str,
        relation: &str,
    ) -> Result<Vec<LiveColumn>, AdapterError> {
        if self.describe_failures.contains(relation) {
            return Err(AdapterError::introspection(
                relation,
                "scripted describe failure",
            ));
        }

        self.relations
            .iter()
            .find(|r| r.namespace == namespace && r.name == relation)
            .map(|r| r.columns.clone())
            .ok_or_else(|| AdapterError::introspection(relation, "no such relation"))
    }

    fn evaluate_scalar(&self, query: &str) -> Result<Scalar, AdapterError> {
        if self.broken_queries.contains(query) {
            return Err(AdapterError::query(format!(
                "scripted query failure for '{query}'"
            )));
        }

        self.scalars
            .get(query)
            .cloned()
            .ok_or_else(|| AdapterError::query(format!("no scripted result for '{query}'")))
    }
}
