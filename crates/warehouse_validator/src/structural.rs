//! Structural validation: relation existence, column presence, and type
//! compatibility.

use std::collections::{BTreeSet, HashMap};

use tracing::debug;
use warehouse_contracts::{
    ContractRegistry, FindingKind, NamespaceMap, RelationContract, ValidationFinding,
};
use warehouse_introspect::{Introspect, RelationKind};

use crate::CancellationToken;

/// How to treat live columns that the contract does not declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnPolicy {
    /// Live columns beyond the contract are ignored
    #[default]
    ContractSubset,
    /// Any live column not in the contract is a finding
    ExactMatch,
}

/// Checks every relation contract against the live database shape.
///
/// No check is short-circuited by an earlier failure: all relations and
/// all columns within a relation are evaluated, so one run yields every
/// structural diagnostic at once.
pub struct StructuralValidator {
    policy: ColumnPolicy,
}

impl StructuralValidator {
    /// Creates a validator with the given column policy.
    pub fn new(policy: ColumnPolicy) -> Self {
        Self { policy }
    }

    /// Validates the whole registry, in declaration order.
    pub fn validate(
        &self,
        registry: &ContractRegistry,
        namespaces: &NamespaceMap,
        adapter: &dyn Introspect,
        cancel: &CancellationToken,
    ) -> Vec<ValidationFinding> {
        let mut findings = Vec::new();
        // Relation listings are cached per namespace; None records a listing
        // failure that has already produced a finding.
        let mut listings: HashMap<String, Option<BTreeSet<String>>> = HashMap::new();

        for contract in registry.iter() {
            if cancel.is_cancelled() {
                break;
            }

            let namespace = namespaces.namespace(contract.group);
            let existing = match self.existing_relations(namespace, adapter, &mut listings) {
                Ok(existing) => existing,
                Err(finding) => {
                    if let Some(finding) = finding {
                        findings.push(finding);
                    }
                    continue;
                }
            };

            if !existing.contains(&contract.name) {
                findings.push(ValidationFinding::for_relation(
                    FindingKind::MissingRelation,
                    &contract.name,
                    format!("Missing relation '{}'", contract.name),
                ));
                continue;
            }

            findings.extend(self.validate_columns(contract, namespace, adapter));
        }

        findings
    }

    /// Returns the cached union of tables and views in a namespace.
    ///
    /// The warehouse may materialize a contracted relation either way (a
    /// mart can be a view or a table depending on pipeline configuration),
    /// so existence is checked against both kinds.
    fn existing_relations<'a>(
        &self,
        namespace: &str,
        adapter: &dyn Introspect,
        listings: &'a mut HashMap<String, Option<BTreeSet<String>>>,
    ) -> Result<&'a BTreeSet<String>, Option<ValidationFinding>> {
        if !listings.contains_key(namespace) {
            let entry = self.list_namespace(namespace, adapter);
            let finding = entry.as_ref().err().cloned();
            listings.insert(namespace.to_string(), entry.ok());
            if let Some(finding) = finding {
                return Err(Some(finding));
            }
        }

        match listings.get(namespace).and_then(|e| e.as_ref()) {
            Some(existing) => Ok(existing),
            // Listing already failed for this namespace; the finding was
            // emitted the first time around.
            None => Err(None),
        }
    }

    fn list_namespace(
        &self,
        namespace: &str,
        adapter: &dyn Introspect,
    ) -> Result<BTreeSet<String>, ValidationFinding> {
        let mut existing = BTreeSet::new();
        for kind in [RelationKind::Table, RelationKind::View] {
            match adapter.list_relations(namespace, kind) {
                Ok(names) => existing.extend(names),
                Err(e) => {
                    return Err(ValidationFinding::general(
                        FindingKind::CheckExecutionError,
                        format!("Could not list relations in namespace '{namespace}': {e}"),
                    ));
                }
            }
        }
        debug!(
            "Namespace '{}' contains {} relation(s)",
            namespace,
            existing.len()
        );
        Ok(existing)
    }

    /// Validates the column set and types of one existing relation.
    fn validate_columns(
        &self,
        contract: &RelationContract,
        namespace: &str,
        adapter: &dyn Introspect,
    ) -> Vec<ValidationFinding> {
        let mut findings = Vec::new();

        let live = match adapter.describe_columns(namespace, &contract.name) {
            Ok(live) => live,
            Err(e) => {
                findings.push(ValidationFinding::for_relation(
                    FindingKind::CheckExecutionError,
                    &contract.name,
                    format!("Could not describe relation: {e}"),
                ));
                return findings;
            }
        };

        for spec in &contract.columns {
            let Some(actual) = live.iter().find(|c| c.name == spec.name) else {
                findings.push(ValidationFinding::for_relation(
                    FindingKind::MissingColumn,
                    &contract.name,
                    format!("Column '{}' is missing", spec.name),
                ));
                continue;
            };

            if let Some(expected) = &spec.expected_type {
                if !types_compatible(expected, &actual.type_name) {
                    findings.push(ValidationFinding::for_relation(
                        FindingKind::ColumnTypeMismatch,
                        &contract.name,
                        format!(
                            "Column '{}' expected type '{}' but got '{}'",
                            spec.name, expected, actual.type_name
                        ),
                    ));
                }
            }
        }

        if self.policy == ColumnPolicy::ExactMatch {
            for column in &live {
                if !contract.columns.iter().any(|c| c.name == column.name) {
                    findings.push(ValidationFinding::for_relation(
                        FindingKind::UnexpectedColumn,
                        &contract.name,
                        format!("Unexpected column '{}' not in contract", column.name),
                    ));
                }
            }
        }

        findings
    }
}

/// Loose type compatibility: the live type string must contain the
/// expected logical tag, case-insensitively. Handles engine-specific type
/// parameterization like `VARCHAR(255)` vs `VARCHAR` without false
/// positives across engine versions.
pub fn types_compatible(expected: &str, actual: &str) -> bool {
    actual.to_lowercase().contains(&expected.to_lowercase())
}
