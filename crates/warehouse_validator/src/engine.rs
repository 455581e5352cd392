//! The validation engine: runs both validators and aggregates the verdict.

use tracing::info;
use warehouse_contracts::{
    ContractRegistry, DataCheck, FindingKind, NamespaceMap, ValidationFinding, ValidationReport,
};
use warehouse_introspect::Introspect;

use crate::{CancellationToken, ColumnPolicy, IntegrityValidator, StructuralValidator};

/// Configuration for a validation run.
#[derive(Debug, Clone, Default)]
pub struct ValidationOptions {
    /// How to treat live columns the contract does not declare
    pub policy: ColumnPolicy,

    /// Namespaces the relation groups live in
    pub namespaces: NamespaceMap,
}

/// Orchestrates a full validation run.
///
/// The structural and integrity validators run independently against the
/// same adapter; their findings are concatenated in first-seen order, so
/// output is deterministic and a repeat run against an unchanged database
/// produces an identical report. Findings are never filtered or mutated.
pub struct ValidationEngine {
    registry: ContractRegistry,
    checks: Vec<DataCheck>,
    options: ValidationOptions,
}

impl ValidationEngine {
    /// Creates an engine for a registry, a check list, and run options.
    pub fn new(
        registry: ContractRegistry,
        checks: Vec<DataCheck>,
        options: ValidationOptions,
    ) -> Self {
        Self {
            registry,
            checks,
            options,
        }
    }

    /// Runs structural then integrity validation and aggregates findings.
    ///
    /// If the token is cancelled, remaining checks are skipped and a single
    /// cancellation finding is appended after the partial results.
    pub fn run(&self, adapter: &dyn Introspect, cancel: &CancellationToken) -> ValidationReport {
        info!(
            "Validating {} relation contract(s) and {} data check(s)",
            self.registry.len(),
            self.checks.len()
        );

        let mut report = ValidationReport::new();

        let structural = StructuralValidator::new(self.options.policy);
        report.findings.extend(structural.validate(
            &self.registry,
            &self.options.namespaces,
            adapter,
            cancel,
        ));

        let integrity = IntegrityValidator::new();
        report
            .findings
            .extend(integrity.validate(&self.checks, adapter, cancel));

        if cancel.is_cancelled() {
            report.push(ValidationFinding::general(
                FindingKind::Cancelled,
                "Validation cancelled before all checks completed",
            ));
        }

        info!(
            "Validation finished: {} finding(s)",
            report.findings.len()
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockAdapter;
    use pretty_assertions::assert_eq;
    use warehouse_contracts::{RelationBuilder, RelationGroup, Scalar};
    use warehouse_introspect::RelationKind;

    fn engine_fixture() -> (ValidationEngine, MockAdapter) {
        let registry = ContractRegistry::new(vec![RelationBuilder::new(
            "fct_job_ads",
            RelationGroup::Warehouse,
        )
        .column("job_description_id", "INTEGER")
        .build()])
        .unwrap();

        let checks = vec![DataCheck::non_empty("main.fct_job_ads")];

        let adapter = MockAdapter::new()
            .with_relation(
                "main",
                "fct_job_ads",
                RelationKind::Table,
                &[("job_description_id", "INTEGER")],
            )
            .with_scalar(
                "SELECT COUNT(*) > 0 FROM main.fct_job_ads;",
                Scalar::Bool(true),
            );

        (
            ValidationEngine::new(registry, checks, ValidationOptions::default()),
            adapter,
        )
    }

    #[test]
    fn healthy_warehouse_passes() {
        let (engine, adapter) = engine_fixture();
        let report = engine.run(&adapter, &CancellationToken::new());
        assert!(report.passed());
        assert_eq!(report.findings, vec![]);
    }

    #[test]
    fn structural_findings_precede_integrity_findings() {
        let registry = ContractRegistry::new(vec![
            RelationBuilder::new("dim_occupation", RelationGroup::Warehouse).build()
        ])
        .unwrap();
        let check = DataCheck::non_empty("main.mart_it");
        let adapter = MockAdapter::new().with_scalar(&check.query, Scalar::Bool(false));

        let engine = ValidationEngine::new(registry, vec![check], ValidationOptions::default());
        let report = engine.run(&adapter, &CancellationToken::new());

        let kinds: Vec<FindingKind> = report.findings.iter().map(|f| f.kind).collect();
        assert_eq!(
            kinds,
            vec![FindingKind::MissingRelation, FindingKind::CheckFailed]
        );
    }

    #[test]
    fn repeat_runs_are_identical() {
        let (engine, adapter) = engine_fixture();
        let first = engine.run(&adapter, &CancellationToken::new());
        let second = engine.run(&adapter, &CancellationToken::new());
        assert_eq!(first, second);
    }

    #[test]
    fn cancelled_run_appends_single_cancellation_finding() {
        let (engine, adapter) = engine_fixture();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let report = engine.run(&adapter, &cancel);
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].kind, FindingKind::Cancelled);
        assert!(!report.passed());
    }

    #[test]
    fn strict_policy_flows_through_options() {
        let registry = ContractRegistry::new(vec![RelationBuilder::new(
            "fct_job_ads",
            RelationGroup::Warehouse,
        )
        .column("job_description_id", "INTEGER")
        .build()])
        .unwrap();

        let adapter = MockAdapter::new().with_relation(
            "main",
            "fct_job_ads",
            RelationKind::Table,
            &[("job_description_id", "INTEGER"), ("extra", "VARCHAR")],
        );

        let options = ValidationOptions {
            policy: ColumnPolicy::ExactMatch,
            ..Default::default()
        };
        let engine = ValidationEngine::new(registry, vec![], options);
        let report = engine.run(&adapter, &CancellationToken::new());

        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].kind, FindingKind::UnexpectedColumn);
    }
}
