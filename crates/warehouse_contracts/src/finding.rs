//! Validation findings and the final report.
//!
//! A finding is a single recorded validation problem with enough context to
//! act on. Findings accumulate across the whole run; none are ever dropped
//! or filtered, and the report passes only when there are none.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity of a finding. Every finding the engine emits is an error; the
/// enum exists so the output contract stays stable if a warning level is
/// ever added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Validation failure
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

/// Classification of a finding, mirroring the error taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    /// Contracted relation absent from the live database
    MissingRelation,
    /// Contracted column absent from a live relation
    MissingColumn,
    /// Live column not present in the contract (exact-match policy only)
    UnexpectedColumn,
    /// Live column type incompatible with the contracted type
    ColumnTypeMismatch,
    /// A data check query could not be executed
    CheckExecutionError,
    /// A data check executed but returned the wrong value
    CheckFailed,
    /// The run was cancelled before all checks completed
    Cancelled,
}

/// A single recorded validation problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationFinding {
    /// Severity, always `ERROR` today
    pub severity: Severity,

    /// What went wrong
    pub kind: FindingKind,

    /// Relation the finding concerns, when applicable
    pub relation: Option<String>,

    /// Human-readable diagnostic
    pub message: String,
}

impl ValidationFinding {
    /// Creates a finding tied to a relation.
    pub fn for_relation(
        kind: FindingKind,
        relation: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity: Severity::Error,
            kind,
            relation: Some(relation.into()),
            message: message.into(),
        }
    }

    /// Creates a finding not tied to any single relation.
    pub fn general(kind: FindingKind, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            kind,
            relation: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.relation {
            Some(relation) => write!(f, "{} [{}]: {}", self.severity, relation, self.message),
            None => write!(f, "{}: {}", self.severity, self.message),
        }
    }
}

/// Report of a full validation run.
///
/// Findings are kept in first-seen order so output is deterministic across
/// runs against an unchanged database.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// All findings, in emission order
    pub findings: Vec<ValidationFinding>,
}

impl ValidationReport {
    /// Creates an empty (passing) report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether validation passed: true iff there are no findings.
    pub fn passed(&self) -> bool {
        self.findings.is_empty()
    }

    /// Appends a finding.
    pub fn push(&mut self, finding: ValidationFinding) {
        self.findings.push(finding);
    }

    /// Appends all findings from another report, preserving order.
    pub fn merge(&mut self, other: ValidationReport) {
        self.findings.extend(other.findings);
    }
}
