//! Data-integrity validation: declarative scalar checks.

use tracing::debug;
use warehouse_contracts::{DataCheck, FindingKind, ValidationFinding};
use warehouse_introspect::Introspect;

use crate::CancellationToken;

/// Runs every data check in declaration order.
///
/// Checks are independent; a failed or broken check never prevents the
/// rest from running. The returned scalar is compared to the expected
/// value with strict equality.
pub struct IntegrityValidator;

impl IntegrityValidator {
    /// Creates a new integrity validator.
    pub fn new() -> Self {
        Self
    }

    /// Runs all checks, returning one finding per failure.
    pub fn validate(
        &self,
        checks: &[DataCheck],
        adapter: &dyn Introspect,
        cancel: &CancellationToken,
    ) -> Vec<ValidationFinding> {
        let mut findings = Vec::new();

        for check in checks {
            if cancel.is_cancelled() {
                break;
            }

            debug!("Running data check: {}", check.description);
            match adapter.evaluate_scalar(&check.query) {
                Ok(actual) if actual == check.expected => {}
                Ok(actual) => {
                    findings.push(ValidationFinding::general(
                        FindingKind::CheckFailed,
                        format!(
                            "{}: expected {} but got {}",
                            check.description, check.expected, actual
                        ),
                    ));
                }
                Err(e) => {
                    findings.push(ValidationFinding::general(
                        FindingKind::CheckExecutionError,
                        format!("Could not run check '{}': {}", check.description, e),
                    ));
                }
            }
        }

        findings
    }
}

impl Default for IntegrityValidator {
    fn default() -> Self {
        Self::new()
    }
}
