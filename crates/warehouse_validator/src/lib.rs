//! # Warehouse Validator
//!
//! The validation engine: takes a contract registry, a data-check list, and
//! a live [`Introspect`](warehouse_introspect::Introspect) adapter, and
//! produces a pass/fail report with one finding per problem.
//!
//! Two validators run independently:
//!
//! - the **structural validator** checks relation existence, column
//!   presence, and type compatibility against each contract
//! - the **integrity validator** runs the declarative scalar checks
//!   (non-emptiness, referential integrity)
//!
//! Neither validator short-circuits: every relation, column, and check is
//! evaluated so a single run yields the full set of diagnostics. The
//! engine concatenates findings in declaration order, making output
//! deterministic and repeat runs byte-identical.
//!
//! ## Example
//!
//! ```rust,no_run
//! use warehouse_contracts::{job_ads_links, job_ads_registry, standard_checks};
//! use warehouse_introspect::DuckDbAdapter;
//! use warehouse_validator::{CancellationToken, ValidationEngine, ValidationOptions};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let options = ValidationOptions::default();
//! let registry = job_ads_registry();
//! let links = job_ads_links(&options.namespaces);
//! let checks = standard_checks(&registry, &links, &options.namespaces);
//!
//! let adapter = DuckDbAdapter::connect("data_warehouse/job_ads.duckdb")?;
//! let engine = ValidationEngine::new(registry, checks, options);
//! let report = engine.run(&adapter, &CancellationToken::new());
//!
//! for finding in &report.findings {
//!     eprintln!("{finding}");
//! }
//! assert!(report.passed());
//! # Ok(())
//! # }
//! ```

pub mod cancel;
pub mod engine;
pub mod integrity;
pub mod structural;

#[cfg(test)]
mod test_support;

pub use cancel::*;
pub use engine::*;
pub use integrity::*;
pub use structural::*;
