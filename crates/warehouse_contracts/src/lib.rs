//! # Warehouse Contracts
//!
//! Core data structures for the warehouse validation engine.
//!
//! This crate provides the declarative contract model that the validator
//! compares a live database against. A contract run is assembled from:
//!
//! - **Relation contracts**: the relations the warehouse must contain, with
//!   their required columns and optional logical types
//! - **Data checks**: scalar boolean assertions (non-emptiness, referential
//!   integrity) expressed as query + expected value pairs
//! - **Findings**: the accumulated diagnostics that make up the final report
//!
//! Everything here is pure data; nothing in this crate touches a database.
//!
//! ## Example
//!
//! ```rust
//! use warehouse_contracts::{RelationBuilder, RelationGroup};
//!
//! let contract = RelationBuilder::new("fct_job_ads", RelationGroup::Warehouse)
//!     .column("job_description_id", "INTEGER")
//!     .column("vacancies", "INTEGER")
//!     .build();
//!
//! assert_eq!(contract.columns.len(), 2);
//! ```

pub mod builder;
pub mod checks;
pub mod contract;
pub mod error;
pub mod finding;
pub mod registry;

pub use builder::*;
pub use checks::*;
pub use contract::*;
pub use error::*;
pub use finding::*;
pub use registry::*;
