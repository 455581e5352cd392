//! # Warehouse Introspect
//!
//! The introspection adapter: a thin, read-only capability interface over
//! the live warehouse database. Everything above this crate depends only on
//! the [`Introspect`] trait; [`DuckDbAdapter`] is the one implementation
//! that actually touches the database.
//!
//! The adapter can do exactly three things: list the relations in a
//! namespace, describe a relation's columns, and evaluate a scalar query.
//! Opening the connection is the only operation that may fail fatally;
//! every other failure is non-fatal and becomes a finding upstream.

pub mod adapter;
pub mod error;

mod duckdb_adapter;

pub use adapter::*;
pub use duckdb_adapter::DuckDbAdapter;
pub use error::*;
