//! DuckDB implementation of the introspection adapter.
//!
//! Opens the database file read-only; the validator never writes. The
//! connection is released when the adapter is dropped, on every exit path.

use std::collections::BTreeSet;
use std::path::Path;

use duckdb::types::Value;
use duckdb::{AccessMode, Config, Connection};
use tracing::debug;
use warehouse_contracts::Scalar;

use crate::{AdapterError, Introspect, LiveColumn, RelationKind};

/// Read-only adapter over a DuckDB database file.
#[derive(Debug)]
pub struct DuckDbAdapter {
    conn: Connection,
}

impl DuckDbAdapter {
    /// Opens the database at `path`.
    ///
    /// Fails with [`AdapterError::Unreachable`] if the file does not exist
    /// or DuckDB rejects the connection. This is the only fatal failure in
    /// the validation engine.
    pub fn connect(path: impl AsRef<Path>) -> Result<Self, AdapterError> {
        let path = path.as_ref();
        let path_display = path.display().to_string();

        // DuckDB would create a missing file; check first so a bad path is
        // reported as unreachable instead of silently materializing an
        // empty database.
        if !path.exists() {
            return Err(AdapterError::unreachable(&path_display, "file not found"));
        }

        let config = Config::default()
            .access_mode(AccessMode::ReadOnly)
            .map_err(|e| AdapterError::unreachable(&path_display, e.to_string()))?;

        let conn = Connection::open_with_flags(path, config)
            .map_err(|e| AdapterError::unreachable(&path_display, e.to_string()))?;

        debug!("Opened database read-only: {path_display}");
        Ok(Self { conn })
    }

    /// Releases the connection explicitly.
    ///
    /// Dropping the adapter has the same effect; this exists for callers
    /// that want close errors surfaced.
    pub fn close(self) -> Result<(), AdapterError> {
        self.conn
            .close()
            .map_err(|(_, e)| AdapterError::query(e.to_string()))
    }
}

impl Introspect for DuckDbAdapter {
    fn list_relations(
        &self,
        namespace: &str,
        kind: RelationKind,
    ) -> Result<BTreeSet<String>, AdapterError> {
        let table_type = match kind {
            RelationKind::Table => "BASE TABLE",
            RelationKind::View => "VIEW",
        };

        let mut stmt = self
            .conn
            .prepare(
                "SELECT table_name FROM information_schema.tables \
                 WHERE table_schema = ? AND table_type = ?",
            )
            .map_err(|e| AdapterError::query(e.to_string()))?;

        let names = stmt
            .query_map(duckdb::params![namespace, table_type], |row| row.get(0))
            .map_err(|e| AdapterError::query(e.to_string()))?
            .collect::<Result<BTreeSet<String>, _>>()
            .map_err(|e| AdapterError::query(e.to_string()))?;

        debug!(
            "Listed {} {:?} relation(s) in namespace '{}'",
            names.len(),
            kind,
            namespace
        );
        Ok(names)
    }

    fn describe_columns(
        &self,
        namespace: &str,
        relation: &str,
    ) -> Result<Vec<LiveColumn>, AdapterError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT column_name, data_type FROM information_schema.columns \
                 WHERE table_schema = ? AND table_name = ? \
                 ORDER BY ordinal_position",
            )
            .map_err(|e| AdapterError::introspection(relation, e.to_string()))?;

        let columns = stmt
            .query_map(duckdb::params![namespace, relation], |row| {
                Ok(LiveColumn {
                    name: row.get(0)?,
                    type_name: row.get(1)?,
                })
            })
            .map_err(|e| AdapterError::introspection(relation, e.to_string()))?
            .collect::<Result<Vec<LiveColumn>, _>>()
            .map_err(|e| AdapterError::introspection(relation, e.to_string()))?;

        if columns.is_empty() {
            return Err(AdapterError::introspection(
                relation,
                format!("no columns found in namespace '{namespace}'"),
            ));
        }

        Ok(columns)
    }

    fn evaluate_scalar(&self, query: &str) -> Result<Scalar, AdapterError> {
        let mut stmt = self
            .conn
            .prepare(query)
            .map_err(|e| AdapterError::query(e.to_string()))?;

        let mut rows = stmt
            .query([])
            .map_err(|e| AdapterError::query(e.to_string()))?;

        let value = match rows.next().map_err(|e| AdapterError::query(e.to_string()))? {
            Some(row) => {
                let columns = row.as_ref().column_count();
                if columns != 1 {
                    return Err(AdapterError::query(format!(
                        "expected one column, got {columns}"
                    )));
                }
                let value: Value = row.get(0).map_err(|e| AdapterError::query(e.to_string()))?;
                scalar_from_value(value)
            }
            None => return Err(AdapterError::query("expected one row, got none")),
        };

        if rows
            .next()
            .map_err(|e| AdapterError::query(e.to_string()))?
            .is_some()
        {
            return Err(AdapterError::query("expected one row, got more than one"));
        }

        Ok(value)
    }
}

/// Widens a DuckDB value to the scalar model.
fn scalar_from_value(value: Value) -> Scalar {
    match value {
        Value::Null => Scalar::Null,
        Value::Boolean(v) => Scalar::Bool(v),
        Value::TinyInt(v) => Scalar::Int(v.into()),
        Value::SmallInt(v) => Scalar::Int(v.into()),
        Value::Int(v) => Scalar::Int(v.into()),
        Value::BigInt(v) => Scalar::Int(v),
        Value::UTinyInt(v) => Scalar::Int(v.into()),
        Value::USmallInt(v) => Scalar::Int(v.into()),
        Value::UInt(v) => Scalar::Int(v.into()),
        Value::HugeInt(v) => match i64::try_from(v) {
            Ok(v) => Scalar::Int(v),
            Err(_) => Scalar::Text(v.to_string()),
        },
        Value::UBigInt(v) => match i64::try_from(v) {
            Ok(v) => Scalar::Int(v),
            Err(_) => Scalar::Text(v.to_string()),
        },
        Value::Float(v) => Scalar::Float(v.into()),
        Value::Double(v) => Scalar::Float(v),
        Value::Text(v) => Scalar::Text(v),
        other => Scalar::Text(format!("{other:?}")),
    }
}
