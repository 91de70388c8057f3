//! Schema-related data models.
//!
//! This module defines the typed rows returned by the schema lister and the
//! table describer, plus the table reference they are built from.

use serde::{Deserialize, Serialize};

/// Identifies one table inside one schema.
///
/// Existence is never checked up front: a reference to a missing table simply
/// yields an empty result once the statement runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    pub schema: String,
    pub table: String,
}

impl TableRef {
    /// Create a new table reference.
    pub fn new(schema: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            table: table.into(),
        }
    }
}

impl std::fmt::Display for TableRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.schema, self.table)
    }
}

/// One base table as listed by `list-schema`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableEntry {
    pub table_schema: String,
    pub table_name: String,
}

/// One column as listed by `table-schema`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub column_name: String,
    pub data_type: String,
}
