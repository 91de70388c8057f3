//! Schema introspection tools.
//!
//! This module implements the `list-schema` and `table-schema` MCP tools.

use crate::db::StatementExecutor;
use crate::models::{ColumnDescriptor, QueryOutcome, TableEntry, TableRef};
use crate::tools::classify::execute_classified;
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// Every base table outside the two reserved system schemas.
///
/// The casts turn the `sql_identifier` domain into plain text for the driver.
pub const LIST_TABLES_SQL: &str = "SELECT table_schema::text AS table_schema, table_name::text AS table_name \
FROM information_schema.tables \
WHERE table_type = 'BASE TABLE' \
AND table_schema NOT IN ('pg_catalog', 'information_schema');";

/// Build the column listing statement for one table.
///
/// Schema and table names are interpolated verbatim inside string literals;
/// the caller is trusted, and a name containing a quote makes the statement
/// fail rather than being escaped.
pub fn describe_table_sql(table: &TableRef) -> String {
    format!(
        "SELECT column_name::text AS column_name, data_type::text AS data_type \
FROM information_schema.columns \
WHERE table_schema = '{}' AND table_name = '{}';",
        table.schema, table.table
    )
}

/// Input for the table-schema tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DescribeTableInput {
    /// Name of the table
    #[serde(rename = "tableName")]
    pub table_name: String,
    /// Schema containing the table
    pub schema: String,
}

impl DescribeTableInput {
    pub fn table_ref(&self) -> TableRef {
        TableRef::new(&self.schema, &self.table_name)
    }
}

/// Handler for schema introspection.
pub struct SchemaToolHandler {
    executor: Arc<dyn StatementExecutor>,
}

impl SchemaToolHandler {
    pub fn new(executor: Arc<dyn StatementExecutor>) -> Self {
        Self { executor }
    }

    /// List every base table with its schema.
    pub async fn list_schema(&self) -> QueryOutcome<TableEntry> {
        info!("Listing tables");
        list_schema(self.executor.as_ref()).await
    }

    /// List the columns of one table.
    pub async fn describe_table(&self, input: DescribeTableInput) -> QueryOutcome<ColumnDescriptor> {
        let table = input.table_ref();
        info!(table = %table, "Describing table");
        describe_table(self.executor.as_ref(), &table).await
    }
}

/// Schema lister.
pub async fn list_schema<E>(executor: &E) -> QueryOutcome<TableEntry>
where
    E: StatementExecutor + ?Sized,
{
    execute_classified(executor, "list-schema", LIST_TABLES_SQL).await
}

/// Table describer. A missing table is indistinguishable from an empty one.
pub async fn describe_table<E>(executor: &E, table: &TableRef) -> QueryOutcome<ColumnDescriptor>
where
    E: StatementExecutor + ?Sized,
{
    execute_classified(executor, "table-schema", &describe_table_sql(table)).await
}
