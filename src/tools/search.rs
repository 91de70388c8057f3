//! Row search tool.
//!
//! This module implements the `query-data` MCP tool.
//!
//! # Trust boundary
//!
//! The WHERE clause is raw SQL supplied by the caller and is spliced into the
//! statement unchanged; the table name is only wrapped in double quotes. The
//! caller is assumed trusted and effectively has arbitrary predicate access to
//! the named table. No escaping or validation happens here, and none should be
//! added silently: it would change which inputs are accepted.

use crate::db::StatementExecutor;
use crate::models::QueryOutcome;
use crate::tools::classify::execute_classified;
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// Build the row search statement.
pub fn query_data_sql(table_name: &str, where_clause: &str) -> String {
    format!("SELECT * FROM \"{}\" WHERE {}", table_name, where_clause)
}

/// Input for the query-data tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct QueryDataInput {
    /// Name of the table
    #[serde(rename = "tableName")]
    pub table_name: String,
    /// WHERE clause body, without the WHERE keyword (e.g. "level = 'ERROR'")
    #[serde(rename = "whereClause")]
    pub where_clause: String,
}

/// Handler for row searches.
pub struct SearchToolHandler {
    executor: Arc<dyn StatementExecutor>,
}

impl SearchToolHandler {
    pub fn new(executor: Arc<dyn StatementExecutor>) -> Self {
        Self { executor }
    }

    /// Fetch every row of the table matching the filter.
    pub async fn query_data(&self, input: QueryDataInput) -> QueryOutcome {
        info!(table = %input.table_name, "Querying table data");
        query_data(self.executor.as_ref(), &input.table_name, &input.where_clause).await
    }
}

/// Row searcher. Results are unbounded.
pub async fn query_data<E>(executor: &E, table_name: &str, where_clause: &str) -> QueryOutcome
where
    E: StatementExecutor + ?Sized,
{
    execute_classified(executor, "query-data", &query_data_sql(table_name, where_clause)).await
}
