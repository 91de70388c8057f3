//! MCP service implementation using rmcp.
//!
//! This module defines the LogsService struct with the three database tools
//! exposed via the MCP protocol using the rmcp framework's macros. Each tool
//! answers with a single text content: a JSON array or a fixed marker.

use crate::db::StatementExecutor;
use crate::error::DbError;
use crate::tools::schema::{DescribeTableInput, SchemaToolHandler};
use crate::tools::search::{QueryDataInput, SearchToolHandler};
use crate::tools::{NO_DATA_TEXT, NO_TABLE_TEXT, render_outcome};
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct LogsService {
    /// Shared statement executor for all database operations
    executor: Arc<dyn StatementExecutor>,
    /// Tool router for MCP tool dispatch (auto-generated)
    tool_router: ToolRouter<Self>,
}

impl LogsService {
    /// Create a new LogsService instance.
    pub fn new(executor: Arc<dyn StatementExecutor>) -> Self {
        Self {
            executor,
            tool_router: Self::tool_router(),
        }
    }

    /// Reject empty parameters. Any other value, whitespace included, is
    /// passed on untouched.
    fn require_non_empty(name: &str, value: &str) -> Result<(), McpError> {
        if value.is_empty() {
            Err(DbError::invalid_input(format!("{} must be a non-empty string", name)).into())
        } else {
            Ok(())
        }
    }

    fn text_result(text: String) -> CallToolResult {
        CallToolResult::success(vec![Content::text(text)])
    }
}

#[tool_router]
impl LogsService {
    #[tool(
        name = "list-schema",
        description = "List the database tables.\nReturns a JSON array of {table_schema, table_name} for every base table outside pg_catalog and information_schema."
    )]
    async fn list_schema(&self) -> Result<CallToolResult, McpError> {
        let handler = SchemaToolHandler::new(self.executor.clone());
        let outcome = handler.list_schema().await;
        Ok(Self::text_result(render_outcome(&outcome, NO_TABLE_TEXT)))
    }

    #[tool(
        name = "table-schema",
        description = "Get the structure of a table.\nReturns a JSON array of {column_name, data_type} for the table in the given schema."
    )]
    async fn table_schema(
        &self,
        Parameters(input): Parameters<DescribeTableInput>,
    ) -> Result<CallToolResult, McpError> {
        Self::require_non_empty("tableName", &input.table_name)?;
        Self::require_non_empty("schema", &input.schema)?;
        let handler = SchemaToolHandler::new(self.executor.clone());
        let outcome = handler.describe_table(input).await;
        Ok(Self::text_result(render_outcome(&outcome, NO_DATA_TEXT)))
    }

    #[tool(
        name = "query-data",
        description = "Fetch rows from a table.\nRuns SELECT * FROM \"tableName\" WHERE whereClause and returns every matching row as a JSON array.\nThe WHERE clause is raw SQL inserted as-is (without the WHERE keyword), e.g. level = 'ERROR'."
    )]
    async fn query_data(
        &self,
        Parameters(input): Parameters<QueryDataInput>,
    ) -> Result<CallToolResult, McpError> {
        Self::require_non_empty("tableName", &input.table_name)?;
        Self::require_non_empty("whereClause", &input.where_clause)?;
        let handler = SearchToolHandler::new(self.executor.clone());
        let outcome = handler.query_data(input).await;
        Ok(Self::text_result(render_outcome(&outcome, NO_DATA_TEXT)))
    }
}

#[tool_handler]
impl ServerHandler for LogsService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "logs-mcp-server".to_owned(),
                title: Some("Logs MCP Server".to_owned()),
                version: env!("CARGO_PKG_VERSION").to_owned(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Tools for exploring a PostgreSQL logs database.\n\
                \n\
                ## Workflow\n\
                1. Call `list-schema` to see the available tables and their schemas\n\
                2. Call `table-schema` with `schema` and `tableName` to see a table's columns\n\
                3. Call `query-data` with `tableName` and a raw `whereClause` to fetch rows\n\
                \n\
                ## Responses\n\
                - Success: a compact JSON array, never paginated\n\
                - \"Pas de table\" / \"Pas de données\": the query returned no rows\n\
                - \"Echec de la connexion à la base\": the statement could not run \
                (unreachable database or invalid SQL)"
                    .to_string(),
            ),
        }
    }
}
