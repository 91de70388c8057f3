//! MCP tool implementations.
//!
//! This module contains the database tool handlers:
//! - `list-schema`: List base tables outside the system schemas
//! - `table-schema`: List the columns of one table
//! - `query-data`: Fetch rows of one table matching a raw WHERE clause
//! - `classify`: Shared failure / empty / success classification
//! - `format`: Outcome to response text

pub mod classify;
pub mod format;
pub mod schema;
pub mod search;

pub use classify::execute_classified;
pub use format::{CONNECTION_FAILED_TEXT, NO_DATA_TEXT, NO_TABLE_TEXT, render_outcome};
pub use schema::{DescribeTableInput, SchemaToolHandler};
pub use search::{QueryDataInput, SearchToolHandler};
