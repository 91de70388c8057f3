//! Data models for the Logs MCP Server.
//!
//! This module re-exports all model types used throughout the application.

pub mod outcome;
pub mod schema;

// Re-export commonly used types
pub use outcome::{QueryOutcome, RowRecord};
pub use schema::{ColumnDescriptor, TableEntry, TableRef};
