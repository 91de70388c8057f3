//! Database abstraction layer.
//!
//! This module provides database access functionality:
//! - Connection pool creation
//! - The statement execution capability
//! - Row to JSON conversion

pub mod executor;
pub mod pool;
pub mod types;

pub use executor::{PgExecutor, StatementExecutor};
pub use pool::{create_executor, create_pool};
