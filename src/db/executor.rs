//! Statement execution capability.
//!
//! Query executors never reach for a global pool: they receive a
//! [`StatementExecutor`] and hand it one SQL statement. The PostgreSQL
//! implementation wraps a `PgPool`; tests substitute a stub.
//!
//! Statements are sent without bind parameters, which makes sqlx use the
//! simple query protocol: the text goes to the server verbatim and every
//! value comes back in text format.

use crate::db::types::RowToJson;
use crate::error::DbResult;
use crate::models::RowRecord;
use futures_util::future::BoxFuture;
use sqlx::PgPool;
use std::time::Instant;
use tracing::debug;

/// Something that can run one SQL statement and return its rows.
///
/// Pooling, connection timeouts and lifecycle are the implementor's concern.
pub trait StatementExecutor: Send + Sync {
    /// Run `sql` and return every row, in the order the engine produced them.
    fn fetch_rows<'a>(&'a self, sql: &'a str) -> BoxFuture<'a, DbResult<Vec<RowRecord>>>;

    /// Release underlying resources on shutdown.
    fn close(&self) -> BoxFuture<'_, ()> {
        Box::pin(async {})
    }
}

/// PostgreSQL executor backed by a connection pool.
#[derive(Debug, Clone)]
pub struct PgExecutor {
    pool: PgPool,
}

impl PgExecutor {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl StatementExecutor for PgExecutor {
    fn fetch_rows<'a>(&'a self, sql: &'a str) -> BoxFuture<'a, DbResult<Vec<RowRecord>>> {
        Box::pin(async move {
            use sqlx::Executor;

            let start = Instant::now();
            let rows = self.pool.fetch_all(sql).await?;
            let records: Vec<RowRecord> = rows.iter().map(RowToJson::to_json_map).collect();

            debug!(
                rows = records.len(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Statement executed"
            );
            Ok(records)
        })
    }

    fn close(&self) -> BoxFuture<'_, ()> {
        Box::pin(self.pool.close())
    }
}

#[cfg(test)]
pub(crate) mod stub {
    use super::*;
    use crate::error::DbError;
    use std::sync::Mutex;

    /// Canned executor that records every statement it receives.
    pub(crate) struct StubExecutor {
        response: Mutex<Option<DbResult<Vec<RowRecord>>>>,
        rows: Option<Vec<RowRecord>>,
        pub(crate) statements: Mutex<Vec<String>>,
    }

    impl StubExecutor {
        /// Always return these rows.
        pub(crate) fn with_rows(rows: Vec<RowRecord>) -> Self {
            Self {
                response: Mutex::new(None),
                rows: Some(rows),
                statements: Mutex::new(Vec::new()),
            }
        }

        /// Fail the next call with this error, then return no rows.
        pub(crate) fn failing(err: DbError) -> Self {
            Self {
                response: Mutex::new(Some(Err(err))),
                rows: None,
                statements: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn last_statement(&self) -> Option<String> {
            self.statements.lock().unwrap().last().cloned()
        }
    }

    impl StatementExecutor for StubExecutor {
        fn fetch_rows<'a>(&'a self, sql: &'a str) -> BoxFuture<'a, DbResult<Vec<RowRecord>>> {
            self.statements.lock().unwrap().push(sql.to_string());
            let result = match self.response.lock().unwrap().take() {
                Some(result) => result,
                None => Ok(self.rows.clone().unwrap_or_default()),
            };
            Box::pin(async move { result })
        }
    }

    /// Build a row from `(column, value)` pairs, keeping their order.
    pub(crate) fn row(pairs: &[(&str, serde_json::Value)]) -> RowRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }
}
