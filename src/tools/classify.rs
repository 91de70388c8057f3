//! Shared outcome classification.
//!
//! All three tools funnel through [`execute_classified`], so the
//! failure / empty / success contract is applied the same way everywhere:
//!
//! 1. run the statement;
//! 2. an error of any kind is logged and becomes `ConnectionFailure`;
//! 3. zero rows become `Empty`;
//! 4. anything else is `Success` with the rows in provider order.
//!
//! Nothing in here returns an error to the caller.

use crate::db::StatementExecutor;
use crate::error::{DbError, DbResult};
use crate::models::{QueryOutcome, RowRecord};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tracing::{debug, error};

/// Run `statement` and classify the result into typed rows.
///
/// `T = RowRecord` keeps rows as-is; any other `T` is decoded from each row.
pub async fn execute_classified<T, E>(
    executor: &E,
    operation: &'static str,
    statement: &str,
) -> QueryOutcome<T>
where
    T: DeserializeOwned,
    E: StatementExecutor + ?Sized,
{
    debug!(operation, sql = %statement, "Executing statement");

    let result = executor.fetch_rows(statement).await;
    let outcome = classify(operation, result.and_then(decode_rows));

    debug!(
        operation,
        outcome = outcome.label(),
        rows = outcome.rows().map_or(0, <[T]>::len),
        "Statement classified"
    );
    outcome
}

/// Apply the three-way classification to an already-fetched result.
pub fn classify<T>(operation: &'static str, result: DbResult<Vec<T>>) -> QueryOutcome<T> {
    match result {
        Ok(rows) => QueryOutcome::from_rows(rows),
        Err(e) => {
            error!(
                operation,
                kind = %e.kind(),
                sql_state = sql_state(&e),
                error = %e,
                "Query failed"
            );
            QueryOutcome::ConnectionFailure
        }
    }
}

fn sql_state(err: &DbError) -> &str {
    match err {
        DbError::Database {
            sql_state: Some(code),
            ..
        } => code,
        _ => "",
    }
}

/// Decode every row into `T`; a row with the wrong shape fails the whole set.
fn decode_rows<T: DeserializeOwned>(rows: Vec<RowRecord>) -> DbResult<Vec<T>> {
    rows.into_iter()
        .map(|row| {
            serde_json::from_value(JsonValue::Object(row))
                .map_err(|e| DbError::internal(format!("Unexpected row shape: {}", e)))
        })
        .collect()
}
