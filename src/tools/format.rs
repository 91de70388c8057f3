//! Response text rendering.
//!
//! Turns a classified outcome into the single text segment returned to the
//! caller: a compact JSON array on success, otherwise one of three fixed
//! markers. Raw database errors never appear here.

use crate::models::QueryOutcome;
use serde::Serialize;
use tracing::error;

/// Returned when the statement could not be executed.
pub const CONNECTION_FAILED_TEXT: &str = "Echec de la connexion à la base";
/// Returned by `list-schema` when the database has no user tables.
pub const NO_TABLE_TEXT: &str = "Pas de table";
/// Returned by `table-schema` and `query-data` when nothing matched.
pub const NO_DATA_TEXT: &str = "Pas de données";

/// Render `outcome`, using `empty_text` for the empty case.
///
/// The JSON has no whitespace and no pagination: every row is serialized.
pub fn render_outcome<T: Serialize>(outcome: &QueryOutcome<T>, empty_text: &str) -> String {
    match outcome {
        QueryOutcome::ConnectionFailure => CONNECTION_FAILED_TEXT.to_string(),
        QueryOutcome::Empty => empty_text.to_string(),
        QueryOutcome::Success(rows) => match serde_json::to_string(rows) {
            Ok(json) => json,
            Err(e) => {
                error!(error = %e, "Failed to serialize rows");
                CONNECTION_FAILED_TEXT.to_string()
            }
        },
    }
}
