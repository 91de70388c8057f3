//! Query outcome model.
//!
//! Every query executor reports exactly one of three states. The variants are
//! mutually exclusive: `Success` always carries at least one row, and an empty
//! result set is always `Empty`.

use serde_json::Value as JsonValue;

/// One result row: column name to JSON value, in result-set column order.
pub type RowRecord = serde_json::Map<String, JsonValue>;

/// Classified result of running one statement.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome<T = RowRecord> {
    /// The provider failed to run the statement, whatever the cause.
    ConnectionFailure,
    /// The statement ran and returned no rows.
    Empty,
    /// The statement returned one or more rows, in provider order.
    Success(Vec<T>),
}

impl<T> QueryOutcome<T> {
    /// Build an outcome from a row sequence that is known to have been fetched.
    pub fn from_rows(rows: Vec<T>) -> Self {
        if rows.is_empty() {
            Self::Empty
        } else {
            Self::Success(rows)
        }
    }

    pub fn is_connection_failure(&self) -> bool {
        matches!(self, Self::ConnectionFailure)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Rows of a successful outcome, `None` otherwise.
    pub fn rows(&self) -> Option<&[T]> {
        match self {
            Self::Success(rows) => Some(rows),
            _ => None,
        }
    }

    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ConnectionFailure => "connection_failure",
            Self::Empty => "empty",
            Self::Success(_) => "success",
        }
    }
}
