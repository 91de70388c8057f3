//! PostgreSQL row to JSON conversion.
//!
//! # Architecture
//!
//! Conversion uses a two-phase approach:
//! 1. `TypeCategory` classifies a column's type name into a logical category
//! 2. A category decoder extracts the value
//!
//! Values whose category has no dedicated JSON shape (numeric, uuid, enums,
//! domains, intervals, network types...) are emitted as their PostgreSQL text
//! representation. Statements run over the simple query protocol, so every
//! value arrives in text format and that fallback is always available.

use crate::models::RowRecord;
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde_json::Value as JsonValue;
use sqlx::postgres::{PgRow, PgValueRef};
use sqlx::{Column, Row, TypeInfo, ValueRef};

// =============================================================================
// Type Classification
// =============================================================================

/// Logical category for PostgreSQL column types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeCategory {
    SmallInt,
    Integer,
    BigInt,
    Real,
    Double,
    Boolean,
    Json,
    Binary,
    TimestampTz,
    Timestamp,
    Date,
    /// Emitted as the server's text representation.
    Text,
}

/// Classify a PostgreSQL type name into a logical category.
///
/// Matching is exact: `INTERVAL` or `INT4[]` must not be mistaken for integers.
pub fn categorize_type(type_name: &str) -> TypeCategory {
    match type_name.to_lowercase().as_str() {
        "int2" | "smallint" => TypeCategory::SmallInt,
        "int4" | "integer" | "int" => TypeCategory::Integer,
        "int8" | "bigint" => TypeCategory::BigInt,
        "float4" | "real" => TypeCategory::Real,
        "float8" | "double precision" => TypeCategory::Double,
        "bool" | "boolean" => TypeCategory::Boolean,
        "json" | "jsonb" => TypeCategory::Json,
        "bytea" => TypeCategory::Binary,
        "timestamptz" => TypeCategory::TimestampTz,
        "timestamp" => TypeCategory::Timestamp,
        "date" => TypeCategory::Date,
        _ => TypeCategory::Text,
    }
}

// =============================================================================
// Binary Encoding
// =============================================================================

/// Decode binary data to JSON value.
///
/// Valid UTF-8 is returned as text, anything else as base64.
pub fn decode_binary_value(bytes: &[u8]) -> JsonValue {
    use base64::{Engine as _, engine::general_purpose::STANDARD};

    match std::str::from_utf8(bytes) {
        Ok(s) => JsonValue::String(s.to_string()),
        Err(_) => JsonValue::String(STANDARD.encode(bytes)),
    }
}

/// Convert a float to a JSON number, keeping non-finite values as strings.
fn float_value(v: f64) -> JsonValue {
    serde_json::Number::from_f64(v)
        .map(JsonValue::Number)
        .unwrap_or_else(|| JsonValue::String(v.to_string()))
}

/// Format a UTC timestamp the way JavaScript's `Date.toJSON` does.
pub fn format_timestamptz(v: &DateTime<Utc>) -> String {
    v.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Format a timestamp without time zone as ISO 8601 with milliseconds.
pub fn format_timestamp(v: &NaiveDateTime) -> String {
    v.format("%Y-%m-%dT%H:%M:%S%.3f").to_string()
}

// =============================================================================
// Row to JSON Trait
// =============================================================================

/// Trait for converting database rows to JSON maps.
pub trait RowToJson {
    fn to_json_map(&self) -> RowRecord;
}

impl RowToJson for PgRow {
    fn to_json_map(&self) -> RowRecord {
        self.columns()
            .iter()
            .enumerate()
            .map(|(idx, col)| {
                let category = categorize_type(col.type_info().name());
                let value = decode_column(self, idx, category);
                (col.name().to_string(), value)
            })
            .collect()
    }
}

// =============================================================================
// Column Decoding
// =============================================================================

fn decode_column(row: &PgRow, idx: usize, category: TypeCategory) -> JsonValue {
    let raw = match row.try_get_raw(idx) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::error!(column = idx, error = %e, "Failed to read column");
            return JsonValue::Null;
        }
    };
    if raw.is_null() {
        return JsonValue::Null;
    }

    let typed = match category {
        TypeCategory::SmallInt => row
            .try_get::<i16, _>(idx)
            .ok()
            .map(|v| JsonValue::Number(v.into())),
        TypeCategory::Integer => row
            .try_get::<i32, _>(idx)
            .ok()
            .map(|v| JsonValue::Number(v.into())),
        TypeCategory::BigInt => row
            .try_get::<i64, _>(idx)
            .ok()
            .map(|v| JsonValue::Number(v.into())),
        // Go through the f32 display form so 1.1 stays 1.1 instead of widening.
        TypeCategory::Real => row
            .try_get::<f32, _>(idx)
            .ok()
            .map(|v| float_value(v.to_string().parse().unwrap_or(v as f64))),
        TypeCategory::Double => row.try_get::<f64, _>(idx).ok().map(float_value),
        TypeCategory::Boolean => row.try_get::<bool, _>(idx).ok().map(JsonValue::Bool),
        TypeCategory::Json => row.try_get::<JsonValue, _>(idx).ok(),
        TypeCategory::Binary => row
            .try_get::<Vec<u8>, _>(idx)
            .ok()
            .map(|v| decode_binary_value(&v)),
        TypeCategory::TimestampTz => row
            .try_get::<DateTime<Utc>, _>(idx)
            .ok()
            .map(|v| JsonValue::String(format_timestamptz(&v))),
        TypeCategory::Timestamp => row
            .try_get::<NaiveDateTime, _>(idx)
            .ok()
            .map(|v| JsonValue::String(format_timestamp(&v))),
        TypeCategory::Date => row
            .try_get::<NaiveDate, _>(idx)
            .ok()
            .map(|v| JsonValue::String(v.format("%Y-%m-%d").to_string())),
        TypeCategory::Text => None,
    };

    typed.unwrap_or_else(|| decode_text(raw))
}

/// Read the value's text representation.
fn decode_text(raw: PgValueRef<'_>) -> JsonValue {
    match raw.as_str() {
        Ok(s) => JsonValue::String(s.to_string()),
        Err(e) => {
            tracing::error!(error = %e, "Failed to decode column as text");
            JsonValue::Null
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorize_type_integers() {
        assert_eq!(categorize_type("INT2"), TypeCategory::SmallInt);
        assert_eq!(categorize_type("INT4"), TypeCategory::Integer);
        assert_eq!(categorize_type("INT8"), TypeCategory::BigInt);
        assert_eq!(categorize_type("bigint"), TypeCategory::BigInt);
    }

    #[test]
    fn test_categorize_type_is_exact() {
        assert_eq!(categorize_type("INTERVAL"), TypeCategory::Text);
        assert_eq!(categorize_type("INT4[]"), TypeCategory::Text);
        assert_eq!(categorize_type("sql_identifier"), TypeCategory::Text);
    }

    #[test]
    fn test_categorize_type_numeric_is_text() {
        assert_eq!(categorize_type("NUMERIC"), TypeCategory::Text);
        assert_eq!(categorize_type("UUID"), TypeCategory::Text);
    }

    #[test]
    fn test_categorize_type_temporal() {
        assert_eq!(categorize_type("TIMESTAMPTZ"), TypeCategory::TimestampTz);
        assert_eq!(categorize_type("TIMESTAMP"), TypeCategory::Timestamp);
        assert_eq!(categorize_type("DATE"), TypeCategory::Date);
        assert_eq!(categorize_type("TIME"), TypeCategory::Text);
    }

    #[test]
    fn test_categorize_type_json() {
        assert_eq!(categorize_type("json"), TypeCategory::Json);
        assert_eq!(categorize_type("JSONB"), TypeCategory::Json);
    }

    #[test]
    fn test_decode_binary_value_with_valid_utf8() {
        let result = decode_binary_value(b"hello world");
        assert_eq!(result, JsonValue::String("hello world".to_string()));
    }

    #[test]
    fn test_decode_binary_value_with_invalid_utf8() {
        let bytes: &[u8] = &[0xFF, 0xFE, 0x00, 0x01];
        let result = decode_binary_value(bytes);
        assert_eq!(result, JsonValue::String("//4AAQ==".to_string()));
    }

    #[test]
    fn test_float_value_non_finite() {
        assert_eq!(float_value(f64::NAN), JsonValue::String("NaN".to_string()));
        assert_eq!(float_value(1.5), serde_json::json!(1.5));
    }

    #[test]
    fn test_format_timestamptz_matches_js_date() {
        let ts = DateTime::parse_from_rfc3339("2024-03-05T10:20:30+02:00")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(format_timestamptz(&ts), "2024-03-05T08:20:30.000Z");
    }

    #[test]
    fn test_format_timestamp() {
        let ts = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_milli_opt(10, 20, 30, 125)
            .unwrap();
        assert_eq!(format_timestamp(&ts), "2024-03-05T10:20:30.125");
    }
}
