//! DuckDB <-> JSON / cursor conversions

use crate::types::{CursorValue, JsonValue};
use duckdb::types::{TimeUnit, ToSqlOutput, Value};
use duckdb::ToSql;

/// Text cursors bind as VARCHAR; DuckDB casts them to the compared column's
/// type, so request cursors work against numeric, text and temporal columns.
impl ToSql for CursorValue {
    fn to_sql(&self) -> duckdb::Result<ToSqlOutput<'_>> {
        Ok(match self {
            CursorValue::Int(i) => ToSqlOutput::Owned(Value::BigInt(*i)),
            CursorValue::Float(f) => ToSqlOutput::Owned(Value::Double(*f)),
            CursorValue::Text(s) => ToSqlOutput::Owned(Value::Text(s.clone())),
        })
    }
}

/// Split a count of `unit` ticks into whole seconds and nanoseconds
fn split_ticks(unit: TimeUnit, ticks: i64) -> (i64, u32) {
    let per_second: i64 = match unit {
        TimeUnit::Second => 1,
        TimeUnit::Millisecond => 1_000,
        TimeUnit::Microsecond => 1_000_000,
        TimeUnit::Nanosecond => 1_000_000_000,
    };
    let nanos = ticks.rem_euclid(per_second) * (1_000_000_000 / per_second);
    (ticks.div_euclid(per_second), nanos as u32)
}

/// Convert a DuckDB value to JSON
///
/// Timestamps and dates become ISO strings, blobs become base64, 128-bit
/// integers become strings.
pub fn duckdb_value_to_json(value: Value) -> JsonValue {
    match value {
        Value::Null => JsonValue::Null,
        Value::Boolean(b) => JsonValue::Bool(b),
        Value::TinyInt(i) => JsonValue::Number(i.into()),
        Value::SmallInt(i) => JsonValue::Number(i.into()),
        Value::Int(i) => JsonValue::Number(i.into()),
        Value::BigInt(i) => JsonValue::Number(i.into()),
        Value::HugeInt(i) => JsonValue::String(i.to_string()),
        Value::UTinyInt(i) => JsonValue::Number(i.into()),
        Value::USmallInt(i) => JsonValue::Number(i.into()),
        Value::UInt(i) => JsonValue::Number(i.into()),
        Value::UBigInt(i) => JsonValue::Number(i.into()),
        Value::Float(f) => {
            serde_json::Number::from_f64(f64::from(f)).map_or(JsonValue::Null, JsonValue::Number)
        }
        Value::Double(f) => serde_json::Number::from_f64(f).map_or(JsonValue::Null, JsonValue::Number),
        Value::Text(s) => JsonValue::String(s),
        Value::Blob(b) => JsonValue::String(base64::Engine::encode(
            &base64::engine::general_purpose::STANDARD,
            b,
        )),
        Value::Timestamp(unit, ticks) => {
            let (secs, nsecs) = split_ticks(unit, ticks);
            chrono::DateTime::from_timestamp(secs, nsecs)
                .map(|dt| JsonValue::String(dt.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()))
                .unwrap_or(JsonValue::Number(ticks.into()))
        }
        Value::Date32(days) => {
            // 719163 days from 0001-01-01 to 1970-01-01
            chrono::NaiveDate::from_num_days_from_ce_opt(days + 719_163)
                .map(|date| JsonValue::String(date.format("%Y-%m-%d").to_string()))
                .unwrap_or(JsonValue::Number(days.into()))
        }
        Value::Time64(unit, ticks) => {
            let (secs, nsecs) = split_ticks(unit, ticks);
            let micros = nsecs / 1000;
            JsonValue::String(format!(
                "{:02}:{:02}:{:02}.{:06}",
                secs / 3600,
                (secs % 3600) / 60,
                secs % 60,
                micros
            ))
        }
        _ => JsonValue::String(format!("{value:?}")),
    }
}
