//! Result-set rows to JSON objects
//!
//! The listing procedure owns its column set, so conversion goes by the
//! reported column type instead of a fixed struct.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde_json::Value;
use shared::models::PriceRow;
use sqlx::mysql::MySqlRow;
use sqlx::{Column, Row, TypeInfo, ValueRef};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const TIME_FORMAT: &str = "%H:%M:%S";

/// How a column is decoded, keyed by the driver's type name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ColumnKind {
    Signed,
    Unsigned,
    Float,
    Double,
    Decimal,
    Date,
    DateTime,
    Time,
    Json,
    Binary,
    /// Text types and anything unlisted
    Text,
}

pub(crate) fn column_kind(type_name: &str) -> ColumnKind {
    match type_name {
        // TINYINT(1) is reported as BOOLEAN; clients expect 0/1
        "BOOLEAN" | "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => ColumnKind::Signed,
        "TINYINT UNSIGNED" | "SMALLINT UNSIGNED" | "MEDIUMINT UNSIGNED" | "INT UNSIGNED"
        | "BIGINT UNSIGNED" => ColumnKind::Unsigned,
        "FLOAT" => ColumnKind::Float,
        "DOUBLE" => ColumnKind::Double,
        "DECIMAL" => ColumnKind::Decimal,
        "DATE" => ColumnKind::Date,
        "DATETIME" | "TIMESTAMP" => ColumnKind::DateTime,
        "TIME" => ColumnKind::Time,
        "JSON" => ColumnKind::Json,
        "BINARY" | "VARBINARY" | "TINYBLOB" | "BLOB" | "MEDIUMBLOB" | "LONGBLOB" => {
            ColumnKind::Binary
        }
        _ => ColumnKind::Text,
    }
}

/// Convert one row; column names become keys
pub fn row_to_json(row: &MySqlRow) -> Result<PriceRow, sqlx::Error> {
    let mut object = PriceRow::new();
    for column in row.columns() {
        let kind = column_kind(column.type_info().name());
        let value = column_value(row, column.ordinal(), kind)?;
        object.insert(column.name().to_string(), value);
    }
    Ok(object)
}

fn column_value(row: &MySqlRow, index: usize, kind: ColumnKind) -> Result<Value, sqlx::Error> {
    if row.try_get_raw(index)?.is_null() {
        return Ok(Value::Null);
    }

    let value = match kind {
        ColumnKind::Signed => Value::from(row.try_get::<i64, _>(index)?),
        ColumnKind::Unsigned => Value::from(row.try_get::<u64, _>(index)?),
        ColumnKind::Float => Value::from(f64::from(row.try_get::<f32, _>(index)?)),
        ColumnKind::Double => Value::from(row.try_get::<f64, _>(index)?),
        ColumnKind::Decimal => decimal_value(row.try_get::<Decimal, _>(index)?),
        ColumnKind::Date => date_value(row.try_get::<NaiveDate, _>(index)?),
        ColumnKind::DateTime => datetime_value(row.try_get::<NaiveDateTime, _>(index)?),
        ColumnKind::Time => time_value(row.try_get::<NaiveTime, _>(index)?),
        ColumnKind::Json => row.try_get::<sqlx::types::Json<Value>, _>(index)?.0,
        ColumnKind::Binary => lossy_text(row.try_get::<Vec<u8>, _>(index)?),
        ColumnKind::Text => fallback_value(row, index)?,
    };
    Ok(value)
}

/// Text columns and anything not listed above
fn fallback_value(row: &MySqlRow, index: usize) -> Result<Value, sqlx::Error> {
    if let Ok(text) = row.try_get::<String, _>(index) {
        return Ok(Value::String(text));
    }
    if let Ok(bytes) = row.try_get::<Vec<u8>, _>(index) {
        return Ok(lossy_text(bytes));
    }
    if let Ok(number) = row.try_get::<i64, _>(index) {
        return Ok(Value::from(number));
    }
    row.try_get::<u64, _>(index).map(Value::from)
}

// decimals and temporal types go out as strings

pub(crate) fn decimal_value(value: Decimal) -> Value {
    Value::String(value.to_string())
}

pub(crate) fn date_value(value: NaiveDate) -> Value {
    Value::String(value.format(DATE_FORMAT).to_string())
}

pub(crate) fn datetime_value(value: NaiveDateTime) -> Value {
    Value::String(value.format(DATETIME_FORMAT).to_string())
}

pub(crate) fn time_value(value: NaiveTime) -> Value {
    Value::String(value.format(TIME_FORMAT).to_string())
}

pub(crate) fn lossy_text(bytes: Vec<u8>) -> Value {
    Value::String(String::from_utf8_lossy(&bytes).into_owned())
}
