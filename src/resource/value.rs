use std::str::FromStr;

use serde::Deserialize;
use sqlx::types::Decimal;

use crate::error::DataError;

/// A bindable parameter. `None` binds SQL NULL.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(Option<String>),
    Int(Option<i64>),
    Numeric(Option<Decimal>),
}

/// Any JSON scalar a client sends for a column. Conversion to the column's
/// type happens in [`text`], [`integer`] and [`numeric`], not at deserialization.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Bool(b) => b.to_string(),
            Scalar::Int(i) => i.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Text(s) => s,
        }
    }
}

fn invalid(column: &str, kind: &str, raw: &str) -> DataError {
    DataError::Internal(format!("invalid input for {column} ({kind}): {raw:?}"))
}

pub fn text(value: Option<Scalar>) -> SqlValue {
    SqlValue::Text(value.map(Scalar::into_text))
}

pub fn integer(column: &str, value: Option<Scalar>) -> Result<SqlValue, DataError> {
    let parsed = match value {
        None => None,
        Some(Scalar::Int(i)) => Some(i),
        Some(other) => {
            let raw = other.into_text();
            Some(raw.trim().parse::<i64>().map_err(|_| invalid(column, "integer", &raw))?)
        }
    };
    Ok(SqlValue::Int(parsed))
}

/// JSON numbers go through their shortest decimal rendering, so `19.99`
/// stays exactly `19.99`.
pub fn numeric(column: &str, value: Option<Scalar>) -> Result<SqlValue, DataError> {
    let parsed = match value {
        None => None,
        Some(other) => {
            let raw = other.into_text();
            Some(Decimal::from_str(raw.trim()).map_err(|_| invalid(column, "numeric", &raw))?)
        }
    };
    Ok(SqlValue::Numeric(parsed))
}
