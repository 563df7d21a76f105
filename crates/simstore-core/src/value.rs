//! Row values.
//!
//! Row data crosses the API boundary as [`Value`], a closed set of variants
//! matching the allowed column vocabulary. Checking a value against a
//! column's declared type happens before anything reaches the engine.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

use crate::column::declared_base_type;

/// A single cell of a row.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
    Duration(TimeDelta),
    Blob(Vec<u8>),
}

impl Value {
    /// The declared column type this variant naturally belongs to.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Integer(_) => "INTEGER",
            Value::Real(_) => "REAL",
            Value::Text(_) => "TEXT",
            Value::Date(_) => "DATE",
            Value::Timestamp(_) => "DATETIME",
            Value::Duration(_) => "TIMEDELTA",
            Value::Blob(_) => "BLOB",
        }
    }

    /// Whether this value may be stored in a column declared as `decl_type`.
    ///
    /// `Null` fits everywhere (NOT NULL is left to the engine). Integers are
    /// accepted by REAL columns. Base types outside the built-in set accept
    /// any value.
    pub fn fits(&self, decl_type: Option<&str>) -> bool {
        if matches!(self, Value::Null) {
            return true;
        }
        let Some(base) = decl_type.map(declared_base_type) else {
            return true;
        };
        match base.as_str() {
            "INTEGER" => matches!(self, Value::Integer(_)),
            "REAL" => matches!(self, Value::Real(_) | Value::Integer(_)),
            "TEXT" => matches!(self, Value::Text(_)),
            "BLOB" => matches!(self, Value::Blob(_)),
            "DATE" => matches!(self, Value::Date(_)),
            "DATETIME" => matches!(self, Value::Timestamp(_)),
            "TIMEDELTA" => matches!(self, Value::Duration(_)),
            _ => true,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::Timestamp(v)
    }
}

impl From<TimeDelta> for Value {
    fn from(v: TimeDelta) -> Self {
        Value::Duration(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Blob(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}
