//! Temporal codecs and the registry that dispatches them.
//!
//! SQLite has no native date, timestamp, or duration storage class. Values
//! of those kinds are stored as text and converted back according to the
//! column's declared type. The [`CodecRegistry`] is built once and handed to
//! every [`Database`](crate::Database) that should use it; nothing is
//! registered process-wide.
//!
//! | Declared type | Text form                              |
//! |---------------|----------------------------------------|
//! | `DATE`        | `YYYY-MM-DD`                           |
//! | `DATETIME`    | `YYYY-MM-DDTHH:MM:SS[.ffffff]`         |
//! | `TIMEDELTA`   | `<days>,<seconds>,<microseconds>`      |

use std::collections::HashMap;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta, Timelike};
use rusqlite::types::{Value as SqlValue, ValueRef};
use simstore_core::{declared_base_type, Error, Result, Value};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const DATETIME_FORMAT_MICROS: &str = "%Y-%m-%dT%H:%M:%S%.6f";
const DATETIME_PARSE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

const MICROS_PER_SECOND: i128 = 1_000_000;
const MICROS_PER_DAY: i128 = 86_400 * MICROS_PER_SECOND;

/// Converts one kind of value to and from its stored text form.
pub trait TemporalCodec: fmt::Debug + Send + Sync {
    /// Declared type name this codec is keyed by, uppercase.
    fn type_name(&self) -> &'static str;

    /// Text form of `value`, or `None` if the value is not of this codec's kind.
    fn encode(&self, value: &Value) -> Option<String>;

    /// Parse stored text back into a value.
    fn decode(&self, raw: &str) -> Result<Value>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DateCodec;

impl TemporalCodec for DateCodec {
    fn type_name(&self) -> &'static str {
        "DATE"
    }

    fn encode(&self, value: &Value) -> Option<String> {
        match value {
            Value::Date(date) => Some(date.format(DATE_FORMAT).to_string()),
            _ => None,
        }
    }

    fn decode(&self, raw: &str) -> Result<Value> {
        NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map(Value::Date)
            .map_err(|e| Error::codec(self.type_name(), format!("invalid date {raw:?}: {e}")))
    }
}

/// Naive local timestamps; no timezone is attached or converted.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateTimeCodec;

impl TemporalCodec for DateTimeCodec {
    fn type_name(&self) -> &'static str {
        "DATETIME"
    }

    fn encode(&self, value: &Value) -> Option<String> {
        match value {
            Value::Timestamp(ts) => {
                let format = if ts.nanosecond() / 1_000 == 0 {
                    DATETIME_FORMAT
                } else {
                    DATETIME_FORMAT_MICROS
                };
                Some(ts.format(format).to_string())
            }
            _ => None,
        }
    }

    fn decode(&self, raw: &str) -> Result<Value> {
        DATETIME_PARSE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
            .map(Value::Timestamp)
            .ok_or_else(|| Error::codec(self.type_name(), format!("invalid timestamp {raw:?}")))
    }
}

/// Durations as `days,seconds,microseconds`.
///
/// Encoding normalizes so that seconds and microseconds are non-negative and
/// the sign is carried by days; `-1µs` is written `-1,86399,999999`.
/// Decoding accepts any three signed integers in that order and nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeDeltaCodec;

impl TimeDeltaCodec {
    /// Split into normalized `(days, seconds, microseconds)`.
    /// Sub-microsecond precision is truncated.
    pub fn components(delta: TimeDelta) -> (i64, i64, i64) {
        let total = i128::from(delta.num_seconds()) * MICROS_PER_SECOND
            + i128::from(delta.subsec_nanos() / 1_000);
        let days = total.div_euclid(MICROS_PER_DAY);
        let rest = total.rem_euclid(MICROS_PER_DAY);
        // |days| is bounded by TimeDelta's range, far inside i64.
        (
            days as i64,
            (rest / MICROS_PER_SECOND) as i64,
            (rest % MICROS_PER_SECOND) as i64,
        )
    }

    fn field(&self, raw: &str, field: &str) -> Result<i64> {
        field.parse().map_err(|e| {
            Error::codec(
                self.type_name(),
                format!("invalid field {field:?} in duration {raw:?}: {e}"),
            )
        })
    }
}

impl TemporalCodec for TimeDeltaCodec {
    fn type_name(&self) -> &'static str {
        "TIMEDELTA"
    }

    fn encode(&self, value: &Value) -> Option<String> {
        match value {
            Value::Duration(delta) => {
                let (days, seconds, micros) = Self::components(*delta);
                Some(format!("{days},{seconds},{micros}"))
            }
            _ => None,
        }
    }

    fn decode(&self, raw: &str) -> Result<Value> {
        let fields: Vec<&str> = raw.split(',').collect();
        let [days, seconds, micros] = fields.as_slice() else {
            return Err(Error::codec(
                self.type_name(),
                format!("expected <days>,<seconds>,<microseconds>, got {raw:?}"),
            ));
        };
        let days = self.field(raw, days)?;
        let seconds = self.field(raw, seconds)?;
        let micros = self.field(raw, micros)?;

        // Only the combined total is range-checked; the days field of a
        // normalized value near the lower bound lies below it on its own.
        let total = i128::from(days) * MICROS_PER_DAY
            + i128::from(seconds) * MICROS_PER_SECOND
            + i128::from(micros);
        let secs = total.div_euclid(MICROS_PER_SECOND);
        let nanos = total.rem_euclid(MICROS_PER_SECOND) * 1_000;

        i64::try_from(secs)
            .ok()
            .and_then(|secs| TimeDelta::new(secs, nanos as u32))
            .map(Value::Duration)
            .ok_or_else(|| Error::codec(self.type_name(), format!("duration {raw:?} out of range")))
    }
}

/// Codecs keyed by declared type name.
#[derive(Debug, Default)]
pub struct CodecRegistry {
    codecs: HashMap<String, Box<dyn TemporalCodec>>,
}

impl CodecRegistry {
    /// A registry without any codec; temporal values cannot be stored.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A registry with the DATE, DATETIME and TIMEDELTA codecs.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry
            .register(DateCodec)
            .register(DateTimeCodec)
            .register(TimeDeltaCodec);
        registry
    }

    /// Register a codec, replacing any codec with the same type name.
    pub fn register(&mut self, codec: impl TemporalCodec + 'static) -> &mut Self {
        self.codecs
            .insert(codec.type_name().to_uppercase(), Box::new(codec));
        self
    }

    /// Codec for a declared type, matched on its base type.
    pub fn get(&self, decl_type: &str) -> Option<&dyn TemporalCodec> {
        self.codecs
            .get(&declared_base_type(decl_type))
            .map(|codec| codec.as_ref())
    }

    /// Registered type names, sorted.
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.codecs.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Convert a row value into a parameter the engine can bind.
    pub fn to_sql(&self, value: &Value) -> Result<SqlValue> {
        Ok(match value {
            Value::Null => SqlValue::Null,
            Value::Integer(i) => SqlValue::Integer(*i),
            Value::Real(f) => SqlValue::Real(*f),
            Value::Text(s) => SqlValue::Text(s.clone()),
            Value::Blob(b) => SqlValue::Blob(b.clone()),
            Value::Date(_) | Value::Timestamp(_) | Value::Duration(_) => {
                SqlValue::Text(self.encode(value)?)
            }
        })
    }

    /// Text form of a temporal value through its registered codec.
    pub fn encode(&self, value: &Value) -> Result<String> {
        self.get(value.type_name())
            .and_then(|codec| codec.encode(value))
            .ok_or_else(|| {
                Error::validation(format!(
                    "no codec registered for {} values",
                    value.type_name()
                ))
            })
    }

    /// Convert a stored value back, trusting the column's declared type.
    ///
    /// Columns whose declared type has a codec are decoded through it no
    /// matter what the stored value looks like; everything else maps
    /// storage class to variant directly.
    pub fn from_sql(&self, decl_type: Option<&str>, raw: ValueRef<'_>) -> Result<Value> {
        let codec = decl_type.and_then(|decl| self.get(decl));
        match (raw, codec) {
            (ValueRef::Null, _) => Ok(Value::Null),
            (ValueRef::Text(bytes), Some(codec)) | (ValueRef::Blob(bytes), Some(codec)) => {
                let text = std::str::from_utf8(bytes)
                    .map_err(|e| Error::codec(codec.type_name(), e.to_string()))?;
                codec.decode(text)
            }
            (ValueRef::Integer(i), Some(codec)) => codec.decode(&i.to_string()),
            (ValueRef::Real(f), Some(codec)) => codec.decode(&f.to_string()),
            (ValueRef::Integer(i), None) => Ok(Value::Integer(i)),
            (ValueRef::Real(f), None) => Ok(Value::Real(f)),
            (ValueRef::Text(bytes), None) => std::str::from_utf8(bytes)
                .map(|s| Value::Text(s.to_string()))
                .map_err(|e| Error::codec("TEXT", e.to_string())),
            (ValueRef::Blob(bytes), None) => Ok(Value::Blob(bytes.to_vec())),
        }
    }

    /// Parse a literal typed by hand (command line, fixtures) for a column
    /// declared as `decl_type`. `NULL` in any case yields [`Value::Null`].
    pub fn parse_literal(&self, decl_type: Option<&str>, literal: &str) -> Result<Value> {
        if literal.eq_ignore_ascii_case("NULL") {
            return Ok(Value::Null);
        }
        let decl = decl_type.unwrap_or_default();
        if let Some(codec) = self.get(decl) {
            return codec.decode(literal);
        }
        match declared_base_type(decl).as_str() {
            "INTEGER" => literal.parse().map(Value::Integer).map_err(|e| {
                Error::validation(format!("invalid INTEGER literal {literal:?}: {e}"))
            }),
            "REAL" => literal
                .parse()
                .map(Value::Real)
                .map_err(|e| Error::validation(format!("invalid REAL literal {literal:?}: {e}"))),
            "BLOB" => Ok(Value::Blob(literal.as_bytes().to_vec())),
            _ => Ok(Value::Text(literal.to_string())),
        }
    }
}
