//! Wire values and value codecs.
//!
//! [`Value`] is the parameter representation bound to placeholders in
//! generated SQL. A [`SqlCodec`] converts a single value between a column's
//! domain type and this wire representation; each [`crate::Column`] carries
//! one, and generated-key extraction decodes through it.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::error::{SqlError, SqlResult};

/// A single SQL parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// SQL NULL.
    Null,
    /// Boolean value.
    Bool(bool),
    /// 16-bit integer.
    SmallInt(i16),
    /// 32-bit integer.
    Int(i32),
    /// 64-bit integer.
    BigInt(i64),
    /// 32-bit float.
    Float(f32),
    /// 64-bit float.
    Double(f64),
    /// Text value.
    Text(String),
    /// Binary value.
    Bytes(Vec<u8>),
    /// Calendar date.
    Date(NaiveDate),
    /// Timestamp without time zone.
    Timestamp(NaiveDateTime),
    /// Timestamp with time zone (UTC).
    TimestampTz(DateTime<Utc>),
    /// UUID value.
    Uuid(Uuid),
    /// JSON document.
    Json(JsonValue),
    /// Arbitrary-precision decimal.
    #[cfg(feature = "decimal")]
    Decimal(rust_decimal::Decimal),
}

impl Value {
    /// Check if this value is NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// SQL type name of this value's variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::SmallInt(_) => "smallint",
            Self::Int(_) => "integer",
            Self::BigInt(_) => "bigint",
            Self::Float(_) => "real",
            Self::Double(_) => "double precision",
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytea",
            Self::Date(_) => "date",
            Self::Timestamp(_) => "timestamp",
            Self::TimestampTz(_) => "timestamptz",
            Self::Uuid(_) => "uuid",
            Self::Json(_) => "json",
            #[cfg(feature = "decimal")]
            Self::Decimal(_) => "numeric",
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Self::SmallInt(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::BigInt(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Self::Date(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Self::Timestamp(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Self::TimestampTz(v)
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Self::Uuid(v)
    }
}

impl From<JsonValue> for Value {
    fn from(v: JsonValue) -> Self {
        Self::Json(v)
    }
}

#[cfg(feature = "decimal")]
impl From<rust_decimal::Decimal> for Value {
    fn from(v: rust_decimal::Decimal) -> Self {
        Self::Decimal(v)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}

/// Converts a single value between a column's domain type and its wire
/// representation.
///
/// Codecs are stateless and shared behind `Arc`; `decode` accepts the raw
/// wire value from the driver and returns the normalized domain value.
/// `Null` always passes through both directions so that null handling stays
/// with the caller (key extraction raises its own null condition).
pub trait SqlCodec: std::fmt::Debug + Send + Sync {
    /// SQL type name this codec maps to.
    fn sql_type_name(&self) -> &'static str;

    /// Decode a raw wire value into the domain representation.
    fn decode(&self, raw: &Value) -> SqlResult<Value>;

    /// Encode a domain value for parameter binding.
    ///
    /// The default validates through `decode`; codecs with asymmetric wire
    /// representations override this.
    fn encode(&self, value: &Value) -> SqlResult<Value> {
        self.decode(value)
    }
}

fn mismatch(expected: &'static str, got: &Value) -> SqlError {
    SqlError::Codec {
        expected,
        got: got.kind(),
    }
}

/// Codec for 64-bit integer columns. Narrower integers widen on decode.
#[derive(Debug, Clone, Copy, Default)]
pub struct BigIntCodec;

impl SqlCodec for BigIntCodec {
    fn sql_type_name(&self) -> &'static str {
        "bigint"
    }

    fn decode(&self, raw: &Value) -> SqlResult<Value> {
        match raw {
            Value::Null => Ok(Value::Null),
            Value::SmallInt(v) => Ok(Value::BigInt(i64::from(*v))),
            Value::Int(v) => Ok(Value::BigInt(i64::from(*v))),
            Value::BigInt(v) => Ok(Value::BigInt(*v)),
            other => Err(mismatch(self.sql_type_name(), other)),
        }
    }
}

/// Codec for 32-bit integer columns.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntCodec;

impl SqlCodec for IntCodec {
    fn sql_type_name(&self) -> &'static str {
        "integer"
    }

    fn decode(&self, raw: &Value) -> SqlResult<Value> {
        match raw {
            Value::Null => Ok(Value::Null),
            Value::SmallInt(v) => Ok(Value::Int(i32::from(*v))),
            Value::Int(v) => Ok(Value::Int(*v)),
            other => Err(mismatch(self.sql_type_name(), other)),
        }
    }
}

/// Codec for text columns.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextCodec;

impl SqlCodec for TextCodec {
    fn sql_type_name(&self) -> &'static str {
        "text"
    }

    fn decode(&self, raw: &Value) -> SqlResult<Value> {
        match raw {
            Value::Null => Ok(Value::Null),
            Value::Text(v) => Ok(Value::Text(v.clone())),
            other => Err(mismatch(self.sql_type_name(), other)),
        }
    }
}

/// Codec for boolean columns.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanCodec;

impl SqlCodec for BooleanCodec {
    fn sql_type_name(&self) -> &'static str {
        "boolean"
    }

    fn decode(&self, raw: &Value) -> SqlResult<Value> {
        match raw {
            Value::Null => Ok(Value::Null),
            Value::Bool(v) => Ok(Value::Bool(*v)),
            other => Err(mismatch(self.sql_type_name(), other)),
        }
    }
}

/// Codec for double-precision float columns. Floats widen on decode.
#[derive(Debug, Clone, Copy, Default)]
pub struct DoubleCodec;

impl SqlCodec for DoubleCodec {
    fn sql_type_name(&self) -> &'static str {
        "double precision"
    }

    fn decode(&self, raw: &Value) -> SqlResult<Value> {
        match raw {
            Value::Null => Ok(Value::Null),
            Value::Float(v) => Ok(Value::Double(f64::from(*v))),
            Value::Double(v) => Ok(Value::Double(*v)),
            other => Err(mismatch(self.sql_type_name(), other)),
        }
    }
}

/// Codec for UUID columns. Text values are parsed on decode.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidCodec;

impl SqlCodec for UuidCodec {
    fn sql_type_name(&self) -> &'static str {
        "uuid"
    }

    fn decode(&self, raw: &Value) -> SqlResult<Value> {
        match raw {
            Value::Null => Ok(Value::Null),
            Value::Uuid(v) => Ok(Value::Uuid(*v)),
            Value::Text(v) => Uuid::parse_str(v)
                .map(Value::Uuid)
                .map_err(|_| mismatch(self.sql_type_name(), raw)),
            other => Err(mismatch(self.sql_type_name(), other)),
        }
    }
}

/// Codec for timestamp columns, with or without time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampCodec;

impl SqlCodec for TimestampCodec {
    fn sql_type_name(&self) -> &'static str {
        "timestamp"
    }

    fn decode(&self, raw: &Value) -> SqlResult<Value> {
        match raw {
            Value::Null => Ok(Value::Null),
            Value::Timestamp(v) => Ok(Value::Timestamp(*v)),
            Value::TimestampTz(v) => Ok(Value::TimestampTz(*v)),
            Value::Date(v) => Ok(Value::Date(*v)),
            other => Err(mismatch(self.sql_type_name(), other)),
        }
    }
}

/// Codec for JSON columns.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl SqlCodec for JsonCodec {
    fn sql_type_name(&self) -> &'static str {
        "json"
    }

    fn decode(&self, raw: &Value) -> SqlResult<Value> {
        match raw {
            Value::Null => Ok(Value::Null),
            Value::Json(v) => Ok(Value::Json(v.clone())),
            other => Err(mismatch(self.sql_type_name(), other)),
        }
    }
}

/// Codec for arbitrary-precision decimal columns. Integers widen on decode.
#[cfg(feature = "decimal")]
#[derive(Debug, Clone, Copy, Default)]
pub struct DecimalCodec;

#[cfg(feature = "decimal")]
impl SqlCodec for DecimalCodec {
    fn sql_type_name(&self) -> &'static str {
        "numeric"
    }

    fn decode(&self, raw: &Value) -> SqlResult<Value> {
        match raw {
            Value::Null => Ok(Value::Null),
            Value::Decimal(v) => Ok(Value::Decimal(*v)),
            Value::SmallInt(v) => Ok(Value::Decimal(rust_decimal::Decimal::from(*v))),
            Value::Int(v) => Ok(Value::Decimal(rust_decimal::Decimal::from(*v))),
            Value::BigInt(v) => Ok(Value::Decimal(rust_decimal::Decimal::from(*v))),
            other => Err(mismatch(self.sql_type_name(), other)),
        }
    }
}
