//! Column values.
//!
//! `SqlValue` is the closed set of column types used by the MDB schema. Every
//! variant carries an `Option` so a SQL `NULL` keeps its column type when it is
//! bound as a parameter.

use chrono::{DateTime, Utc};
use may_postgres::types::ToSql;
use may_postgres::{Error as PostgresError, Row};
use sea_query::Value;
use std::fmt;

use crate::error::{ModelError, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Bool(Option<bool>),
    SmallInt(Option<i16>),
    Int(Option<i32>),
    BigInt(Option<i64>),
    Double(Option<f64>),
    Text(Option<String>),
    Bytes(Option<Vec<u8>>),
    Json(Option<serde_json::Value>),
    Timestamp(Option<DateTime<Utc>>),
}

/// Returned when a `SqlValue` cannot be converted into a field type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueMismatch {
    pub expected: &'static str,
    pub found: &'static str,
}

impl fmt::Display for ValueMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected {}, found {}", self.expected, self.found)
    }
}

impl SqlValue {
    pub fn is_null(&self) -> bool {
        match self {
            SqlValue::Bool(v) => v.is_none(),
            SqlValue::SmallInt(v) => v.is_none(),
            SqlValue::Int(v) => v.is_none(),
            SqlValue::BigInt(v) => v.is_none(),
            SqlValue::Double(v) => v.is_none(),
            SqlValue::Text(v) => v.is_none(),
            SqlValue::Bytes(v) => v.is_none(),
            SqlValue::Json(v) => v.is_none(),
            SqlValue::Timestamp(v) => v.is_none(),
        }
    }

    /// True for `NULL` and for the zero value of the column type.
    ///
    /// Default-bearing columns holding a zero value are left to the database on insert.
    pub fn is_zero(&self) -> bool {
        match self {
            SqlValue::Bool(v) => !v.unwrap_or(false),
            SqlValue::SmallInt(v) => v.unwrap_or(0) == 0,
            SqlValue::Int(v) => v.unwrap_or(0) == 0,
            SqlValue::BigInt(v) => v.unwrap_or(0) == 0,
            SqlValue::Double(v) => v.unwrap_or(0.0) == 0.0,
            SqlValue::Text(v) => v.as_deref().map_or(true, str::is_empty),
            SqlValue::Bytes(v) => v.as_ref().map_or(true, Vec::is_empty),
            SqlValue::Json(v) => v.as_ref().map_or(true, serde_json::Value::is_null),
            SqlValue::Timestamp(v) => v.map_or(true, |t| t == DateTime::<Utc>::default()),
        }
    }

    /// The same column type with a `NULL` payload.
    pub fn to_null(&self) -> SqlValue {
        match self {
            SqlValue::Bool(_) => SqlValue::Bool(None),
            SqlValue::SmallInt(_) => SqlValue::SmallInt(None),
            SqlValue::Int(_) => SqlValue::Int(None),
            SqlValue::BigInt(_) => SqlValue::BigInt(None),
            SqlValue::Double(_) => SqlValue::Double(None),
            SqlValue::Text(_) => SqlValue::Text(None),
            SqlValue::Bytes(_) => SqlValue::Bytes(None),
            SqlValue::Json(_) => SqlValue::Json(None),
            SqlValue::Timestamp(_) => SqlValue::Timestamp(None),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            SqlValue::Bool(_) => "bool",
            SqlValue::SmallInt(_) => "smallint",
            SqlValue::Int(_) => "integer",
            SqlValue::BigInt(_) => "bigint",
            SqlValue::Double(_) => "double precision",
            SqlValue::Text(_) => "text",
            SqlValue::Bytes(_) => "bytea",
            SqlValue::Json(_) => "jsonb",
            SqlValue::Timestamp(_) => "timestamptz",
        }
    }

    /// Borrow the payload as a driver parameter.
    pub fn as_sql(&self) -> &dyn ToSql {
        match self {
            SqlValue::Bool(v) => v,
            SqlValue::SmallInt(v) => v,
            SqlValue::Int(v) => v,
            SqlValue::BigInt(v) => v,
            SqlValue::Double(v) => v,
            SqlValue::Text(v) => v,
            SqlValue::Bytes(v) => v,
            SqlValue::Json(v) => v,
            SqlValue::Timestamp(v) => v,
        }
    }
}

/// Read `row[position]` as the same column type as `template`.
pub(crate) fn read_like(
    template: &SqlValue,
    row: &Row,
    position: usize,
) -> std::result::Result<SqlValue, PostgresError> {
    Ok(match template {
        SqlValue::Bool(_) => SqlValue::Bool(row.try_get(position)?),
        SqlValue::SmallInt(_) => SqlValue::SmallInt(row.try_get(position)?),
        SqlValue::Int(_) => SqlValue::Int(row.try_get(position)?),
        SqlValue::BigInt(_) => SqlValue::BigInt(row.try_get(position)?),
        SqlValue::Double(_) => SqlValue::Double(row.try_get(position)?),
        SqlValue::Text(_) => SqlValue::Text(row.try_get(position)?),
        SqlValue::Bytes(_) => SqlValue::Bytes(row.try_get(position)?),
        SqlValue::Json(_) => SqlValue::Json(row.try_get(position)?),
        SqlValue::Timestamp(_) => SqlValue::Timestamp(row.try_get(position)?),
    })
}

/// Borrow a list of values as driver parameters.
pub fn params(values: &[SqlValue]) -> Vec<&dyn ToSql> {
    values.iter().map(SqlValue::as_sql).collect()
}

macro_rules! sql_value_type {
    ($variant:ident, $ty:ty) => {
        impl From<$ty> for SqlValue {
            fn from(v: $ty) -> Self {
                SqlValue::$variant(Some(v))
            }
        }

        impl From<Option<$ty>> for SqlValue {
            fn from(v: Option<$ty>) -> Self {
                SqlValue::$variant(v)
            }
        }

        impl TryFrom<SqlValue> for $ty {
            type Error = ValueMismatch;

            fn try_from(value: SqlValue) -> std::result::Result<Self, ValueMismatch> {
                match value {
                    SqlValue::$variant(Some(v)) => Ok(v),
                    SqlValue::$variant(None) => Err(ValueMismatch {
                        expected: stringify!($ty),
                        found: "NULL",
                    }),
                    other => Err(ValueMismatch {
                        expected: stringify!($ty),
                        found: other.type_name(),
                    }),
                }
            }
        }

        impl TryFrom<SqlValue> for Option<$ty> {
            type Error = ValueMismatch;

            fn try_from(value: SqlValue) -> std::result::Result<Self, ValueMismatch> {
                match value {
                    SqlValue::$variant(v) => Ok(v),
                    other => Err(ValueMismatch {
                        expected: stringify!($ty),
                        found: other.type_name(),
                    }),
                }
            }
        }
    };
}

sql_value_type!(Bool, bool);
sql_value_type!(SmallInt, i16);
sql_value_type!(Int, i32);
sql_value_type!(BigInt, i64);
sql_value_type!(Double, f64);
sql_value_type!(Text, String);
sql_value_type!(Bytes, Vec<u8>);
sql_value_type!(Json, serde_json::Value);
sql_value_type!(Timestamp, DateTime<Utc>);

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(Some(v.to_owned()))
    }
}

impl From<SqlValue> for Value {
    fn from(value: SqlValue) -> Self {
        match value {
            SqlValue::Bool(v) => Value::from(v),
            SqlValue::SmallInt(v) => Value::from(v),
            SqlValue::Int(v) => Value::from(v),
            SqlValue::BigInt(v) => Value::from(v),
            SqlValue::Double(v) => Value::from(v),
            SqlValue::Text(v) => Value::from(v),
            SqlValue::Bytes(v) => Value::from(v),
            SqlValue::Json(v) => Value::from(v),
            SqlValue::Timestamp(v) => Value::from(v),
        }
    }
}

impl TryFrom<&Value> for SqlValue {
    type Error = ModelError;

    fn try_from(value: &Value) -> Result<Self> {
        let converted = match value {
            Value::Bool(v) => SqlValue::Bool(*v),
            Value::TinyInt(v) => SqlValue::SmallInt(v.map(i16::from)),
            Value::SmallInt(v) => SqlValue::SmallInt(*v),
            Value::Int(v) => SqlValue::Int(*v),
            Value::BigInt(v) => SqlValue::BigInt(*v),
            Value::TinyUnsigned(v) => SqlValue::SmallInt(v.map(i16::from)),
            Value::SmallUnsigned(v) => SqlValue::Int(v.map(i32::from)),
            Value::Unsigned(v) => SqlValue::BigInt(v.map(i64::from)),
            Value::BigUnsigned(v) => match v {
                Some(u) => SqlValue::BigInt(Some(i64::try_from(*u).map_err(|_| {
                    ModelError::Invalid(format!("unsigned value {u} exceeds bigint range"))
                })?)),
                None => SqlValue::BigInt(None),
            },
            Value::Float(v) => SqlValue::Double(v.map(f64::from)),
            Value::Double(v) => SqlValue::Double(*v),
            Value::Char(v) => SqlValue::Text(v.map(|c| c.to_string())),
            Value::String(v) => SqlValue::Text(v.as_ref().map(|s| s.to_string())),
            Value::Bytes(v) => SqlValue::Bytes(v.as_ref().map(|b| b.to_vec())),
            Value::Json(v) => SqlValue::Json(v.as_ref().map(|j| serde_json::Value::clone(j))),
            Value::ChronoDateTimeUtc(v) => {
                SqlValue::Timestamp(v.as_ref().map(|t| DateTime::<Utc>::clone(t)))
            }
            other => {
                return Err(ModelError::Invalid(format!(
                    "unsupported value type in query: {other:?}"
                )))
            }
        };
        Ok(converted)
    }
}

/// Convert the parameters produced by the query builder.
pub fn from_query_values(values: &sea_query::Values) -> Result<Vec<SqlValue>> {
    values.0.iter().map(SqlValue::try_from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_zero_values() {
        assert!(SqlValue::from(0i64).is_zero());
        assert!(SqlValue::from(None::<i64>).is_zero());
        assert!(SqlValue::from("").is_zero());
        assert!(SqlValue::from(DateTime::<Utc>::default()).is_zero());
        assert!(SqlValue::from(serde_json::Value::Null).is_zero());
        assert!(SqlValue::from(false).is_zero());

        assert!(!SqlValue::from(7i64).is_zero());
        assert!(!SqlValue::from("a").is_zero());
        assert!(!SqlValue::from(Utc.with_ymd_and_hms(2018, 1, 1, 0, 0, 0).unwrap()).is_zero());
        assert!(!SqlValue::from(serde_json::json!({"k": 1})).is_zero());
    }

    #[test]
    fn test_try_from_matching_variant() {
        let id: i64 = SqlValue::from(42i64).try_into().unwrap();
        assert_eq!(id, 42);

        let parent: Option<i64> = SqlValue::BigInt(None).try_into().unwrap();
        assert_eq!(parent, None);
    }

    #[test]
    fn test_try_from_null_into_required_field() {
        let err = i64::try_from(SqlValue::BigInt(None)).unwrap_err();
        assert_eq!(err.found, "NULL");
    }

    #[test]
    fn test_try_from_wrong_variant() {
        let err = String::try_from(SqlValue::from(1i32)).unwrap_err();
        assert_eq!(err.found, "integer");
        assert!(err.to_string().contains("expected String"));
    }

    #[test]
    fn test_to_null_keeps_type() {
        let v = SqlValue::from("name").to_null();
        assert_eq!(v, SqlValue::Text(None));
        assert!(v.is_null());
    }

    #[test]
    fn test_query_values_conversion() {
        let values = sea_query::Values(vec![
            Value::from(5i32),
            Value::from("abc"),
            Value::from(None::<i64>),
            Value::from(3u16),
        ]);
        let converted = from_query_values(&values).unwrap();
        assert_eq!(
            converted,
            vec![
                SqlValue::Int(Some(5)),
                SqlValue::Text(Some("abc".into())),
                SqlValue::BigInt(None),
                SqlValue::Int(Some(3)),
            ]
        );
    }

    #[test]
    fn test_big_unsigned_overflow_is_error() {
        let values = sea_query::Values(vec![Value::from(u64::MAX)]);
        assert!(from_query_values(&values).is_err());
    }

    #[test]
    fn test_params_length() {
        let values = vec![SqlValue::from(1i64), SqlValue::from("x"), SqlValue::Json(None)];
        assert_eq!(params(&values).len(), 3);
    }
}
