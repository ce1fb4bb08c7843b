//! Value types and conversions for rosterql

pub use turso::Value;

use crate::error::Error;
use crate::error::Result;

/// Column types supported by the query layer
///
/// These map onto SQLite's type affinity system:
/// - `Integer` maps to INTEGER (64-bit signed)
/// - `Float` maps to REAL (64-bit floating point)
/// - `Text` maps to TEXT (UTF-8 string)
/// - `Blob` maps to BLOB (binary data)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Float,
    Text,
    Blob,
}

/// Trait for converting Rust types into database values
///
/// Implemented for the common scalar types so they can be used directly as
/// query parameters.
pub trait IntoValue {
    fn into_value(self) -> Value;
}

/// Trait for converting database values into Rust types
pub trait FromValue: Sized {
    /// Convert a database [`Value`] into this type
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be converted to this type, or if
    /// the value is null and this type is not nullable.
    fn from_value(value: Value) -> Result<Self>;

    /// Convert from value, returning the default value for null
    fn from_value_opt(value: Value) -> Result<Self>
    where Self: Default {
        if matches!(value, Value::Null) { Ok(Self::default()) } else { Self::from_value(value) }
    }
}

impl IntoValue for i64 {
    fn into_value(self) -> Value {
        Value::Integer(self)
    }
}

impl IntoValue for i32 {
    fn into_value(self) -> Value {
        Value::Integer(self as i64)
    }
}

impl IntoValue for i16 {
    fn into_value(self) -> Value {
        Value::Integer(self as i64)
    }
}

impl IntoValue for u32 {
    fn into_value(self) -> Value {
        Value::Integer(self as i64)
    }
}

impl IntoValue for usize {
    fn into_value(self) -> Value {
        Value::Integer(self as i64)
    }
}

impl IntoValue for f64 {
    fn into_value(self) -> Value {
        Value::Real(self)
    }
}

impl IntoValue for f32 {
    fn into_value(self) -> Value {
        Value::Real(self as f64)
    }
}

impl IntoValue for String {
    fn into_value(self) -> Value {
        Value::Text(self)
    }
}

impl IntoValue for &str {
    fn into_value(self) -> Value {
        Value::Text(self.to_string())
    }
}

impl IntoValue for Vec<u8> {
    fn into_value(self) -> Value {
        Value::Blob(self)
    }
}

impl IntoValue for bool {
    fn into_value(self) -> Value {
        Value::Integer(if self { 1 } else { 0 })
    }
}

impl<T: IntoValue> IntoValue for Option<T> {
    fn into_value(self) -> Value {
        match self {
            Some(v) => v.into_value(),
            None => Value::Null,
        }
    }
}

impl IntoValue for Value {
    fn into_value(self) -> Value {
        self
    }
}

impl FromValue for i64 {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Integer(v) => Ok(v),
            Value::Real(v) => Ok(v as i64),
            Value::Null => Err(Error::UnexpectedNull),
            other => Err(Error::TypeConversion { expected: "Integer", actual: format!("{:?}", other) }),
        }
    }
}

impl FromValue for i32 {
    fn from_value(value: Value) -> Result<Self> {
        i64::from_value(value).map(|v| v as i32)
    }
}

impl FromValue for f64 {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Real(v) => Ok(v),
            Value::Integer(v) => Ok(v as f64),
            Value::Null => Err(Error::UnexpectedNull),
            other => Err(Error::TypeConversion { expected: "Real", actual: format!("{:?}", other) }),
        }
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Text(v) => Ok(v),
            Value::Null => Err(Error::UnexpectedNull),
            other => Err(Error::TypeConversion { expected: "Text", actual: format!("{:?}", other) }),
        }
    }
}

impl FromValue for Vec<u8> {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Blob(v) => Ok(v),
            Value::Null => Err(Error::UnexpectedNull),
            other => Err(Error::TypeConversion { expected: "Blob", actual: format!("{:?}", other) }),
        }
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Integer(v) => Ok(v != 0),
            Value::Null => Err(Error::UnexpectedNull),
            other => Err(Error::TypeConversion { expected: "Integer (boolean)", actual: format!("{:?}", other) }),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }

    fn from_value_opt(value: Value) -> Result<Self> {
        Self::from_value(value)
    }
}

impl FromValue for Value {
    fn from_value(value: Value) -> Result<Self> {
        Ok(value)
    }
}
