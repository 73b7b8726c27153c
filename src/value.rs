use chrono::{DateTime, Utc};

use crate::types::Int96;

/// The dynamic representation of a decoded cell in native Rust.
///
/// Physical decoding produces the physical variants (`Boolean` through
/// `Bytes`); logical conversion rewrites them into `Text`, `Timestamp`,
/// `Decimal` or `Json` per the column's converted type. Nested columns fold
/// cells into `List`s during record assembly.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Int32(i32),
    Int64(i64),
    Int96(Int96),
    Float(f32),
    Double(f64),
    Bytes(Vec<u8>),
    Text(String),
    Timestamp(DateTime<Utc>),
    Decimal(f64),
    Json(serde_json::Value),
    List(Vec<Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The elements of a `List`, or `None` for any other variant.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int32(value) => Some(*value as i64),
            Value::Int64(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(value) => Some(value),
            _ => None,
        }
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int32(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int64(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}
