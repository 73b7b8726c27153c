//! Conversion of physical values into their logical representation, applied
//! after pages are decoded and dictionary indices resolved, before rows are
//! assembled and emitted.
use chrono::{DateTime, Utc};

use crate::error::{Error, Result};
use crate::schema::types::{ParquetType, PrimitiveConvertedType};
use crate::types::Int96;
use crate::value::Value;

// the Julian day of 1970-01-01
const JULIAN_UNIX_EPOCH: i64 = 2_440_588;
const SECONDS_PER_DAY: i64 = 86_400;

/// Applies the column's converted type to a page's worth of physical values.
///
/// INT96 converts to an instant even without a converted type, per its use
/// as a legacy timestamp.
pub fn convert_column(values: Vec<Value>, type_: &ParquetType) -> Result<Vec<Value>> {
    let converted_type = match type_ {
        ParquetType::PrimitiveType { converted_type, .. } => converted_type,
        ParquetType::GroupType { .. } => {
            return Err(Error::InternalInvariant(
                "logical conversion applies to leaf columns".to_string(),
            ))
        }
    };

    match converted_type {
        None => values
            .into_iter()
            .map(|value| match value {
                Value::Int96(int96) => int96_to_instant(int96).map(Value::Timestamp),
                other => Ok(other),
            })
            .collect(),
        Some(converted_type) => values
            .into_iter()
            .map(|value| convert_value(value, converted_type))
            .collect(),
    }
}

fn convert_value(value: Value, converted_type: &PrimitiveConvertedType) -> Result<Value> {
    use PrimitiveConvertedType::*;
    Ok(match (converted_type, value) {
        (Utf8 | Enum, Value::Bytes(bytes)) => Value::Text(
            String::from_utf8(bytes)
                .map_err(|_| Error::oos("UTF8 column holds invalid UTF-8"))?,
        ),
        (Json, Value::Bytes(bytes)) => Value::Json(
            serde_json::from_slice(&bytes)
                .map_err(|e| Error::oos(format!("malformed JSON value: {}", e)))?,
        ),
        (Bson, _) => return Err(Error::UnsupportedConvertedType("BSON".to_string())),
        (Interval, _) => return Err(Error::UnsupportedConvertedType("INTERVAL".to_string())),
        (Date, Value::Int32(days)) => {
            Value::Timestamp(instant(days as i64 * SECONDS_PER_DAY, 0)?)
        }
        (TimeMillis, Value::Int32(millis)) => Value::Timestamp(instant_millis(millis as i64)?),
        (TimeMicros | TimestampMicros, Value::Int64(micros)) => {
            Value::Timestamp(instant_micros(micros)?)
        }
        (TimestampMillis, Value::Int64(millis)) => Value::Timestamp(instant_millis(millis)?),
        (Decimal(_, scale), Value::Int32(unscaled)) => {
            Value::Decimal(scale_decimal(unscaled as i128, *scale))
        }
        (Decimal(_, scale), Value::Int64(unscaled)) => {
            Value::Decimal(scale_decimal(unscaled as i128, *scale))
        }
        (Decimal(_, scale), Value::Bytes(bytes)) => {
            Value::Decimal(scale_decimal(big_endian_twos_complement(&bytes)?, *scale))
        }
        // width reinterpretations carry the value unchanged
        (
            Uint8 | Uint16 | Uint32 | Uint64 | Int8 | Int16 | Int32 | Int64,
            value @ (Value::Int32(_) | Value::Int64(_)),
        ) => value,
        // nulls pass through every conversion
        (_, Value::Null) => Value::Null,
        (converted_type, value) => {
            return Err(Error::oos(format!(
                "converted type {:?} cannot apply to {:?}",
                converted_type, value
            )))
        }
    })
}

fn instant(seconds: i64, nanos: u32) -> Result<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(seconds, nanos)
        .ok_or_else(|| Error::oos(format!("instant out of range: {}s", seconds)))
}

fn instant_millis(millis: i64) -> Result<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .ok_or_else(|| Error::oos(format!("instant out of range: {}ms", millis)))
}

fn instant_micros(micros: i64) -> Result<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_micros(micros)
        .ok_or_else(|| Error::oos(format!("instant out of range: {}us", micros)))
}

/// The legacy INT96 timestamp: Julian day in the high 32 bits,
/// nanoseconds of day in the low 64.
fn int96_to_instant(value: Int96) -> Result<DateTime<Utc>> {
    let days = value.high() as i64 - JULIAN_UNIX_EPOCH;
    let nanos_of_day = value.low() as i64;
    let seconds = days * SECONDS_PER_DAY + nanos_of_day / 1_000_000_000;
    let nanos = (nanos_of_day % 1_000_000_000) as u32;
    instant(seconds, nanos)
}

fn scale_decimal(unscaled: i128, scale: i32) -> f64 {
    unscaled as f64 * 10f64.powi(-scale)
}

/// Interprets `bytes` as a big-endian two's complement integer.
fn big_endian_twos_complement(bytes: &[u8]) -> Result<i128> {
    if bytes.len() > 16 {
        return Err(Error::oos(format!(
            "decimal of {} bytes exceeds 128 bits",
            bytes.len()
        )));
    }
    let mut buffer = if bytes.first().map(|byte| byte & 0x80 != 0).unwrap_or(false) {
        [0xffu8; 16]
    } else {
        [0u8; 16]
    };
    buffer[16 - bytes.len()..].copy_from_slice(bytes);
    Ok(i128::from_be_bytes(buffer))
}
