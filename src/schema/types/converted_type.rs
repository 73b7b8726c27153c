use crate::error::{Error, Result};

/// A converted type of a primitive field.
/// See <https://github.com/apache/parquet-format/blob/master/LogicalTypes.md>
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PrimitiveConvertedType {
    Utf8,
    /// an enum is converted into a binary field
    Enum,
    /// A decimal value: the underlying integer or big-endian two's complement
    /// byte array holds `value * 10^scale`.
    // (precision, scale)
    Decimal(i32, i32),
    /// Days since the Unix epoch, stored as INT32.
    Date,
    /// Milliseconds since midnight, stored as INT32.
    TimeMillis,
    /// Microseconds since midnight, stored as INT64.
    TimeMicros,
    /// Milliseconds since the Unix epoch, stored as INT64.
    TimestampMillis,
    /// Microseconds since the Unix epoch, stored as INT64.
    TimestampMicros,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Int8,
    Int16,
    Int32,
    Int64,
    /// A JSON document embedded within a single UTF8 column.
    Json,
    /// A BSON document embedded within a single BINARY column.
    Bson,
    /// Three little-endian unsigned integers (months, days, millis) in a
    /// FIXED_LEN_BYTE_ARRAY of length 12.
    Interval,
}

/// A converted type of a group field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GroupConvertedType {
    /// a map is converted as an optional field containing a repeated key/value pair
    Map,
    /// a key/value pair is converted into a group of two fields
    MapKeyValue,
    /// a list is converted into an optional field containing a repeated field for its
    /// values
    List,
}

pub fn converted_to_primitive_converted(
    type_: i32,
    maybe_decimal: Option<(i32, i32)>,
) -> Result<PrimitiveConvertedType> {
    use PrimitiveConvertedType::*;
    Ok(match type_ {
        0 => Utf8,
        4 => Enum,
        5 => match maybe_decimal {
            Some((precision, scale)) => Decimal(precision, scale),
            None => return Err(Error::oos("DECIMAL requires precision and scale")),
        },
        6 => Date,
        7 => TimeMillis,
        8 => TimeMicros,
        9 => TimestampMillis,
        10 => TimestampMicros,
        11 => Uint8,
        12 => Uint16,
        13 => Uint32,
        14 => Uint64,
        15 => Int8,
        16 => Int16,
        17 => Int32,
        18 => Int64,
        19 => Json,
        20 => Bson,
        21 => Interval,
        1 | 2 | 3 => {
            return Err(Error::oos(format!(
                "converted type {} annotates groups, not primitives",
                type_
            )))
        }
        _ => return Err(Error::oos(format!("converted type {} out of range", type_))),
    })
}

pub fn converted_to_group_converted(type_: i32) -> Result<GroupConvertedType> {
    Ok(match type_ {
        1 => GroupConvertedType::Map,
        2 => GroupConvertedType::MapKeyValue,
        3 => GroupConvertedType::List,
        _ => {
            return Err(Error::oos(format!(
                "converted type {} does not annotate groups",
                type_
            )))
        }
    })
}

pub fn primitive_converted_to_thrift(
    type_: PrimitiveConvertedType,
) -> (i32, Option<(i32, i32)>) {
    use PrimitiveConvertedType::*;
    match type_ {
        Utf8 => (0, None),
        Enum => (4, None),
        Decimal(precision, scale) => (5, Some((precision, scale))),
        Date => (6, None),
        TimeMillis => (7, None),
        TimeMicros => (8, None),
        TimestampMillis => (9, None),
        TimestampMicros => (10, None),
        Uint8 => (11, None),
        Uint16 => (12, None),
        Uint32 => (13, None),
        Uint64 => (14, None),
        Int8 => (15, None),
        Int16 => (16, None),
        Int32 => (17, None),
        Int64 => (18, None),
        Json => (19, None),
        Bson => (20, None),
        Interval => (21, None),
    }
}

pub fn group_converted_to_thrift(type_: GroupConvertedType) -> i32 {
    match type_ {
        GroupConvertedType::Map => 1,
        GroupConvertedType::MapKeyValue => 2,
        GroupConvertedType::List => 3,
    }
}
