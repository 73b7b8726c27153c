//! Thrift Compact Protocol, the encoding of parquet metadata and page headers.
//!
//! Only the subset of the protocol that parquet uses is implemented. The
//! reader is a streaming decoder over a [`DataCursor`]; typed structs in
//! [`crate::format`] drive it directly instead of materializing a generic
//! field tree.
mod reader;
mod writer;

pub use reader::CompactReader;
pub use writer::CompactWriter;

use crate::error::{Error, Result};

/// A wire type of the Thrift Compact Protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompactType {
    Stop,
    BooleanTrue,
    BooleanFalse,
    Byte,
    I16,
    I32,
    I64,
    Double,
    Binary,
    List,
    Set,
    Map,
    Struct,
    Uuid,
}

impl CompactType {
    pub(crate) fn try_from_nibble(nibble: u8) -> Result<Self> {
        Ok(match nibble {
            0 => CompactType::Stop,
            1 => CompactType::BooleanTrue,
            2 => CompactType::BooleanFalse,
            3 => CompactType::Byte,
            4 => CompactType::I16,
            5 => CompactType::I32,
            6 => CompactType::I64,
            7 => CompactType::Double,
            8 => CompactType::Binary,
            9 => CompactType::List,
            10 => CompactType::Set,
            11 => CompactType::Map,
            12 => CompactType::Struct,
            13 => CompactType::Uuid,
            _ => {
                return Err(Error::ThriftDecode(format!(
                    "unknown compact wire type {}",
                    nibble
                )))
            }
        })
    }

    pub(crate) fn to_nibble(self) -> u8 {
        match self {
            CompactType::Stop => 0,
            CompactType::BooleanTrue => 1,
            CompactType::BooleanFalse => 2,
            CompactType::Byte => 3,
            CompactType::I16 => 4,
            CompactType::I32 => 5,
            CompactType::I64 => 6,
            CompactType::Double => 7,
            CompactType::Binary => 8,
            CompactType::List => 9,
            CompactType::Set => 10,
            CompactType::Map => 11,
            CompactType::Struct => 12,
            CompactType::Uuid => 13,
        }
    }
}

/// A decoded field header: the wire type and the resolved field id.
pub type FieldHeader = (CompactType, i16);

#[inline]
pub(crate) fn zigzag_to_i64(value: u64) -> i64 {
    (value >> 1) as i64 ^ -((value & 1) as i64)
}

#[inline]
pub(crate) fn i64_to_zigzag(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}
