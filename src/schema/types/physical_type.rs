use crate::error::Error;

/// The physical type of a leaf column, i.e. how its values are laid out on
/// the wire.
#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy)]
pub enum PhysicalType {
    Boolean,
    Int32,
    Int64,
    Int96,
    Float,
    Double,
    ByteArray,
    /// Fixed-width binary; the width comes from `SchemaElement::type_length`.
    FixedLenByteArray(usize),
}

impl PhysicalType {
    /// Width in bytes of one value, when the type is fixed-width.
    pub fn byte_width(&self) -> Option<usize> {
        Some(match self {
            PhysicalType::Int32 | PhysicalType::Float => 4,
            PhysicalType::Int64 | PhysicalType::Double => 8,
            PhysicalType::Int96 => 12,
            PhysicalType::FixedLenByteArray(size) => *size,
            PhysicalType::Boolean | PhysicalType::ByteArray => return None,
        })
    }

    pub(crate) fn try_from_thrift(type_: i32, length: Option<i32>) -> Result<Self, Error> {
        Ok(match type_ {
            0 => PhysicalType::Boolean,
            1 => PhysicalType::Int32,
            2 => PhysicalType::Int64,
            3 => PhysicalType::Int96,
            4 => PhysicalType::Float,
            5 => PhysicalType::Double,
            6 => PhysicalType::ByteArray,
            7 => {
                let length = length
                    .ok_or_else(|| Error::oos("FIXED_LEN_BYTE_ARRAY requires a type_length"))?;
                if length <= 0 {
                    return Err(Error::oos(format!("non-positive type_length {}", length)));
                }
                PhysicalType::FixedLenByteArray(length as usize)
            }
            _ => return Err(Error::oos(format!("physical type {} out of range", type_))),
        })
    }

    pub(crate) fn to_thrift(self) -> (i32, Option<i32>) {
        match self {
            PhysicalType::Boolean => (0, None),
            PhysicalType::Int32 => (1, None),
            PhysicalType::Int64 => (2, None),
            PhysicalType::Int96 => (3, None),
            PhysicalType::Float => (4, None),
            PhysicalType::Double => (5, None),
            PhysicalType::ByteArray => (6, None),
            PhysicalType::FixedLenByteArray(length) => (7, Some(length as i32)),
        }
    }
}
