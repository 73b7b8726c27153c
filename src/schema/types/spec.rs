// Validation of the invariants the parquet specification imposes between
// physical and converted types.
use crate::error::{Error, Result};

use super::{PhysicalType, PrimitiveConvertedType};

pub(super) fn check_converted_invariants(
    physical_type: &PhysicalType,
    converted_type: &Option<PrimitiveConvertedType>,
) -> Result<()> {
    let converted_type = match converted_type {
        Some(converted_type) => converted_type,
        None => return Ok(()),
    };

    use PrimitiveConvertedType::*;
    match converted_type {
        Utf8 | Enum | Json | Bson => {
            if physical_type != &PhysicalType::ByteArray {
                return Err(Error::oos(format!(
                    "{:?} can only annotate BYTE_ARRAY fields",
                    converted_type
                )));
            }
        }
        Decimal(precision, scale) => {
            if scale < &0 || precision <= &0 || scale > precision {
                return Err(Error::oos(format!(
                    "DECIMAL with invalid precision/scale {}/{}",
                    precision, scale
                )));
            }
            match physical_type {
                PhysicalType::Int32
                | PhysicalType::Int64
                | PhysicalType::ByteArray
                | PhysicalType::FixedLenByteArray(_) => {}
                _ => {
                    return Err(Error::oos(
                        "DECIMAL can only annotate INT32, INT64, BYTE_ARRAY and FIXED",
                    ))
                }
            }
        }
        Date | TimeMillis | Uint8 | Uint16 | Uint32 | Int8 | Int16 | Int32 => {
            if physical_type != &PhysicalType::Int32 {
                return Err(Error::oos(format!(
                    "{:?} can only annotate INT32",
                    converted_type
                )));
            }
        }
        TimeMicros | TimestampMillis | TimestampMicros | Uint64 | Int64 => {
            if physical_type != &PhysicalType::Int64 {
                return Err(Error::oos(format!(
                    "{:?} can only annotate INT64",
                    converted_type
                )));
            }
        }
        Interval => {
            if physical_type != &PhysicalType::FixedLenByteArray(12) {
                return Err(Error::oos(
                    "INTERVAL can only annotate FIXED_LEN_BYTE_ARRAY(12)",
                ));
            }
        }
    };
    Ok(())
}
