use crate::cursor::DataCursor;
use crate::encoding::{byte_stream_split, ceil8, delta_bitpacked, get_length, hybrid_rle};
use crate::error::{Error, Result};
use crate::page::DictPage;
use crate::parquet_bridge::Encoding;
use crate::schema::types::PhysicalType;
use crate::types::Int96;
use crate::value::Value;

/// Decodes `count` PLAIN-encoded physical values.
pub fn decode_plain(buffer: &[u8], count: usize, physical: PhysicalType) -> Result<Vec<Value>> {
    let mut cursor = DataCursor::new(buffer);
    let mut values = Vec::with_capacity(count);
    match physical {
        PhysicalType::Boolean => {
            // 1 bit per value, LSB-first within each byte
            let bytes = cursor.take(ceil8(count))?;
            for index in 0..count {
                values.push(Value::Boolean(bytes[index / 8] >> (index % 8) & 1 == 1));
            }
        }
        PhysicalType::Int32 => {
            for _ in 0..count {
                values.push(Value::Int32(cursor.read_i32()?));
            }
        }
        PhysicalType::Int64 => {
            for _ in 0..count {
                values.push(Value::Int64(cursor.read_i64()?));
            }
        }
        PhysicalType::Int96 => {
            for _ in 0..count {
                let bytes: [u8; 12] = cursor.take(12)?.try_into().unwrap();
                values.push(Value::Int96(Int96::from_le_bytes(bytes)));
            }
        }
        PhysicalType::Float => {
            for _ in 0..count {
                values.push(Value::Float(cursor.read_f32()?));
            }
        }
        PhysicalType::Double => {
            for _ in 0..count {
                values.push(Value::Double(cursor.read_f64()?));
            }
        }
        PhysicalType::ByteArray => {
            for _ in 0..count {
                let length = cursor.read_i32()?;
                if length < 0 {
                    return Err(Error::oos(format!("negative byte array length {}", length)));
                }
                values.push(Value::Bytes(cursor.take(length as usize)?.to_vec()));
            }
        }
        PhysicalType::FixedLenByteArray(size) => {
            for _ in 0..count {
                values.push(Value::Bytes(cursor.take(size)?.to_vec()));
            }
        }
    }
    Ok(values)
}

/// Decodes the values section of a data page into `count` physical values,
/// resolving dictionary indices against `dict` when the encoding requires it.
pub fn decode_values(
    buffer: &[u8],
    count: usize,
    encoding: Encoding,
    physical: PhysicalType,
    dict: Option<&DictPage>,
) -> Result<Vec<Value>> {
    match encoding {
        Encoding::Plain => decode_plain(buffer, count, physical),
        Encoding::PlainDictionary | Encoding::RleDictionary => {
            let dict = dict.ok_or_else(|| {
                Error::oos("a dictionary-encoded page must be preceded by a dictionary page")
            })?;
            // 1-byte bit width, then a hybrid stream without length prefix
            let (num_bits, indices) = buffer
                .split_first()
                .ok_or_else(|| Error::TruncatedInput("dictionary index bit width".to_string()))?;
            let indices = hybrid_rle::decode_exact(indices, *num_bits as u32, count)?;
            indices
                .into_iter()
                .map(|index| {
                    dict.values
                        .get(index as usize)
                        .cloned()
                        .ok_or_else(|| {
                            Error::oos(format!(
                                "dictionary index {} out of range ({} entries)",
                                index,
                                dict.values.len()
                            ))
                        })
                })
                .collect()
        }
        Encoding::Rle => {
            // BOOLEAN values as a length-prefixed hybrid stream at width 1
            if physical != PhysicalType::Boolean {
                return Err(Error::UnsupportedEncoding(encoding));
            }
            let length = get_length(buffer)? as usize;
            let stream = buffer
                .get(4..4 + length)
                .ok_or_else(|| Error::TruncatedInput("RLE boolean stream".to_string()))?;
            Ok(hybrid_rle::decode_exact(stream, 1, count)?
                .into_iter()
                .map(|value| Value::Boolean(value == 1))
                .collect())
        }
        Encoding::DeltaBinaryPacked => {
            let decoder = delta_bitpacked::Decoder::try_new(buffer)?;
            let decoded = decoder.collect::<Result<Vec<_>>>()?;
            if decoded.len() < count {
                return Err(Error::oos(format!(
                    "DELTA_BINARY_PACKED stream holds {} values, {} required",
                    decoded.len(),
                    count
                )));
            }
            decoded
                .into_iter()
                .take(count)
                .map(|value| match physical {
                    PhysicalType::Int32 => Ok(Value::Int32(value as i32)),
                    PhysicalType::Int64 => Ok(Value::Int64(value)),
                    _ => Err(Error::oos(
                        "DELTA_BINARY_PACKED only applies to INT32 and INT64",
                    )),
                })
                .collect()
        }
        Encoding::ByteStreamSplit => match physical {
            PhysicalType::Float => Ok(byte_stream_split::Decoder::<f32>::try_new(buffer, count)?
                .map(Value::Float)
                .collect()),
            PhysicalType::Double => Ok(byte_stream_split::Decoder::<f64>::try_new(buffer, count)?
                .map(Value::Double)
                .collect()),
            _ => Err(Error::oos(
                "BYTE_STREAM_SPLIT only applies to FLOAT and DOUBLE",
            )),
        },
        Encoding::DeltaLengthByteArray
        | Encoding::DeltaByteArray
        | Encoding::BitPacked => Err(Error::UnsupportedEncoding(encoding)),
    }
}
