use crate::cursor::DataCursor;
use crate::error::{Error, Result};

use super::{zigzag_to_i64, CompactType, FieldHeader};

/// Longest legal ULEB128 encoding of a 64-bit integer.
const MAX_VARINT_BYTES: usize = 10;

/// A streaming Thrift Compact Protocol reader over an in-memory slice.
///
/// Struct decoding is driven by the caller: read field headers in a loop,
/// match on the field id, and [`skip`](CompactReader::skip) everything
/// unknown. Each nested struct keeps its own `last_fid`, as the protocol
/// resets field-id deltas per struct.
#[derive(Debug)]
pub struct CompactReader<'a> {
    cursor: DataCursor<'a>,
}

impl<'a> CompactReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            cursor: DataCursor::new(bytes),
        }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    /// Reads a ULEB128 varint of at most ten bytes.
    pub fn read_varint(&mut self) -> Result<u64> {
        let mut result = 0u64;
        let mut shift = 0u32;
        for consumed in 0.. {
            if consumed == MAX_VARINT_BYTES {
                return Err(Error::ThriftDecode("varint exceeds 10 bytes".to_string()));
            }
            let byte = self.cursor.read_u8()?;
            result |= u64::from(byte & 0x7f) << shift;
            if byte & 0x80 == 0 {
                break;
            }
            shift += 7;
        }
        Ok(result)
    }

    pub fn read_zigzag_i64(&mut self) -> Result<i64> {
        Ok(zigzag_to_i64(self.read_varint()?))
    }

    pub fn read_zigzag_i32(&mut self) -> Result<i32> {
        let value = self.read_zigzag_i64()?;
        i32::try_from(value)
            .map_err(|_| Error::ThriftDecode(format!("i32 field out of range: {}", value)))
    }

    pub fn read_zigzag_i16(&mut self) -> Result<i16> {
        let value = self.read_zigzag_i64()?;
        i16::try_from(value)
            .map_err(|_| Error::ThriftDecode(format!("i16 field out of range: {}", value)))
    }

    /// Reads the next field header of the current struct. `None` is STOP.
    ///
    /// The high nibble of the header byte is the field-id delta; a delta of
    /// zero switches to an absolute zigzag-encoded id that replaces
    /// `last_fid`.
    pub fn read_field_header(&mut self, last_fid: &mut i16) -> Result<Option<FieldHeader>> {
        let byte = self.cursor.read_u8()?;
        if byte == 0 {
            return Ok(None);
        }
        let type_ = CompactType::try_from_nibble(byte & 0x0f)?;
        let delta = byte >> 4;
        let fid = if delta == 0 {
            self.read_zigzag_i16()?
        } else {
            *last_fid + delta as i16
        };
        *last_fid = fid;
        Ok(Some((type_, fid)))
    }

    /// A list or set header: element type and count. Counts below fifteen are
    /// packed in the high nibble; the sentinel 15 defers to a varint.
    pub fn read_list_header(&mut self) -> Result<(CompactType, usize)> {
        let byte = self.cursor.read_u8()?;
        let type_ = CompactType::try_from_nibble(byte & 0x0f)?;
        let count = byte >> 4;
        let count = if count == 15 {
            self.read_varint()? as usize
        } else {
            count as usize
        };
        Ok((type_, count))
    }

    /// A map header: entry count and the key/value types packed in one byte.
    pub fn read_map_header(&mut self) -> Result<(CompactType, CompactType, usize)> {
        let count = self.read_varint()? as usize;
        if count == 0 {
            // an empty map has no type byte
            return Ok((CompactType::Stop, CompactType::Stop, 0));
        }
        let types = self.cursor.read_u8()?;
        Ok((
            CompactType::try_from_nibble(types >> 4)?,
            CompactType::try_from_nibble(types & 0x0f)?,
            count,
        ))
    }

    pub fn read_binary(&mut self) -> Result<&'a [u8]> {
        let length = self.read_varint()? as usize;
        self.cursor.take(length)
    }

    pub fn read_string(&mut self) -> Result<String> {
        let bytes = self.read_binary()?;
        String::from_utf8(bytes.to_vec())
            .map_err(|_| Error::ThriftDecode("string field is not valid UTF-8".to_string()))
    }

    pub fn read_byte(&mut self) -> Result<i8> {
        self.cursor.read_i8()
    }

    pub fn read_double(&mut self) -> Result<f64> {
        self.cursor.read_f64()
    }

    /// Sixteen raw bytes rendered as a lowercase hex string.
    pub fn read_uuid(&mut self) -> Result<String> {
        let bytes = self.cursor.take(16)?;
        let mut out = String::with_capacity(32);
        for byte in bytes {
            out.push_str(&format!("{:02x}", byte));
        }
        Ok(out)
    }

    /// A boolean in list-element position (one byte; in field position the
    /// wire type itself is the value).
    pub fn read_bool_element(&mut self) -> Result<bool> {
        Ok(self.cursor.read_u8()? != 0)
    }

    /// Skips one value of the given wire type, recursing through containers.
    pub fn skip(&mut self, type_: CompactType) -> Result<()> {
        match type_ {
            CompactType::Stop => Err(Error::ThriftDecode("cannot skip STOP".to_string())),
            // in field position the type carries the value
            CompactType::BooleanTrue | CompactType::BooleanFalse => Ok(()),
            CompactType::Byte => self.read_byte().map(|_| ()),
            CompactType::I16 | CompactType::I32 | CompactType::I64 => {
                self.read_varint().map(|_| ())
            }
            CompactType::Double => self.read_double().map(|_| ()),
            CompactType::Binary => self.read_binary().map(|_| ()),
            CompactType::List | CompactType::Set => {
                let (elem, count) = self.read_list_header()?;
                for _ in 0..count {
                    self.skip_element(elem)?;
                }
                Ok(())
            }
            CompactType::Map => {
                let (key, value, count) = self.read_map_header()?;
                for _ in 0..count {
                    self.skip_element(key)?;
                    self.skip_element(value)?;
                }
                Ok(())
            }
            CompactType::Struct => {
                let mut last_fid = 0i16;
                while let Some((field_type, _)) = self.read_field_header(&mut last_fid)? {
                    self.skip(field_type)?;
                }
                Ok(())
            }
            CompactType::Uuid => self.read_uuid().map(|_| ()),
        }
    }

    fn skip_element(&mut self, type_: CompactType) -> Result<()> {
        match type_ {
            // list-element booleans occupy one byte
            CompactType::BooleanTrue | CompactType::BooleanFalse => {
                self.read_bool_element().map(|_| ())
            }
            other => self.skip(other),
        }
    }
}
