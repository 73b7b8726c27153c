use crate::encoding::get_length;
use crate::error::{Error, Result};
use crate::format::{DataPageHeaderV1, DataPageHeaderV2};
use crate::metadata::ColumnDescriptor;
use crate::parquet_bridge::Encoding;
use crate::value::Value;

pub use crate::parquet_bridge::PageType;

/// The header of a data page, either version.
#[derive(Debug, Clone, PartialEq)]
pub enum DataPageHeader {
    V1(DataPageHeaderV1),
    V2(DataPageHeaderV2),
}

impl DataPageHeader {
    /// Number of (value, level) slots in the page, nulls included.
    pub fn num_values(&self) -> usize {
        match self {
            DataPageHeader::V1(header) => header.num_values as usize,
            DataPageHeader::V2(header) => header.num_values as usize,
        }
    }

    /// The encoding of the values section.
    pub fn encoding(&self) -> Result<Encoding> {
        match self {
            DataPageHeader::V1(header) => header.encoding.try_into(),
            DataPageHeader::V2(header) => header.encoding.try_into(),
        }
    }

    /// The number of nulls, when the header declares it (v2 only).
    pub fn num_nulls(&self) -> Option<usize> {
        match self {
            DataPageHeader::V1(_) => None,
            DataPageHeader::V2(header) => Some(header.num_nulls as usize),
        }
    }
}

/// An uncompressed, encoded data page. For v2 pages the level sections were
/// never compressed; for v1 pages the whole buffer has been decompressed.
#[derive(Debug)]
pub struct DataPage {
    pub header: DataPageHeader,
    pub buffer: Vec<u8>,
}

impl DataPage {
    pub fn num_values(&self) -> usize {
        self.header.num_values()
    }

    /// Splits the page buffer into its repetition-level, definition-level
    /// and values sections.
    ///
    /// v1 level sections carry a little-endian i32 length prefix; v2
    /// sections are sized by the page header and a buffer too short for them
    /// is a [`Error::LevelsByteLengthMismatch`].
    pub fn split_buffer(
        &self,
        descriptor: &ColumnDescriptor,
    ) -> Result<(&[u8], &[u8], &[u8])> {
        let has_rep = descriptor.max_rep_level() > 0;
        let has_def = descriptor.max_def_level() > 0;
        match &self.header {
            DataPageHeader::V1(_) => {
                let mut buffer = self.buffer.as_slice();
                let rep = if has_rep {
                    let length = get_length(buffer)? as usize;
                    let section = buffer.get(4..4 + length).ok_or_else(|| {
                        Error::TruncatedInput("v1 repetition levels".to_string())
                    })?;
                    buffer = &buffer[4 + length..];
                    section
                } else {
                    &[] as &[u8]
                };
                let def = if has_def {
                    let length = get_length(buffer)? as usize;
                    let section = buffer.get(4..4 + length).ok_or_else(|| {
                        Error::TruncatedInput("v1 definition levels".to_string())
                    })?;
                    buffer = &buffer[4 + length..];
                    section
                } else {
                    &[] as &[u8]
                };
                Ok((rep, def, buffer))
            }
            DataPageHeader::V2(header) => {
                let rep_length = header.repetition_levels_byte_length as usize;
                let def_length = header.definition_levels_byte_length as usize;
                if rep_length + def_length > self.buffer.len() {
                    return Err(Error::LevelsByteLengthMismatch {
                        declared: rep_length + def_length,
                        consumed: self.buffer.len(),
                    });
                }
                Ok((
                    &self.buffer[..rep_length],
                    &self.buffer[rep_length..rep_length + def_length],
                    &self.buffer[rep_length + def_length..],
                ))
            }
        }
    }
}

/// A decoded dictionary page: the physical values indexed by the integer
/// codes that dictionary-encoded data pages emit. Held for the duration of
/// one column chunk's decode.
#[derive(Debug, Clone, PartialEq)]
pub struct DictPage {
    pub values: Vec<Value>,
}

/// A page as the column chunk walker sees it.
#[derive(Debug)]
pub enum Page {
    Data(DataPage),
    Dict(DictPage),
}
