use crate::error::{Error, Result};
use crate::format::{ColumnChunk, ColumnMetaData, PageEncodingStats, Statistics};
use crate::parquet_bridge::{Compression, Encoding};
use crate::schema::types::{ParquetType, PhysicalType};

use super::column_descriptor::ColumnDescriptor;

/// Metadata for a column chunk.
// This contains the `ColumnDescriptor` associated with the chunk so that
// deserializers have access to the levels and the physical type.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnChunkMetaData {
    column_chunk: ColumnChunk,
    column_descr: ColumnDescriptor,
    // codes validated once at parse time
    compression: Compression,
    encodings: Vec<Encoding>,
}

impl ColumnChunkMetaData {
    /// Converts from the wire struct, validating the enum codes and the
    /// presence of the embedded `ColumnMetaData`.
    pub fn try_from_thrift(
        column_descr: ColumnDescriptor,
        column_chunk: ColumnChunk,
    ) -> Result<Self> {
        let metadata = column_chunk
            .meta_data
            .as_ref()
            .ok_or_else(|| Error::oos("column chunk requires its metadata"))?;
        let compression = metadata.codec.try_into()?;
        let encodings = metadata
            .encodings
            .iter()
            .map(|encoding| (*encoding).try_into())
            .collect::<Result<Vec<_>>>()?;
        if metadata.path_in_schema != column_descr.path() {
            return Err(Error::oos(format!(
                "column chunk path {:?} does not match the schema leaf {:?}",
                metadata.path_in_schema,
                column_descr.path()
            )));
        }
        Ok(Self {
            column_chunk,
            column_descr,
            compression,
            encodings,
        })
    }

    fn column_metadata(&self) -> &ColumnMetaData {
        // presence is validated by `try_from_thrift`
        self.column_chunk.meta_data.as_ref().unwrap()
    }

    /// The file where the column chunk is stored, when it is not this file.
    pub fn file_path(&self) -> &Option<String> {
        &self.column_chunk.file_path
    }

    /// Descriptor for this column.
    pub fn descriptor(&self) -> &ColumnDescriptor {
        &self.column_descr
    }

    /// The physical type of this column.
    pub fn physical_type(&self) -> PhysicalType {
        match self.column_descr.type_() {
            ParquetType::PrimitiveType { physical_type, .. } => *physical_type,
            // leaves are primitive by construction
            ParquetType::GroupType { .. } => unreachable!(),
        }
    }

    /// Total number of (value, level) slots in this column chunk, nulls
    /// included.
    pub fn num_values(&self) -> i64 {
        self.column_metadata().num_values
    }

    /// Compression of this column.
    pub fn compression(&self) -> Compression {
        self.compression
    }

    /// The encodings used by pages of this chunk.
    pub fn encodings(&self) -> &[Encoding] {
        &self.encodings
    }

    /// Returns the total compressed data size of this column chunk.
    pub fn compressed_size(&self) -> i64 {
        self.column_metadata().total_compressed_size
    }

    /// Returns the total uncompressed data size of this column chunk.
    pub fn uncompressed_size(&self) -> i64 {
        self.column_metadata().total_uncompressed_size
    }

    /// Returns the offset of the first data page.
    pub fn data_page_offset(&self) -> i64 {
        self.column_metadata().data_page_offset
    }

    /// Returns the offset for the dictionary page, if any.
    pub fn dictionary_page_offset(&self) -> Option<i64> {
        self.column_metadata().dictionary_page_offset
    }

    /// Statistics of this chunk, as written.
    pub fn statistics(&self) -> &Option<Statistics> {
        &self.column_metadata().statistics
    }

    /// Per-page encoding statistics of this chunk, as written.
    pub fn encoding_stats(&self) -> &Option<Vec<PageEncodingStats>> {
        &self.column_metadata().encoding_stats
    }

    /// Returns the offset and length in bytes of the column chunk within the
    /// file. The chunk starts at its dictionary page when it has one.
    pub fn byte_range(&self) -> (u64, u64) {
        let start = match self.dictionary_page_offset() {
            Some(dict_page_offset) => dict_page_offset.min(self.data_page_offset()),
            None => self.data_page_offset(),
        };
        let length = self.compressed_size();
        (start as u64, length as u64)
    }

    /// Method to convert to the wire struct.
    pub fn into_thrift(self) -> ColumnChunk {
        self.column_chunk
    }
}
