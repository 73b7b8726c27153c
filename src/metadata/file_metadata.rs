use crate::error::Result;
use crate::format;
use crate::schema::types::ParquetType;

use super::{row_metadata::RowGroupMetaData, schema_descriptor::SchemaDescriptor};

pub use crate::format::KeyValue;

/// Metadata for a parquet file, constructed once per file and immutable
/// thereafter.
#[derive(Debug, Clone, PartialEq)]
pub struct FileMetaData {
    /// version of this file.
    pub version: i32,
    /// number of rows in the file.
    pub num_rows: usize,
    /// String message for application that wrote this file.
    ///
    /// This should have the following format:
    /// `<application> version <application version> (build <application build hash>)`.
    ///
    /// ```text
    /// parquet-mr version 1.8.0 (build 0fda28af84b9746396014ad6a415b90592a98b3b)
    /// ```
    pub created_by: Option<String>,
    /// The row groups of this file.
    pub row_groups: Vec<RowGroupMetaData>,
    /// key_value_metadata of this file.
    pub key_value_metadata: Option<Vec<KeyValue>>,
    /// schema descriptor.
    pub schema_descr: SchemaDescriptor,
    /// The length of the thrift-encoded metadata, in bytes.
    pub metadata_len: usize,
}

impl FileMetaData {
    /// Returns the [`SchemaDescriptor`] that describes schema of this file.
    pub fn schema(&self) -> &SchemaDescriptor {
        &self.schema_descr
    }

    /// Returns the root [`ParquetType`] of the schema tree.
    pub fn root_schema(&self) -> &ParquetType {
        self.schema_descr.root_schema()
    }

    /// returns the metadata
    pub fn key_value_metadata(&self) -> &Option<Vec<KeyValue>> {
        &self.key_value_metadata
    }

    /// Method to convert from the wire struct.
    pub fn try_from_thrift(metadata: format::FileMetaData, metadata_len: usize) -> Result<Self> {
        let schema_tree = ParquetType::try_from_thrift(&metadata.schema)?;
        if !schema_tree.is_root() {
            return Err(crate::error::Error::oos("the schema root must be a group"));
        }
        let schema_descr = SchemaDescriptor::new(schema_tree);

        let row_groups = metadata
            .row_groups
            .into_iter()
            .map(|row_group| RowGroupMetaData::try_from_thrift(&schema_descr, row_group))
            .collect::<Result<Vec<_>>>()?;

        Ok(FileMetaData {
            version: metadata.version,
            num_rows: metadata.num_rows.try_into().map_err(|_| {
                crate::error::Error::oos(format!("negative num_rows {}", metadata.num_rows))
            })?,
            created_by: metadata.created_by,
            row_groups,
            key_value_metadata: metadata.key_value_metadata,
            schema_descr,
            metadata_len,
        })
    }

    /// Method to convert to the wire struct.
    pub fn into_thrift(self) -> format::FileMetaData {
        format::FileMetaData {
            version: self.version,
            schema: self.schema_descr.root_schema().to_thrift(),
            num_rows: self.num_rows as i64,
            row_groups: self
                .row_groups
                .into_iter()
                .map(|row_group| row_group.into_thrift())
                .collect(),
            key_value_metadata: self.key_value_metadata,
            created_by: self.created_by,
        }
    }
}
