use crate::error::{Error, Result};
use crate::format::{RowGroup, SortingColumn};

use super::{column_chunk_metadata::ColumnChunkMetaData, schema_descriptor::SchemaDescriptor};

/// Metadata for a row group.
#[derive(Debug, Clone, PartialEq)]
pub struct RowGroupMetaData {
    columns: Vec<ColumnChunkMetaData>,
    num_rows: usize,
    total_byte_size: usize,
    sorting_columns: Option<Vec<SortingColumn>>,
}

impl RowGroupMetaData {
    /// Number of rows in this row group.
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Total byte size of all uncompressed column data in this row group.
    pub fn total_byte_size(&self) -> usize {
        self.total_byte_size
    }

    /// Returns column chunks of this row group, one per schema leaf, in
    /// write order.
    pub fn columns(&self) -> &[ColumnChunkMetaData] {
        &self.columns
    }

    /// The sort order of the rows, when the writer declared one.
    pub fn sorting_columns(&self) -> &Option<Vec<SortingColumn>> {
        &self.sorting_columns
    }

    /// Method to convert from the wire struct.
    pub fn try_from_thrift(
        schema_descr: &SchemaDescriptor,
        row_group: RowGroup,
    ) -> Result<Self> {
        if row_group.columns.len() != schema_descr.num_columns() {
            return Err(Error::oos(format!(
                "row group has {} column chunks but the schema has {} leaves",
                row_group.columns.len(),
                schema_descr.num_columns()
            )));
        }
        let columns = row_group
            .columns
            .into_iter()
            .zip(schema_descr.columns())
            .map(|(column_chunk, descriptor)| {
                ColumnChunkMetaData::try_from_thrift(descriptor.clone(), column_chunk)
            })
            .collect::<Result<Vec<_>>>()?;

        if row_group.num_rows < 0 || row_group.total_byte_size < 0 {
            return Err(Error::oos("row group sizes must not be negative"));
        }

        Ok(Self {
            columns,
            num_rows: row_group.num_rows as usize,
            total_byte_size: row_group.total_byte_size as usize,
            sorting_columns: row_group.sorting_columns,
        })
    }

    /// Method to convert to the wire struct.
    pub fn into_thrift(self) -> RowGroup {
        let total_byte_size = self.total_byte_size as i64;
        let num_rows = self.num_rows as i64;
        RowGroup {
            columns: self
                .columns
                .into_iter()
                .map(|column| column.into_thrift())
                .collect(),
            total_byte_size,
            num_rows,
            sorting_columns: self.sorting_columns,
        }
    }
}
