use std::io::{Read, Seek, SeekFrom};

use crate::compression::Decompressors;
use crate::error::{Error, Result};
use crate::metadata::FileMetaData;
use crate::value::Value;

use super::column::ColumnChunkReader;

/// Options of a row read: which columns, which rows, and which codecs.
pub struct ReadOptions {
    /// Columns to materialize, by top-level field name or dotted leaf path.
    /// `None` selects every leaf.
    pub columns: Option<Vec<String>>,
    /// First row to deliver (file-absolute).
    pub row_start: usize,
    /// One past the last row to deliver; `None` reads to the end.
    pub row_end: Option<usize>,
    /// The decompressor table consulted for compressed pages.
    pub decompressors: Decompressors,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            columns: None,
            row_start: 0,
            row_end: None,
            decompressors: Decompressors::default(),
        }
    }
}

/// One row group's worth of delivered rows.
#[derive(Debug, Clone, PartialEq)]
pub struct RowChunk {
    /// Index of the row group the rows come from.
    pub row_group: usize,
    /// File-absolute index of `rows[0]`.
    pub row_start: usize,
    /// Dotted paths of the delivered columns, in row order.
    pub columns: Vec<String>,
    /// The rows; each row holds one [`Value`] per delivered column.
    pub rows: Vec<Vec<Value>>,
}

/// Returns the indices of the schema leaves selected by `options`.
pub(super) fn selected_leaves(
    metadata: &FileMetaData,
    options: &ReadOptions,
) -> Result<Vec<usize>> {
    let leaves = metadata.schema().columns();
    let Some(requested) = &options.columns else {
        return Ok((0..leaves.len()).collect());
    };

    let mut selected = vec![];
    for name in requested {
        let mut found = false;
        for (index, leaf) in leaves.iter().enumerate() {
            let matches = leaf.path().join(".") == *name || &leaf.path()[0] == name;
            if matches && !selected.contains(&index) {
                selected.push(index);
                found = true;
            }
        }
        if !found {
            return Err(Error::oos(format!("no column matches {:?}", name)));
        }
    }
    selected.sort_unstable();
    Ok(selected)
}

/// Reads rows and accumulates them, row-ascending across row groups.
pub fn read_rows<R: Read + Seek>(
    reader: &mut R,
    metadata: &FileMetaData,
    options: &ReadOptions,
) -> Result<Vec<Vec<Value>>> {
    let mut all = vec![];
    read_rows_with(reader, metadata, options, |chunk| {
        all.extend(chunk.rows);
        Ok(())
    })?;
    Ok(all)
}

/// Reads rows, delivering each row group's rows through `on_chunk` as soon
/// as every requested column has produced the corresponding row range.
pub fn read_rows_with<R: Read + Seek, F: FnMut(RowChunk) -> Result<()>>(
    reader: &mut R,
    metadata: &FileMetaData,
    options: &ReadOptions,
    mut on_chunk: F,
) -> Result<()> {
    let leaves = selected_leaves(metadata, options)?;
    let row_end = options.row_end.unwrap_or(metadata.num_rows);

    let mut group_offset = 0usize;
    for (group_index, row_group) in metadata.row_groups.iter().enumerate() {
        let group_rows = row_group.num_rows();
        let start = options.row_start.max(group_offset);
        let end = row_end.min(group_offset + group_rows);
        if start >= end {
            group_offset += group_rows;
            continue;
        }

        let mut columns = Vec::with_capacity(leaves.len());
        let mut per_column = Vec::with_capacity(leaves.len());
        for leaf in &leaves {
            let column = &row_group.columns()[*leaf];
            let (chunk_start, chunk_length) = column.byte_range();
            reader.seek(SeekFrom::Start(chunk_start))?;
            let mut chunk = vec![0; chunk_length as usize];
            reader.read_exact(&mut chunk)?;

            let rows = ColumnChunkReader::new(&chunk, column, &options.decompressors)
                .read_rows(start - group_offset, end - group_offset)?;
            columns.push(column.descriptor().path().join("."));
            per_column.push(rows);
        }

        on_chunk(zip_columns(group_index, start, columns, per_column)?)?;
        group_offset += group_rows;
    }
    Ok(())
}

/// Transposes per-column records into rows once every column covered the
/// range.
pub(super) fn zip_columns(
    row_group: usize,
    row_start: usize,
    columns: Vec<String>,
    per_column: Vec<Vec<Value>>,
) -> Result<RowChunk> {
    let num_rows = per_column.first().map(|rows| rows.len()).unwrap_or(0);
    if per_column.iter().any(|rows| rows.len() != num_rows) {
        return Err(Error::InternalInvariant(
            "columns delivered unequal row counts".to_string(),
        ));
    }

    let mut rows = vec![Vec::with_capacity(columns.len()); num_rows];
    for column in per_column {
        for (row, value) in rows.iter_mut().zip(column) {
            row.push(value);
        }
    }
    Ok(RowChunk {
        row_group,
        row_start,
        columns,
        rows,
    })
}
