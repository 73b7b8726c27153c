//! Async reading over range-addressable byte sources.
use std::io::{Read, Seek, SeekFrom};
use std::ops::Range;
use std::sync::Mutex;

use futures::future::BoxFuture;

use crate::error::{Error, Result};
use crate::metadata::FileMetaData;
use crate::value::Value;
use crate::{FOOTER_SIZE, PARQUET_MAGIC};

use super::column::ColumnChunkReader;
use super::metadata::deserialize_footer;
use super::rows::{selected_leaves, zip_columns, ReadOptions, RowChunk};

/// A range-addressable blob of bytes, e.g. a local file or an object behind
/// HTTP range requests.
///
/// The reader never requests bytes outside `0..byte_length()`; transport
/// failures surface unchanged as [`Error::Transport`].
pub trait ByteSource {
    /// Total number of bytes.
    fn byte_length(&self) -> u64;

    /// The bytes of `range`. `range.end` is at most `byte_length()`.
    fn slice(&self, range: Range<u64>) -> BoxFuture<'_, Result<Vec<u8>>>;
}

impl ByteSource for &[u8] {
    fn byte_length(&self) -> u64 {
        self.len() as u64
    }

    fn slice(&self, range: Range<u64>) -> BoxFuture<'_, Result<Vec<u8>>> {
        let result = self
            .get(range.start as usize..range.end as usize)
            .map(|bytes| bytes.to_vec())
            .ok_or_else(|| Error::Transport(format!("range {:?} out of bounds", range)));
        Box::pin(futures::future::ready(result))
    }
}

impl ByteSource for Vec<u8> {
    fn byte_length(&self) -> u64 {
        self.len() as u64
    }

    fn slice(&self, range: Range<u64>) -> BoxFuture<'_, Result<Vec<u8>>> {
        let result = self
            .get(range.start as usize..range.end as usize)
            .map(|bytes| bytes.to_vec())
            .ok_or_else(|| Error::Transport(format!("range {:?} out of bounds", range)));
        Box::pin(futures::future::ready(result))
    }
}

/// Adapts any seekable reader into a [`ByteSource`] whose futures resolve
/// immediately.
#[derive(Debug)]
pub struct BlockingByteSource<R: Read + Seek> {
    reader: Mutex<R>,
    length: u64,
}

impl<R: Read + Seek> BlockingByteSource<R> {
    pub fn try_new(mut reader: R) -> Result<Self> {
        let length = reader.seek(SeekFrom::End(0))?;
        Ok(Self {
            reader: Mutex::new(reader),
            length,
        })
    }
}

impl<R: Read + Seek + Send> ByteSource for BlockingByteSource<R> {
    fn byte_length(&self) -> u64 {
        self.length
    }

    fn slice(&self, range: Range<u64>) -> BoxFuture<'_, Result<Vec<u8>>> {
        let result = (|| {
            let mut reader = self
                .reader
                .lock()
                .map_err(|_| Error::Transport("byte source mutex poisoned".to_string()))?;
            reader.seek(SeekFrom::Start(range.start))?;
            let mut buffer = vec![0; (range.end - range.start) as usize];
            reader.read_exact(&mut buffer)?;
            Ok(buffer)
        })();
        Box::pin(futures::future::ready(result))
    }
}

/// Reads a file's metadata with at most two range requests.
///
/// The trailing `initial_fetch_size` bytes are requested first; when the
/// metadata does not fit, one more request covers exactly the missing
/// prefix of the metadata region.
pub async fn read_metadata_async<S: ByteSource>(
    source: &S,
    initial_fetch_size: u64,
) -> Result<FileMetaData> {
    let file_size = source.byte_length();
    if file_size < FOOTER_SIZE {
        return Err(Error::TruncatedInput(
            "file is smaller than the footer".to_string(),
        ));
    }

    let tail_len = initial_fetch_size.clamp(FOOTER_SIZE, file_size);
    let tail = source.slice(file_size - tail_len..file_size).await?;

    if tail[tail.len() - 4..] != PARQUET_MAGIC {
        return Err(Error::InvalidMagic);
    }
    let metadata_len =
        u32::from_le_bytes(tail[tail.len() - 8..tail.len() - 4].try_into().unwrap()) as u64;
    if metadata_len == 0 || metadata_len + FOOTER_SIZE >= file_size {
        return Err(Error::InvalidMetadataLength(metadata_len as i64));
    }

    let footer_len = metadata_len + FOOTER_SIZE;
    if footer_len <= tail_len {
        // the metadata fits in the bytes already fetched
        let start = (tail_len - footer_len) as usize;
        deserialize_footer(&tail[start..start + metadata_len as usize])
    } else {
        // fetch exactly the missing prefix of the metadata region
        let metadata_start = file_size - footer_len;
        let missing = source.slice(metadata_start..file_size - tail_len).await?;
        let mut metadata_bytes = missing;
        metadata_bytes.extend_from_slice(&tail[..(tail_len - FOOTER_SIZE) as usize]);
        deserialize_footer(&metadata_bytes)
    }
}

/// Reads rows over a [`ByteSource`], one range request per column chunk,
/// delivering each row group through `on_chunk`. Within a column, values
/// arrive in file order; rows are assembled only once every requested
/// column produced the range.
pub async fn read_rows_async<S: ByteSource, F: FnMut(RowChunk) -> Result<()>>(
    source: &S,
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
            let chunk = source.slice(chunk_start..chunk_start + chunk_length).await?;

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

/// Collects [`read_rows_async`] into a vector of rows.
pub async fn read_rows_async_collect<S: ByteSource>(
    source: &S,
    metadata: &FileMetaData,
    options: &ReadOptions,
) -> Result<Vec<Vec<Value>>> {
    let mut all = vec![];
    read_rows_async(source, metadata, options, |chunk| {
        all.extend(chunk.rows);
        Ok(())
    })
    .await?;
    Ok(all)
}
