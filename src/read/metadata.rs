use std::cmp::min;
use std::io::{Read, Seek, SeekFrom};

use crate::error::{Error, Result};
use crate::format;
use crate::metadata::FileMetaData;
use crate::thrift::CompactReader;
use crate::{DEFAULT_FOOTER_READ_SIZE, FOOTER_SIZE, PARQUET_MAGIC};

pub(crate) fn metadata_len(buffer: &[u8], len: usize) -> i32 {
    i32::from_le_bytes(buffer[len - 8..len - 4].try_into().unwrap())
}

/// Parses [`FileMetaData`] from a buffer holding a complete parquet file.
// Layout of a parquet file
// +------+---------------------------+-----+---+
// | PAR1 |      Rest of file         |  B  | A |
// +------+---------------------------+-----+---+
// where A: metadata length (LE u32) + "PAR1", B: the thrift-encoded metadata.
pub fn deserialize_metadata(buffer: &[u8]) -> Result<FileMetaData> {
    let len = buffer.len();
    // header magic + footer
    if len < 4 + FOOTER_SIZE as usize {
        return Err(Error::TruncatedInput(
            "file is smaller than header and footer".to_string(),
        ));
    }
    if buffer[..4] != PARQUET_MAGIC {
        return Err(Error::InvalidMagic);
    }
    if buffer[len - 4..] != PARQUET_MAGIC {
        return Err(Error::InvalidMagic);
    }

    let metadata_len = metadata_len(buffer, len);
    let footer_len = FOOTER_SIZE + metadata_len as u64;
    if metadata_len <= 0 || footer_len >= len as u64 {
        return Err(Error::InvalidMetadataLength(metadata_len as i64));
    }

    let metadata_bytes = &buffer[len - footer_len as usize..len - FOOTER_SIZE as usize];
    deserialize_footer(metadata_bytes)
}

/// Parses the thrift-encoded metadata region (footer magic excluded).
pub(crate) fn deserialize_footer(metadata_bytes: &[u8]) -> Result<FileMetaData> {
    let mut reader = CompactReader::new(metadata_bytes);
    let metadata = format::FileMetaData::read_from(&mut reader)?;
    FileMetaData::try_from_thrift(metadata, metadata_bytes.len())
}

/// Reads a file's metadata from any seekable reader.
///
/// The last `DEFAULT_FOOTER_READ_SIZE` bytes are read first; when the
/// metadata does not fit, a second read covers the whole metadata region.
pub fn read_metadata<R: Read + Seek>(reader: &mut R) -> Result<FileMetaData> {
    let file_size = reader.seek(SeekFrom::End(0))?;
    if file_size < FOOTER_SIZE {
        return Err(Error::TruncatedInput(
            "file is smaller than the footer".to_string(),
        ));
    }

    // read and cache up to DEFAULT_FOOTER_READ_SIZE bytes from the end
    let default_end_len = min(DEFAULT_FOOTER_READ_SIZE, file_size) as usize;
    reader.seek(SeekFrom::End(-(default_end_len as i64)))?;
    let mut tail = vec![0; default_end_len];
    reader.read_exact(&mut tail)?;

    if tail[default_end_len - 4..] != PARQUET_MAGIC {
        return Err(Error::InvalidMagic);
    }

    let metadata_len = metadata_len(&tail, default_end_len);
    let footer_len = FOOTER_SIZE + metadata_len as u64;
    if metadata_len <= 0 || footer_len >= file_size {
        return Err(Error::InvalidMetadataLength(metadata_len as i64));
    }

    if footer_len as usize <= default_end_len {
        // the whole metadata is in the bytes already read
        let start = default_end_len - footer_len as usize;
        deserialize_footer(&tail[start..default_end_len - FOOTER_SIZE as usize])
    } else {
        // the tail was not long enough; read again covering all metadata
        reader.seek(SeekFrom::End(-(footer_len as i64)))?;
        let mut metadata_bytes = vec![0; metadata_len as usize];
        reader.read_exact(&mut metadata_bytes)?;
        deserialize_footer(&metadata_bytes)
    }
}
