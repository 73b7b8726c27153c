#![forbid(unsafe_code)]
/// Read-only implementation of parquet IO over range-addressable sources.
pub mod compression;
pub mod cursor;
pub mod encoding;
pub mod error;
pub mod format;
pub mod metadata;
pub mod page;
mod parquet_bridge;
pub mod read;
pub mod schema;
pub mod thrift;
pub mod types;
pub mod value;

pub use parquet_bridge::{Compression, Encoding, PageType, Repetition};

const FOOTER_SIZE: u64 = 8;
const PARQUET_MAGIC: [u8; 4] = [b'P', b'A', b'R', b'1'];

/// The number of bytes fetched from the end of the file on the first range
/// request when reading metadata.
pub const DEFAULT_FOOTER_READ_SIZE: u64 = 512 * 1024;
