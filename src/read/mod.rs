mod assemble;
mod column;
mod convert;
mod deserialize;
pub mod levels;
mod metadata;
mod page;
mod rows;
#[cfg(feature = "async")]
mod stream;

pub use column::ColumnChunkReader;
pub use metadata::{deserialize_metadata, read_metadata};
pub use page::{PageReader, RawPage};
pub use rows::{read_rows, read_rows_with, ReadOptions, RowChunk};

#[cfg(feature = "async")]
#[cfg_attr(docsrs, doc(cfg(feature = "async")))]
pub use stream::{
    read_metadata_async, read_rows_async, read_rows_async_collect, BlockingByteSource,
    ByteSource,
};

pub use assemble::assemble_nested;
pub use convert::convert_column;
pub use deserialize::{decode_plain, decode_values};
