// See https://github.com/apache/parquet-format/blob/master/Encodings.md#byte-stream-split-byte_stream_split--9
mod decoder;

pub use decoder::Decoder;
