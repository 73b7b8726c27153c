// See https://github.com/apache/parquet-format/blob/master/Encodings.md#delta-encoding-delta_binary_packed--5
mod decoder;
mod encoder;

pub use decoder::Decoder;
pub use encoder::encode;
