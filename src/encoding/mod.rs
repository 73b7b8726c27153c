pub mod bitpacked;
pub mod byte_stream_split;
pub mod delta_bitpacked;
pub mod hybrid_rle;
pub mod uleb128;
pub mod zigzag_leb128;

pub use crate::parquet_bridge::Encoding;

use crate::error::{Error, Result};

/// Reads the little-endian i32 length prefix of a level stream.
pub fn get_length(values: &[u8]) -> Result<u32> {
    let bytes: [u8; 4] = values
        .get(0..4)
        .ok_or_else(|| Error::TruncatedInput("level stream length prefix".to_string()))?
        .try_into()
        .unwrap();
    Ok(u32::from_le_bytes(bytes))
}

/// Returns the ceil of value/8
#[inline]
pub fn ceil8(value: usize) -> usize {
    value / 8 + ((value % 8 != 0) as usize)
}

/// Number of bits needed to represent `value`, i.e. `ceil(log2(value + 1))`.
#[inline]
pub fn log2(value: u64) -> u32 {
    64 - value.leading_zeros()
}
