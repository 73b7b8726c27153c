use crate::encoding::{hybrid_rle, log2};
use crate::error::Result;

/// The number of bits required to encode levels up to and including
/// `max_level`.
#[inline]
pub fn get_bit_width(max_level: i16) -> u32 {
    log2(max_level as u64)
}

/// Decodes `length` levels at the width implied by `max_level` from an
/// RLE/bit-packed hybrid section (no length prefix).
pub fn decode_levels(values: &[u8], max_level: i16, length: usize) -> Result<Vec<u32>> {
    hybrid_rle::decode_exact(values, get_bit_width(max_level), length)
}
