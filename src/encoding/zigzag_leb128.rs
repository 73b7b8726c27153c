use crate::error::Result;

use super::uleb128;

/// Decodes one zigzag-encoded ULEB128 integer from the front of `bytes`,
/// returning the signed value and the number of bytes it occupied.
///
/// Zigzag interleaves the sign into the low bit: an even unsigned value is
/// the non-negative half, an odd one the bitwise complement of its half.
pub fn decode(bytes: &[u8]) -> Result<(i64, usize)> {
    let (unsigned, consumed) = uleb128::decode(bytes)?;
    let half = (unsigned >> 1) as i64;
    let value = if unsigned & 1 == 0 { half } else { !half };
    Ok((value, consumed))
}

/// Encodes `value`, returning the container and the number of bytes used.
pub fn encode(value: i64) -> ([u8; 10], usize) {
    let mut container = [0u8; 10];
    let unsigned = ((value << 1) ^ (value >> 63)) as u64;
    let used = uleb128::encode(unsigned, &mut container);
    (container, used)
}
