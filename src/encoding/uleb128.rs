use crate::error::{Error, Result};

/// Longest legal ULEB128 encoding of a 64-bit integer.
const MAX_BYTES: usize = 10;

/// Decodes one ULEB128 integer from the front of `bytes`, returning the
/// value and the number of bytes it occupied.
///
/// Fails when the slice ends before the terminating byte, when the encoding
/// runs past ten bytes, or when the tenth byte carries bits beyond the 64th.
pub fn decode(bytes: &[u8]) -> Result<(u64, usize)> {
    let mut value = 0u64;
    for (index, byte) in bytes.iter().enumerate() {
        if index == MAX_BYTES {
            return Err(Error::oos("ULEB128 integer runs past ten bytes"));
        }
        let payload = u64::from(byte & 0x7f);
        if index == MAX_BYTES - 1 && payload > 1 {
            return Err(Error::oos("ULEB128 integer overflows 64 bits"));
        }
        value |= payload << (7 * index);
        if byte & 0x80 == 0 {
            return Ok((value, index + 1));
        }
    }
    Err(Error::TruncatedInput("unterminated ULEB128 integer".to_string()))
}

/// Encodes `value` into `container`, returning the number of bytes used.
pub fn encode(mut value: u64, container: &mut [u8; MAX_BYTES]) -> usize {
    let mut used = 0;
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            container[used] = byte;
            used += 1;
            break;
        }
        container[used] = byte | 0x80;
        used += 1;
    }
    used
}
