use std::io::Write;

use super::super::{bitpacked, ceil8, uleb128};

/// RLE-hybrid encoding of `u32`. This currently only yields bitpacked runs.
pub fn encode_u32<W: Write, I: Iterator<Item = u32>>(
    writer: &mut W,
    iterator: I,
    num_bits: u8,
) -> std::io::Result<()> {
    let values = iterator.collect::<Vec<_>>();

    // write the indicator: number of 8-value groups, lowest bit set
    let mut header = ceil8(values.len()) as u64;
    header <<= 1;
    header |= 1;
    let mut container = [0; 10];
    let used = uleb128::encode(header, &mut container);
    writer.write_all(&container[..used])?;

    let mut buffer = vec![];
    bitpacked::encode(&values, num_bits, &mut buffer);
    writer.write_all(&buffer)?;

    Ok(())
}
