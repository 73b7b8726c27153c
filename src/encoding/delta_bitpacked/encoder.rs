use super::super::{bitpacked, ceil8, log2, uleb128, zigzag_leb128};

const BLOCK_SIZE: usize = 128;

/// Encodes an iterator of `i64` according to parquet's `DELTA_BINARY_PACKED`.
///
/// `num_mini_blocks` must divide the block size of 128 into a multiple of 8,
/// i.e. be one of 1, 2, 4, 8 or 16. Only started miniblocks are written;
/// started miniblocks are padded to their full byte length.
pub fn encode<I: Iterator<Item = i64>>(
    mut iterator: I,
    num_mini_blocks: usize,
    buffer: &mut Vec<u8>,
) {
    assert!(num_mini_blocks > 0 && BLOCK_SIZE % num_mini_blocks == 0);
    let values_per_mini_block = BLOCK_SIZE / num_mini_blocks;
    assert!(values_per_mini_block % 8 == 0);

    let mut container = [0u8; 10];
    let encoded_len = uleb128::encode(BLOCK_SIZE as u64, &mut container);
    buffer.extend_from_slice(&container[..encoded_len]);

    let encoded_len = uleb128::encode(num_mini_blocks as u64, &mut container);
    buffer.extend_from_slice(&container[..encoded_len]);

    let values = iterator.by_ref().collect::<Vec<_>>();

    let encoded_len = uleb128::encode(values.len() as u64, &mut container);
    buffer.extend_from_slice(&container[..encoded_len]);

    let first_value = match values.first() {
        Some(first) => *first,
        None => return,
    };
    let (container, encoded_len) = zigzag_leb128::encode(first_value);
    buffer.extend_from_slice(&container[..encoded_len]);

    let deltas = values
        .windows(2)
        .map(|pair| pair[1].wrapping_sub(pair[0]))
        .collect::<Vec<_>>();

    for block in deltas.chunks(BLOCK_SIZE) {
        let min_delta = *block.iter().min().unwrap();

        let (container, encoded_len) = zigzag_leb128::encode(min_delta);
        buffer.extend_from_slice(&container[..encoded_len]);

        // <list of bitwidths of miniblocks> <miniblocks>
        let miniblocks = block.chunks(values_per_mini_block).collect::<Vec<_>>();
        let widths = miniblocks
            .iter()
            .map(|miniblock| {
                let max = miniblock
                    .iter()
                    .map(|delta| (delta.wrapping_sub(min_delta)) as u64)
                    .max()
                    .unwrap();
                log2(max) as u8
            })
            .collect::<Vec<_>>();

        for index in 0..num_mini_blocks {
            buffer.push(widths.get(index).copied().unwrap_or(0));
        }

        for (miniblock, num_bits) in miniblocks.iter().zip(widths.iter()) {
            if *num_bits == 0 {
                continue;
            }
            // pack a full miniblock, padding missing deltas with zero
            let mut normalized = vec![0u64; values_per_mini_block];
            for (slot, delta) in normalized.iter_mut().zip(miniblock.iter()) {
                *slot = delta.wrapping_sub(min_delta) as u64;
            }
            let start = buffer.len();
            bitpacked::encode64(&normalized, *num_bits, buffer);
            buffer.resize(start + ceil8(values_per_mini_block * *num_bits as usize), 0);
        }
    }
}
