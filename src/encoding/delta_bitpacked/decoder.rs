use crate::error::{Error, Result};

use super::super::{bitpacked, ceil8, uleb128, zigzag_leb128};

#[derive(Debug)]
struct Block<'a> {
    // the minimum delta, added to every decoded miniblock value.
    min_delta: i64,
    values_per_mini_block: usize,
    bitwidths: &'a [u8],
    values: &'a [u8],
    remaining: usize,     // number of deltas still to produce
    current_index: usize, // invariant: < values_per_mini_block
    // None represents a bit width of zero, in which case there is no miniblock.
    current_miniblock: Option<bitpacked::Decoder64<'a>>,
    // number of bytes consumed, full started miniblocks included.
    consumed_bytes: usize,
}

impl<'a> Block<'a> {
    fn try_new(
        mut values: &'a [u8],
        num_mini_blocks: usize,
        values_per_mini_block: usize,
        length: usize,
    ) -> Result<Self> {
        let length = std::cmp::min(length, num_mini_blocks * values_per_mini_block);

        let mut consumed_bytes = 0;
        let (min_delta, consumed) = zigzag_leb128::decode(values)?;
        consumed_bytes += consumed;
        values = &values[consumed..];

        if num_mini_blocks > values.len() {
            return Err(Error::TruncatedInput(
                "delta block miniblock bit widths".to_string(),
            ));
        }
        let bitwidths = &values[..num_mini_blocks];
        consumed_bytes += num_mini_blocks;
        values = &values[num_mini_blocks..];

        let mut block = Block {
            min_delta,
            values_per_mini_block,
            bitwidths,
            remaining: length,
            values,
            current_index: 0,
            current_miniblock: None,
            consumed_bytes,
        };

        if block.remaining > 0 {
            block.advance_miniblock()?;
        }

        Ok(block)
    }

    fn advance_miniblock(&mut self) -> Result<()> {
        let num_bits = self.bitwidths[0];
        self.bitwidths = &self.bitwidths[1..];

        self.current_miniblock = if num_bits > 0 {
            if num_bits > 64 {
                return Err(Error::oos(format!(
                    "delta miniblock bit width {} exceeds 64",
                    num_bits
                )));
            }
            let length = std::cmp::min(self.remaining, self.values_per_mini_block);

            // a started miniblock occupies its full padded byte length
            let miniblock_length = ceil8(self.values_per_mini_block * num_bits as usize);
            if miniblock_length > self.values.len() {
                return Err(Error::TruncatedInput("delta miniblock".to_string()));
            }
            let (miniblock, remainder) = self.values.split_at(miniblock_length);

            self.values = remainder;
            self.consumed_bytes += miniblock_length;

            Some(bitpacked::Decoder64::new(miniblock, num_bits, length))
        } else {
            None
        };
        self.current_index = 0;
        Ok(())
    }

    fn next_delta(&mut self) -> Result<Option<i64>> {
        if self.remaining == 0 {
            return Ok(None);
        }
        let packed = match &mut self.current_miniblock {
            Some(miniblock) => miniblock.next().ok_or_else(|| {
                Error::InternalInvariant("miniblock exhausted before its length".to_string())
            })?,
            None => 0,
        };
        let delta = self.min_delta.wrapping_add(packed as i64);
        self.current_index += 1;
        self.remaining -= 1;

        if self.remaining > 0 && self.current_index == self.values_per_mini_block {
            self.advance_miniblock()?;
        }

        Ok(Some(delta))
    }
}

/// Decoder of parquet's `DELTA_BINARY_PACKED`. Implements `Iterator<Item = Result<i64>>`.
///
/// All arithmetic is 64-bit: the first value and the deltas are zigzag
/// varints that may span the full `i64` range.
#[derive(Debug)]
pub struct Decoder<'a> {
    num_mini_blocks: usize,
    values_per_mini_block: usize,
    total_count: usize, // values still to emit
    next_value: i64,    // the running cumulative value
    values: &'a [u8],
    current_block: Option<Block<'a>>,
    // bytes consumed up to (and excluding) the current block
    consumed_bytes: usize,
}

impl<'a> Decoder<'a> {
    pub fn try_new(mut values: &'a [u8]) -> Result<Self> {
        let mut consumed_bytes = 0;
        let (block_size, consumed) = uleb128::decode(values)?;
        consumed_bytes += consumed;
        values = &values[consumed..];
        if block_size == 0 || block_size % 128 != 0 {
            return Err(Error::oos(format!(
                "delta block size {} is not a positive multiple of 128",
                block_size
            )));
        }

        let (num_mini_blocks, consumed) = uleb128::decode(values)?;
        let num_mini_blocks = num_mini_blocks as usize;
        consumed_bytes += consumed;
        values = &values[consumed..];
        if num_mini_blocks == 0 {
            return Err(Error::oos("delta header declares zero miniblocks"));
        }

        let (total_count, consumed) = uleb128::decode(values)?;
        let total_count = total_count as usize;
        consumed_bytes += consumed;
        values = &values[consumed..];

        let (first_value, consumed) = zigzag_leb128::decode(values)?;
        consumed_bytes += consumed;
        values = &values[consumed..];

        let values_per_mini_block = block_size as usize / num_mini_blocks;
        if values_per_mini_block % 8 != 0 {
            return Err(Error::oos(format!(
                "{} values per miniblock is not a multiple of 8",
                values_per_mini_block
            )));
        }

        let current_block = if total_count > 1 {
            Some(Block::try_new(
                values,
                num_mini_blocks,
                values_per_mini_block,
                total_count - 1,
            )?)
        } else {
            None
        };

        Ok(Self {
            num_mini_blocks,
            values_per_mini_block,
            total_count,
            next_value: first_value,
            values,
            current_block,
            consumed_bytes,
        })
    }

    /// Returns the total number of bytes consumed up to this point by [`Decoder`].
    pub fn consumed_bytes(&self) -> usize {
        self.consumed_bytes
            + self
                .current_block
                .as_ref()
                .map(|block| block.consumed_bytes)
                .unwrap_or(0)
    }
}

impl<'a> Iterator for Decoder<'a> {
    type Item = Result<i64>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.total_count == 0 {
            return None;
        }
        self.total_count -= 1;
        let result = self.next_value;

        if self.total_count > 0 {
            let step = match &mut self.current_block {
                Some(block) => block.next_delta(),
                None => {
                    return Some(Err(Error::InternalInvariant(
                        "delta stream has values but no block".to_string(),
                    )))
                }
            };
            let delta = match step {
                Err(e) => return Some(Err(e)),
                Ok(Some(delta)) => delta,
                Ok(None) => {
                    // the block is exhausted; load the next one
                    let finished = self.current_block.take().unwrap();
                    self.values = &self.values[finished.consumed_bytes..];
                    self.consumed_bytes += finished.consumed_bytes;
                    let mut block = match Block::try_new(
                        self.values,
                        self.num_mini_blocks,
                        self.values_per_mini_block,
                        self.total_count,
                    ) {
                        Ok(block) => block,
                        Err(e) => return Some(Err(e)),
                    };
                    // non-empty since total_count > 0
                    let delta = match block.next_delta() {
                        Err(e) => return Some(Err(e)),
                        Ok(delta) => delta.unwrap(),
                    };
                    self.current_block = Some(block);
                    delta
                }
            };
            self.next_value = self.next_value.wrapping_add(delta);
        }

        Some(Ok(result))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.total_count, Some(self.total_count))
    }
}
