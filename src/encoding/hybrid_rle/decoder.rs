use super::super::{ceil8, uleb128};
use super::HybridEncoded;

/// An iterator that, given a slice of bytes, returns [`HybridEncoded`] runs.
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    values: &'a [u8],
    num_bits: u32,
}

impl<'a> Decoder<'a> {
    pub fn new(values: &'a [u8], num_bits: u32) -> Self {
        Self { values, num_bits }
    }

    /// Returns the number of bits being used by this decoder.
    #[inline]
    pub fn num_bits(&self) -> u32 {
        self.num_bits
    }
}

impl<'a> Iterator for Decoder<'a> {
    type Item = HybridEncoded<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.values.is_empty() || self.num_bits == 0 {
            return None;
        }
        // a malformed run header ends the stream; the value budget check
        // downstream reports the shortfall
        let (indicator, consumed) = match uleb128::decode(self.values) {
            Ok(header) => header,
            Err(_) => return None,
        };
        self.values = &self.values[consumed..];
        if indicator & 1 == 1 {
            // is bitpacking: each group packs 8 values into `num_bits` bytes
            let run_length = (indicator as usize >> 1) * 8;
            let bytes = (indicator as usize >> 1) * self.num_bits as usize;
            let bytes = std::cmp::min(bytes, self.values.len());
            let result = Some(HybridEncoded::Bitpacked(&self.values[..bytes], run_length));
            self.values = &self.values[bytes..];
            result
        } else {
            // is rle: the value uses a fixed width of round-up-to-next-byte(bit-width)
            let run_length = indicator as usize >> 1;
            let rle_bytes = ceil8(self.num_bits as usize);
            if rle_bytes > self.values.len() {
                return None;
            }
            let result = Some(HybridEncoded::Rle(&self.values[..rle_bytes], run_length));
            self.values = &self.values[rle_bytes..];
            result
        }
    }
}
