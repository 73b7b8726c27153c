//! The pluggable table of decompressors.
//!
//! The reader never bundles codecs into its control flow; it looks the codec
//! up here and trusts the returned length. The builtin entries are
//! feature-gated so that a consumer can compile out every compression
//! dependency and register its own.
use std::collections::HashMap;

pub use crate::parquet_bridge::Compression;

use crate::error::{Error, Result};

/// A decompressor: `(input, expected_output_len) -> output`.
pub type Decompressor = Box<dyn Fn(&[u8], usize) -> Result<Vec<u8>> + Send + Sync>;

/// Mapping from [`Compression`] to a decompressor. `UNCOMPRESSED` never
/// dispatches through this table.
pub struct Decompressors {
    table: HashMap<Compression, Decompressor>,
}

impl std::fmt::Debug for Decompressors {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        fmt.debug_struct("Decompressors")
            .field("codecs", &self.table.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Default for Decompressors {
    /// A table with every feature-enabled builtin codec registered.
    fn default() -> Self {
        #[allow(unused_mut)]
        let mut table: HashMap<Compression, Decompressor> = HashMap::new();
        #[cfg(feature = "snappy")]
        table.insert(Compression::Snappy, Box::new(snappy_codec::decompress));
        #[cfg(feature = "gzip")]
        table.insert(Compression::Gzip, Box::new(gzip_codec::decompress));
        #[cfg(feature = "brotli")]
        table.insert(Compression::Brotli, Box::new(brotli_codec::decompress));
        #[cfg(feature = "zstd")]
        table.insert(Compression::Zstd, Box::new(zstd_codec::decompress));
        #[cfg(feature = "lz4")]
        table.insert(Compression::Lz4Raw, Box::new(lz4_codec::decompress));
        Self { table }
    }
}

impl Decompressors {
    /// A table with no codecs registered.
    pub fn empty() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    /// Registers `decompressor` for `codec`, replacing any previous entry.
    pub fn insert(&mut self, codec: Compression, decompressor: Decompressor) {
        self.table.insert(codec, decompressor);
    }

    /// Whether `codec` can be dispatched.
    pub fn supports(&self, codec: Compression) -> bool {
        codec == Compression::Uncompressed || self.table.contains_key(&codec)
    }

    /// Decompresses `input` into exactly `uncompressed_size` bytes.
    pub fn decompress(
        &self,
        codec: Compression,
        input: &[u8],
        uncompressed_size: usize,
    ) -> Result<Vec<u8>> {
        if codec == Compression::Uncompressed {
            return Err(Error::InternalInvariant(
                "UNCOMPRESSED dispatched to the codec table".to_string(),
            ));
        }
        let decompressor = self
            .table
            .get(&codec)
            .ok_or(Error::DecompressorMissing(codec))?;
        let output = decompressor(input, uncompressed_size)?;
        if output.len() != uncompressed_size {
            return Err(Error::DecompressionSizeMismatch {
                expected: uncompressed_size,
                got: output.len(),
            });
        }
        Ok(output)
    }
}

#[cfg(feature = "snappy")]
mod snappy_codec {
    use crate::error::{Error, Result};

    pub(super) fn decompress(input: &[u8], uncompressed_size: usize) -> Result<Vec<u8>> {
        let mut output = vec![0; uncompressed_size];
        let written = snap::raw::Decoder::new()
            .decompress(input, &mut output)
            .map_err(|e| Error::oos(format!("underlying snap error: {}", e)))?;
        output.truncate(written);
        Ok(output)
    }
}

#[cfg(feature = "gzip")]
mod gzip_codec {
    use std::io::Read;

    use crate::error::{Error, Result};

    pub(super) fn decompress(input: &[u8], uncompressed_size: usize) -> Result<Vec<u8>> {
        let mut output = Vec::with_capacity(uncompressed_size);
        flate2::read::GzDecoder::new(input)
            .read_to_end(&mut output)
            .map_err(|e| Error::oos(format!("underlying gzip error: {}", e)))?;
        Ok(output)
    }
}

#[cfg(feature = "brotli")]
mod brotli_codec {
    use std::io::Read;

    use crate::error::{Error, Result};

    const BROTLI_DEFAULT_BUFFER_SIZE: usize = 4096;

    pub(super) fn decompress(input: &[u8], uncompressed_size: usize) -> Result<Vec<u8>> {
        let mut output = Vec::with_capacity(uncompressed_size);
        brotli::Decompressor::new(input, BROTLI_DEFAULT_BUFFER_SIZE)
            .read_to_end(&mut output)
            .map_err(|e| Error::oos(format!("underlying brotli error: {}", e)))?;
        Ok(output)
    }
}

#[cfg(feature = "zstd")]
mod zstd_codec {
    use crate::error::{Error, Result};

    pub(super) fn decompress(input: &[u8], uncompressed_size: usize) -> Result<Vec<u8>> {
        zstd::bulk::decompress(input, uncompressed_size)
            .map_err(|e| Error::oos(format!("underlying zstd error: {}", e)))
    }
}

#[cfg(feature = "lz4")]
mod lz4_codec {
    use crate::error::{Error, Result};

    pub(super) fn decompress(input: &[u8], uncompressed_size: usize) -> Result<Vec<u8>> {
        lz4_flex::block::decompress(input, uncompressed_size)
            .map_err(|e| Error::oos(format!("underlying lz4 error: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_codec_is_reported() {
        let table = Decompressors::empty();
        assert_eq!(
            table.decompress(Compression::Lzo, &[], 10).unwrap_err(),
            Error::DecompressorMissing(Compression::Lzo)
        );
    }

    #[test]
    fn length_mismatch_is_reported() {
        let mut table = Decompressors::empty();
        table.insert(
            Compression::Snappy,
            Box::new(|input, _| Ok(input.to_vec())),
        );
        assert_eq!(
            table
                .decompress(Compression::Snappy, &[1, 2, 3], 5)
                .unwrap_err(),
            Error::DecompressionSizeMismatch {
                expected: 5,
                got: 3
            }
        );
    }

    #[cfg(feature = "gzip")]
    #[test]
    fn gzip_roundtrip() {
        use std::io::Write;

        let data = b"the quick brown fox jumps over the lazy dog".to_vec();
        let mut encoder =
            flate2::write::GzEncoder::new(vec![], flate2::Compression::default());
        encoder.write_all(&data).unwrap();
        let compressed = encoder.finish().unwrap();

        let table = Decompressors::default();
        let output = table
            .decompress(Compression::Gzip, &compressed, data.len())
            .unwrap();
        assert_eq!(output, data);
    }

    #[cfg(feature = "snappy")]
    #[test]
    fn snappy_roundtrip() {
        let data = b"abcabcabcabcabcabc".to_vec();
        let compressed = snap::raw::Encoder::new().compress_vec(&data).unwrap();

        let table = Decompressors::default();
        let output = table
            .decompress(Compression::Snappy, &compressed, data.len())
            .unwrap();
        assert_eq!(output, data);
    }
}
