use crate::compression::{Compression, Decompressors};
use crate::error::{Error, Result};
use crate::format;
use crate::metadata::ColumnChunkMetaData;
use crate::page::{DataPage, DataPageHeader, DictPage, Page, PageType};
use crate::schema::types::PhysicalType;
use crate::thrift::CompactReader;

use super::deserialize::decode_plain;

/// A page whose header has been decoded but whose body is still raw bytes of
/// the column chunk. Inspecting it is cheap; [`PageReader::decode`] does the
/// expensive work.
#[derive(Debug)]
pub struct RawPage<'a> {
    pub header: format::PageHeader,
    pub body: &'a [u8],
}

impl<'a> RawPage<'a> {
    pub fn page_type(&self) -> Result<PageType> {
        self.header.type_.try_into()
    }

    /// Number of (value, level) slots, for data pages.
    pub fn num_values(&self) -> Option<usize> {
        if let Some(header) = &self.header.data_page_header {
            return Some(header.num_values as usize);
        }
        if let Some(header) = &self.header.data_page_header_v2 {
            return Some(header.num_values as usize);
        }
        None
    }
}

/// Walks the pages of one column chunk held in memory, back to back.
///
/// Page headers are decoded eagerly; bodies are decompressed only on
/// [`decode`](PageReader::decode), so callers may byte-skip pages.
pub struct PageReader<'a> {
    chunk: &'a [u8],
    offset: usize,
    compression: Compression,
    physical_type: PhysicalType,
    decompressors: &'a Decompressors,
    seen_values: i64,
    total_values: i64,
}

impl<'a> PageReader<'a> {
    /// Returns a new [`PageReader`] over `chunk`, the bytes of `column`
    /// starting at its first page.
    pub fn new(
        chunk: &'a [u8],
        column: &ColumnChunkMetaData,
        decompressors: &'a Decompressors,
    ) -> Self {
        Self {
            chunk,
            offset: 0,
            compression: column.compression(),
            physical_type: column.physical_type(),
            decompressors,
            seen_values: 0,
            total_values: column.num_values(),
        }
    }

    /// Decodes the next page header and returns it with its raw body.
    /// Returns `None` once all values of the chunk have been covered.
    /// INDEX_PAGE pages are skipped.
    pub fn next_raw(&mut self) -> Result<Option<RawPage<'a>>> {
        loop {
            if self.seen_values >= self.total_values {
                return Ok(None);
            }

            let mut reader = CompactReader::new(&self.chunk[self.offset..]);
            let header = format::PageHeader::read_from(&mut reader)?;
            self.offset += reader.position();

            let body_len = header.compressed_page_size as usize;
            if self.offset + body_len > self.chunk.len() {
                return Err(Error::TruncatedInput(format!(
                    "page body of {} bytes at chunk offset {}",
                    body_len, self.offset
                )));
            }
            let body = &self.chunk[self.offset..self.offset + body_len];
            self.offset += body_len;

            let page = RawPage { header, body };
            match page.page_type()? {
                PageType::IndexPage => continue,
                PageType::DataPage | PageType::DataPageV2 => {
                    self.seen_values += page.num_values().unwrap_or(0) as i64;
                    return Ok(Some(page));
                }
                PageType::DictionaryPage => return Ok(Some(page)),
            }
        }
    }

    /// Decompresses and finishes a page: dictionary pages are decoded to
    /// their values, data pages to their uncompressed buffer.
    pub fn decode(&self, raw: RawPage<'a>) -> Result<Page> {
        let uncompressed_size = raw.header.uncompressed_page_size as usize;
        match raw.page_type()? {
            PageType::DictionaryPage => {
                let header = raw.header.dictionary_page_header.as_ref().ok_or_else(|| {
                    Error::oos("DICTIONARY_PAGE without a dictionary page header")
                })?;
                let buffer = self.decompress_body(raw.body, uncompressed_size)?;
                // dictionary values are PLAIN regardless of the declared encoding
                let values =
                    decode_plain(&buffer, header.num_values as usize, self.physical_type)?;
                Ok(Page::Dict(DictPage { values }))
            }
            PageType::DataPage => {
                let header = raw
                    .header
                    .data_page_header
                    .ok_or_else(|| Error::oos("DATA_PAGE without a data page header"))?;
                let buffer = self.decompress_body(raw.body, uncompressed_size)?;
                Ok(Page::Data(DataPage {
                    header: DataPageHeader::V1(header),
                    buffer,
                }))
            }
            PageType::DataPageV2 => {
                let header = raw
                    .header
                    .data_page_header_v2
                    .ok_or_else(|| Error::oos("DATA_PAGE_V2 without a v2 header"))?;
                let levels_len = (header.repetition_levels_byte_length
                    + header.definition_levels_byte_length)
                    as usize;
                if levels_len > raw.body.len() {
                    return Err(Error::LevelsByteLengthMismatch {
                        declared: levels_len,
                        consumed: raw.body.len(),
                    });
                }
                // level sections are never compressed; `is_compressed`
                // guards only the values region and defaults to true
                let compressed = header.is_compressed.unwrap_or(true);
                let buffer = if compressed && self.compression != Compression::Uncompressed {
                    let mut buffer = raw.body[..levels_len].to_vec();
                    buffer.extend(self.decompressors.decompress(
                        self.compression,
                        &raw.body[levels_len..],
                        uncompressed_size - levels_len,
                    )?);
                    buffer
                } else {
                    raw.body.to_vec()
                };
                Ok(Page::Data(DataPage {
                    header: DataPageHeader::V2(header),
                    buffer,
                }))
            }
            PageType::IndexPage => Err(Error::InternalInvariant(
                "index pages are filtered by next_raw".to_string(),
            )),
        }
    }

    fn decompress_body(&self, body: &[u8], uncompressed_size: usize) -> Result<Vec<u8>> {
        if self.compression == Compression::Uncompressed {
            Ok(body.to_vec())
        } else {
            self.decompressors
                .decompress(self.compression, body, uncompressed_size)
        }
    }
}

impl<'a> Iterator for PageReader<'a> {
    type Item = Result<Page>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_raw() {
            Err(e) => Some(Err(e)),
            Ok(None) => None,
            Ok(Some(raw)) => Some(self.decode(raw)),
        }
    }
}
