use crate::compression::Decompressors;
use crate::error::{Error, Result};
use crate::metadata::ColumnChunkMetaData;
use crate::page::{DataPage, DictPage, Page, PageType};
use crate::value::Value;

use super::assemble::assemble_nested;
use super::convert::convert_column;
use super::deserialize::decode_values;
use super::levels::decode_levels;
use super::page::PageReader;

/// Reads one column chunk: walks its pages sequentially, threads the
/// dictionary through data pages, converts values to their logical
/// representation and assembles records.
///
/// Rows are identified by the repetition levels (a record starts wherever
/// the level is zero); for non-repeated columns, pages that end before the
/// requested range are skipped without decoding.
pub struct ColumnChunkReader<'a> {
    pages: PageReader<'a>,
    column: &'a ColumnChunkMetaData,
    dict: Option<DictPage>,
}

impl<'a> ColumnChunkReader<'a> {
    /// Returns a new reader over `chunk`, the chunk's bytes starting at
    /// `min(dictionary_page_offset, data_page_offset)`.
    pub fn new(
        chunk: &'a [u8],
        column: &'a ColumnChunkMetaData,
        decompressors: &'a Decompressors,
    ) -> Self {
        Self {
            pages: PageReader::new(chunk, column, decompressors),
            column,
            dict: None,
        }
    }

    /// Reads rows `row_start..row_end` (chunk-relative) of this column.
    /// Each returned [`Value`] is one record.
    pub fn read_rows(mut self, row_start: usize, row_end: usize) -> Result<Vec<Value>> {
        if self.column.descriptor().max_rep_level() == 0 {
            self.read_flat_rows(row_start, row_end)
        } else {
            self.read_repeated_rows(row_start, row_end)
        }
    }

    /// Non-repeated columns: each slot is one row, so pages wholly before
    /// `row_start` are byte-skipped.
    fn read_flat_rows(&mut self, row_start: usize, row_end: usize) -> Result<Vec<Value>> {
        let mut rows = Vec::with_capacity(row_end.saturating_sub(row_start));
        let mut rows_seen = 0usize;

        while let Some(raw) = self.pages.next_raw()? {
            if raw.page_type()? == PageType::DictionaryPage {
                self.decode_dict(raw)?;
                continue;
            }
            let page_rows = raw.num_values().unwrap_or(0);
            if rows_seen + page_rows <= row_start {
                // wholly before the range: never decompressed
                rows_seen += page_rows;
                continue;
            }
            if rows_seen >= row_end {
                break;
            }

            let page = match self.pages.decode(raw)? {
                Page::Data(page) => page,
                Page::Dict(_) => unreachable!(),
            };
            let (_, def_levels, values) = self.decode_page(&page)?;

            // fold nulls in: one slot per row
            let mut slots = Vec::with_capacity(page_rows);
            let max_def = self.column.descriptor().max_def_level() as u32;
            let mut values = values.into_iter();
            if def_levels.is_empty() {
                slots.extend(values);
            } else {
                for def in def_levels {
                    if def == max_def {
                        slots.push(values.next().ok_or_else(|| {
                            Error::InternalInvariant(
                                "fewer values than defined levels".to_string(),
                            )
                        })?);
                    } else {
                        slots.push(Value::Null);
                    }
                }
            }

            for (offset, slot) in slots.into_iter().enumerate() {
                let row = rows_seen + offset;
                if row >= row_start && row < row_end {
                    rows.push(slot);
                }
            }
            rows_seen += page_rows;
            if rows_seen >= row_end {
                break;
            }
        }
        Ok(rows)
    }

    /// Repeated columns: pages are decoded from the start of the chunk to
    /// keep the repetition state correct, and the assembled records are
    /// sliced to the requested range.
    fn read_repeated_rows(&mut self, row_start: usize, row_end: usize) -> Result<Vec<Value>> {
        let descriptor = self.column.descriptor();
        let max_def = descriptor.max_def_level() as u32;
        let max_rep = descriptor.max_rep_level() as u32;

        let mut all_defs = vec![];
        let mut all_reps = vec![];
        let mut all_values = vec![];
        let mut rows_started = 0usize;

        while let Some(raw) = self.pages.next_raw()? {
            // a record is complete only once the next one starts
            if rows_started > row_end {
                break;
            }
            if raw.page_type()? == PageType::DictionaryPage {
                self.decode_dict(raw)?;
                continue;
            }
            let page = match self.pages.decode(raw)? {
                Page::Data(page) => page,
                Page::Dict(_) => unreachable!(),
            };
            let (rep_levels, def_levels, values) = self.decode_page(&page)?;

            rows_started += rep_levels.iter().filter(|level| **level == 0).count();
            all_reps.extend(rep_levels);
            all_defs.extend(def_levels);
            all_values.extend(values);
        }

        // the parity rule only discriminates null from empty when some level
        // is below the maximum; fully-defined chunks take the exact
        // max_rep-based depth
        let is_nullable = all_defs.iter().any(|def| *def < max_def);
        let rows = assemble_nested(
            &all_defs,
            &all_reps,
            all_values,
            max_def,
            max_rep,
            is_nullable,
        )?;

        let end = row_end.min(rows.len());
        let start = row_start.min(end);
        Ok(rows[start..end].to_vec())
    }

    fn decode_dict(&mut self, raw: super::page::RawPage<'a>) -> Result<()> {
        match self.pages.decode(raw)? {
            Page::Dict(dict) => {
                // convert once; data pages then resolve into logical values
                let values =
                    convert_column(dict.values, self.column.descriptor().type_())?;
                self.dict = Some(DictPage { values });
                Ok(())
            }
            Page::Data(_) => unreachable!(),
        }
    }

    /// Decodes one data page into its (repetition levels, definition levels,
    /// logical values) triple.
    fn decode_page(&self, page: &DataPage) -> Result<(Vec<u32>, Vec<u32>, Vec<Value>)> {
        let descriptor = self.column.descriptor();
        let num_values = page.num_values();
        let (rep_section, def_section, values_section) = page.split_buffer(descriptor)?;

        let rep_levels = if descriptor.max_rep_level() > 0 {
            decode_levels(rep_section, descriptor.max_rep_level(), num_values)?
        } else {
            vec![]
        };
        let def_levels = if descriptor.max_def_level() > 0 {
            decode_levels(def_section, descriptor.max_def_level(), num_values)?
        } else {
            vec![]
        };

        // count of non-null values in this page
        let non_null = match page.header.num_nulls() {
            Some(nulls) => num_values.checked_sub(nulls).ok_or_else(|| {
                Error::oos("num_nulls exceeds num_values")
            })?,
            None => {
                let max_def = descriptor.max_def_level() as u32;
                if def_levels.is_empty() {
                    num_values
                } else {
                    def_levels.iter().filter(|def| **def == max_def).count()
                }
            }
        };

        let encoding = page.header.encoding()?;
        let values = decode_values(
            values_section,
            non_null,
            encoding,
            self.column.physical_type(),
            self.dict.as_ref(),
        )?;

        let values = if encoding.is_dictionary() {
            // dictionary entries were converted when the dictionary was read
            values
        } else {
            convert_column(values, descriptor.type_())?
        };

        Ok((rep_levels, def_levels, values))
    }
}
