//! Typed views of the Thrift structures in a parquet footer and in page
//! headers. Fields hold the raw integer codes of the wire format; the bridge
//! to rust enums happens in [`crate::metadata`] and [`crate::page`].
//!
//! Each struct decodes itself from a [`CompactReader`] by field id, skipping
//! everything it does not know, and can serialize itself back through a
//! [`CompactWriter`] so that metadata survives a semantic round-trip.
use crate::error::{Error, Result};
use crate::thrift::{CompactReader, CompactType, CompactWriter};

fn missing(strukt: &str, field: &str) -> Error {
    Error::ThriftDecode(format!("{}: missing required field {}", strukt, field))
}

fn read_i32_list(reader: &mut CompactReader) -> Result<Vec<i32>> {
    let (_, count) = reader.read_list_header()?;
    (0..count).map(|_| reader.read_zigzag_i32()).collect()
}

fn read_string_list(reader: &mut CompactReader) -> Result<Vec<String>> {
    let (_, count) = reader.read_list_header()?;
    (0..count).map(|_| reader.read_string()).collect()
}

fn read_struct_list<T, F: Fn(&mut CompactReader) -> Result<T>>(
    reader: &mut CompactReader,
    read: F,
) -> Result<Vec<T>> {
    let (_, count) = reader.read_list_header()?;
    (0..count).map(|_| read(reader)).collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct SchemaElement {
    pub type_: Option<i32>,
    pub type_length: Option<i32>,
    pub repetition_type: Option<i32>,
    pub name: String,
    pub num_children: Option<i32>,
    pub converted_type: Option<i32>,
    pub scale: Option<i32>,
    pub precision: Option<i32>,
    pub field_id: Option<i32>,
}

impl SchemaElement {
    pub fn read_from(reader: &mut CompactReader) -> Result<Self> {
        let mut type_ = None;
        let mut type_length = None;
        let mut repetition_type = None;
        let mut name = None;
        let mut num_children = None;
        let mut converted_type = None;
        let mut scale = None;
        let mut precision = None;
        let mut field_id = None;

        let mut last_fid = 0i16;
        while let Some((field_type, fid)) = reader.read_field_header(&mut last_fid)? {
            match fid {
                1 => type_ = Some(reader.read_zigzag_i32()?),
                2 => type_length = Some(reader.read_zigzag_i32()?),
                3 => repetition_type = Some(reader.read_zigzag_i32()?),
                4 => name = Some(reader.read_string()?),
                5 => num_children = Some(reader.read_zigzag_i32()?),
                6 => converted_type = Some(reader.read_zigzag_i32()?),
                7 => scale = Some(reader.read_zigzag_i32()?),
                8 => precision = Some(reader.read_zigzag_i32()?),
                9 => field_id = Some(reader.read_zigzag_i32()?),
                _ => reader.skip(field_type)?,
            }
        }

        Ok(Self {
            type_,
            type_length,
            repetition_type,
            name: name.ok_or_else(|| missing("SchemaElement", "name"))?,
            num_children,
            converted_type,
            scale,
            precision,
            field_id,
        })
    }

    pub fn write_to(&self, writer: &mut CompactWriter) {
        let mut fid = 0i16;
        if let Some(type_) = self.type_ {
            writer.write_i32_field(1, type_, &mut fid);
        }
        if let Some(length) = self.type_length {
            writer.write_i32_field(2, length, &mut fid);
        }
        if let Some(repetition) = self.repetition_type {
            writer.write_i32_field(3, repetition, &mut fid);
        }
        writer.write_string_field(4, &self.name, &mut fid);
        if let Some(children) = self.num_children {
            writer.write_i32_field(5, children, &mut fid);
        }
        if let Some(converted) = self.converted_type {
            writer.write_i32_field(6, converted, &mut fid);
        }
        if let Some(scale) = self.scale {
            writer.write_i32_field(7, scale, &mut fid);
        }
        if let Some(precision) = self.precision {
            writer.write_i32_field(8, precision, &mut fid);
        }
        if let Some(id) = self.field_id {
            writer.write_i32_field(9, id, &mut fid);
        }
        writer.write_stop();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyValue {
    pub key: String,
    pub value: Option<String>,
}

impl KeyValue {
    pub fn read_from(reader: &mut CompactReader) -> Result<Self> {
        let mut key = None;
        let mut value = None;
        let mut last_fid = 0i16;
        while let Some((field_type, fid)) = reader.read_field_header(&mut last_fid)? {
            match fid {
                1 => key = Some(reader.read_string()?),
                2 => value = Some(reader.read_string()?),
                _ => reader.skip(field_type)?,
            }
        }
        Ok(Self {
            key: key.ok_or_else(|| missing("KeyValue", "key"))?,
            value,
        })
    }

    pub fn write_to(&self, writer: &mut CompactWriter) {
        let mut fid = 0i16;
        writer.write_string_field(1, &self.key, &mut fid);
        if let Some(value) = &self.value {
            writer.write_string_field(2, value, &mut fid);
        }
        writer.write_stop();
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statistics {
    pub max: Option<Vec<u8>>,
    pub min: Option<Vec<u8>>,
    pub null_count: Option<i64>,
    pub distinct_count: Option<i64>,
    pub max_value: Option<Vec<u8>>,
    pub min_value: Option<Vec<u8>>,
}

impl Statistics {
    pub fn read_from(reader: &mut CompactReader) -> Result<Self> {
        let mut statistics = Self::default();
        let mut last_fid = 0i16;
        while let Some((field_type, fid)) = reader.read_field_header(&mut last_fid)? {
            match fid {
                1 => statistics.max = Some(reader.read_binary()?.to_vec()),
                2 => statistics.min = Some(reader.read_binary()?.to_vec()),
                3 => statistics.null_count = Some(reader.read_zigzag_i64()?),
                4 => statistics.distinct_count = Some(reader.read_zigzag_i64()?),
                5 => statistics.max_value = Some(reader.read_binary()?.to_vec()),
                6 => statistics.min_value = Some(reader.read_binary()?.to_vec()),
                _ => reader.skip(field_type)?,
            }
        }
        Ok(statistics)
    }

    pub fn write_to(&self, writer: &mut CompactWriter) {
        let mut fid = 0i16;
        if let Some(max) = &self.max {
            writer.write_binary_field(1, max, &mut fid);
        }
        if let Some(min) = &self.min {
            writer.write_binary_field(2, min, &mut fid);
        }
        if let Some(null_count) = self.null_count {
            writer.write_i64_field(3, null_count, &mut fid);
        }
        if let Some(distinct_count) = self.distinct_count {
            writer.write_i64_field(4, distinct_count, &mut fid);
        }
        if let Some(max_value) = &self.max_value {
            writer.write_binary_field(5, max_value, &mut fid);
        }
        if let Some(min_value) = &self.min_value {
            writer.write_binary_field(6, min_value, &mut fid);
        }
        writer.write_stop();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SortingColumn {
    pub column_idx: i32,
    pub descending: bool,
    pub nulls_first: bool,
}

impl SortingColumn {
    pub fn read_from(reader: &mut CompactReader) -> Result<Self> {
        let mut column_idx = None;
        let mut descending = None;
        let mut nulls_first = None;
        let mut last_fid = 0i16;
        while let Some((field_type, fid)) = reader.read_field_header(&mut last_fid)? {
            match (fid, field_type) {
                (1, _) => column_idx = Some(reader.read_zigzag_i32()?),
                (2, CompactType::BooleanTrue) => descending = Some(true),
                (2, CompactType::BooleanFalse) => descending = Some(false),
                (3, CompactType::BooleanTrue) => nulls_first = Some(true),
                (3, CompactType::BooleanFalse) => nulls_first = Some(false),
                _ => reader.skip(field_type)?,
            }
        }
        Ok(Self {
            column_idx: column_idx.ok_or_else(|| missing("SortingColumn", "column_idx"))?,
            descending: descending.ok_or_else(|| missing("SortingColumn", "descending"))?,
            nulls_first: nulls_first.ok_or_else(|| missing("SortingColumn", "nulls_first"))?,
        })
    }

    pub fn write_to(&self, writer: &mut CompactWriter) {
        let mut fid = 0i16;
        writer.write_i32_field(1, self.column_idx, &mut fid);
        writer.write_bool_field(2, self.descending, &mut fid);
        writer.write_bool_field(3, self.nulls_first, &mut fid);
        writer.write_stop();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageEncodingStats {
    pub page_type: i32,
    pub encoding: i32,
    pub count: i32,
}

impl PageEncodingStats {
    pub fn read_from(reader: &mut CompactReader) -> Result<Self> {
        let mut page_type = None;
        let mut encoding = None;
        let mut count = None;
        let mut last_fid = 0i16;
        while let Some((field_type, fid)) = reader.read_field_header(&mut last_fid)? {
            match fid {
                1 => page_type = Some(reader.read_zigzag_i32()?),
                2 => encoding = Some(reader.read_zigzag_i32()?),
                3 => count = Some(reader.read_zigzag_i32()?),
                _ => reader.skip(field_type)?,
            }
        }
        Ok(Self {
            page_type: page_type.ok_or_else(|| missing("PageEncodingStats", "page_type"))?,
            encoding: encoding.ok_or_else(|| missing("PageEncodingStats", "encoding"))?,
            count: count.ok_or_else(|| missing("PageEncodingStats", "count"))?,
        })
    }

    pub fn write_to(&self, writer: &mut CompactWriter) {
        let mut fid = 0i16;
        writer.write_i32_field(1, self.page_type, &mut fid);
        writer.write_i32_field(2, self.encoding, &mut fid);
        writer.write_i32_field(3, self.count, &mut fid);
        writer.write_stop();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMetaData {
    pub type_: i32,
    pub encodings: Vec<i32>,
    pub path_in_schema: Vec<String>,
    pub codec: i32,
    pub num_values: i64,
    pub total_uncompressed_size: i64,
    pub total_compressed_size: i64,
    pub key_value_metadata: Option<Vec<KeyValue>>,
    pub data_page_offset: i64,
    pub index_page_offset: Option<i64>,
    pub dictionary_page_offset: Option<i64>,
    pub statistics: Option<Statistics>,
    pub encoding_stats: Option<Vec<PageEncodingStats>>,
}

impl ColumnMetaData {
    pub fn read_from(reader: &mut CompactReader) -> Result<Self> {
        let mut type_ = None;
        let mut encodings = None;
        let mut path_in_schema = None;
        let mut codec = None;
        let mut num_values = None;
        let mut total_uncompressed_size = None;
        let mut total_compressed_size = None;
        let mut key_value_metadata = None;
        let mut data_page_offset = None;
        let mut index_page_offset = None;
        let mut dictionary_page_offset = None;
        let mut statistics = None;
        let mut encoding_stats = None;

        let mut last_fid = 0i16;
        while let Some((field_type, fid)) = reader.read_field_header(&mut last_fid)? {
            match fid {
                1 => type_ = Some(reader.read_zigzag_i32()?),
                2 => encodings = Some(read_i32_list(reader)?),
                3 => path_in_schema = Some(read_string_list(reader)?),
                4 => codec = Some(reader.read_zigzag_i32()?),
                5 => num_values = Some(reader.read_zigzag_i64()?),
                6 => total_uncompressed_size = Some(reader.read_zigzag_i64()?),
                7 => total_compressed_size = Some(reader.read_zigzag_i64()?),
                8 => key_value_metadata = Some(read_struct_list(reader, KeyValue::read_from)?),
                9 => data_page_offset = Some(reader.read_zigzag_i64()?),
                10 => index_page_offset = Some(reader.read_zigzag_i64()?),
                11 => dictionary_page_offset = Some(reader.read_zigzag_i64()?),
                12 => statistics = Some(Statistics::read_from(reader)?),
                13 => {
                    encoding_stats =
                        Some(read_struct_list(reader, PageEncodingStats::read_from)?)
                }
                _ => reader.skip(field_type)?,
            }
        }

        Ok(Self {
            type_: type_.ok_or_else(|| missing("ColumnMetaData", "type"))?,
            encodings: encodings.ok_or_else(|| missing("ColumnMetaData", "encodings"))?,
            path_in_schema: path_in_schema
                .ok_or_else(|| missing("ColumnMetaData", "path_in_schema"))?,
            codec: codec.ok_or_else(|| missing("ColumnMetaData", "codec"))?,
            num_values: num_values.ok_or_else(|| missing("ColumnMetaData", "num_values"))?,
            total_uncompressed_size: total_uncompressed_size
                .ok_or_else(|| missing("ColumnMetaData", "total_uncompressed_size"))?,
            total_compressed_size: total_compressed_size
                .ok_or_else(|| missing("ColumnMetaData", "total_compressed_size"))?,
            key_value_metadata,
            data_page_offset: data_page_offset
                .ok_or_else(|| missing("ColumnMetaData", "data_page_offset"))?,
            index_page_offset,
            dictionary_page_offset,
            statistics,
            encoding_stats,
        })
    }

    pub fn write_to(&self, writer: &mut CompactWriter) {
        let mut fid = 0i16;
        writer.write_i32_field(1, self.type_, &mut fid);
        writer.write_field_header(CompactType::List, 2, &mut fid);
        writer.write_list_header(CompactType::I32, self.encodings.len());
        for encoding in &self.encodings {
            writer.write_zigzag_i64(*encoding as i64);
        }
        writer.write_field_header(CompactType::List, 3, &mut fid);
        writer.write_list_header(CompactType::Binary, self.path_in_schema.len());
        for part in &self.path_in_schema {
            writer.write_binary(part.as_bytes());
        }
        writer.write_i32_field(4, self.codec, &mut fid);
        writer.write_i64_field(5, self.num_values, &mut fid);
        writer.write_i64_field(6, self.total_uncompressed_size, &mut fid);
        writer.write_i64_field(7, self.total_compressed_size, &mut fid);
        if let Some(key_values) = &self.key_value_metadata {
            writer.write_field_header(CompactType::List, 8, &mut fid);
            writer.write_list_header(CompactType::Struct, key_values.len());
            for key_value in key_values {
                key_value.write_to(writer);
            }
        }
        writer.write_i64_field(9, self.data_page_offset, &mut fid);
        if let Some(offset) = self.index_page_offset {
            writer.write_i64_field(10, offset, &mut fid);
        }
        if let Some(offset) = self.dictionary_page_offset {
            writer.write_i64_field(11, offset, &mut fid);
        }
        if let Some(statistics) = &self.statistics {
            writer.write_field_header(CompactType::Struct, 12, &mut fid);
            statistics.write_to(writer);
        }
        if let Some(stats) = &self.encoding_stats {
            writer.write_field_header(CompactType::List, 13, &mut fid);
            writer.write_list_header(CompactType::Struct, stats.len());
            for stat in stats {
                stat.write_to(writer);
            }
        }
        writer.write_stop();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnChunk {
    pub file_path: Option<String>,
    pub file_offset: i64,
    pub meta_data: Option<ColumnMetaData>,
}

impl ColumnChunk {
    pub fn read_from(reader: &mut CompactReader) -> Result<Self> {
        let mut file_path = None;
        let mut file_offset = None;
        let mut meta_data = None;
        let mut last_fid = 0i16;
        while let Some((field_type, fid)) = reader.read_field_header(&mut last_fid)? {
            match fid {
                1 => file_path = Some(reader.read_string()?),
                2 => file_offset = Some(reader.read_zigzag_i64()?),
                3 => meta_data = Some(ColumnMetaData::read_from(reader)?),
                _ => reader.skip(field_type)?,
            }
        }
        Ok(Self {
            file_path,
            file_offset: file_offset.ok_or_else(|| missing("ColumnChunk", "file_offset"))?,
            meta_data,
        })
    }

    pub fn write_to(&self, writer: &mut CompactWriter) {
        let mut fid = 0i16;
        if let Some(path) = &self.file_path {
            writer.write_string_field(1, path, &mut fid);
        }
        writer.write_i64_field(2, self.file_offset, &mut fid);
        if let Some(meta) = &self.meta_data {
            writer.write_field_header(CompactType::Struct, 3, &mut fid);
            meta.write_to(writer);
        }
        writer.write_stop();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowGroup {
    pub columns: Vec<ColumnChunk>,
    pub total_byte_size: i64,
    pub num_rows: i64,
    pub sorting_columns: Option<Vec<SortingColumn>>,
}

impl RowGroup {
    pub fn read_from(reader: &mut CompactReader) -> Result<Self> {
        let mut columns = None;
        let mut total_byte_size = None;
        let mut num_rows = None;
        let mut sorting_columns = None;
        let mut last_fid = 0i16;
        while let Some((field_type, fid)) = reader.read_field_header(&mut last_fid)? {
            match fid {
                1 => columns = Some(read_struct_list(reader, ColumnChunk::read_from)?),
                2 => total_byte_size = Some(reader.read_zigzag_i64()?),
                3 => num_rows = Some(reader.read_zigzag_i64()?),
                4 => sorting_columns = Some(read_struct_list(reader, SortingColumn::read_from)?),
                _ => reader.skip(field_type)?,
            }
        }
        Ok(Self {
            columns: columns.ok_or_else(|| missing("RowGroup", "columns"))?,
            total_byte_size: total_byte_size
                .ok_or_else(|| missing("RowGroup", "total_byte_size"))?,
            num_rows: num_rows.ok_or_else(|| missing("RowGroup", "num_rows"))?,
            sorting_columns,
        })
    }

    pub fn write_to(&self, writer: &mut CompactWriter) {
        let mut fid = 0i16;
        writer.write_field_header(CompactType::List, 1, &mut fid);
        writer.write_list_header(CompactType::Struct, self.columns.len());
        for column in &self.columns {
            column.write_to(writer);
        }
        writer.write_i64_field(2, self.total_byte_size, &mut fid);
        writer.write_i64_field(3, self.num_rows, &mut fid);
        if let Some(sorting) = &self.sorting_columns {
            writer.write_field_header(CompactType::List, 4, &mut fid);
            writer.write_list_header(CompactType::Struct, sorting.len());
            for column in sorting {
                column.write_to(writer);
            }
        }
        writer.write_stop();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileMetaData {
    pub version: i32,
    pub schema: Vec<SchemaElement>,
    pub num_rows: i64,
    pub row_groups: Vec<RowGroup>,
    pub key_value_metadata: Option<Vec<KeyValue>>,
    pub created_by: Option<String>,
}

impl FileMetaData {
    pub fn read_from(reader: &mut CompactReader) -> Result<Self> {
        let mut version = None;
        let mut schema = None;
        let mut num_rows = None;
        let mut row_groups = None;
        let mut key_value_metadata = None;
        let mut created_by = None;

        let mut last_fid = 0i16;
        while let Some((field_type, fid)) = reader.read_field_header(&mut last_fid)? {
            match fid {
                1 => version = Some(reader.read_zigzag_i32()?),
                2 => schema = Some(read_struct_list(reader, SchemaElement::read_from)?),
                3 => num_rows = Some(reader.read_zigzag_i64()?),
                4 => row_groups = Some(read_struct_list(reader, RowGroup::read_from)?),
                5 => key_value_metadata = Some(read_struct_list(reader, KeyValue::read_from)?),
                6 => created_by = Some(reader.read_string()?),
                _ => reader.skip(field_type)?,
            }
        }

        Ok(Self {
            version: version.ok_or_else(|| missing("FileMetaData", "version"))?,
            schema: schema.ok_or_else(|| missing("FileMetaData", "schema"))?,
            num_rows: num_rows.ok_or_else(|| missing("FileMetaData", "num_rows"))?,
            row_groups: row_groups.ok_or_else(|| missing("FileMetaData", "row_groups"))?,
            key_value_metadata,
            created_by,
        })
    }

    pub fn write_to(&self, writer: &mut CompactWriter) {
        let mut fid = 0i16;
        writer.write_i32_field(1, self.version, &mut fid);
        writer.write_field_header(CompactType::List, 2, &mut fid);
        writer.write_list_header(CompactType::Struct, self.schema.len());
        for element in &self.schema {
            element.write_to(writer);
        }
        writer.write_i64_field(3, self.num_rows, &mut fid);
        writer.write_field_header(CompactType::List, 4, &mut fid);
        writer.write_list_header(CompactType::Struct, self.row_groups.len());
        for row_group in &self.row_groups {
            row_group.write_to(writer);
        }
        if let Some(key_values) = &self.key_value_metadata {
            writer.write_field_header(CompactType::List, 5, &mut fid);
            writer.write_list_header(CompactType::Struct, key_values.len());
            for key_value in key_values {
                key_value.write_to(writer);
            }
        }
        if let Some(created_by) = &self.created_by {
            writer.write_string_field(6, created_by, &mut fid);
        }
        writer.write_stop();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataPageHeaderV1 {
    pub num_values: i32,
    pub encoding: i32,
    pub definition_level_encoding: i32,
    pub repetition_level_encoding: i32,
    pub statistics: Option<Statistics>,
}

impl DataPageHeaderV1 {
    pub fn read_from(reader: &mut CompactReader) -> Result<Self> {
        let mut num_values = None;
        let mut encoding = None;
        let mut definition_level_encoding = None;
        let mut repetition_level_encoding = None;
        let mut statistics = None;
        let mut last_fid = 0i16;
        while let Some((field_type, fid)) = reader.read_field_header(&mut last_fid)? {
            match fid {
                1 => num_values = Some(reader.read_zigzag_i32()?),
                2 => encoding = Some(reader.read_zigzag_i32()?),
                3 => definition_level_encoding = Some(reader.read_zigzag_i32()?),
                4 => repetition_level_encoding = Some(reader.read_zigzag_i32()?),
                5 => statistics = Some(Statistics::read_from(reader)?),
                _ => reader.skip(field_type)?,
            }
        }
        Ok(Self {
            num_values: num_values.ok_or_else(|| missing("DataPageHeader", "num_values"))?,
            encoding: encoding.ok_or_else(|| missing("DataPageHeader", "encoding"))?,
            definition_level_encoding: definition_level_encoding
                .ok_or_else(|| missing("DataPageHeader", "definition_level_encoding"))?,
            repetition_level_encoding: repetition_level_encoding
                .ok_or_else(|| missing("DataPageHeader", "repetition_level_encoding"))?,
            statistics,
        })
    }

    pub fn write_to(&self, writer: &mut CompactWriter) {
        let mut fid = 0i16;
        writer.write_i32_field(1, self.num_values, &mut fid);
        writer.write_i32_field(2, self.encoding, &mut fid);
        writer.write_i32_field(3, self.definition_level_encoding, &mut fid);
        writer.write_i32_field(4, self.repetition_level_encoding, &mut fid);
        if let Some(statistics) = &self.statistics {
            writer.write_field_header(CompactType::Struct, 5, &mut fid);
            statistics.write_to(writer);
        }
        writer.write_stop();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DictionaryPageHeader {
    pub num_values: i32,
    pub encoding: i32,
    pub is_sorted: Option<bool>,
}

impl DictionaryPageHeader {
    pub fn read_from(reader: &mut CompactReader) -> Result<Self> {
        let mut num_values = None;
        let mut encoding = None;
        let mut is_sorted = None;
        let mut last_fid = 0i16;
        while let Some((field_type, fid)) = reader.read_field_header(&mut last_fid)? {
            match (fid, field_type) {
                (1, _) => num_values = Some(reader.read_zigzag_i32()?),
                (2, _) => encoding = Some(reader.read_zigzag_i32()?),
                (3, CompactType::BooleanTrue) => is_sorted = Some(true),
                (3, CompactType::BooleanFalse) => is_sorted = Some(false),
                _ => reader.skip(field_type)?,
            }
        }
        Ok(Self {
            num_values: num_values
                .ok_or_else(|| missing("DictionaryPageHeader", "num_values"))?,
            encoding: encoding.ok_or_else(|| missing("DictionaryPageHeader", "encoding"))?,
            is_sorted,
        })
    }

    pub fn write_to(&self, writer: &mut CompactWriter) {
        let mut fid = 0i16;
        writer.write_i32_field(1, self.num_values, &mut fid);
        writer.write_i32_field(2, self.encoding, &mut fid);
        if let Some(is_sorted) = self.is_sorted {
            writer.write_bool_field(3, is_sorted, &mut fid);
        }
        writer.write_stop();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataPageHeaderV2 {
    pub num_values: i32,
    pub num_nulls: i32,
    pub num_rows: i32,
    pub encoding: i32,
    pub definition_levels_byte_length: i32,
    pub repetition_levels_byte_length: i32,
    /// Whether the values section (only) is compressed. Missing means true.
    pub is_compressed: Option<bool>,
    pub statistics: Option<Statistics>,
}

impl DataPageHeaderV2 {
    pub fn read_from(reader: &mut CompactReader) -> Result<Self> {
        let mut num_values = None;
        let mut num_nulls = None;
        let mut num_rows = None;
        let mut encoding = None;
        let mut definition_levels_byte_length = None;
        let mut repetition_levels_byte_length = None;
        let mut is_compressed = None;
        let mut statistics = None;
        let mut last_fid = 0i16;
        while let Some((field_type, fid)) = reader.read_field_header(&mut last_fid)? {
            match (fid, field_type) {
                (1, _) => num_values = Some(reader.read_zigzag_i32()?),
                (2, _) => num_nulls = Some(reader.read_zigzag_i32()?),
                (3, _) => num_rows = Some(reader.read_zigzag_i32()?),
                (4, _) => encoding = Some(reader.read_zigzag_i32()?),
                (5, _) => definition_levels_byte_length = Some(reader.read_zigzag_i32()?),
                (6, _) => repetition_levels_byte_length = Some(reader.read_zigzag_i32()?),
                (7, CompactType::BooleanTrue) => is_compressed = Some(true),
                (7, CompactType::BooleanFalse) => is_compressed = Some(false),
                (8, _) => statistics = Some(Statistics::read_from(reader)?),
                _ => reader.skip(field_type)?,
            }
        }
        Ok(Self {
            num_values: num_values.ok_or_else(|| missing("DataPageHeaderV2", "num_values"))?,
            num_nulls: num_nulls.ok_or_else(|| missing("DataPageHeaderV2", "num_nulls"))?,
            num_rows: num_rows.ok_or_else(|| missing("DataPageHeaderV2", "num_rows"))?,
            encoding: encoding.ok_or_else(|| missing("DataPageHeaderV2", "encoding"))?,
            definition_levels_byte_length: definition_levels_byte_length
                .ok_or_else(|| missing("DataPageHeaderV2", "definition_levels_byte_length"))?,
            repetition_levels_byte_length: repetition_levels_byte_length
                .ok_or_else(|| missing("DataPageHeaderV2", "repetition_levels_byte_length"))?,
            is_compressed,
            statistics,
        })
    }

    pub fn write_to(&self, writer: &mut CompactWriter) {
        let mut fid = 0i16;
        writer.write_i32_field(1, self.num_values, &mut fid);
        writer.write_i32_field(2, self.num_nulls, &mut fid);
        writer.write_i32_field(3, self.num_rows, &mut fid);
        writer.write_i32_field(4, self.encoding, &mut fid);
        writer.write_i32_field(5, self.definition_levels_byte_length, &mut fid);
        writer.write_i32_field(6, self.repetition_levels_byte_length, &mut fid);
        if let Some(is_compressed) = self.is_compressed {
            writer.write_bool_field(7, is_compressed, &mut fid);
        }
        if let Some(statistics) = &self.statistics {
            writer.write_field_header(CompactType::Struct, 8, &mut fid);
            statistics.write_to(writer);
        }
        writer.write_stop();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageHeader {
    pub type_: i32,
    pub uncompressed_page_size: i32,
    pub compressed_page_size: i32,
    pub crc: Option<i32>,
    pub data_page_header: Option<DataPageHeaderV1>,
    pub dictionary_page_header: Option<DictionaryPageHeader>,
    pub data_page_header_v2: Option<DataPageHeaderV2>,
}

impl PageHeader {
    pub fn read_from(reader: &mut CompactReader) -> Result<Self> {
        let mut type_ = None;
        let mut uncompressed_page_size = None;
        let mut compressed_page_size = None;
        let mut crc = None;
        let mut data_page_header = None;
        let mut dictionary_page_header = None;
        let mut data_page_header_v2 = None;
        let mut last_fid = 0i16;
        while let Some((field_type, fid)) = reader.read_field_header(&mut last_fid)? {
            match fid {
                1 => type_ = Some(reader.read_zigzag_i32()?),
                2 => uncompressed_page_size = Some(reader.read_zigzag_i32()?),
                3 => compressed_page_size = Some(reader.read_zigzag_i32()?),
                4 => crc = Some(reader.read_zigzag_i32()?),
                5 => data_page_header = Some(DataPageHeaderV1::read_from(reader)?),
                7 => dictionary_page_header = Some(DictionaryPageHeader::read_from(reader)?),
                8 => data_page_header_v2 = Some(DataPageHeaderV2::read_from(reader)?),
                _ => reader.skip(field_type)?,
            }
        }
        Ok(Self {
            type_: type_.ok_or_else(|| missing("PageHeader", "type"))?,
            uncompressed_page_size: uncompressed_page_size
                .ok_or_else(|| missing("PageHeader", "uncompressed_page_size"))?,
            compressed_page_size: compressed_page_size
                .ok_or_else(|| missing("PageHeader", "compressed_page_size"))?,
            crc,
            data_page_header,
            dictionary_page_header,
            data_page_header_v2,
        })
    }

    pub fn write_to(&self, writer: &mut CompactWriter) {
        let mut fid = 0i16;
        writer.write_i32_field(1, self.type_, &mut fid);
        writer.write_i32_field(2, self.uncompressed_page_size, &mut fid);
        writer.write_i32_field(3, self.compressed_page_size, &mut fid);
        if let Some(crc) = self.crc {
            writer.write_i32_field(4, crc, &mut fid);
        }
        if let Some(header) = &self.data_page_header {
            writer.write_field_header(CompactType::Struct, 5, &mut fid);
            header.write_to(writer);
        }
        if let Some(header) = &self.dictionary_page_header {
            writer.write_field_header(CompactType::Struct, 7, &mut fid);
            header.write_to(writer);
        }
        if let Some(header) = &self.data_page_header_v2 {
            writer.write_field_header(CompactType::Struct, 8, &mut fid);
            header.write_to(writer);
        }
        writer.write_stop();
    }
}
