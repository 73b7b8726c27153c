//! Builders that synthesize parquet files in memory, page by page, so the
//! reader can be exercised end to end without an external writer.
use parquet_fetch::encoding::hybrid_rle;
use parquet_fetch::format::{
    ColumnChunk, ColumnMetaData, DataPageHeaderV1, DataPageHeaderV2, DictionaryPageHeader,
    FileMetaData, PageHeader, RowGroup, SchemaElement,
};
use parquet_fetch::read::levels::get_bit_width;
use parquet_fetch::thrift::CompactWriter;
use parquet_fetch::Encoding;

pub fn schema_element(
    name: &str,
    type_: Option<i32>,
    repetition: Option<i32>,
    num_children: Option<i32>,
    converted_type: Option<i32>,
) -> SchemaElement {
    SchemaElement {
        type_,
        type_length: None,
        repetition_type: repetition,
        name: name.to_string(),
        num_children,
        converted_type,
        scale: None,
        precision: None,
        field_id: None,
    }
}

pub fn plain_i32s(values: &[i32]) -> Vec<u8> {
    values
        .iter()
        .flat_map(|value| value.to_le_bytes())
        .collect()
}

pub fn plain_i64s(values: &[i64]) -> Vec<u8> {
    values
        .iter()
        .flat_map(|value| value.to_le_bytes())
        .collect()
}

pub fn plain_byte_arrays(values: &[&[u8]]) -> Vec<u8> {
    let mut buffer = vec![];
    for value in values {
        buffer.extend_from_slice(&(value.len() as i32).to_le_bytes());
        buffer.extend_from_slice(value);
    }
    buffer
}

/// A v1 level section: little-endian i32 length prefix + hybrid stream.
pub fn levels_v1(levels: &[u32], max_level: i16) -> Vec<u8> {
    let stream = levels_v2(levels, max_level);
    let mut buffer = (stream.len() as i32).to_le_bytes().to_vec();
    buffer.extend(stream);
    buffer
}

/// A v2 level section: the bare hybrid stream.
pub fn levels_v2(levels: &[u32], max_level: i16) -> Vec<u8> {
    let mut stream = vec![];
    hybrid_rle::encode_u32(
        &mut stream,
        levels.iter().copied(),
        get_bit_width(max_level) as u8,
    )
    .unwrap();
    stream
}

/// A dictionary-index section: 1-byte bit width + bare hybrid stream.
pub fn dictionary_indices(indices: &[u32], num_bits: u8) -> Vec<u8> {
    let mut buffer = vec![num_bits];
    hybrid_rle::encode_u32(&mut buffer, indices.iter().copied(), num_bits).unwrap();
    buffer
}

fn serialize_header(header: &PageHeader) -> Vec<u8> {
    let mut writer = CompactWriter::new();
    header.write_to(&mut writer);
    writer.into_inner()
}

/// One page, header and body, as laid out in the file.
pub struct PageSpec {
    pub bytes: Vec<u8>,
    pub is_dict: bool,
}

/// A v1 data page. Level sections must already carry their length prefix.
pub fn data_page_v1(
    num_values: usize,
    encoding: Encoding,
    rep: Option<Vec<u8>>,
    def: Option<Vec<u8>>,
    values: Vec<u8>,
) -> PageSpec {
    let mut body = vec![];
    if let Some(rep) = rep {
        body.extend(rep);
    }
    if let Some(def) = def {
        body.extend(def);
    }
    body.extend(values);

    let header = PageHeader {
        type_: 0,
        uncompressed_page_size: body.len() as i32,
        compressed_page_size: body.len() as i32,
        crc: None,
        data_page_header: Some(DataPageHeaderV1 {
            num_values: num_values as i32,
            encoding: encoding.into(),
            definition_level_encoding: Encoding::Rle.into(),
            repetition_level_encoding: Encoding::Rle.into(),
            statistics: None,
        }),
        dictionary_page_header: None,
        data_page_header_v2: None,
    };

    let mut bytes = serialize_header(&header);
    bytes.extend(body);
    PageSpec {
        bytes,
        is_dict: false,
    }
}

/// Like [`data_page_v1`] but with the whole body run through `compress`,
/// for chunks that declare a codec.
pub fn data_page_v1_compressed(
    num_values: usize,
    encoding: Encoding,
    rep: Option<Vec<u8>>,
    def: Option<Vec<u8>>,
    values: Vec<u8>,
    compress: impl Fn(&[u8]) -> Vec<u8>,
) -> PageSpec {
    let mut body = vec![];
    if let Some(rep) = rep {
        body.extend(rep);
    }
    if let Some(def) = def {
        body.extend(def);
    }
    body.extend(values);
    let compressed = compress(&body);

    let header = PageHeader {
        type_: 0,
        uncompressed_page_size: body.len() as i32,
        compressed_page_size: compressed.len() as i32,
        crc: None,
        data_page_header: Some(DataPageHeaderV1 {
            num_values: num_values as i32,
            encoding: encoding.into(),
            definition_level_encoding: Encoding::Rle.into(),
            repetition_level_encoding: Encoding::Rle.into(),
            statistics: None,
        }),
        dictionary_page_header: None,
        data_page_header_v2: None,
    };

    let mut bytes = serialize_header(&header);
    bytes.extend(compressed);
    PageSpec {
        bytes,
        is_dict: false,
    }
}

/// A v2 data page. Level sections are bare hybrid streams; only the values
/// region may be compressed.
#[allow(clippy::too_many_arguments)]
pub fn data_page_v2(
    num_values: usize,
    num_nulls: usize,
    num_rows: usize,
    encoding: Encoding,
    rep: Vec<u8>,
    def: Vec<u8>,
    values: Vec<u8>,
    is_compressed: Option<bool>,
) -> PageSpec {
    let uncompressed_size = rep.len() + def.len() + values.len();
    let header = PageHeader {
        type_: 3,
        uncompressed_page_size: uncompressed_size as i32,
        compressed_page_size: uncompressed_size as i32,
        crc: None,
        data_page_header: None,
        dictionary_page_header: None,
        data_page_header_v2: Some(DataPageHeaderV2 {
            num_values: num_values as i32,
            num_nulls: num_nulls as i32,
            num_rows: num_rows as i32,
            encoding: encoding.into(),
            definition_levels_byte_length: def.len() as i32,
            repetition_levels_byte_length: rep.len() as i32,
            is_compressed,
            statistics: None,
        }),
    };

    let mut bytes = serialize_header(&header);
    bytes.extend(rep);
    bytes.extend(def);
    bytes.extend(values);
    PageSpec {
        bytes,
        is_dict: false,
    }
}

/// A dictionary page holding PLAIN-encoded values.
pub fn dict_page(num_values: usize, plain_values: Vec<u8>) -> PageSpec {
    let header = PageHeader {
        type_: 2,
        uncompressed_page_size: plain_values.len() as i32,
        compressed_page_size: plain_values.len() as i32,
        crc: None,
        data_page_header: None,
        dictionary_page_header: Some(DictionaryPageHeader {
            num_values: num_values as i32,
            encoding: Encoding::PlainDictionary.into(),
            is_sorted: Some(false),
        }),
        data_page_header_v2: None,
    };

    let mut bytes = serialize_header(&header);
    bytes.extend(plain_values);
    PageSpec {
        bytes,
        is_dict: true,
    }
}

/// One column chunk of a row group under construction.
pub struct ChunkSpec {
    pub path: Vec<String>,
    pub physical: i32,
    pub codec: i32,
    pub num_values: i64,
    pub pages: Vec<PageSpec>,
}

impl ChunkSpec {
    pub fn new(path: &[&str], physical: i32, pages: Vec<PageSpec>, num_values: i64) -> Self {
        Self {
            path: path.iter().map(|part| part.to_string()).collect(),
            physical,
            codec: 0,
            num_values,
            pages,
        }
    }

    pub fn with_codec(mut self, codec: i32) -> Self {
        self.codec = codec;
        self
    }
}

/// Lays out a complete file: header magic, row groups, thrift metadata,
/// footer length and magic.
pub fn build_file(schema: Vec<SchemaElement>, groups: Vec<(i64, Vec<ChunkSpec>)>) -> Vec<u8> {
    let mut buffer = b"PAR1".to_vec();
    let mut row_groups = vec![];
    let mut num_rows = 0;

    for (group_rows, chunks) in groups {
        num_rows += group_rows;
        let mut columns = vec![];
        let mut total_byte_size = 0;
        for chunk in chunks {
            let chunk_start = buffer.len();
            let mut dictionary_page_offset = None;
            let mut data_page_offset = None;
            for page in &chunk.pages {
                if page.is_dict {
                    dictionary_page_offset.get_or_insert(buffer.len() as i64);
                } else {
                    data_page_offset.get_or_insert(buffer.len() as i64);
                }
                buffer.extend_from_slice(&page.bytes);
            }
            let compressed_size = (buffer.len() - chunk_start) as i64;
            total_byte_size += compressed_size;

            columns.push(ColumnChunk {
                file_path: None,
                file_offset: chunk_start as i64,
                meta_data: Some(ColumnMetaData {
                    type_: chunk.physical,
                    encodings: vec![
                        Encoding::Plain.into(),
                        Encoding::Rle.into(),
                        Encoding::RleDictionary.into(),
                    ],
                    path_in_schema: chunk.path,
                    codec: chunk.codec,
                    num_values: chunk.num_values,
                    total_uncompressed_size: compressed_size,
                    total_compressed_size: compressed_size,
                    key_value_metadata: None,
                    data_page_offset: data_page_offset.expect("chunk requires a data page"),
                    index_page_offset: None,
                    dictionary_page_offset,
                    statistics: None,
                    encoding_stats: None,
                }),
            });
        }
        row_groups.push(RowGroup {
            columns,
            total_byte_size,
            num_rows: group_rows,
            sorting_columns: None,
        });
    }

    let metadata = FileMetaData {
        version: 1,
        schema,
        num_rows,
        row_groups,
        key_value_metadata: None,
        created_by: Some("parquet-fetch fixtures".to_string()),
    };

    let mut writer = CompactWriter::new();
    metadata.write_to(&mut writer);
    let metadata_bytes = writer.into_inner();

    buffer.extend_from_slice(&metadata_bytes);
    buffer.extend_from_slice(&(metadata_bytes.len() as u32).to_le_bytes());
    buffer.extend_from_slice(b"PAR1");
    buffer
}
