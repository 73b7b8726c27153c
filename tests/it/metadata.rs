use std::io::Cursor;

use parquet_fetch::error::Error;
use parquet_fetch::read::{deserialize_metadata, read_metadata};
use parquet_fetch::schema::types::{ParquetType, PhysicalType, PrimitiveConvertedType};
use parquet_fetch::{Compression, Encoding};

use super::fixtures::*;

fn sample_file() -> Vec<u8> {
    let schema = vec![
        schema_element("schema", None, None, Some(2), None),
        schema_element("id", Some(2), Some(0), None, None),
        schema_element("name", Some(6), Some(1), None, Some(0)),
    ];
    let id_page = data_page_v1(
        3,
        Encoding::Plain,
        None,
        None,
        plain_i64s(&[10, 20, 30]),
    );
    let name_page = data_page_v1(
        3,
        Encoding::Plain,
        None,
        Some(levels_v1(&[1, 0, 1], 1)),
        plain_byte_arrays(&[b"ada", b"eve"]),
    );
    build_file(
        schema,
        vec![(
            3,
            vec![
                ChunkSpec::new(&["id"], 2, vec![id_page], 3),
                ChunkSpec::new(&["name"], 6, vec![name_page], 3),
            ],
        )],
    )
}

#[test]
fn parses_schema_and_row_groups() {
    let file = sample_file();
    let metadata = deserialize_metadata(&file).unwrap();

    assert_eq!(metadata.version, 1);
    assert_eq!(metadata.num_rows, 3);
    assert_eq!(
        metadata.created_by.as_deref(),
        Some("parquet-fetch fixtures")
    );
    assert_eq!(metadata.row_groups.len(), 1);

    let columns = metadata.schema().columns();
    assert_eq!(columns.len(), 2);

    let id = &columns[0];
    assert_eq!(id.path(), &["id".to_string()]);
    assert_eq!(id.max_def_level(), 0);
    assert_eq!(id.max_rep_level(), 0);
    assert!(id.is_required());

    let name = &columns[1];
    assert_eq!(name.max_def_level(), 1);
    assert_eq!(name.max_rep_level(), 0);
    match name.type_() {
        ParquetType::PrimitiveType {
            physical_type,
            converted_type,
            ..
        } => {
            assert_eq!(physical_type, &PhysicalType::ByteArray);
            assert_eq!(converted_type, &Some(PrimitiveConvertedType::Utf8));
        }
        _ => panic!("name must be primitive"),
    }

    let group = &metadata.row_groups[0];
    assert_eq!(group.num_rows(), 3);
    let chunk = &group.columns()[0];
    assert_eq!(chunk.compression(), Compression::Uncompressed);
    assert_eq!(chunk.num_values(), 3);
    assert!(chunk.encodings().contains(&Encoding::RleDictionary));
}

#[test]
fn seekable_reader_matches_full_buffer() {
    let file = sample_file();
    let from_buffer = deserialize_metadata(&file).unwrap();
    let from_reader = read_metadata(&mut Cursor::new(&file)).unwrap();
    assert_eq!(from_buffer, from_reader);
}

#[test]
fn typed_model_survives_a_roundtrip() {
    let file = sample_file();
    let metadata = deserialize_metadata(&file).unwrap();

    let mut writer = parquet_fetch::thrift::CompactWriter::new();
    metadata.clone().into_thrift().write_to(&mut writer);
    let bytes = writer.into_inner();

    let reread = parquet_fetch::format::FileMetaData::read_from(
        &mut parquet_fetch::thrift::CompactReader::new(&bytes),
    )
    .unwrap();
    let reread =
        parquet_fetch::metadata::FileMetaData::try_from_thrift(reread, bytes.len()).unwrap();

    assert_eq!(reread.num_rows, metadata.num_rows);
    assert_eq!(reread.version, metadata.version);
    assert_eq!(reread.created_by, metadata.created_by);
    assert_eq!(reread.schema_descr, metadata.schema_descr);
    assert_eq!(reread.row_groups, metadata.row_groups);
}

#[test]
fn rejects_missing_trailing_magic() {
    let mut file = sample_file();
    let len = file.len();
    file[len - 1] = b'X';
    assert_eq!(deserialize_metadata(&file).unwrap_err(), Error::InvalidMagic);
}

#[test]
fn rejects_oversized_metadata_length() {
    let mut file = sample_file();
    let len = file.len();
    file[len - 8..len - 4].copy_from_slice(&(len as u32).to_le_bytes());
    assert!(matches!(
        deserialize_metadata(&file).unwrap_err(),
        Error::InvalidMetadataLength(_)
    ));
}

#[test]
fn metadata_length_is_little_endian() {
    let file = sample_file();
    let len = file.len();
    let declared =
        u32::from_le_bytes(file[len - 8..len - 4].try_into().unwrap()) as usize;
    // the declared length covers exactly the thrift region
    let metadata = deserialize_metadata(&file).unwrap();
    assert_eq!(metadata.metadata_len, declared);
}
