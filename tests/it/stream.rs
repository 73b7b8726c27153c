use std::io::Cursor;

use parquet_fetch::read::{
    deserialize_metadata, read_metadata_async, read_rows, read_rows_async,
    read_rows_async_collect, BlockingByteSource, ReadOptions,
};
use parquet_fetch::Encoding;

use super::fixtures::*;

fn sample_file() -> Vec<u8> {
    let schema = vec![
        schema_element("schema", None, None, Some(2), None),
        schema_element("id", Some(2), Some(0), None, None),
        schema_element("name", Some(6), Some(1), None, Some(0)),
    ];
    let id_pages = vec![
        data_page_v1(2, Encoding::Plain, None, None, plain_i64s(&[1, 2])),
        data_page_v1(2, Encoding::Plain, None, None, plain_i64s(&[3, 4])),
    ];
    let name_page = data_page_v1(
        4,
        Encoding::Plain,
        None,
        Some(levels_v1(&[1, 1, 0, 1], 1)),
        plain_byte_arrays(&[b"a", b"b", b"d"]),
    );
    build_file(
        schema,
        vec![(
            4,
            vec![
                ChunkSpec::new(&["id"], 2, id_pages, 4),
                ChunkSpec::new(&["name"], 6, vec![name_page], 4),
            ],
        )],
    )
}

#[tokio::test]
async fn async_metadata_matches_sync() {
    let file = sample_file();
    let sync = deserialize_metadata(&file).unwrap();

    // a large first fetch covers the whole footer in one request
    let in_one = read_metadata_async(&file, parquet_fetch::DEFAULT_FOOTER_READ_SIZE)
        .await
        .unwrap();
    assert_eq!(in_one, sync);

    // a tiny first fetch forces the second, exact-prefix request
    let in_two = read_metadata_async(&file, 16).await.unwrap();
    assert_eq!(in_two, sync);
}

#[tokio::test]
async fn async_rows_match_sync() {
    let file = sample_file();
    let metadata = deserialize_metadata(&file).unwrap();
    let options = ReadOptions::default();

    let sync_rows = read_rows(&mut Cursor::new(&file), &metadata, &options).unwrap();
    let async_rows = read_rows_async_collect(&file, &metadata, &options)
        .await
        .unwrap();
    assert_eq!(async_rows, sync_rows);
}

#[tokio::test]
async fn chunks_arrive_with_row_positions() {
    let file = sample_file();
    let metadata = read_metadata_async(&file, 64).await.unwrap();
    let options = ReadOptions {
        row_start: 1,
        row_end: Some(3),
        ..Default::default()
    };

    let mut chunks = vec![];
    read_rows_async(&file, &metadata, &options, |chunk| {
        chunks.push(chunk);
        Ok(())
    })
    .await
    .unwrap();

    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].row_start, 1);
    assert_eq!(chunks[0].rows.len(), 2);
    assert_eq!(
        chunks[0].columns,
        vec!["id".to_string(), "name".to_string()]
    );
}

#[tokio::test]
async fn blocking_source_adapts_seekable_readers() {
    let file = sample_file();
    let source = BlockingByteSource::try_new(Cursor::new(file.clone())).unwrap();

    let metadata = read_metadata_async(&source, 32).await.unwrap();
    assert_eq!(metadata.num_rows, 4);

    let rows = read_rows_async_collect(&source, &metadata, &ReadOptions::default())
        .await
        .unwrap();
    assert_eq!(rows.len(), 4);
}
