use std::io::Cursor;

use parquet_fetch::compression::Decompressors;
use parquet_fetch::error::Error;
use parquet_fetch::read::{deserialize_metadata, read_rows, read_rows_with, ReadOptions};
use parquet_fetch::value::Value;
use parquet_fetch::Encoding;

use super::super::fixtures::*;

fn required_i64_file(pages: Vec<Vec<i64>>) -> Vec<u8> {
    let num_values: i64 = pages.iter().map(|page| page.len() as i64).sum();
    let schema = vec![
        schema_element("schema", None, None, Some(1), None),
        schema_element("x", Some(2), Some(0), None, None),
    ];
    let pages = pages
        .into_iter()
        .map(|values| {
            data_page_v1(
                values.len(),
                Encoding::Plain,
                None,
                None,
                plain_i64s(&values),
            )
        })
        .collect();
    build_file(
        schema,
        vec![(num_values, vec![ChunkSpec::new(&["x"], 2, pages, num_values)])],
    )
}

fn read_all(file: &[u8], options: &ReadOptions) -> Vec<Vec<Value>> {
    let metadata = deserialize_metadata(file).unwrap();
    read_rows(&mut Cursor::new(file), &metadata, options).unwrap()
}

#[test]
fn required_column_all_rows() {
    let file = required_i64_file(vec![vec![1, 2, 3], vec![4, 5]]);
    let rows = read_all(&file, &ReadOptions::default());
    assert_eq!(
        rows,
        (1..=5).map(|x| vec![Value::Int64(x)]).collect::<Vec<_>>()
    );
}

#[test]
fn row_range_spans_pages() {
    let file = required_i64_file(vec![vec![1, 2, 3], vec![4, 5], vec![6, 7, 8]]);
    let options = ReadOptions {
        row_start: 2,
        row_end: Some(6),
        ..Default::default()
    };
    let rows = read_all(&file, &options);
    assert_eq!(
        rows,
        (3..=6).map(|x| vec![Value::Int64(x)]).collect::<Vec<_>>()
    );
}

#[test]
fn row_range_spans_row_groups() {
    let schema = vec![
        schema_element("schema", None, None, Some(1), None),
        schema_element("x", Some(2), Some(0), None, None),
    ];
    let group = |values: &[i64]| {
        (
            values.len() as i64,
            vec![ChunkSpec::new(
                &["x"],
                2,
                vec![data_page_v1(
                    values.len(),
                    Encoding::Plain,
                    None,
                    None,
                    plain_i64s(values),
                )],
                values.len() as i64,
            )],
        )
    };
    let file = build_file(schema, vec![group(&[1, 2, 3]), group(&[4, 5, 6])]);

    let options = ReadOptions {
        row_start: 2,
        row_end: Some(5),
        ..Default::default()
    };
    let metadata = deserialize_metadata(&file).unwrap();

    let mut chunks = vec![];
    read_rows_with(&mut Cursor::new(&file), &metadata, &options, |chunk| {
        chunks.push(chunk);
        Ok(())
    })
    .unwrap();

    // one chunk per intersecting row group, rows ascending within each
    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].row_group, 0);
    assert_eq!(chunks[0].row_start, 2);
    assert_eq!(chunks[0].rows, vec![vec![Value::Int64(3)]]);
    assert_eq!(chunks[1].row_group, 1);
    assert_eq!(chunks[1].row_start, 3);
    assert_eq!(
        chunks[1].rows,
        vec![vec![Value::Int64(4)], vec![Value::Int64(5)]]
    );
}

#[test]
fn optional_column_places_nulls() {
    let schema = vec![
        schema_element("schema", None, None, Some(1), None),
        schema_element("x", Some(1), Some(1), None, None),
    ];
    let page = data_page_v1(
        4,
        Encoding::Plain,
        None,
        Some(levels_v1(&[1, 0, 0, 1], 1)),
        plain_i32s(&[7, 9]),
    );
    let file = build_file(schema, vec![(4, vec![ChunkSpec::new(&["x"], 1, vec![page], 4)])]);

    let rows = read_all(&file, &ReadOptions::default());
    assert_eq!(
        rows,
        vec![
            vec![Value::Int32(7)],
            vec![Value::Null],
            vec![Value::Null],
            vec![Value::Int32(9)],
        ]
    );
}

#[test]
fn boolean_plain_bitmap() {
    let schema = vec![
        schema_element("schema", None, None, Some(1), None),
        schema_element("flag", Some(0), Some(0), None, None),
    ];
    // 5 booleans: true, false, true, true, false => 0b00001101
    let page = data_page_v1(5, Encoding::Plain, None, None, vec![0b00001101]);
    let file = build_file(
        schema,
        vec![(5, vec![ChunkSpec::new(&["flag"], 0, vec![page], 5)])],
    );

    let rows = read_all(&file, &ReadOptions::default());
    let flags = rows
        .into_iter()
        .map(|row| row[0].clone())
        .collect::<Vec<_>>();
    assert_eq!(
        flags,
        [true, false, true, true, false]
            .map(Value::Boolean)
            .to_vec()
    );
}

#[test]
fn delta_binary_packed_values() {
    let values = (1i64..=10).collect::<Vec<_>>();
    let mut encoded = vec![];
    parquet_fetch::encoding::delta_bitpacked::encode(values.iter().copied(), 4, &mut encoded);

    let schema = vec![
        schema_element("schema", None, None, Some(1), None),
        schema_element("x", Some(2), Some(0), None, None),
    ];
    let page = data_page_v1(10, Encoding::DeltaBinaryPacked, None, None, encoded);
    let file = build_file(
        schema,
        vec![(10, vec![ChunkSpec::new(&["x"], 2, vec![page], 10)])],
    );

    let rows = read_all(&file, &ReadOptions::default());
    assert_eq!(
        rows,
        values.iter().map(|x| vec![Value::Int64(*x)]).collect::<Vec<_>>()
    );
}

#[test]
fn v2_page_with_nulls_and_uncompressed_values() {
    let schema = vec![
        schema_element("schema", None, None, Some(1), None),
        schema_element("x", Some(1), Some(1), None, None),
    ];
    let page = data_page_v2(
        3,
        1,
        3,
        Encoding::Plain,
        vec![],
        levels_v2(&[1, 0, 1], 1),
        plain_i32s(&[5, 6]),
        Some(false),
    );
    let file = build_file(schema, vec![(3, vec![ChunkSpec::new(&["x"], 1, vec![page], 3)])]);

    let rows = read_all(&file, &ReadOptions::default());
    assert_eq!(
        rows,
        vec![
            vec![Value::Int32(5)],
            vec![Value::Null],
            vec![Value::Int32(6)],
        ]
    );
}

#[test]
fn column_subset_by_name() {
    let schema = vec![
        schema_element("schema", None, None, Some(2), None),
        schema_element("a", Some(2), Some(0), None, None),
        schema_element("b", Some(2), Some(0), None, None),
    ];
    let page = |values: &[i64]| {
        data_page_v1(
            values.len(),
            Encoding::Plain,
            None,
            None,
            plain_i64s(values),
        )
    };
    let file = build_file(
        schema,
        vec![(
            2,
            vec![
                ChunkSpec::new(&["a"], 2, vec![page(&[1, 2])], 2),
                ChunkSpec::new(&["b"], 2, vec![page(&[10, 20])], 2),
            ],
        )],
    );

    let options = ReadOptions {
        columns: Some(vec!["b".to_string()]),
        ..Default::default()
    };
    let metadata = deserialize_metadata(&file).unwrap();

    let mut delivered_columns = vec![];
    let mut rows = vec![];
    read_rows_with(&mut Cursor::new(&file), &metadata, &options, |chunk| {
        delivered_columns = chunk.columns.clone();
        rows.extend(chunk.rows);
        Ok(())
    })
    .unwrap();

    assert_eq!(delivered_columns, vec!["b".to_string()]);
    assert_eq!(rows, vec![vec![Value::Int64(10)], vec![Value::Int64(20)]]);
}

#[test]
fn unknown_column_is_an_error() {
    let file = required_i64_file(vec![vec![1]]);
    let metadata = deserialize_metadata(&file).unwrap();
    let options = ReadOptions {
        columns: Some(vec!["nope".to_string()]),
        ..Default::default()
    };
    assert!(read_rows(&mut Cursor::new(&file), &metadata, &options).is_err());
}

#[test]
fn custom_decompressor_is_dispatched() {
    // LZO has no builtin codec; the fixture "compresses" by reversing bytes
    let schema = vec![
        schema_element("schema", None, None, Some(1), None),
        schema_element("x", Some(2), Some(0), None, None),
    ];
    let page = data_page_v1_compressed(
        3,
        Encoding::Plain,
        None,
        None,
        plain_i64s(&[1, 2, 3]),
        |body| body.iter().rev().copied().collect(),
    );
    let file = build_file(
        schema,
        vec![(
            3,
            vec![ChunkSpec::new(&["x"], 2, vec![page], 3).with_codec(3)],
        )],
    );
    let metadata = deserialize_metadata(&file).unwrap();

    // without a codec registered, the read fails
    let mut options = ReadOptions {
        decompressors: Decompressors::empty(),
        ..Default::default()
    };
    let err = read_rows(&mut Cursor::new(&file), &metadata, &options).unwrap_err();
    assert_eq!(
        err,
        Error::DecompressorMissing(parquet_fetch::Compression::Lzo)
    );

    // with the codec registered, values decode
    options.decompressors.insert(
        parquet_fetch::Compression::Lzo,
        Box::new(|input, _| Ok(input.iter().rev().copied().collect())),
    );
    let rows = read_rows(&mut Cursor::new(&file), &metadata, &options).unwrap();
    assert_eq!(
        rows,
        (1..=3).map(|x| vec![Value::Int64(x)]).collect::<Vec<_>>()
    );
}

#[test]
fn wrong_decompressed_length_is_an_error() {
    let schema = vec![
        schema_element("schema", None, None, Some(1), None),
        schema_element("x", Some(2), Some(0), None, None),
    ];
    let page = data_page_v1_compressed(
        1,
        Encoding::Plain,
        None,
        None,
        plain_i64s(&[1]),
        |body| body.to_vec(),
    );
    let file = build_file(
        schema,
        vec![(
            1,
            vec![ChunkSpec::new(&["x"], 2, vec![page], 1).with_codec(3)],
        )],
    );
    let metadata = deserialize_metadata(&file).unwrap();

    let mut decompressors = Decompressors::empty();
    // a broken codec that always returns one byte
    decompressors.insert(
        parquet_fetch::Compression::Lzo,
        Box::new(|_, _| Ok(vec![0])),
    );
    let options = ReadOptions {
        decompressors,
        ..Default::default()
    };
    assert!(matches!(
        read_rows(&mut Cursor::new(&file), &metadata, &options).unwrap_err(),
        Error::DecompressionSizeMismatch { .. }
    ));
}
