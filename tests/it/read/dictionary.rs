use std::io::Cursor;

use parquet_fetch::read::{deserialize_metadata, read_rows, ReadOptions};
use parquet_fetch::value::Value;
use parquet_fetch::Encoding;

use super::super::fixtures::*;

#[test]
fn dictionary_indices_resolve_across_pages() {
    let schema = vec![
        schema_element("schema", None, None, Some(1), None),
        schema_element("word", Some(6), Some(0), None, Some(0)),
    ];

    let dict = dict_page(3, plain_byte_arrays(&[b"low", b"mid", b"high"]));
    let page1 = data_page_v1(
        3,
        Encoding::RleDictionary,
        None,
        None,
        dictionary_indices(&[0, 2, 1], 2),
    );
    let page2 = data_page_v1(
        2,
        Encoding::RleDictionary,
        None,
        None,
        dictionary_indices(&[2, 2], 2),
    );
    let file = build_file(
        schema,
        vec![(
            5,
            vec![ChunkSpec::new(&["word"], 6, vec![dict, page1, page2], 5)],
        )],
    );

    let metadata = deserialize_metadata(&file).unwrap();
    let rows = read_rows(&mut Cursor::new(&file), &metadata, &ReadOptions::default()).unwrap();

    // UTF8 conversion applied through the dictionary
    let words = rows
        .into_iter()
        .map(|row| row[0].as_str().unwrap().to_string())
        .collect::<Vec<_>>();
    assert_eq!(words, vec!["low", "high", "mid", "high", "high"]);
}

#[test]
fn dictionary_with_nulls() {
    let schema = vec![
        schema_element("schema", None, None, Some(1), None),
        schema_element("word", Some(6), Some(1), None, Some(0)),
    ];

    let dict = dict_page(2, plain_byte_arrays(&[b"a", b"b"]));
    let page = data_page_v1(
        4,
        Encoding::PlainDictionary,
        None,
        Some(levels_v1(&[1, 0, 1, 1], 1)),
        dictionary_indices(&[1, 0, 1], 1),
    );
    let file = build_file(
        schema,
        vec![(4, vec![ChunkSpec::new(&["word"], 6, vec![dict, page], 4)])],
    );

    let metadata = deserialize_metadata(&file).unwrap();
    let rows = read_rows(&mut Cursor::new(&file), &metadata, &ReadOptions::default()).unwrap();
    assert_eq!(
        rows,
        vec![
            vec![Value::from("b")],
            vec![Value::Null],
            vec![Value::from("a")],
            vec![Value::from("b")],
        ]
    );
}

#[test]
fn dictionary_page_missing_is_an_error() {
    let schema = vec![
        schema_element("schema", None, None, Some(1), None),
        schema_element("word", Some(6), Some(0), None, None),
    ];
    let page = data_page_v1(
        1,
        Encoding::RleDictionary,
        None,
        None,
        dictionary_indices(&[0], 1),
    );
    let file = build_file(
        schema,
        vec![(1, vec![ChunkSpec::new(&["word"], 6, vec![page], 1)])],
    );

    let metadata = deserialize_metadata(&file).unwrap();
    assert!(read_rows(&mut Cursor::new(&file), &metadata, &ReadOptions::default()).is_err());
}
