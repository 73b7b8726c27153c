use std::io::Cursor;

use parquet_fetch::read::{deserialize_metadata, read_rows, ReadOptions};
use parquet_fetch::value::Value;
use parquet_fetch::Encoding;

use super::super::fixtures::*;

/// message schema { optional group tags (LIST) { repeated group list { optional binary element (UTF8); } } }
/// max definition level 3, max repetition level 1.
fn list_schema() -> Vec<parquet_fetch::format::SchemaElement> {
    vec![
        schema_element("schema", None, None, Some(1), None),
        schema_element("tags", None, Some(1), Some(1), Some(3)),
        schema_element("list", None, Some(2), Some(1), None),
        schema_element("element", Some(6), Some(1), None, Some(0)),
    ]
}

fn list(values: Vec<Value>) -> Value {
    Value::List(values)
}

#[test]
fn list_with_null_element() {
    // D=[3,0,3], R=[0,1,1], V=['a','c'] => one row: ['a', null, 'c']
    let page = data_page_v1(
        3,
        Encoding::Plain,
        Some(levels_v1(&[0, 1, 1], 1)),
        Some(levels_v1(&[3, 0, 3], 3)),
        plain_byte_arrays(&[b"a", b"c"]),
    );
    let file = build_file(
        list_schema(),
        vec![(
            1,
            vec![ChunkSpec::new(&["tags", "list", "element"], 6, vec![page], 3)],
        )],
    );

    let metadata = deserialize_metadata(&file).unwrap();
    let descriptor = &metadata.schema().columns()[0];
    assert_eq!(descriptor.max_def_level(), 3);
    assert_eq!(descriptor.max_rep_level(), 1);

    let rows = read_rows(&mut Cursor::new(&file), &metadata, &ReadOptions::default()).unwrap();
    assert_eq!(
        rows,
        vec![vec![list(vec![
            Value::from("a"),
            Value::Null,
            Value::from("c")
        ])]]
    );
}

/// message schema { optional group keys (LIST) { repeated binary key (UTF8); } }
/// max definition level 2, max repetition level 1.
fn map_keys_schema() -> Vec<parquet_fetch::format::SchemaElement> {
    vec![
        schema_element("schema", None, None, Some(1), None),
        schema_element("keys", None, Some(1), Some(1), Some(3)),
        schema_element("key", Some(6), Some(2), None, Some(0)),
    ]
}

fn map_keys_file() -> Vec<u8> {
    // D=[2,2,2,2,1,1,1,0,2,2], R=[0,1,0,1,0,0,0,0,0,1]
    // => ['k1','k2'], ['k1','k2'], [], [], [], null, ['k1','k3']
    let page = data_page_v1(
        10,
        Encoding::Plain,
        Some(levels_v1(&[0, 1, 0, 1, 0, 0, 0, 0, 0, 1], 1)),
        Some(levels_v1(&[2, 2, 2, 2, 1, 1, 1, 0, 2, 2], 2)),
        plain_byte_arrays(&[b"k1", b"k2", b"k1", b"k2", b"k1", b"k3"]),
    );
    build_file(
        map_keys_schema(),
        vec![(7, vec![ChunkSpec::new(&["keys", "key"], 6, vec![page], 10)])],
    )
}

#[test]
fn empty_lists_and_null_rows() {
    let file = map_keys_file();
    let metadata = deserialize_metadata(&file).unwrap();
    let rows = read_rows(&mut Cursor::new(&file), &metadata, &ReadOptions::default()).unwrap();

    assert_eq!(
        rows,
        vec![
            vec![list(vec![Value::from("k1"), Value::from("k2")])],
            vec![list(vec![Value::from("k1"), Value::from("k2")])],
            vec![list(vec![])],
            vec![list(vec![])],
            vec![list(vec![])],
            vec![Value::Null],
            vec![list(vec![Value::from("k1"), Value::from("k3")])],
        ]
    );
}

#[test]
fn row_range_on_repeated_column() {
    let file = map_keys_file();
    let metadata = deserialize_metadata(&file).unwrap();
    let options = ReadOptions {
        row_start: 2,
        row_end: Some(6),
        ..Default::default()
    };
    let rows = read_rows(&mut Cursor::new(&file), &metadata, &options).unwrap();
    assert_eq!(
        rows,
        vec![
            vec![list(vec![])],
            vec![list(vec![])],
            vec![list(vec![])],
            vec![Value::Null],
        ]
    );
}

#[test]
fn records_spanning_pages_assemble_once() {
    // the second record continues into the second page
    let page1 = data_page_v1(
        3,
        Encoding::Plain,
        Some(levels_v1(&[0, 1, 0], 1)),
        Some(levels_v1(&[2, 2, 2], 2)),
        plain_byte_arrays(&[b"a", b"b", b"c"]),
    );
    let page2 = data_page_v1(
        2,
        Encoding::Plain,
        Some(levels_v1(&[1, 1], 1)),
        Some(levels_v1(&[2, 2], 2)),
        plain_byte_arrays(&[b"d", b"e"]),
    );
    let file = build_file(
        map_keys_schema(),
        vec![(
            2,
            vec![ChunkSpec::new(&["keys", "key"], 6, vec![page1, page2], 5)],
        )],
    );

    let metadata = deserialize_metadata(&file).unwrap();
    let rows = read_rows(&mut Cursor::new(&file), &metadata, &ReadOptions::default()).unwrap();
    assert_eq!(
        rows,
        vec![
            vec![list(vec![Value::from("a"), Value::from("b")])],
            vec![list(vec![
                Value::from("c"),
                Value::from("d"),
                Value::from("e")
            ])],
        ]
    );
}

#[test]
fn doubly_nested_lists() {
    // message schema { repeated group outer { repeated int32 inner; } }
    // max def 2, max rep 2
    let schema = vec![
        schema_element("schema", None, None, Some(1), None),
        schema_element("outer", None, Some(2), Some(1), None),
        schema_element("inner", Some(1), Some(2), None, None),
    ];
    // R=[0,2,1,2], D=max => [[[1,2],[3,4]]]
    let page = data_page_v1(
        4,
        Encoding::Plain,
        Some(levels_v1(&[0, 2, 1, 2], 2)),
        Some(levels_v1(&[2, 2, 2, 2], 2)),
        plain_i32s(&[1, 2, 3, 4]),
    );
    let file = build_file(
        schema,
        vec![(1, vec![ChunkSpec::new(&["outer", "inner"], 1, vec![page], 4)])],
    );

    let metadata = deserialize_metadata(&file).unwrap();
    let descriptor = &metadata.schema().columns()[0];
    assert_eq!(descriptor.max_def_level(), 2);
    assert_eq!(descriptor.max_rep_level(), 2);

    let rows = read_rows(&mut Cursor::new(&file), &metadata, &ReadOptions::default()).unwrap();
    assert_eq!(
        rows,
        vec![vec![list(vec![
            list(vec![Value::Int32(1), Value::Int32(2)]),
            list(vec![Value::Int32(3), Value::Int32(4)]),
        ])]]
    );
}
