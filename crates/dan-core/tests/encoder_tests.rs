use dan_core::{
    decode, encode, encode_with_options, format_scalar, EncodeOptions, Object, Table, Value,
};

fn obj(pairs: &[(&str, Value)]) -> Object {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn s(text: &str) -> Value {
    Value::String(text.to_string())
}

fn n(x: f64) -> Value {
    Value::Number(x)
}

// ============================================================================
// Empty / Scalars
// ============================================================================

#[test]
fn encode_empty_object() {
    assert_eq!(encode(&Object::new()), "");
}

#[test]
fn encode_single_string() {
    assert_eq!(encode(&obj(&[("name", s("John"))])), r#"name: "John""#);
}

#[test]
fn encode_scalars_in_insertion_order() {
    let doc = obj(&[
        ("name", s("John")),
        ("age", n(30.0)),
        ("active", Value::Bool(true)),
        ("deleted", Value::Bool(false)),
    ]);
    assert_eq!(
        encode(&doc),
        "name: \"John\"\nage: 30\nactive: true\ndeleted: false"
    );
}

#[test]
fn encode_no_trailing_newline() {
    assert!(!encode(&obj(&[("a", n(1.0))])).ends_with('\n'));
}

#[test]
fn encode_null_is_omitted() {
    let doc = obj(&[("a", Value::Null), ("b", n(1.0))]);
    assert_eq!(encode(&doc), "b: 1");
}

// ============================================================================
// Numbers
// ============================================================================

#[test]
fn number_integral_has_no_decimal_point() {
    assert_eq!(format_scalar(&n(30.0)), "30");
    assert_eq!(format_scalar(&n(-10.0)), "-10");
    assert_eq!(format_scalar(&n(0.0)), "0");
}

#[test]
fn number_fraction_is_shortest_form() {
    assert_eq!(format_scalar(&n(19.99)), "19.99");
    assert_eq!(format_scalar(&n(0.1 + 0.2)), "0.30000000000000004");
    assert_eq!(format_scalar(&n(-74.006)), "-74.006");
}

#[test]
fn number_large_integral_is_written_out() {
    assert_eq!(format_scalar(&n(1e20)), "100000000000000000000");
}

// ============================================================================
// Strings
// ============================================================================

#[test]
fn string_quoted_verbatim() {
    assert_eq!(format_scalar(&s("a \"b\" c")), "\"a \"b\" c\"");
    assert_eq!(format_scalar(&s("")), "\"\"");
}

// ============================================================================
// Arrays
// ============================================================================

#[test]
fn encode_scalar_array_inline() {
    let doc = obj(&[(
        "tags",
        Value::Array(vec![s("go"), s("rust"), n(3.0), Value::Bool(true)]),
    )]);
    assert_eq!(encode(&doc), r#"tags: ["go", "rust", 3, true]"#);
}

#[test]
fn encode_empty_array() {
    assert_eq!(encode(&obj(&[("tags", Value::Array(vec![]))])), "tags: []");
}

#[test]
fn encode_array_of_objects_as_table() {
    let doc = obj(&[(
        "users",
        Value::Array(vec![
            Value::Object(obj(&[("name", s("Alice")), ("age", n(25.0))])),
            Value::Object(obj(&[("name", s("Bob")), ("age", n(30.0))])),
        ]),
    )]);
    assert_eq!(
        encode(&doc),
        "users: table(name, age) [\n  \"Alice\", 25\n  \"Bob\", 30\n]"
    );
}

#[test]
fn encode_array_of_objects_missing_cell_renders_empty() {
    let doc = obj(&[(
        "rows",
        Value::Array(vec![
            Value::Object(obj(&[("a", n(1.0)), ("b", n(2.0)), ("c", n(3.0))])),
            Value::Object(obj(&[("a", n(4.0)), ("c", n(6.0))])),
        ]),
    )]);
    assert_eq!(
        encode(&doc),
        "rows: table(a, b, c) [\n  1, 2, 3\n  4, , 6\n]"
    );
}

// ============================================================================
// Tables
// ============================================================================

#[test]
fn encode_table_uses_declared_columns() {
    let mut table = Table::with_columns(["id", "name"]);
    table.push_row(obj(&[("name", s("Widget")), ("id", n(1.0))]));
    let doc = obj(&[("products", Value::Table(table))]);
    assert_eq!(encode(&doc), "products: table(id, name) [\n  1, \"Widget\"\n]");
}

#[test]
fn encode_table_short_row_stays_short() {
    let mut table = Table::with_columns(["a", "b", "c"]);
    table.push_row(obj(&[("a", n(1.0))]));
    let doc = obj(&[("t", Value::Table(table))]);
    assert_eq!(encode(&doc), "t: table(a, b, c) [\n  1\n]");
}

#[test]
fn encode_empty_table_without_columns() {
    let doc = obj(&[("users", Value::Table(Table::new()))]);
    assert_eq!(encode(&doc), "users: table() [\n]");
}

#[test]
fn encode_empty_table_with_columns() {
    let doc = obj(&[("users", Value::Table(Table::with_columns(["name", "age"])))]);
    assert_eq!(encode(&doc), "users: table(name, age) [\n]");
}

#[test]
fn encode_single_unnamed_column_keeps_a_space() {
    let mut table = Table::with_columns([""]);
    table.push_row(obj(&[("", n(1.0))]));
    let doc = obj(&[("t", Value::Table(table))]);
    assert_eq!(encode(&doc), "t: table( ) [\n  1\n]");
}

#[test]
fn encode_columnless_table_uses_first_row_keys() {
    let mut table = Table::new();
    table.push_row(obj(&[("x", n(1.0)), ("y", n(2.0))]));
    table.push_row(obj(&[("x", n(3.0)), ("y", n(4.0))]));
    let doc = obj(&[("points", Value::Table(table))]);
    assert_eq!(encode(&doc), "points: table(x, y) [\n  1, 2\n  3, 4\n]");
}

// ============================================================================
// Nested Objects
// ============================================================================

#[test]
fn encode_nested_blocks() {
    let doc = obj(&[(
        "user",
        Value::Object(obj(&[
            ("name", s("John")),
            (
                "address",
                Value::Object(obj(&[("street", s("123 Main St"))])),
            ),
        ])),
    )]);
    assert_eq!(
        encode(&doc),
        "user {\n  name: \"John\"\n  address {\n    street: \"123 Main St\"\n  }\n}"
    );
}

#[test]
fn encode_empty_nested_object() {
    let doc = obj(&[("empty", Value::Object(Object::new())), ("x", n(1.0))]);
    assert_eq!(encode(&doc), "empty {\n}\nx: 1");
}

#[test]
fn encode_table_inside_block_is_indented() {
    let doc = decode("db {\n  users: table(id) [\n    1\n  ]\n}");
    assert_eq!(encode(&doc), "db {\n  users: table(id) [\n    1\n  ]\n}");
}

// ============================================================================
// Options
// ============================================================================

#[test]
fn encode_with_four_space_indent() {
    let doc = decode("a {\n  b {\n    c: 1\n  }\n}");
    let options = EncodeOptions::default().with_indent(4);
    assert_eq!(
        encode_with_options(&doc, &options),
        "a {\n    b {\n        c: 1\n    }\n}"
    );
}

#[test]
fn default_options_match_encode() {
    let doc = decode("a {\n  b: [1, 2]\n}");
    assert_eq!(encode_with_options(&doc, &EncodeOptions::default()), encode(&doc));
}
