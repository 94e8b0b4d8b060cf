use dan_core::{decode, encode};

/// Assert that decode → encode → decode yields the same tree, and that the
/// canonical text is a fixed point of encode(decode(_)).
fn assert_roundtrip(dan: &str) {
    let first = decode(dan);
    let text = encode(&first);
    let second = decode(&text);
    assert_eq!(
        first, second,
        "Roundtrip failed:\n  input DAN: {dan}\n  encoded:   {text}"
    );
    assert_eq!(
        encode(&second),
        text,
        "Canonical text is not stable:\n  input DAN: {dan}"
    );
}

// ============================================================================
// Scalars
// ============================================================================

#[test]
fn roundtrip_strings() {
    assert_roundtrip("name: \"John\"\nempty: \"\"\nbare: online");
}

#[test]
fn roundtrip_numbers() {
    assert_roundtrip("count: 0\nprice: 19.99\ntemperature: -10\nbig: 1e20\ntiny: 0.000001");
}

#[test]
fn roundtrip_bools() {
    assert_roundtrip("active: true\ndeleted: false");
}

#[test]
fn roundtrip_quoted_bool_stays_string() {
    assert_roundtrip("flag: \"true\"\nnum: \"42\"");
}

// ============================================================================
// Arrays
// ============================================================================

#[test]
fn roundtrip_arrays() {
    assert_roundtrip("tags: [\"go\", \"programming\", \"test\"]\nnums: [1, 2.5, -3]\nnone: []");
}

#[test]
fn roundtrip_bare_words_in_array_become_quoted() {
    let doc = decode("tags: [a, b]");
    assert_eq!(encode(&doc), "tags: [\"a\", \"b\"]");
    assert_roundtrip("tags: [a, b]");
}

// ============================================================================
// Blocks and Tables
// ============================================================================

#[test]
fn roundtrip_nested_blocks() {
    assert_roundtrip(
        "user {\n  name: \"John\"\n  address {\n    street: \"123 Main St\"\n  }\n}\nafter: 1",
    );
}

#[test]
fn roundtrip_empty_block() {
    assert_roundtrip("empty {\n}");
}

#[test]
fn roundtrip_table() {
    assert_roundtrip("users: table(name, age) [\n  \"Alice\", 25\n  \"Bob\", 30\n]");
}

#[test]
fn roundtrip_empty_table() {
    assert_roundtrip("users: table(name, age) [\n]");
}

#[test]
fn roundtrip_zero_column_table_with_row_lines() {
    assert_roundtrip("t: table() [\n  1\n  2\n]");
}

#[test]
fn roundtrip_blank_column_list() {
    assert_roundtrip("t: table( ) [\n  1\n  \"x\"\n]");
}

#[test]
fn roundtrip_short_rows() {
    assert_roundtrip("t: table(a, b, c) [\n  1\n  1, 2\n  1, 2, 3\n]");
}

#[test]
fn roundtrip_unclosed_structures() {
    assert_roundtrip("name: \"John\"\naddress {\n  city: \"Paris\"\n  t: table(a) [\n    1");
}

#[test]
fn roundtrip_complex_document() {
    let input = r#"# Configuration file
app {
  name: "MyApp"
  version: "1.0.0"
  settings {
    debug: true
    port: 8080
    hosts: ["localhost", "127.0.0.1"]
  }
}

users: table(id, name, email, active) [
  1, "Alice", "alice@example.com", true
  2, "Bob", "bob@example.com", true
  3, "Charlie", "charlie@example.com", false
]

features: ["auth", "logging", "metrics"]
enabled: true
"#;
    assert_roundtrip(input);
}

#[test]
fn canonical_form_of_complex_document() {
    let input = "b: 1 # trailing\n  a {\n x: [1,2]\n}\nt: table(p,q) [\n1,\"z\"\n]";
    assert_eq!(
        encode(&decode(input)),
        "b: 1\na {\n  x: [1, 2]\n}\nt: table(p, q) [\n  1, \"z\"\n]"
    );
}
