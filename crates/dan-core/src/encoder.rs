//! DAN encoder: renders an [`Object`] tree as canonical DAN text.
//!
//! Each key of an object becomes one construct at the current indentation:
//!
//! - **Tables** as `key: table(c1, c2) [`, one indented row per line, then `]`
//! - **Arrays of objects** the same way, with columns from the first row
//! - **Scalar arrays** inline: `key: [v1, v2]`
//! - **Objects** as `key {` ... `}`
//! - **Scalars** as `key: value`
//!
//! Output is deterministic: keys and rows are emitted in insertion order, lines
//! are joined with `\n`, and there is no trailing newline.
//!
//! # Example
//! ```
//! use dan_core::{decode, encode};
//! let obj = decode("name: \"Alice\"\nage: 30");
//! assert_eq!(encode(&obj), "name: \"Alice\"\nage: 30");
//! ```

use crate::value::{Object, Table, Value};

/// Formatting knobs for [`encode_with_options`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Spaces per nesting level.
    pub indent: usize,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions { indent: 2 }
    }
}

impl EncodeOptions {
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }
}

/// Encode an object with the default two-space indentation.
/// An empty object encodes to the empty string.
pub fn encode(object: &Object) -> String {
    encode_with_options(object, &EncodeOptions::default())
}

pub fn encode_with_options(object: &Object, options: &EncodeOptions) -> String {
    let mut lines = Vec::new();
    let encoder = Encoder { options };
    encoder.object_fields(object, 0, &mut lines);
    lines.join("\n")
}

struct Encoder<'a> {
    options: &'a EncodeOptions,
}

impl Encoder<'_> {
    fn pad(&self, depth: usize) -> String {
        " ".repeat(self.options.indent * depth)
    }

    fn object_fields(&self, object: &Object, depth: usize, lines: &mut Vec<String>) {
        let pad = self.pad(depth);
        for (key, value) in object {
            match value {
                // Absent: nothing to write.
                Value::Null => {}
                Value::Table(table) => self.table(key, table, depth, lines),
                Value::Array(items) if is_row_set(items) => {
                    let rows: Vec<&Object> = items.iter().filter_map(Value::as_object).collect();
                    let columns: Vec<String> = rows[0].keys().cloned().collect();
                    self.rows(key, &columns, &rows, depth, lines);
                }
                Value::Object(nested) => {
                    lines.push(format!("{pad}{key} {{"));
                    self.object_fields(nested, depth + 1, lines);
                    lines.push(format!("{pad}}}"));
                }
                _ => lines.push(format!("{pad}{key}: {}", format_scalar(value))),
            }
        }
    }

    /// Declared columns win; a table assembled without them falls back to the
    /// first row's keys.
    fn table(&self, key: &str, table: &Table, depth: usize, lines: &mut Vec<String>) {
        let rows: Vec<&Object> = table.iter().collect();
        if !table.columns().is_empty() {
            self.rows(key, table.columns(), &rows, depth, lines);
            return;
        }
        let columns: Vec<String> = rows
            .first()
            .map(|row| row.keys().cloned().collect())
            .unwrap_or_default();
        self.rows(key, &columns, &rows, depth, lines);
    }

    fn rows(
        &self,
        key: &str,
        columns: &[String],
        rows: &[&Object],
        depth: usize,
        lines: &mut Vec<String>,
    ) {
        let pad = self.pad(depth);
        let row_pad = self.pad(depth + 1);
        lines.push(format!("{pad}{key}: table({}) [", column_list(columns)));
        for row in rows {
            let cells = format_row(row, columns);
            // A row with no cells has no textual form.
            if !cells.is_empty() {
                lines.push(format!("{row_pad}{cells}"));
            }
        }
        lines.push(format!("{pad}]"));
    }
}

/// Columns joined by `", "`. A lone empty column name is written as a space,
/// since `table()` declares no columns at all.
fn column_list(columns: &[String]) -> String {
    match columns {
        [only] if only.is_empty() => " ".to_string(),
        _ => columns.join(", "),
    }
}

/// Non-empty and every element an object.
fn is_row_set(items: &[Value]) -> bool {
    !items.is_empty() && items.iter().all(Value::is_object)
}

/// Cells in column order. A cell the row lacks renders empty; trailing absent
/// cells are dropped so a short row stays short after re-decoding.
fn format_row(row: &Object, columns: &[String]) -> String {
    let present = columns
        .iter()
        .rposition(|column| row.contains_key(column))
        .map_or(0, |last| last + 1);
    columns[..present]
        .iter()
        .map(|column| row.get(column).map(format_scalar).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render a value in scalar position.
///
/// Strings are quoted verbatim with no escaping, so an embedded `"` does not
/// survive a round trip. `Null`, objects and tables have no scalar form and
/// render as empty text.
pub fn format_scalar(value: &Value) -> String {
    match value {
        Value::Bool(b) => b.to_string(),
        Value::String(s) => format!("\"{s}\""),
        Value::Number(n) => format_number(*n),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().map(format_scalar).collect();
            format!("[{}]", parts.join(", "))
        }
        Value::Null | Value::Object(_) | Value::Table(_) => String::new(),
    }
}

/// Integral values print without a decimal point (`30`, not `30.0`); anything
/// else uses the shortest representation that parses back to the same `f64`.
fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 {
        format!("{n:.0}")
    } else {
        n.to_string()
    }
}
