//! DAN decoder: converts DAN text into an [`Object`] tree.
//!
//! The decoder is line-oriented and single-pass. Each non-blank line (after
//! comment stripping) is classified, in this order:
//!
//! - `key {`                      → open a nested block
//! - `}`                          → close the innermost block
//! - `key: table(c1, c2) [`       → open a table
//! - `]`                          → close the open table
//! - any line while a table is open → table row
//! - `key: value`                 → scalar assignment
//!
//! Anything else is dropped. The order matters: a table header is tried before
//! the generic `key: value` form, and a line ending in `{` opens a block even
//! inside a table.
//!
//! # Key design decisions
//!
//! - **Never fails**: malformed structure degrades to a best-effort tree. Extra
//!   `}` at the root are ignored, and blocks or tables left open at end of input
//!   keep whatever they had collected.
//! - **Frame arena**: open objects live in a per-call arena and are linked to
//!   their parent by slot at open time, so an unclosed block is still reachable
//!   from the root. The tree is assembled once, at end of input.
//! - **Diagnostics**: what the permissive parser tolerated is reported through
//!   [`decode_with_diagnostics`] and `tracing` debug events, without changing
//!   the decoded value.

use crate::error::Result;
use crate::scalar::parse_scalar;
use crate::value::{Object, Table, Value};
use indexmap::IndexMap;
use std::fmt;
use tracing::{debug, trace};

/// Decode DAN text into its root object.
///
/// Total over `&str`: structurally malformed input still yields an object.
/// Empty or comment-only input yields an empty object.
pub fn decode(text: &str) -> Object {
    decode_with_diagnostics(text).value
}

/// Decode a raw byte payload. Fails with [`crate::DanError::InputKind`] if the
/// bytes are not UTF-8 text; otherwise behaves like [`decode`].
pub fn decode_bytes(input: &[u8]) -> Result<Object> {
    decode_bytes_with_diagnostics(input).map(|decoded| decoded.value)
}

/// Byte-payload form of [`decode_with_diagnostics`].
pub fn decode_bytes_with_diagnostics(input: &[u8]) -> Result<Decoded> {
    let text = std::str::from_utf8(input)?;
    Ok(decode_with_diagnostics(text))
}

/// Decode DAN text and report every line the decoder tolerated rather than
/// understood.
pub fn decode_with_diagnostics(text: &str) -> Decoded {
    if text.trim().is_empty() {
        return Decoded::default();
    }

    let mut decoder = Decoder::new();
    for (idx, raw) in text.split('\n').enumerate() {
        let line = strip_comment(raw).trim();
        if line.is_empty() {
            continue;
        }
        decoder.line(idx + 1, line);
    }
    decoder.finish()
}

/// Result of [`decode_with_diagnostics`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Decoded {
    pub value: Object,
    pub diagnostics: Vec<Diagnostic>,
}

/// Something the decoder accepted without understanding it fully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based line number in the input text.
    pub line: usize,
    pub kind: DiagnosticKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// The line matched no recognized form and was dropped.
    IgnoredLine { text: String },
    /// A `}` with no open block.
    UnmatchedBlockClose,
    /// A `]` with no open table.
    UnmatchedTableClose,
    /// A table row had more fields than declared columns; the excess was dropped.
    ExtraRowFields { expected: usize, found: usize },
    /// A block was still open at end of input (or never closed).
    UnclosedBlock { key: String },
    /// A table was still open at end of input, or a new table was opened first.
    UnclosedTable { key: String },
    /// A row line inside a table declared with `table()`; it was dropped.
    RowWithoutColumns { key: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: ", self.line)?;
        match &self.kind {
            DiagnosticKind::IgnoredLine { text } => write!(f, "ignored unrecognized line `{text}`"),
            DiagnosticKind::UnmatchedBlockClose => f.write_str("`}` without an open block"),
            DiagnosticKind::UnmatchedTableClose => f.write_str("`]` without an open table"),
            DiagnosticKind::ExtraRowFields { expected, found } => write!(
                f,
                "table row has {found} fields but {expected} columns; extra fields dropped"
            ),
            DiagnosticKind::UnclosedBlock { key } => write!(f, "block `{key}` is never closed"),
            DiagnosticKind::UnclosedTable { key } => write!(f, "table `{key}` is never closed"),
            DiagnosticKind::RowWithoutColumns { key } => {
                write!(f, "table `{key}` declares no columns; row dropped")
            }
        }
    }
}

/// Cut a line at the first `#` or `//`, whichever comes first.
/// Not quote-aware: a `#` inside a string literal still starts a comment.
fn strip_comment(line: &str) -> &str {
    let hash = line.find('#');
    let slashes = line.find("//");
    let cut = match (hash, slashes) {
        (Some(h), Some(s)) => Some(h.min(s)),
        (h, s) => h.or(s),
    };
    match cut {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Split `ident:rest` where `ident` is `[A-Za-z0-9_]+`. `rest` has its leading
/// whitespace removed and may be empty.
fn split_ident_colon(line: &str) -> Option<(&str, &str)> {
    let end = line
        .bytes()
        .position(|b| !(b.is_ascii_alphanumeric() || b == b'_'))?;
    if end == 0 || line.as_bytes()[end] != b':' {
        return None;
    }
    Some((&line[..end], line[end + 1..].trim_start()))
}

/// Match `key: table(c1, c2) [`. Column names are trimmed, so `table( )`
/// declares one column named `""`. Only `table()` declares none.
fn parse_table_header(line: &str) -> Option<(&str, Vec<String>)> {
    let (key, rest) = split_ident_colon(line)?;
    let rest = rest.strip_prefix("table(")?;
    let close = rest.find(')')?;
    if rest[close + 1..].trim_start() != "[" {
        return None;
    }
    let list = &rest[..close];
    let columns = if list.is_empty() {
        Vec::new()
    } else {
        list.split(',').map(|c| c.trim().to_string()).collect()
    };
    Some((key, columns))
}

/// Match `key: value` with a non-empty value.
fn split_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, rest) = split_ident_colon(line)?;
    if rest.is_empty() {
        return None;
    }
    Some((key, rest))
}

/// An entry of an arena frame: a finished value, or a link to another
/// arena-held container that is resolved when the tree is assembled.
enum Slot {
    Value(Value),
    Frame(usize),
    Table(usize),
}

#[derive(Default)]
struct Frame {
    entries: IndexMap<String, Slot>,
}

/// One entry of the open-block stack.
struct OpenBlock {
    frame: usize,
    key: String,
    line: usize,
}

struct TableContext {
    table: usize,
    key: String,
    parent: usize,
    line: usize,
}

struct Decoder {
    frames: Vec<Frame>,
    tables: Vec<Table>,
    stack: Vec<OpenBlock>,
    table: Option<TableContext>,
    diagnostics: Vec<Diagnostic>,
}

impl Decoder {
    fn new() -> Self {
        Decoder {
            frames: vec![Frame::default()],
            tables: Vec::new(),
            stack: vec![OpenBlock {
                frame: 0,
                key: String::new(),
                line: 0,
            }],
            table: None,
            diagnostics: Vec::new(),
        }
    }

    /// Arena index of the innermost open block. The root is never popped.
    fn top(&self) -> usize {
        self.stack[self.stack.len() - 1].frame
    }

    fn line(&mut self, line_no: usize, line: &str) {
        if let Some(head) = line.strip_suffix('{') {
            self.open_block(line_no, head.trim());
            return;
        }

        if line == "}" {
            self.close_block(line_no);
            return;
        }

        if let Some((key, columns)) = parse_table_header(line) {
            self.open_table(line_no, key, columns);
            return;
        }

        if line == "]" {
            self.close_table(line_no);
            return;
        }

        if self.table.is_some() {
            self.push_row(line_no, line);
            return;
        }

        if let Some((key, rest)) = split_key_value(line) {
            trace!(line = line_no, key, "key-value");
            let top = self.top();
            self.frames[top]
                .entries
                .insert(key.to_string(), Slot::Value(parse_scalar(rest)));
            return;
        }

        debug!(line = line_no, text = line, "ignoring unrecognized line");
        self.note(
            line_no,
            DiagnosticKind::IgnoredLine {
                text: line.to_string(),
            },
        );
    }

    fn open_block(&mut self, line_no: usize, key: &str) {
        trace!(line = line_no, key, "block open");
        let frame = self.frames.len();
        self.frames.push(Frame::default());
        let top = self.top();
        self.frames[top]
            .entries
            .insert(key.to_string(), Slot::Frame(frame));
        self.stack.push(OpenBlock {
            frame,
            key: key.to_string(),
            line: line_no,
        });
    }

    fn close_block(&mut self, line_no: usize) {
        if self.stack.len() > 1 {
            self.stack.pop();
        } else {
            debug!(line = line_no, "ignoring `}}` at root level");
            self.note(line_no, DiagnosticKind::UnmatchedBlockClose);
        }
    }

    fn open_table(&mut self, line_no: usize, key: &str, columns: Vec<String>) {
        trace!(line = line_no, key, columns = columns.len(), "table open");
        if let Some(prev) = self.table.take() {
            debug!(line = line_no, key = %prev.key, "table replaced before `]`");
            self.note(prev.line, DiagnosticKind::UnclosedTable { key: prev.key });
        }

        let table = self.tables.len();
        self.tables.push(Table::with_columns(columns));
        let parent = self.top();
        self.frames[parent]
            .entries
            .insert(key.to_string(), Slot::Table(table));
        self.table = Some(TableContext {
            table,
            key: key.to_string(),
            parent,
            line: line_no,
        });
    }

    fn close_table(&mut self, line_no: usize) {
        match self.table.take() {
            Some(ctx) => {
                self.frames[ctx.parent]
                    .entries
                    .insert(ctx.key, Slot::Table(ctx.table));
            }
            None => {
                debug!(line = line_no, "ignoring `]` without an open table");
                self.note(line_no, DiagnosticKind::UnmatchedTableClose);
            }
        }
    }

    /// Map comma-separated fields onto the declared columns positionally and
    /// re-link the table into its parent frame.
    fn push_row(&mut self, line_no: usize, line: &str) {
        let Some(ctx) = self.table.as_ref() else {
            return;
        };
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let table = &mut self.tables[ctx.table];
        let expected = table.columns().len();
        if expected == 0 {
            debug!(line = line_no, key = %ctx.key, "dropping row of column-less table");
            self.diagnostics.push(Diagnostic {
                line: line_no,
                kind: DiagnosticKind::RowWithoutColumns {
                    key: ctx.key.clone(),
                },
            });
        } else {
            if fields.len() > expected {
                debug!(
                    line = line_no,
                    expected,
                    found = fields.len(),
                    "dropping extra table fields"
                );
                self.diagnostics.push(Diagnostic {
                    line: line_no,
                    kind: DiagnosticKind::ExtraRowFields {
                        expected,
                        found: fields.len(),
                    },
                });
            }

            let mut row = Object::new();
            for (column, field) in table.columns().iter().zip(&fields) {
                row.insert(column.clone(), parse_scalar(field));
            }
            table.push_row(row);
        }
        self.frames[ctx.parent]
            .entries
            .insert(ctx.key.clone(), Slot::Table(ctx.table));
    }

    fn note(&mut self, line: usize, kind: DiagnosticKind) {
        self.diagnostics.push(Diagnostic { line, kind });
    }

    fn finish(mut self) -> Decoded {
        for open in self.stack.drain(1..) {
            debug!(line = open.line, key = %open.key, "block left open at end of input");
            self.diagnostics.push(Diagnostic {
                line: open.line,
                kind: DiagnosticKind::UnclosedBlock { key: open.key },
            });
        }
        if let Some(ctx) = self.table.take() {
            debug!(line = ctx.line, key = %ctx.key, "table left open at end of input");
            self.diagnostics.push(Diagnostic {
                line: ctx.line,
                kind: DiagnosticKind::UnclosedTable { key: ctx.key },
            });
        }

        let value = self.assemble(0);
        Decoded {
            value,
            diagnostics: self.diagnostics,
        }
    }

    /// Resolve arena links into owned values. Each frame and table is linked
    /// from at most one slot, so taking them out of the arena is safe.
    fn assemble(&mut self, frame: usize) -> Object {
        let entries = std::mem::take(&mut self.frames[frame].entries);
        let mut object = Object::with_capacity(entries.len());
        for (key, slot) in entries {
            let value = match slot {
                Slot::Value(value) => value,
                Slot::Frame(child) => Value::Object(self.assemble(child)),
                Slot::Table(table) => Value::Table(std::mem::take(&mut self.tables[table])),
            };
            object.insert(key, value);
        }
        object
    }
}
