//! Scalar grammar: turns one trimmed, comment-free token into a [`Value`] leaf.
//!
//! Resolution order, first match wins:
//!
//! 1. `true` / `false` → bool
//! 2. `"..."` → string with the quotes stripped (no escape processing)
//! 3. anything `f64` parses → number
//! 4. `[a, b, c]` → array of scalars
//! 5. otherwise the token itself, as a bare string
//!
//! Array literals are split on raw commas, so a quoted element containing a
//! comma is cut in two. Elements are parsed without rule 4: `[[1, 2]]` yields
//! the strings `"[1"` and `"2]"`, not a nested array.

use crate::value::Value;

/// Parse a scalar token. Total: every input maps to some [`Value`].
pub fn parse_scalar(token: &str) -> Value {
    let token = token.trim();
    if let Some(value) = parse_leaf(token) {
        return value;
    }
    if let Some(inner) = strip_brackets(token) {
        return parse_array_body(inner);
    }
    Value::String(token.to_string())
}

/// Array element grammar: every rule except bracketed arrays.
fn parse_element(token: &str) -> Value {
    parse_leaf(token).unwrap_or_else(|| Value::String(token.to_string()))
}

/// Rules 1 to 3. `None` means the token is not a bool, quoted string or number.
fn parse_leaf(token: &str) -> Option<Value> {
    match token {
        "true" => return Some(Value::Bool(true)),
        "false" => return Some(Value::Bool(false)),
        _ => {}
    }

    if let Some(inner) = strip_quotes(token) {
        return Some(Value::String(inner.to_string()));
    }

    token.parse::<f64>().ok().map(Value::Number)
}

fn parse_array_body(inner: &str) -> Value {
    let inner = inner.trim();
    if inner.is_empty() {
        return Value::Array(Vec::new());
    }
    let items = inner
        .split(',')
        .map(|part| parse_element(part.trim()))
        .collect();
    Value::Array(items)
}

/// Inner text of `"..."`, length ≥ 2. Embedded quotes are left as-is.
fn strip_quotes(token: &str) -> Option<&str> {
    if token.len() >= 2 && token.starts_with('"') && token.ends_with('"') {
        Some(&token[1..token.len() - 1])
    } else {
        None
    }
}

fn strip_brackets(token: &str) -> Option<&str> {
    if token.len() >= 2 && token.starts_with('[') && token.ends_with(']') {
        Some(&token[1..token.len() - 1])
    } else {
        None
    }
}
