//! HTML escaping for untrusted text.

use serde_json::Value;

/// Escape `& < > " ' /` as character references in a single pass.
///
/// Not idempotent: already-escaped input is escaped again
/// (`&amp;` becomes `&amp;amp;`). This is not a complete XSS defense.
pub fn sanitize_input(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape string values; every other value passes through unchanged.
pub fn sanitize_value(value: Value) -> Value {
    match value {
        Value::String(text) => Value::String(sanitize_input(&text)),
        other => other,
    }
}
