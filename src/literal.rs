//! Literal encoder - renders JSON values as SQL literal text

use serde_json::Value;

/// Encode a value as an SQL literal.
///
/// Strings are single-quoted with embedded quotes doubled, arrays become a
/// parenthesized list (the form `IN` expects) and objects are stored as their
/// JSON text.
///
/// # Examples
/// ```rust
/// use serde_json::json;
/// use sqlite_easy::literal::encode;
///
/// assert_eq!(encode(&json!("O'Brien")), "'O''Brien'");
/// assert_eq!(encode(&json!([1, "a", null])), "(1, 'a', NULL)");
/// ```
pub fn encode(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(true) => "TRUE".to_string(),
        Value::Bool(false) => "FALSE".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => quote(s),
        Value::Array(items) => format!("({})", encode_list(items)),
        Value::Object(_) => quote(&value.to_string()),
    }
}

/// Encode each value and join them with `", "`.
pub fn encode_list(values: &[Value]) -> String {
    values.iter().map(encode).collect::<Vec<_>>().join(", ")
}

/// SQLite stops reading SQL text at a NUL byte, so NULs are spliced in with
/// `char(0)` and the whole concatenation is parenthesized.
fn quote(s: &str) -> String {
    if !s.contains('\0') {
        return format!("'{}'", s.replace('\'', "''"));
    }
    let pieces = s
        .split('\0')
        .map(|piece| format!("'{}'", piece.replace('\'', "''")))
        .collect::<Vec<_>>();
    format!("({})", pieces.join(" || char(0) || "))
}
