//! Detection of SQL expressions that may be used as column defaults unquoted

use once_cell::sync::Lazy;
use regex::Regex;

/// Function calls like datetime('now'), strftime('%s', 'now')
static SQL_FUNCTION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)^[a-z_][a-z0-9_]*\s*\(.*\)$").unwrap());

/// Expressions wrapped in parentheses
static SQL_EXPRESSION_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)^\(.*\)$").unwrap());

/// Keywords SQLite accepts bare in a DEFAULT clause
static SQL_KEYWORDS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "CURRENT_TIMESTAMP",
        "CURRENT_DATE",
        "CURRENT_TIME",
        "NULL",
        "TRUE",
        "FALSE",
    ]
});

/// Kind of SQL expression recognised by [`check_sql_expression`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpressionKind {
    Parenthesized,
    FunctionCall,
    Keyword,
}

/// Classify `value` as an SQL expression, or `None` for plain text.
pub fn check_sql_expression(value: &str) -> Option<ExpressionKind> {
    let trimmed = value.trim();

    if SQL_EXPRESSION_REGEX.is_match(trimmed) {
        return Some(ExpressionKind::Parenthesized);
    }

    if SQL_FUNCTION_REGEX.is_match(trimmed) {
        return Some(ExpressionKind::FunctionCall);
    }

    let upper = trimmed.to_uppercase();
    if SQL_KEYWORDS.iter().any(|keyword| upper == *keyword) {
        return Some(ExpressionKind::Keyword);
    }

    None
}

/// Check if a value is an SQL expression that should not be quoted
///
/// # Examples
/// ```rust
/// use sqlite_easy::schema::is_sql_expression;
///
/// assert!(is_sql_expression("datetime('now')"));
/// assert!(is_sql_expression("CURRENT_TIMESTAMP"));
/// assert!(is_sql_expression("(strftime('%s', 'now'))"));
/// assert!(!is_sql_expression("hello world"));
/// ```
pub fn is_sql_expression(value: &str) -> bool {
    check_sql_expression(value).is_some()
}

/// Render an expression for a `DEFAULT` clause. SQLite only accepts function
/// calls there when they are parenthesized.
pub(crate) fn default_clause(value: &str) -> Option<String> {
    let trimmed = value.trim();
    match check_sql_expression(trimmed)? {
        ExpressionKind::FunctionCall => Some(format!("({})", trimmed)),
        ExpressionKind::Keyword => Some(trimmed.to_uppercase()),
        ExpressionKind::Parenthesized => Some(trimmed.to_string()),
    }
}
