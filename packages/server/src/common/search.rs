//! Keyword search helpers shared by the filter layers.
//!
//! Keywords are matched as literal substrings, case-insensitively. The same
//! rule is expressed twice: as a Rust predicate and as an `ILIKE` pattern.

/// Escape character used in every `ILIKE ... ESCAPE` clause.
pub const LIKE_ESCAPE: char = '\\';

/// Normalize an optional keyword: blank input means "no filter".
pub fn normalize_keyword(keyword: Option<&str>) -> Option<String> {
    keyword
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
}

/// Escape `%`, `_` and the escape character itself so they match literally.
pub fn escape_like(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len());
    for ch in keyword.chars() {
        if ch == '%' || ch == '_' || ch == LIKE_ESCAPE {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(ch);
    }
    escaped
}

/// `ILIKE` pattern matching `keyword` anywhere in the column.
pub fn contains_pattern(keyword: &str) -> String {
    format!("%{}%", escape_like(keyword))
}

/// In-memory equivalent of `haystack ILIKE contains_pattern(keyword)`.
pub fn contains_ignore_case(haystack: &str, keyword: &str) -> bool {
    haystack.to_lowercase().contains(&keyword.to_lowercase())
}
