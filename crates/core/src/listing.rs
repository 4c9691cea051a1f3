//! Pagination and search helpers for the fallen record listing.

/// Default page size for `GET /api/fallen`.
pub const DEFAULT_LIST_LIMIT: i64 = 24;

/// Maximum page size for `GET /api/fallen`.
pub const MAX_LIST_LIMIT: i64 = 100;

/// Maximum accepted length of the `q` search parameter, in characters.
pub const MAX_QUERY_LENGTH: usize = 100;

/// Clamp a user-provided limit to `[1, max]`, using `default` when absent.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/// Turn a free-text query into an `ILIKE` substring pattern.
///
/// Blank input yields `None`. `%`, `_` and `\` are escaped so they match
/// literally.
pub fn search_pattern(query: Option<&str>) -> Result<Option<String>, String> {
    let Some(q) = query.map(str::trim).filter(|q| !q.is_empty()) else {
        return Ok(None);
    };
    if q.chars().count() > MAX_QUERY_LENGTH {
        return Err(format!(
            "Search query exceeds maximum length of {MAX_QUERY_LENGTH} characters"
        ));
    }

    let mut pattern = String::with_capacity(q.len() + 2);
    pattern.push('%');
    for ch in q.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    Ok(Some(pattern))
}
