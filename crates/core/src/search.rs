//! Search and leaderboard constants and helpers.
//!
//! Lives in `core` (no I/O) so the repository layer and handlers agree on the
//! caps and on how user text becomes a `LIKE` pattern.

/// Maximum number of trees returned by the combined search.
pub const TREE_SEARCH_LIMIT: i64 = 20;

/// Maximum number of planters returned by the combined search.
pub const PLANTER_SEARCH_LIMIT: i64 = 10;

/// Number of planters on the stats leaderboard.
pub const TOP_PLANTERS_LIMIT: i64 = 10;

/// Normalize a raw query parameter.
///
/// Returns `None` when the parameter is absent or only whitespace, in which
/// case callers skip filtering (list) or short-circuit (search).
pub fn normalize_query(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|q| !q.is_empty())
}

/// Build a case-insensitive substring pattern for `ILIKE ... ESCAPE '\'`.
///
/// `%`, `_` and `\` in the user's text are escaped so they match literally.
pub fn contains_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
