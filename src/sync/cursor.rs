//! Sync cursor: the first message id the view has not shown yet.
//!
//! The cursor is never stored. It is recomputed from the rendered message ids
//! each time, so a view seeded from an already rendered page resumes where
//! that page left off.

use crate::view::MessageList;

/// Parses one rendered id attribute. Anything that is not a non-negative
/// integer (after trimming) is rejected.
///
/// Stricter than a browser's `parseInt`: `"3abc"` and `"3.5"` are skipped
/// rather than read as `3`.
pub fn parse_message_id(raw: &str) -> Option<u64> {
    raw.trim().parse().ok()
}

/// Largest well-formed id among `ids`; malformed entries are skipped.
pub fn max_valid_id<'a>(ids: impl IntoIterator<Item = &'a str>) -> Option<u64> {
    ids.into_iter().filter_map(parse_message_id).max()
}

/// `max(rendered id) + 1`, or `0` when no valid id is rendered.
pub fn next_cursor(list: &MessageList) -> u64 {
    list.max_rendered_id().map_or(0, |id| id.saturating_add(1))
}
