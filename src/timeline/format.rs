//! Display helpers: text truncation and relative-time labels.

use chrono::{DateTime, Utc};

/// Marker appended to truncated text.
pub const ELLIPSIS: &str = "...";

/// Absolute date format used once a timestamp is a week old or more.
pub const ABSOLUTE_DATE_FORMAT: &str = "%b %-d, %Y";

/// Truncate `text` to at most `limit` characters, appending [`ELLIPSIS`]
/// when anything was cut. Counts chars, never splits a code point.
pub fn truncate_text(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((byte_index, _)) => format!("{}{}", &text[..byte_index], ELLIPSIS),
        None => text.to_string(),
    }
}

/// Human-readable recency label for `timestamp` as seen from `now`.
///
/// - under one hour → `"Just now"`
/// - under a day → `"<N> hours ago"`
/// - under a week → `"<N> days ago"`
/// - otherwise the absolute date, e.g. `"Oct 6, 2026"`
///
/// The distance is absolute, so future timestamps never produce a negative count.
pub fn format_relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = (now - timestamp).abs();
    let hours = diff.num_hours();

    if hours < 1 {
        "Just now".to_string()
    } else if hours < 24 {
        format!("{} hours ago", hours)
    } else if diff.num_days() < 7 {
        format!("{} days ago", diff.num_days())
    } else {
        format_absolute_date(timestamp)
    }
}

pub fn format_absolute_date(timestamp: DateTime<Utc>) -> String {
    timestamp.format(ABSOLUTE_DATE_FORMAT).to_string()
}
