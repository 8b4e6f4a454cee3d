//! View helpers for rendering posts.

use chrono::{DateTime, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;

/// Human-friendly age of `then`: "just now", "5m ago", "3h ago", "2d ago",
/// falling back to a long date such as "March 4, 2024" after a week.
pub fn format_relative_time(then: DateTime<Utc>) -> String {
    relative_to(then, Utc::now())
}

fn relative_to(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds();

    match seconds {
        s if s < MINUTE => "just now".to_string(),
        s if s < HOUR => format!("{}m ago", s / MINUTE),
        s if s < DAY => format!("{}h ago", s / HOUR),
        s if s < WEEK => format!("{}d ago", s / DAY),
        _ => then.format("%B %-d, %Y").to_string(),
    }
}

/// Cut `text` to `max` characters, appending "..." when anything was removed.
pub fn truncate_text(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}
