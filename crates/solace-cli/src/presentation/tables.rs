//! Table formatting utilities for CLI output.

use chrono::{DateTime, Local};

/// Truncates a string to at most `max_chars` characters, adding "..." if
/// needed.
///
/// # Examples
///
/// ```rust
/// use solace_cli::presentation::truncate_string;
///
/// assert_eq!(truncate_string("Hello", 10), "Hello");
/// assert_eq!(truncate_string("Hello World", 8), "Hello...");
/// ```
pub fn truncate_string(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Print a horizontal separator line.
pub fn print_separator(width: usize) {
    println!("{}", "-".repeat(width));
}

/// Selection marker for catalog listings.
pub const fn marker(selected: bool) -> char {
    if selected { '*' } else { ' ' }
}

/// Render epoch milliseconds as a local date and time.
pub fn format_timestamp(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis).map_or_else(
        || "-".to_string(),
        |utc| utc.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
    )
}
