//! Formatting helpers for durations and amounts shown in tables and
//! summaries.

use chrono::Duration;

/// Formats a duration as "H:MM" for preview tables (e.g. 2h30m → "2:30").
/// Negative durations clamp to "0:00".
pub fn format_duration(duration: &Duration) -> String {
    let hours = duration.num_hours();
    let mins = duration.num_minutes() % 60;
    format!("{}:{:02}", hours.max(0), mins.max(0))
}

/// Formats fractional hours with two decimal places, as used in CSV exports
/// and billing totals.
pub fn format_hours(hours: f64) -> String {
    format!("{:.2}", hours)
}

/// Formats a duration given in fractional hours as "H:MM".
pub fn format_hours_clock(hours: f64) -> String {
    let whole = hours.max(0.0) as i64;
    let mins = ((hours.max(0.0) - whole as f64) * 60.0).round() as i64;
    // 59.6 minutes rounds up to the next hour, not to ":60".
    if mins == 60 {
        format!("{}:00", whole + 1)
    } else {
        format!("{}:{:02}", whole, mins)
    }
}

/// Truncates a description for table display, appending an ellipsis when
/// content was cut.
pub fn truncate_description(description: &str, max_len: usize) -> String {
    if description.chars().count() <= max_len {
        description.to_string()
    } else {
        let cut: String = description.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
