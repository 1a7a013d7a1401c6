//! Date helper functions

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveDateTime};

/// Parse a frontmatter date string into a timestamp.
///
/// Accepts `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS`, a bare
/// `YYYY-MM-DD` (midnight) and full RFC 3339. Returns `None` for anything
/// else.
pub fn parse_date_string(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(date) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(date);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|date| date.naive_utc())
}

/// Format a date for human display
///
/// Dates within the last week render as a relative phrase ("2 hours ago",
/// "yesterday"), everything else as e.g. "January 15th 2024".
pub fn human_date(date: &NaiveDateTime) -> String {
    let age = Local::now().naive_local().signed_duration_since(*date);

    if age >= Duration::zero() && age < Duration::days(7) {
        return relative_phrase(age);
    }

    format!(
        "{} {}{} {}",
        date.format("%B"),
        date.day(),
        ordinal_suffix(date.day()),
        date.year()
    )
}

/// Relative phrasing for ages under a week
fn relative_phrase(age: Duration) -> String {
    let minutes = age.num_minutes();
    let hours = age.num_hours();
    let days = age.num_days();

    if age.num_seconds() < 60 {
        "a few seconds ago".to_string()
    } else if minutes == 1 {
        "a minute ago".to_string()
    } else if minutes < 60 {
        format!("{} minutes ago", minutes)
    } else if hours == 1 {
        "an hour ago".to_string()
    } else if hours < 24 {
        format!("{} hours ago", hours)
    } else if days == 1 {
        "yesterday".to_string()
    } else {
        format!("{} days ago", days)
    }
}

/// English ordinal suffix for a day of month
pub fn ordinal_suffix(day: u32) -> &'static str {
    match day % 100 {
        11..=13 => "th",
        _ => match day % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    }
}
