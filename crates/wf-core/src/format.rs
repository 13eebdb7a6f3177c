/// Display helpers shared by the TUI pages and the CLI listings
use chrono::{DateTime, Utc};

/// `45s`, `2m 05s`
pub fn format_duration(sec: u64) -> String {
    if sec < 60 {
        return format!("{sec}s");
    }
    format!("{}m {:02}s", sec / 60, sec % 60)
}

/// `03 Feb 2026, 09:15`
pub fn format_date(dt: &DateTime<Utc>) -> String {
    dt.format("%d %b %Y, %H:%M").to_string()
}

/// `03 Feb, 09:15`
pub fn format_short_date(dt: &DateTime<Utc>) -> String {
    dt.format("%d %b, %H:%M").to_string()
}

/// `03 Feb, 09:15:42`
pub fn format_capture_time(dt: &DateTime<Utc>) -> String {
    dt.format("%d %b, %H:%M:%S").to_string()
}

/// Keep the first 6 and last 4 characters of a token
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    let head: String = chars.iter().take(6).collect();
    let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
    format!("{head}{}{tail}", "•".repeat(16))
}

/// `1 task`, `3 tasks`
pub fn pluralize(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}
