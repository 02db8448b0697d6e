use chrono::{DateTime, Local};

/// Clamps adapter error text to something a toast can hold.
pub fn shorten_for_toast(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

pub fn format_last_scan(ts: &DateTime<Local>) -> String {
    ts.format("%H:%M:%S").to_string()
}
