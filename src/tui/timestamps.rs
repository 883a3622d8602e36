use chrono::{DateTime, Local, TimeZone};

/// Card footer text: `"30h"` → `"Updated 30h ago"`
pub fn format_updated(last_updated: &str) -> String {
    format!("Updated {} ago", last_updated)
}

/// Status-bar sync time, 24-hour `HH:MM`
pub fn format_sync<Tz: TimeZone>(last_sync: Option<&DateTime<Tz>>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match last_sync {
        Some(time) => format!("Synced {}", time.format("%H:%M")),
        None => "Not synced".to_string(),
    }
}

/// Convenience for the store's local timestamps
pub fn format_local_sync(last_sync: Option<DateTime<Local>>) -> String {
    format_sync(last_sync.as_ref())
}
