use chrono::{DateTime, NaiveDateTime};

/// Session uptime in the `2m 5s` style of the summary cards.
pub fn format_uptime(seconds: u64) -> String {
    format!("{}m {}s", seconds / 60, seconds % 60)
}

/// Wall-clock `HH:MM:SS` for a gateway timestamp.
///
/// The gateway emits ISO-8601 that may or may not carry an offset; anything
/// unparseable is shown verbatim rather than dropped.
pub fn format_clock(timestamp: &str) -> String {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(timestamp) {
        return parsed.format("%H:%M:%S").to_string();
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f") {
        return parsed.format("%H:%M:%S").to_string();
    }
    timestamp.to_string()
}
