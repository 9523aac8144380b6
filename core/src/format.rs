//! Display formatting for sizes, durations and timestamps.

use chrono::{DateTime, Local, Utc};

const BASE10_PREFIXES: [&str; 5] = ["", "K", "M", "G", "T"];
const BASE2_PREFIXES: [&str; 5] = ["", "Ki", "Mi", "Gi", "Ti"];

/// Rounds to one decimal place and drops a trailing `.0`.
fn nice_number(f: f64) -> String {
    let rounded = (f * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{:.1}", rounded)
    }
}

fn unit_string(size: f64, base: f64, prefixes: &[&str], suffix: &str) -> String {
    let mut f = size;
    let mut unit = 0;
    // switch units a little before reaching the base: 950 B reads as 1 KB
    while f >= 0.9 * base && unit + 1 < prefixes.len() {
        f /= base;
        unit += 1;
    }
    format!("{} {}{}", nice_number(f), prefixes.get(unit).copied().unwrap_or_default(), suffix)
}

/// Formats a byte count using base-1000 (`KB`, `MB`, ...) or base-1024
/// (`KiB`, `MiB`, ...) units.
pub fn size_display_name(size: i64, base2: bool) -> String {
    let sign = if size < 0 { "-" } else { "" };
    let magnitude = (size as f64).abs();
    let text = if base2 {
        unit_string(magnitude, 1024.0, &BASE2_PREFIXES, "B")
    } else {
        unit_string(magnitude, 1000.0, &BASE10_PREFIXES, "B")
    };
    format!("{}{}", sign, text)
}

/// Same as [`size_display_name`], but `""` for unknown sizes.
pub fn size_display_opt(size: Option<i64>, base2: bool) -> String {
    size.map(|s| size_display_name(s, base2)).unwrap_or_default()
}

/// Parses an RFC 3339 timestamp as sent by the backend.
pub fn parse_timestamp(ts: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(ts).ok().map(|t| t.with_timezone(&Utc))
}

/// Local `YYYY-MM-DD HH:MM:SS`, or `""` when absent or unparsable.
pub fn format_timestamp(ts: Option<&str>) -> String {
    ts.and_then(parse_timestamp)
        .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default()
}

/// Human-readable duration, e.g. `"850ms"`, `"12.5s"`, `"3m 4s"`, `"2h 0m 5s"`, `"1d 3h"`.
pub fn format_millis(ms: i64) -> String {
    let ms = ms.max(0);
    if ms < 1_000 {
        return format!("{}ms", ms);
    }
    if ms < 60_000 {
        return format!("{}s", nice_number(ms as f64 / 1000.0));
    }
    let total_secs = ms / 1000;
    let days = total_secs / 86_400;
    let hours = (total_secs % 86_400) / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    if days > 0 {
        format!("{}d {}h", days, hours)
    } else if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else {
        format!("{}m {}s", minutes, seconds)
    }
}

/// Elapsed time between `start` and `end`, or between `start` and `now` while
/// the operation is still running. `""` if `start` is missing.
pub fn format_duration(start: Option<&str>, end: Option<&str>, now: DateTime<Utc>) -> String {
    let Some(start) = start.and_then(parse_timestamp) else {
        return String::new();
    };
    let end = end.and_then(parse_timestamp).unwrap_or(now);
    format_millis((end - start).num_milliseconds())
}

/// `"in 5m 0s"` for future instants, `"5m 0s ago"` for past ones.
pub fn format_relative(ts: Option<&str>, now: DateTime<Utc>) -> String {
    let Some(t) = ts.and_then(parse_timestamp) else {
        return String::new();
    };
    let diff = (t - now).num_milliseconds();
    if diff >= 0 {
        format!("in {}", format_millis(diff))
    } else {
        format!("{} ago", format_millis(-diff))
    }
}

/// Seconds since the epoch (task log timestamps) as local `HH:MM:SS.mmm`.
pub fn format_log_time(ts: f64) -> String {
    let millis = (ts * 1000.0).round() as i64;
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|t| t.with_timezone(&Local).format("%H:%M:%S%.3f").to_string())
        .unwrap_or_default()
}

/// Counter value with units the backend attaches (`bytes` is formatted as a size).
pub fn format_counter(value: i64, units: &str, base2: bool) -> String {
    match units {
        "bytes" => size_display_name(value, base2),
        "" => value.to_string(),
        other => format!("{} {}", value, other),
    }
}
