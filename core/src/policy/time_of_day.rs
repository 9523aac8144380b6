use super::model::{TimeOfDay, TimeOfDayEntry};

/// Parses `H:MM` or `HH:MM`. The minute must be exactly two digits.
pub fn parse_time_of_day(text: &str) -> Option<TimeOfDay> {
    let (h, m) = text.trim().split_once(':')?;
    if h.is_empty() || h.len() > 2 || m.len() != 2 {
        return None;
    }
    if !h.bytes().all(|b| b.is_ascii_digit()) || !m.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hour: u8 = h.parse().ok()?;
    let min: u8 = m.parse().ok()?;
    (hour < 24 && min < 60).then_some(TimeOfDay { hour, min })
}

/// Parses one line of the time-of-day field; unparsable text is kept raw.
pub fn parse_entry(text: &str) -> TimeOfDayEntry {
    match parse_time_of_day(text) {
        Some(t) => TimeOfDayEntry::Parsed(t),
        None => TimeOfDayEntry::Raw(text.trim().to_string()),
    }
}

/// Parses the multi-line time-of-day field. Blank lines are skipped.
pub fn parse_list(text: &str) -> Vec<TimeOfDayEntry> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(parse_entry)
        .collect()
}

/// Inverse of [`parse_list`], one entry per line.
pub fn format_list(entries: &[TimeOfDayEntry]) -> String {
    entries.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n")
}
