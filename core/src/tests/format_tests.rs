#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};

    use crate::format::*;

    fn at(ts: &str) -> DateTime<Utc> {
        parse_timestamp(ts).unwrap()
    }

    #[test]
    fn test_size_display_name_base10() {
        assert_eq!(size_display_name(1_024_000, false), "1 MB");
        assert_eq!(size_display_name(512, false), "512 B");
        assert_eq!(size_display_name(0, false), "0 B");
        assert_eq!(size_display_name(1_500, false), "1.5 KB");
        assert_eq!(size_display_name(2_000_000_000, false), "2 GB");
    }

    #[test]
    fn test_size_display_name_base2() {
        assert_eq!(size_display_name(1_048_576, true), "1 MiB");
        assert_eq!(size_display_name(1_536, true), "1.5 KiB");
        assert_eq!(size_display_name(1_023, true), "1 KiB");
    }

    #[test]
    fn test_size_switches_unit_at_ninety_percent() {
        // 0.9 * 1000 = 900
        assert_eq!(size_display_name(899, false), "899 B");
        assert_eq!(size_display_name(950, false), "1 KB");
        assert_eq!(size_display_name(900, false), "0.9 KB");
    }

    #[test]
    fn test_size_stops_at_largest_unit() {
        assert_eq!(size_display_name(5_000_000_000_000_000, false), "5000 TB");
    }

    #[test]
    fn test_size_negative_and_optional() {
        assert_eq!(size_display_name(-2048, true), "-2 KiB");
        assert_eq!(size_display_opt(None, false), "");
        assert_eq!(size_display_opt(Some(10), false), "10 B");
    }

    #[test]
    fn test_format_millis() {
        assert_eq!(format_millis(850), "850ms");
        assert_eq!(format_millis(12_500), "12.5s");
        assert_eq!(format_millis(184_000), "3m 4s");
        assert_eq!(format_millis(7_205_000), "2h 0m 5s");
        assert_eq!(format_millis(97_200_000), "1d 3h");
        assert_eq!(format_millis(-5), "0ms");
    }

    #[test]
    fn test_format_duration_uses_now_while_running() {
        let now = at("2024-05-01T10:05:00Z");
        assert_eq!(format_duration(Some("2024-05-01T10:00:00Z"), None, now), "5m 0s");
        assert_eq!(
            format_duration(Some("2024-05-01T10:00:00Z"), Some("2024-05-01T10:00:30Z"), now),
            "30s"
        );
        assert_eq!(format_duration(None, None, now), "");
    }

    #[test]
    fn test_format_relative() {
        let now = at("2024-05-01T10:00:00Z");
        assert_eq!(format_relative(Some("2024-05-01T10:05:00Z"), now), "in 5m 0s");
        assert_eq!(format_relative(Some("2024-05-01T09:59:00Z"), now), "1m 0s ago");
        assert_eq!(format_relative(Some("garbage"), now), "");
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(None), "");
        assert_eq!(format_timestamp(Some("not a date")), "");
        let formatted = format_timestamp(Some("2024-05-15T10:00:00Z"));
        assert_eq!(formatted.len(), "2024-05-01 10:00:00".len());
        assert!(formatted.starts_with("2024-05-1"));
    }

    #[test]
    fn test_format_counter() {
        assert_eq!(format_counter(1_048_576, "bytes", true), "1 MiB");
        assert_eq!(format_counter(42, "", false), "42");
        assert_eq!(format_counter(3, "files", false), "3 files");
    }
}
