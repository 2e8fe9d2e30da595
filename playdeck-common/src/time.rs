//! Timestamp and duration formatting utilities

use chrono::{DateTime, Utc};

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Format a timestamp the way log blocks and reports expect it
pub fn stamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Format a duration in seconds as `mm:ss`, or `h:mm:ss` above one hour.
///
/// Media durations are always positive integers, so there is no
/// negative-value handling here.
pub fn format_duration(seconds: u32) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_returns_valid_timestamp() {
        let timestamp = now();
        // Should be a reasonable timestamp (after year 2000)
        assert!(timestamp.timestamp() > 946_684_800);
    }

    #[test]
    fn test_stamp_format() {
        let ts = DateTime::from_timestamp(0, 0).unwrap();
        assert_eq!(stamp(ts), "1970-01-01 00:00:00");
    }

    #[test]
    fn test_format_duration_under_an_hour() {
        assert_eq!(format_duration(0), "00:00");
        assert_eq!(format_duration(59), "00:59");
        assert_eq!(format_duration(120), "02:00");
        assert_eq!(format_duration(3599), "59:59");
    }

    #[test]
    fn test_format_duration_over_an_hour() {
        assert_eq!(format_duration(3600), "1:00:00");
        assert_eq!(format_duration(3661), "1:01:01");
        assert_eq!(format_duration(7325), "2:02:05");
    }
}
