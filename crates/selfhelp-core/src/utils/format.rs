use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parse the timestamp shapes the backend sends: RFC 3339, a zone-less
/// local date-time, or a bare date.
fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Format a date string as e.g. `Mar 05, 2024`
pub fn format_date(value: &str) -> String {
    match parse_timestamp(value) {
        Some(dt) => dt.format("%b %d, %Y").to_string(),
        None => "Invalid date".to_string(),
    }
}

/// Format the time of a timestamp as e.g. `02:30 PM`
pub fn format_time(value: &str) -> String {
    match parse_timestamp(value) {
        Some(dt) => dt.format("%I:%M %p").to_string(),
        None => "Invalid time".to_string(),
    }
}

/// Whole days from `today` until `target`; negative once the date has passed
pub fn days_left(target: NaiveDate, today: NaiveDate) -> i64 {
    (target - today).num_days()
}

/// Percentage of `total` reached, rounded and capped at 100
pub fn calculate_progress(current: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let percent = (f64::from(current) / f64::from(total) * 100.0).round() as u32;
    percent.min(100)
}

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_text(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-05"), "Mar 05, 2024");
        assert_eq!(format_date("2024-03-05T14:30:00"), "Mar 05, 2024");
        assert_eq!(format_date("2024-03-05T14:30:00.123Z"), "Mar 05, 2024");
        assert_eq!(format_date("yesterday"), "Invalid date");
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time("2024-03-05T14:30:00"), "02:30 PM");
        assert_eq!(format_time("nope"), "Invalid time");
    }

    #[test]
    fn test_days_left() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let target = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
        assert_eq!(days_left(target, today), 10);
        assert_eq!(days_left(today, target), -10);
    }

    #[test]
    fn test_calculate_progress() {
        assert_eq!(calculate_progress(1, 3), 33);
        assert_eq!(calculate_progress(2, 3), 67);
        assert_eq!(calculate_progress(5, 4), 100);
        assert_eq!(calculate_progress(5, 0), 0);
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("Hello", 10), "Hello");
        assert_eq!(truncate_text("Hello World", 5), "Hello...");
        assert_eq!(truncate_text("", 3), "");
    }
}
