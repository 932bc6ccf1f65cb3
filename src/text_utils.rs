use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

const NAIVE_DATE_TIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

const OFFSET_DATE_TIME_FORMATS: [&str; 2] = [
    "%Y-%m-%d %H:%M:%S%.f %:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
];

/// Parses the date notations found in post frontmatter into a UTC instant.
///
/// Accepted: RFC 3339, RFC 2822, `YYYY-MM-DD[ T]HH:MM[:SS[.fff]]` with an
/// optional offset, and plain `YYYY-MM-DD`. Values without an offset are
/// read as UTC, plain dates as UTC midnight. Anything else is `None`.
pub fn parse_timestamp(buf: &str) -> Option<DateTime<Utc>> {
    let buf = buf.trim();
    if buf.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(buf) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in OFFSET_DATE_TIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(buf, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(buf, format) {
            return Some(dt.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(buf, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }

    DateTime::parse_from_rfc2822(buf)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// `2025-01-15T10:00:00.000Z`
pub fn format_iso_millis(date_time: &DateTime<Utc>) -> String {
    date_time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// `2025-01-15`
pub fn format_date(date_time: &DateTime<Utc>) -> String {
    date_time.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn utc(y: i32, m: u32, d: u32, h: u32, mn: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, mn, s).unwrap()
    }

    #[test]
    fn test_parse_rfc3339() {
        assert_eq!(parse_timestamp("2025-01-15T10:00:00Z"), Some(utc(2025, 1, 15, 10, 0, 0)));
        assert_eq!(parse_timestamp("2025-01-15T10:00:00.000Z"), Some(utc(2025, 1, 15, 10, 0, 0)));
        assert_eq!(parse_timestamp("2025-01-15T12:00:00+02:00"), Some(utc(2025, 1, 15, 10, 0, 0)));
    }

    #[test]
    fn test_parse_naive_forms() {
        assert_eq!(parse_timestamp("2017-09-10 10:42:32.123").map(|d| format_date(&d)), Some("2017-09-10".to_string()));
        assert_eq!(parse_timestamp("2017-09-10 10:42:32"), Some(utc(2017, 9, 10, 10, 42, 32)));
        assert_eq!(parse_timestamp("2017-09-10T10:42"), Some(utc(2017, 9, 10, 10, 42, 0)));
        assert_eq!(parse_timestamp(" 2024-02-12 "), Some(utc(2024, 2, 12, 0, 0, 0)));
        assert_eq!(parse_timestamp("2024-02-12 22:54:00 +01:00"), Some(utc(2024, 2, 12, 21, 54, 0)));
    }

    #[test]
    fn test_parse_rfc2822() {
        assert_eq!(parse_timestamp("Tue, 2 Jan 2024 05:06:07 +0000"), Some(utc(2024, 1, 2, 5, 6, 7)));
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("null"), None);
        assert_eq!(parse_timestamp("not-a-date"), None);
        assert_eq!(parse_timestamp("2025-13-45"), None);
        assert_eq!(parse_timestamp("\"2025-01-15\""), None);
    }

    #[test]
    fn test_format() {
        let dt = utc(2025, 1, 15, 10, 0, 0);
        assert_eq!(format_iso_millis(&dt), "2025-01-15T10:00:00.000Z");
        assert_eq!(format_date(&dt), "2025-01-15");
    }
}
