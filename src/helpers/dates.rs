//! Date display formatting

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Display format used across the portal
pub const DISPLAY_FORMAT: &str = "%d.%m.%Y";

const NAIVE_DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Format a backend date string as `DD.MM.YYYY`.
///
/// Accepts RFC 3339, ISO date-time without offset, and plain ISO dates. Empty
/// or unparseable input comes back unchanged.
pub fn date_to_str(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return input.to_string();
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return dt.format(DISPLAY_FORMAT).to_string();
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return dt.format(DISPLAY_FORMAT).to_string();
        }
    }

    match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        Ok(date) => date.format(DISPLAY_FORMAT).to_string(),
        Err(_) => input.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_plain_date() {
        assert_eq!(date_to_str("2024-03-05"), "05.03.2024");
    }

    #[test]
    fn formats_backend_datetime() {
        assert_eq!(date_to_str("2023-12-31T23:15:00"), "31.12.2023");
        assert_eq!(date_to_str("2023-12-31T23:15:00.1234567"), "31.12.2023");
        assert_eq!(date_to_str("2023-12-31 08:00:00"), "31.12.2023");
    }

    #[test]
    fn rfc3339_keeps_its_own_offset() {
        assert_eq!(date_to_str("2024-01-01T01:30:00+03:00"), "01.01.2024");
        assert_eq!(date_to_str("2024-06-30T12:00:00Z"), "30.06.2024");
    }

    #[test]
    fn passes_through_empty_and_garbage() {
        assert_eq!(date_to_str(""), "");
        assert_eq!(date_to_str("nope"), "nope");
        assert_eq!(date_to_str("2024-13-45"), "2024-13-45");
    }
}
