// Date helpers shared by the csv store, the web forms and the chart renderer.
use chrono::{NaiveDate, NaiveDateTime};

/// Calendar date format used in the backing CSV and in request fields.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parses `YYYY-MM-DD`, or a `YYYY-MM-DD HH:MM:SS` timestamp (time part dropped).
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(s, DATETIME_FORMAT).ok().map(|dt| dt.date()))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_plain() {
        assert_eq!(parse_date("2024-06-15"), NaiveDate::from_ymd_opt(2024, 6, 15));
    }

    #[test]
    fn test_parse_date_with_time() {
        assert_eq!(parse_date("2024-02-29 00:00:00"), NaiveDate::from_ymd_opt(2024, 2, 29));
    }

    #[test]
    fn test_parse_date_invalid() {
        assert_eq!(parse_date("2024-02-30"), None);
        assert_eq!(parse_date("15/06/2024"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_format_date_zero_pads() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(format_date(d), "2024-01-05");
    }
}
