//! Legacy `DD-MM-YYYY[ HH:MM]` date handling.
//!
//! The warehouse API reports Clean Decant Dates as free text. Everything that
//! reads or displays them goes through [`parse_legacy_date`] and
//! [`format_legacy_date`].

use chrono::{NaiveDate, NaiveDateTime};

use crate::errors::CoreError;

const DATE_TIME_FORMATS: [&str; 2] = ["%d-%m-%Y %H:%M", "%d-%m-%Y %H:%M:%S"];
const DATE_FORMAT: &str = "%d-%m-%Y";

const DISPLAY_DATE_TIME: &str = "%a %d %b %H:%M";
const DISPLAY_DATE: &str = "%a %d %b";

/// Parse a legacy date string into a comparable timestamp.
///
/// A date without a time component is taken as midnight.
///
/// # Errors
///
/// Returns [`CoreError::InvalidDate`] if the input matches none of the
/// accepted layouts.
pub fn parse_legacy_date(input: &str) -> Result<NaiveDateTime, CoreError> {
    let trimmed = input.trim();
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| CoreError::InvalidDate(input.to_string()))
}

/// Format a legacy date for display: `07-05-2025 02:07` → `Wed 07 May 02:07`.
///
/// Date-only input drops the time. Malformed input is returned unchanged.
#[must_use]
pub fn format_legacy_date(input: &str) -> String {
    let trimmed = input.trim();
    if let Some(dt) = DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
    {
        return dt.format(DISPLAY_DATE_TIME).to_string();
    }
    match NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        Ok(date) => date.format(DISPLAY_DATE).to_string(),
        Err(_) => input.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_date_and_time() {
        let dt = parse_legacy_date("07-05-2025 02:07").unwrap();
        assert_eq!((dt.day(), dt.month(), dt.year()), (7, 5, 2025));
        assert_eq!((dt.hour(), dt.minute()), (2, 7));
    }

    #[test]
    fn date_only_is_midnight() {
        let dt = parse_legacy_date("31-12-2024").unwrap();
        assert_eq!((dt.hour(), dt.minute()), (0, 0));
    }

    #[test]
    fn parse_rejects_iso_and_garbage() {
        assert!(parse_legacy_date("2025-05-07 02:07").is_err());
        assert!(parse_legacy_date("not a date").is_err());
        assert!(parse_legacy_date("").is_err());
        assert!(parse_legacy_date("32-01-2025 10:00").is_err());
    }

    #[test]
    fn parsed_dates_order_chronologically() {
        let earlier = parse_legacy_date("28-02-2025 23:59").unwrap();
        let later = parse_legacy_date("01-03-2025 00:00").unwrap();
        assert!(earlier < later);
    }

    #[test]
    fn formats_weekday_day_month_time() {
        assert_eq!(format_legacy_date("07-05-2025 02:07"), "Wed 07 May 02:07");
    }

    #[test]
    fn format_is_deterministic() {
        let first = format_legacy_date("07-05-2025 02:07");
        let second = format_legacy_date("07-05-2025 02:07");
        assert_eq!(first, second);
        assert!(first.contains("07"));
        assert!(first.contains("May"));
        assert!(first.contains("02:07"));
    }

    #[test]
    fn format_date_only_omits_time() {
        assert_eq!(format_legacy_date("07-05-2025"), "Wed 07 May");
    }

    #[test]
    fn malformed_input_is_returned_unchanged() {
        assert_eq!(format_legacy_date("garbage"), "garbage");
        assert_eq!(format_legacy_date(" 2025/05/07 "), " 2025/05/07 ");
        assert_eq!(format_legacy_date(""), "");
    }
}
