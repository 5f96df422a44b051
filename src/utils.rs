//! Small helpers shared across the pipeline.
//!
//! - Date defaults for the search window
//! - String truncation for log previews

use chrono::{Duration, Local, NaiveDate};

/// Today's date in the local timezone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Resolve an optional `from`/`to` pair against `today`.
///
/// A missing `from` becomes the day before `today`; a missing `to` becomes
/// `today` itself.
pub fn resolve_date_range(
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    today: NaiveDate,
) -> (NaiveDate, NaiveDate) {
    let from = from.unwrap_or(today - Duration::days(1));
    let to = to.unwrap_or(today);
    (from, to)
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to `max` characters with an ellipsis and a count of
/// the dropped bytes appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}…(+{} bytes)", &s[..cut], s.len() - cut),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_defaults_are_yesterday_and_today() {
        let (from, to) = resolve_date_range(None, None, date(2025, 5, 6));
        assert_eq!(from.to_string(), "2025-05-05");
        assert_eq!(to.to_string(), "2025-05-06");
    }

    #[test]
    fn test_defaults_cross_month_and_year() {
        let (from, _) = resolve_date_range(None, None, date(2025, 3, 1));
        assert_eq!(from, date(2025, 2, 28));

        let (from, to) = resolve_date_range(None, None, date(2025, 1, 1));
        assert_eq!(from.to_string(), "2024-12-31");
        assert_eq!(to.to_string(), "2025-01-01");
    }

    #[test]
    fn test_explicit_dates_win() {
        let (from, to) = resolve_date_range(
            Some(date(2024, 1, 1)),
            Some(date(2024, 1, 31)),
            date(2025, 5, 6),
        );
        assert_eq!(from, date(2024, 1, 1));
        assert_eq!(to, date(2024, 1, 31));
    }

    #[test]
    fn test_truncate_for_log_short_string() {
        assert_eq!(truncate_for_log("Hello, world!", 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_multibyte() {
        let result = truncate_for_log("ééé", 1);
        assert_eq!(result, "é…(+4 bytes)");
    }
}
