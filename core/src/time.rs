use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::error::EntryError;

/// Lenient hours parser: reads the longest numeric prefix, like a form field
/// that accepts "1.5" or "1.5h". Anything without a leading number, negative
/// or non-finite becomes 0.
pub fn parse_hours(input: &str) -> f64 {
    let input = input.trim();
    let candidate: String = input
        .chars()
        .take_while(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E'))
        .collect();

    // Shrink until something parses: "1.5e" -> "1.5"
    let mut end = candidate.len();
    while end > 0 {
        if let Ok(value) = candidate[..end].parse::<f64>() {
            return if value.is_finite() && value > 0.0 { value } else { 0.0 };
        }
        end -= 1;
    }
    0.0
}

/// Parses the date of a session relative to `today`.
///
/// Accepts `today`, `yesterday`, `-Nd` / `-Nw` (N days or weeks ago), a
/// weekday name (the most recent one, today included) and `YYYY-MM-DD`.
pub fn parse_entry_date(input: &str, today: NaiveDate) -> Result<NaiveDate, EntryError> {
    let lowered = input.trim().to_lowercase();

    match lowered.as_str() {
        "today" | "tod" => return Ok(today),
        "yesterday" | "yest" => return Ok(today - Duration::days(1)),
        _ => {}
    }

    if let Some(rest) = lowered.strip_prefix('-') {
        if rest.len() >= 2 {
            let (num_str, unit) = rest.split_at(rest.len() - 1);
            if let Ok(count) = num_str.parse::<i64>() {
                let back = match unit {
                    "d" => Duration::try_days(count),
                    "w" => Duration::try_weeks(count),
                    _ => None,
                };
                // An offset past the calendar range is not a date
                if let Some(date) = back.and_then(|b| today.checked_sub_signed(b)) {
                    return Ok(date);
                }
            }
        }
        return Err(EntryError::InvalidDate(input.to_string()));
    }

    if let Some(weekday) = parse_weekday_str(&lowered) {
        let days_back = (7 + today.weekday().num_days_from_monday() as i64
            - weekday.num_days_from_monday() as i64)
            % 7;
        return Ok(today - Duration::days(days_back));
    }

    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| EntryError::InvalidDate(input.to_string()))
}

fn parse_weekday_str(s: &str) -> Option<Weekday> {
    match s {
        "mon" | "monday" => Some(Weekday::Mon),
        "tue" | "tuesday" => Some(Weekday::Tue),
        "wed" | "wednesday" => Some(Weekday::Wed),
        "thu" | "thursday" => Some(Weekday::Thu),
        "fri" | "friday" => Some(Weekday::Fri),
        "sat" | "saturday" => Some(Weekday::Sat),
        "sun" | "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_hours() {
        assert_eq!(parse_hours("1.5"), 1.5);
        assert_eq!(parse_hours(" 2 "), 2.0);
        assert_eq!(parse_hours("1.5h"), 1.5);
        assert_eq!(parse_hours(".75"), 0.75);
        assert_eq!(parse_hours("1e"), 1.0);
    }

    #[test]
    fn test_parse_hours_degrades_to_zero() {
        assert_eq!(parse_hours(""), 0.0);
        assert_eq!(parse_hours("abc"), 0.0);
        assert_eq!(parse_hours("-1"), 0.0);
        assert_eq!(parse_hours("."), 0.0);
        assert_eq!(parse_hours("1e999"), 0.0);
    }

    #[test]
    fn test_parse_entry_date_keywords() {
        // 2024-01-10 is a Wednesday
        let today = ymd(2024, 1, 10);
        assert_eq!(parse_entry_date("today", today).unwrap(), today);
        assert_eq!(parse_entry_date("Yesterday", today).unwrap(), ymd(2024, 1, 9));
        assert_eq!(parse_entry_date("-3d", today).unwrap(), ymd(2024, 1, 7));
        assert_eq!(parse_entry_date("-1w", today).unwrap(), ymd(2024, 1, 3));
    }

    #[test]
    fn test_parse_entry_date_weekday_looks_back() {
        let today = ymd(2024, 1, 10);
        assert_eq!(parse_entry_date("wed", today).unwrap(), today);
        assert_eq!(parse_entry_date("mon", today).unwrap(), ymd(2024, 1, 8));
        assert_eq!(parse_entry_date("thursday", today).unwrap(), ymd(2024, 1, 4));
    }

    #[test]
    fn test_parse_entry_date_iso_and_errors() {
        let today = ymd(2024, 1, 10);
        assert_eq!(parse_entry_date("2023-12-31", today).unwrap(), ymd(2023, 12, 31));
        assert!(parse_entry_date("2023-13-01", today).is_err());
        assert!(parse_entry_date("-xd", today).is_err());
        assert!(parse_entry_date("someday", today).is_err());
    }

    #[test]
    fn test_parse_entry_date_offset_out_of_range() {
        let today = ymd(2024, 1, 10);
        for input in ["-100000000d", "-9223372036854775807d", "-20000000w", "-99999999999999999999d"] {
            assert_eq!(
                parse_entry_date(input, today),
                Err(EntryError::InvalidDate(input.to_string())),
                "{input}"
            );
        }
        // Still inside the calendar
        assert_eq!(parse_entry_date("-3650d", today).unwrap(), ymd(2014, 1, 12));
    }
}
