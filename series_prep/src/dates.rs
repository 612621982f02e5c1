//! Date parsing for index labels
//!
//! Best-effort parsing accepts ISO 8601 / RFC 3339 forms, compact `YYYYMMDD`,
//! partial `YYYY-MM` and `YYYY`, month-name forms and numeric dates separated
//! by `/`, `-` or `.`. Numeric dates whose first field is not a four-digit
//! year are read in the configured `DateOrder` only.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Field order of ambiguous numeric dates such as `01/02/2023`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateOrder {
    /// `01/02/2023` is January 2nd
    #[default]
    MonthFirst,
    /// `01/02/2023` is February 1st
    DayFirst,
}

const ISO_DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
];

const ISO_DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];

const NAMED_MONTH_FORMATS: [&str; 9] = [
    "%d %B %Y",
    "%d %b %Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d-%b-%Y",
    "%d-%B-%Y",
    "%a, %d %b %Y",
];

const TIME_FORMATS: [&str; 2] = ["%H:%M:%S%.f", "%H:%M"];

fn midnight(date: NaiveDate) -> Option<NaiveDateTime> {
    date.and_hms_opt(0, 0, 0)
}

fn starts_with_year(s: &str) -> bool {
    s.len() >= 4 && s.as_bytes()[..4].iter().all(u8::is_ascii_digit)
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Parse a label without a known format
///
/// Returns `None` for blank or unparseable labels.
pub fn parse_date(text: &str, order: DateOrder) -> Option<NaiveDateTime> {
    let s = text.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    if starts_with_year(s) {
        if let Some(dt) = parse_year_first(s) {
            return Some(dt);
        }
    }

    if let Some(date) = NAMED_MONTH_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
    {
        return midnight(date);
    }

    let (date_part, time_part) = match s.split_once(' ') {
        Some((date, time)) => (date, Some(time.trim())),
        None => (s, None),
    };
    let date = parse_ordered(date_part, order)?;
    match time_part {
        None => midnight(date),
        Some(time) => {
            let time = TIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveTime::parse_from_str(time, fmt).ok())?;
            Some(date.and_time(time))
        }
    }
}

fn parse_year_first(s: &str) -> Option<NaiveDateTime> {
    if let Some(dt) = ISO_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Some(dt);
    }
    if let Some(date) = ISO_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
    {
        return midnight(date);
    }

    match s.len() {
        8 if all_digits(s) => midnight(NaiveDate::from_ymd_opt(
            s[..4].parse().ok()?,
            s[4..6].parse().ok()?,
            s[6..].parse().ok()?,
        )?),
        7 => {
            let (year, month) = s.split_once('-')?;
            if !all_digits(year) || !all_digits(month) {
                return None;
            }
            midnight(NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)?)
        }
        4 if all_digits(s) => midnight(NaiveDate::from_ymd_opt(s.parse().ok()?, 1, 1)?),
        _ => None,
    }
}

fn parse_ordered(s: &str, order: DateOrder) -> Option<NaiveDate> {
    let sep = s.chars().find(|c| matches!(c, '/' | '-' | '.'))?;
    let fields: Vec<&str> = s.split(sep).collect();
    if fields.len() != 3 || !fields.iter().all(|f| all_digits(f)) {
        return None;
    }

    let year_field = fields[2];
    let year: i32 = match year_field.len() {
        2 => {
            let yy: i32 = year_field.parse().ok()?;
            if yy < 69 {
                2000 + yy
            } else {
                1900 + yy
            }
        }
        4 => year_field.parse().ok()?,
        _ => return None,
    };

    let first: u32 = fields[0].parse().ok()?;
    let second: u32 = fields[1].parse().ok()?;
    let (month, day) = match order {
        DateOrder::MonthFirst => (first, second),
        DateOrder::DayFirst => (second, first),
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parse a label with an explicit strftime-style format
///
/// Formats without a time component yield midnight; formats with an offset
/// (`%z`) keep the local wall-clock time.
pub fn parse_with_format(text: &str, format: &str) -> Option<NaiveDateTime> {
    let s = text.trim();
    if s.is_empty() {
        return None;
    }

    NaiveDateTime::parse_from_str(s, format)
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, format)
                .ok()
                .and_then(midnight)
        })
        .or_else(|| {
            DateTime::parse_from_str(s, format)
                .ok()
                .map(|dt| dt.naive_local())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_iso_forms() {
        let order = DateOrder::MonthFirst;
        assert_eq!(parse_date("2023-01-05", order), Some(ymd(2023, 1, 5)));
        assert_eq!(parse_date(" 2023/01/05 ", order), Some(ymd(2023, 1, 5)));
        assert_eq!(parse_date("20230105", order), Some(ymd(2023, 1, 5)));
        assert_eq!(parse_date("2023-03", order), Some(ymd(2023, 3, 1)));
        assert_eq!(parse_date("2023", order), Some(ymd(2023, 1, 1)));
        assert_eq!(
            parse_date("2023-01-05 13:45:10", order),
            ymd(2023, 1, 5).date().and_hms_opt(13, 45, 10)
        );
        assert_eq!(
            parse_date("2023-01-05T08:00:00+02:00", order),
            ymd(2023, 1, 5).date().and_hms_opt(8, 0, 0)
        );
    }

    #[test]
    fn test_month_names() {
        let order = DateOrder::DayFirst;
        assert_eq!(parse_date("5 March 2023", order), Some(ymd(2023, 3, 5)));
        assert_eq!(parse_date("Mar 5, 2023", order), Some(ymd(2023, 3, 5)));
        assert_eq!(parse_date("05-Mar-2023", order), Some(ymd(2023, 3, 5)));
    }

    #[test]
    fn test_numeric_dates_follow_order() {
        assert_eq!(
            parse_date("01/02/2023", DateOrder::MonthFirst),
            Some(ymd(2023, 1, 2))
        );
        assert_eq!(
            parse_date("01/02/2023", DateOrder::DayFirst),
            Some(ymd(2023, 2, 1))
        );
        assert_eq!(parse_date("31.12.99", DateOrder::DayFirst), Some(ymd(1999, 12, 31)));
        assert_eq!(
            parse_date("12-31-2023 06:30", DateOrder::MonthFirst),
            ymd(2023, 12, 31).date().and_hms_opt(6, 30, 0)
        );
    }

    #[test]
    fn test_order_is_never_swapped() {
        assert_eq!(parse_date("13/01/2023", DateOrder::MonthFirst), None);
        assert_eq!(parse_date("01/13/2023", DateOrder::DayFirst), None);
    }

    #[test]
    fn test_garbage() {
        let order = DateOrder::MonthFirst;
        assert_eq!(parse_date("", order), None);
        assert_eq!(parse_date("   ", order), None);
        assert_eq!(parse_date("not a date", order), None);
        assert_eq!(parse_date("2023-02-30", order), None);
        assert_eq!(parse_date("01-02-3", order), None);
    }

    #[test]
    fn test_explicit_format() {
        assert_eq!(parse_with_format("05/01/2023", "%d/%m/%Y"), Some(ymd(2023, 1, 5)));
        assert_eq!(
            parse_with_format("2023-01-05 07:15", "%Y-%m-%d %H:%M"),
            ymd(2023, 1, 5).date().and_hms_opt(7, 15, 0)
        );
        assert_eq!(parse_with_format("2023-01-05", "%d/%m/%Y"), None);
        assert_eq!(parse_with_format("", "%Y-%m-%d"), None);
    }
}
