//! Fixed sampling frequencies
//!
//! Frequencies are written with pandas-style aliases and an optional integer
//! multiple, e.g. `"D"`, `"15min"`, `"W-MON"`, `"MS"`, `"2Q"`.

use crate::error::{Result, SeriesError};
use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sampling frequency of a regular time grid
///
/// Calendar frequencies are anchored: month/quarter/year ends fall on the
/// last day of the period, starts on the first, weeks on the anchor weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Frequency {
    Second(u32),
    Minute(u32),
    Hour(u32),
    Day(u32),
    BusinessDay(u32),
    Week(u32, Weekday),
    MonthStart(u32),
    MonthEnd(u32),
    QuarterStart(u32),
    QuarterEnd(u32),
    YearStart(u32),
    YearEnd(u32),
}

impl Frequency {
    /// Number of base periods per step
    pub fn multiple(&self) -> u32 {
        match *self {
            Frequency::Second(n)
            | Frequency::Minute(n)
            | Frequency::Hour(n)
            | Frequency::Day(n)
            | Frequency::BusinessDay(n)
            | Frequency::Week(n, _)
            | Frequency::MonthStart(n)
            | Frequency::MonthEnd(n)
            | Frequency::QuarterStart(n)
            | Frequency::QuarterEnd(n)
            | Frequency::YearStart(n)
            | Frequency::YearEnd(n) => n,
        }
    }

    /// Conventional seasonal period of the base frequency
    pub fn seasonal_period(&self) -> usize {
        match self {
            Frequency::Second(_) | Frequency::Minute(_) => 60,
            Frequency::Hour(_) => 24,
            Frequency::Day(_) => 7,
            Frequency::BusinessDay(_) => 5,
            Frequency::Week(..) => 52,
            Frequency::MonthStart(_) | Frequency::MonthEnd(_) => 12,
            Frequency::QuarterStart(_) | Frequency::QuarterEnd(_) => 4,
            Frequency::YearStart(_) | Frequency::YearEnd(_) => 1,
        }
    }

    fn tick(&self) -> Option<Duration> {
        let n = i64::from(self.multiple());
        match self {
            Frequency::Second(_) => Some(Duration::seconds(n)),
            Frequency::Minute(_) => Some(Duration::minutes(n)),
            Frequency::Hour(_) => Some(Duration::hours(n)),
            Frequency::Day(_) => Some(Duration::days(n)),
            _ => None,
        }
    }

    /// Whether `dt` lies on the grid anchor of this frequency
    pub fn is_on_offset(&self, dt: NaiveDateTime) -> bool {
        let date = dt.date();
        match self {
            Frequency::Second(_) | Frequency::Minute(_) | Frequency::Hour(_) | Frequency::Day(_) => {
                true
            }
            Frequency::BusinessDay(_) => !is_weekend(date),
            Frequency::Week(_, anchor) => date.weekday() == *anchor,
            Frequency::MonthStart(_) => date.day() == 1,
            Frequency::MonthEnd(_) => is_month_end(date),
            Frequency::QuarterStart(_) => date.day() == 1 && (date.month() - 1) % 3 == 0,
            Frequency::QuarterEnd(_) => is_month_end(date) && date.month() % 3 == 0,
            Frequency::YearStart(_) => date.day() == 1 && date.month() == 1,
            Frequency::YearEnd(_) => date.day() == 31 && date.month() == 12,
        }
    }

    /// First grid point at or after `dt`
    pub fn rollforward(&self, dt: NaiveDateTime) -> Option<NaiveDateTime> {
        if self.is_on_offset(dt) {
            return Some(dt);
        }

        let date = dt.date();
        let (year, month) = (date.year(), date.month());
        let rolled = match self {
            Frequency::BusinessDay(_) => {
                let mut next = date.succ_opt()?;
                while is_weekend(next) {
                    next = next.succ_opt()?;
                }
                next
            }
            Frequency::Week(_, anchor) => {
                let ahead = (7 + anchor.num_days_from_monday() - date.weekday().num_days_from_monday()) % 7;
                date.checked_add_signed(Duration::days(i64::from(ahead)))?
            }
            Frequency::MonthStart(_) => add_months(first_of_month(year, month)?, 1)?,
            Frequency::MonthEnd(_) => last_of_month(year, month)?,
            Frequency::QuarterStart(_) => {
                let quarter_start = first_of_month(year, (month - 1) / 3 * 3 + 1)?;
                add_months(quarter_start, 3)?
            }
            Frequency::QuarterEnd(_) => last_of_month(year, (month - 1) / 3 * 3 + 3)?,
            Frequency::YearStart(_) => NaiveDate::from_ymd_opt(year + 1, 1, 1)?,
            Frequency::YearEnd(_) => NaiveDate::from_ymd_opt(year, 12, 31)?,
            _ => date,
        };

        Some(NaiveDateTime::new(rolled, dt.time()))
    }

    /// The grid point one step after the on-offset point `dt`
    pub fn step(&self, dt: NaiveDateTime) -> Option<NaiveDateTime> {
        if let Some(tick) = self.tick() {
            return dt.checked_add_signed(tick);
        }

        let n = self.multiple();
        let date = dt.date();
        let (year, month) = (date.year(), date.month());
        let next = match self {
            Frequency::BusinessDay(_) => {
                let mut next = date;
                for _ in 0..n {
                    next = next.succ_opt()?;
                    while is_weekend(next) {
                        next = next.succ_opt()?;
                    }
                }
                next
            }
            Frequency::Week(..) => date.checked_add_signed(Duration::days(7 * i64::from(n)))?,
            Frequency::MonthStart(_) => add_months(first_of_month(year, month)?, n)?,
            Frequency::QuarterStart(_) => add_months(first_of_month(year, month)?, 3 * n)?,
            Frequency::YearStart(_) => add_months(first_of_month(year, month)?, 12 * n)?,
            Frequency::MonthEnd(_) => month_end_after(year, month, n)?,
            Frequency::QuarterEnd(_) => month_end_after(year, month, 3 * n)?,
            Frequency::YearEnd(_) => month_end_after(year, month, 12 * n)?,
            _ => return None,
        };

        Some(NaiveDateTime::new(next, dt.time()))
    }

    /// All grid points between `start` and `end`, both inclusive
    pub fn range(&self, start: NaiveDateTime, end: NaiveDateTime) -> Vec<NaiveDateTime> {
        let mut points = Vec::new();
        let mut current = self.rollforward(start);
        while let Some(point) = current {
            if point > end {
                break;
            }
            points.push(point);
            current = self.step(point);
        }
        points
    }

    /// Infer the frequency of strictly increasing timestamps
    ///
    /// Needs at least three points. Returns `None` when the spacing is not
    /// regular in either absolute or calendar terms.
    pub fn infer(timestamps: &[NaiveDateTime]) -> Option<Frequency> {
        if timestamps.len() < 3 {
            return None;
        }

        let deltas: Vec<Duration> = timestamps.windows(2).map(|w| w[1] - w[0]).collect();
        if deltas.iter().any(|d| *d <= Duration::zero()) {
            return None;
        }

        if deltas.iter().all(|d| *d == deltas[0]) {
            return infer_regular(timestamps[0], deltas[0]);
        }

        let time = timestamps[0].time();
        if timestamps.iter().any(|t| t.time() != time) {
            return None;
        }
        let dates: Vec<NaiveDate> = timestamps.iter().map(|t| t.date()).collect();

        if dates.iter().all(|d| !is_weekend(*d))
            && dates.windows(2).all(|w| {
                let gap = (w[1] - w[0]).num_days();
                gap == 1 || (gap == 3 && w[0].weekday() == Weekday::Fri)
            })
        {
            return Some(Frequency::BusinessDay(1));
        }

        let month_steps: Vec<i32> = dates
            .windows(2)
            .map(|w| month_index(w[1]) - month_index(w[0]))
            .collect();
        let step = month_steps[0];
        if step <= 0 || month_steps.iter().any(|m| *m != step) {
            return None;
        }
        let step = step as u32;

        if dates.iter().all(|d| is_month_end(*d)) {
            let month = dates[0].month();
            return Some(if step % 12 == 0 && month == 12 {
                Frequency::YearEnd(step / 12)
            } else if step % 3 == 0 && month % 3 == 0 {
                Frequency::QuarterEnd(step / 3)
            } else {
                Frequency::MonthEnd(step)
            });
        }

        if dates.iter().all(|d| d.day() == 1) {
            let month = dates[0].month();
            return Some(if step % 12 == 0 && month == 1 {
                Frequency::YearStart(step / 12)
            } else if step % 3 == 0 && (month - 1) % 3 == 0 {
                Frequency::QuarterStart(step / 3)
            } else {
                Frequency::MonthStart(step)
            });
        }

        None
    }

    fn code(&self) -> String {
        match self {
            Frequency::Second(_) => "S".to_string(),
            Frequency::Minute(_) => "min".to_string(),
            Frequency::Hour(_) => "H".to_string(),
            Frequency::Day(_) => "D".to_string(),
            Frequency::BusinessDay(_) => "B".to_string(),
            Frequency::Week(_, anchor) => format!("W-{}", anchor.to_string().to_uppercase()),
            Frequency::MonthStart(_) => "MS".to_string(),
            Frequency::MonthEnd(_) => "M".to_string(),
            Frequency::QuarterStart(_) => "QS".to_string(),
            Frequency::QuarterEnd(_) => "Q".to_string(),
            Frequency::YearStart(_) => "AS".to_string(),
            Frequency::YearEnd(_) => "A".to_string(),
        }
    }
}

fn infer_regular(first: NaiveDateTime, delta: Duration) -> Option<Frequency> {
    let seconds = delta.num_seconds();
    if delta != Duration::seconds(seconds) || seconds <= 0 {
        return None;
    }
    let count = |unit: i64| u32::try_from(seconds / unit).ok();

    if seconds % 604_800 == 0 {
        Some(Frequency::Week(count(604_800)?, first.date().weekday()))
    } else if seconds % 86_400 == 0 {
        Some(Frequency::Day(count(86_400)?))
    } else if seconds % 3_600 == 0 {
        Some(Frequency::Hour(count(3_600)?))
    } else if seconds % 60 == 0 {
        Some(Frequency::Minute(count(60)?))
    } else {
        Some(Frequency::Second(count(1)?))
    }
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

fn is_month_end(date: NaiveDate) -> bool {
    date.succ_opt().map_or(false, |next| next.month() != date.month())
}

fn month_index(date: NaiveDate) -> i32 {
    date.year() * 12 + date.month() as i32 - 1
}

fn first_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

fn last_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    add_months(first_of_month(year, month)?, 1)?.pred_opt()
}

fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}

fn month_end_after(year: i32, month: u32, months: u32) -> Option<NaiveDate> {
    let target = add_months(first_of_month(year, month)?, months)?;
    last_of_month(target.year(), target.month())
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.multiple() {
            1 => write!(f, "{}", self.code()),
            n => write!(f, "{}{}", n, self.code()),
        }
    }
}

impl FromStr for Frequency {
    type Err = SeriesError;

    fn from_str(s: &str) -> Result<Self> {
        let alias = s.trim();
        let split = alias
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(alias.len());
        let (digits, code) = alias.split_at(split);

        let unsupported = || SeriesError::InvalidParameter(format!("Unsupported frequency: {}", s));

        let n = if digits.is_empty() {
            1
        } else {
            digits.parse::<u32>().map_err(|_| unsupported())?
        };
        if n == 0 {
            return Err(SeriesError::InvalidParameter(format!(
                "Frequency multiple must be positive: {}",
                s
            )));
        }

        let frequency = match code {
            "S" | "s" => Frequency::Second(n),
            "T" | "min" => Frequency::Minute(n),
            "H" | "h" => Frequency::Hour(n),
            "D" | "d" => Frequency::Day(n),
            "B" => Frequency::BusinessDay(n),
            "W" => Frequency::Week(n, Weekday::Sun),
            "M" | "ME" => Frequency::MonthEnd(n),
            "MS" => Frequency::MonthStart(n),
            "Q" | "QE" | "Q-DEC" => Frequency::QuarterEnd(n),
            "QS" | "QS-JAN" => Frequency::QuarterStart(n),
            "A" | "Y" | "YE" | "A-DEC" => Frequency::YearEnd(n),
            "AS" | "YS" | "AS-JAN" => Frequency::YearStart(n),
            other => match other.strip_prefix("W-") {
                Some(day) => Frequency::Week(n, day.parse::<Weekday>().map_err(|_| unsupported())?),
                None => return Err(unsupported()),
            },
        };

        Ok(frequency)
    }
}

impl TryFrom<String> for Frequency {
    type Error = SeriesError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Frequency> for String {
    fn from(freq: Frequency) -> Self {
        freq.to_string()
    }
}
