//! Calendar month value type.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A single month of a single year.
///
/// Construction validates the month number and keeps the year inside a range
/// where date arithmetic cannot overflow.
///
/// # Example
///
/// ```
/// use meetup_engine::models::CalendarMonth;
///
/// let february = CalendarMonth::new(2028, 2).unwrap();
/// assert_eq!(february.days_in_month(), 29);
/// assert_eq!(february.label(), "February 2028");
/// assert_eq!(february.next().month(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "MonthParts", into = "MonthParts")]
pub struct CalendarMonth {
    first_day: NaiveDate,
}

#[derive(Serialize, Deserialize)]
struct MonthParts {
    year: i32,
    month: u32,
}

impl TryFrom<MonthParts> for CalendarMonth {
    type Error = EngineError;

    fn try_from(parts: MonthParts) -> Result<Self, Self::Error> {
        CalendarMonth::new(parts.year, parts.month)
    }
}

impl From<CalendarMonth> for MonthParts {
    fn from(month: CalendarMonth) -> Self {
        MonthParts {
            year: month.year(),
            month: month.month(),
        }
    }
}

impl CalendarMonth {
    /// Creates a month from a year and a 1-based month number.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        if !(1..=9999).contains(&year) {
            return Err(EngineError::InvalidMonth { year, month });
        }
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first_day| Self { first_day })
            .ok_or(EngineError::InvalidMonth { year, month })
    }

    /// Returns the month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first_day: date.with_day(1).unwrap_or(date),
        }
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    /// The 1-based month number.
    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    /// The first day of the month.
    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    /// The last day of the month.
    pub fn last_day(&self) -> NaiveDate {
        self.first_day + Days::new(u64::from(self.days_in_month()) - 1)
    }

    /// Number of days in the month.
    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year(), self.month())
    }

    /// The following month.
    pub fn next(&self) -> Self {
        Self {
            first_day: self.first_day + Months::new(1),
        }
    }

    /// The preceding month.
    pub fn previous(&self) -> Self {
        Self {
            first_day: self.first_day - Months::new(1),
        }
    }

    /// Human label such as "January 2026".
    pub fn label(&self) -> String {
        self.first_day.format("%B %Y").to_string()
    }

    /// Returns true if `date` falls inside this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }
}

/// Number of days in a 1-based month of a proleptic Gregorian year.
///
/// Returns 0 for month numbers outside `1..=12` and for years chrono cannot
/// represent.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.checked_add_months(Months::new(1)))
        .and_then(|next| next.pred_opt())
        .map_or(0, |last| last.day())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_rejects_month_zero_and_thirteen() {
        assert!(CalendarMonth::new(2026, 0).is_err());
        assert!(CalendarMonth::new(2026, 13).is_err());
    }

    #[test]
    fn test_new_rejects_year_out_of_range() {
        assert!(CalendarMonth::new(0, 1).is_err());
        assert!(CalendarMonth::new(10000, 1).is_err());
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2026, 1), 31);
        assert_eq!(days_in_month(2026, 4), 30);
        assert_eq!(days_in_month(2026, 2), 28);
        assert_eq!(days_in_month(2028, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2026, 13), 0);
        assert_eq!(days_in_month(2026, 0), 0);
        assert_eq!(days_in_month(2026, 12), 31);
    }

    #[test]
    fn test_first_and_last_day() {
        let month = CalendarMonth::new(2026, 9).unwrap();
        assert_eq!(month.first_day(), date(2026, 9, 1));
        assert_eq!(month.last_day(), date(2026, 9, 30));
    }

    #[test]
    fn test_next_and_previous_cross_year() {
        let december = CalendarMonth::new(2025, 12).unwrap();
        assert_eq!(december.next(), CalendarMonth::new(2026, 1).unwrap());
        assert_eq!(december.next().previous(), december);
    }

    #[test]
    fn test_containing() {
        let month = CalendarMonth::containing(date(2026, 7, 19));
        assert_eq!(month.year(), 2026);
        assert_eq!(month.month(), 7);
        assert!(month.contains(date(2026, 7, 1)));
        assert!(!month.contains(date(2026, 8, 1)));
    }

    #[test]
    fn test_label() {
        assert_eq!(CalendarMonth::new(2026, 1).unwrap().label(), "January 2026");
    }

    #[test]
    fn test_serde_as_year_and_month() {
        let month = CalendarMonth::new(2026, 3).unwrap();
        let json = serde_json::to_value(month).unwrap();
        assert_eq!(json, serde_json::json!({ "year": 2026, "month": 3 }));

        let parsed: CalendarMonth = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, month);

        let bad = serde_json::from_value::<CalendarMonth>(serde_json::json!({ "year": 2026, "month": 14 }));
        assert!(bad.is_err());
    }
}
