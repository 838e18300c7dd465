//! Recurrence rule model.
//!
//! This module defines [`RecurrenceRule`], the declarative description of how
//! a meetup repeats. A rule is independent of any calendar month; the
//! [`matcher`](crate::calendar::matches_on_date) decides whether it fires on a
//! given date.

use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::calendar::matches_on_date;
use crate::error::{EngineError, EngineResult};

/// How a recurring meetup repeats.
///
/// Serialized with a `kind` tag, e.g. `{ "kind": "monthly_nth_dow", "nth": 2,
/// "weekday": 3, "hour": 19, "minute": 0 }`. Weekdays are written as
/// `0 = Sunday .. 6 = Saturday`; months are 1-based.
///
/// # Example
///
/// ```
/// use meetup_engine::models::RecurrenceRule;
/// use chrono::{NaiveDate, Weekday};
///
/// let rule = RecurrenceRule::MonthlyNthDow {
///     nth: 2,
///     weekday: Weekday::Wed,
///     hour: 19,
///     minute: 0,
/// };
///
/// // 2026-01-14 is the second Wednesday of January 2026
/// assert!(rule.matches(NaiveDate::from_ymd_opt(2026, 1, 14).unwrap()));
/// assert!(!rule.matches(NaiveDate::from_ymd_opt(2026, 1, 7).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecurrenceRule {
    /// Every week (or every N weeks from an anchor date) on one weekday.
    Weekly {
        /// The weekday the meetup falls on.
        #[serde(with = "weekday_index")]
        weekday: Weekday,
        /// Start hour in 24-hour wall-clock time.
        hour: u32,
        /// Start minute.
        minute: u32,
        /// Repeat every N weeks; 1 means every week.
        #[serde(default = "default_interval_weeks")]
        interval_weeks: u32,
        /// First occurrence for multi-week intervals.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        anchor_date: Option<NaiveDate>,
    },
    /// The nth weekday of every month, e.g. "2nd Wednesday".
    MonthlyNthDow {
        /// Occurrence index within the month (1..=5).
        nth: u32,
        /// The weekday.
        #[serde(with = "weekday_index")]
        weekday: Weekday,
        /// Start hour.
        hour: u32,
        /// Start minute.
        minute: u32,
    },
    /// A fixed day of every month, clamped to the month's last day.
    MonthlyOnDay {
        /// Day of month; clamped into each month.
        day_of_month: u32,
        /// Start hour.
        hour: u32,
        /// Start minute.
        minute: u32,
    },
    /// A fixed day of the month, only in the listed months.
    QuarterlyOnDay {
        /// Months (1-based) in which the rule fires.
        months: Vec<u32>,
        /// Day of month; clamped into each month.
        day_of_month: u32,
        /// Start hour.
        hour: u32,
        /// Start minute.
        minute: u32,
    },
    /// The nth weekday of the month, only in the listed months.
    QuarterlyNthDow {
        /// Months (1-based) in which the rule fires.
        months: Vec<u32>,
        /// Occurrence index within the month (1..=5).
        nth: u32,
        /// The weekday.
        #[serde(with = "weekday_index")]
        weekday: Weekday,
        /// Start hour.
        hour: u32,
        /// Start minute.
        minute: u32,
    },
    /// A fixed date once a year.
    AnnualOnDate {
        /// Month (1-based).
        month: u32,
        /// Day of month; clamped into each month.
        day_of_month: u32,
        /// Start hour.
        hour: u32,
        /// Start minute.
        minute: u32,
    },
    /// The nth weekday of one month once a year.
    AnnualNthDow {
        /// Month (1-based).
        month: u32,
        /// Occurrence index within the month (1..=5).
        nth: u32,
        /// The weekday.
        #[serde(with = "weekday_index")]
        weekday: Weekday,
        /// Start hour.
        hour: u32,
        /// Start minute.
        minute: u32,
    },
}

fn default_interval_weeks() -> u32 {
    1
}

impl RecurrenceRule {
    /// Returns the `(hour, minute)` wall-clock start of every occurrence.
    pub fn start_hour_minute(&self) -> (u32, u32) {
        match self {
            RecurrenceRule::Weekly { hour, minute, .. }
            | RecurrenceRule::MonthlyNthDow { hour, minute, .. }
            | RecurrenceRule::MonthlyOnDay { hour, minute, .. }
            | RecurrenceRule::QuarterlyOnDay { hour, minute, .. }
            | RecurrenceRule::QuarterlyNthDow { hour, minute, .. }
            | RecurrenceRule::AnnualOnDate { hour, minute, .. }
            | RecurrenceRule::AnnualNthDow { hour, minute, .. } => (*hour, *minute),
        }
    }

    /// Returns the start time of day, or `None` if hour/minute are out of range.
    pub fn start_time(&self) -> Option<NaiveTime> {
        let (hour, minute) = self.start_hour_minute();
        NaiveTime::from_hms_opt(hour, minute, 0)
    }

    /// Returns true if an occurrence of this rule falls on `date`.
    pub fn matches(&self, date: NaiveDate) -> bool {
        matches_on_date(self, date)
    }

    /// Checks the field ranges of the rule.
    ///
    /// Rules are validated when the directory is loaded so that a malformed
    /// rule fails loudly instead of silently producing no occurrences.
    ///
    /// # Example
    ///
    /// ```
    /// use meetup_engine::models::RecurrenceRule;
    /// use chrono::Weekday;
    ///
    /// let rule = RecurrenceRule::Weekly {
    ///     weekday: Weekday::Tue,
    ///     hour: 25,
    ///     minute: 0,
    ///     interval_weeks: 1,
    ///     anchor_date: None,
    /// };
    /// assert!(rule.validate("weekly-bad").is_err());
    /// ```
    pub fn validate(&self, rule_id: &str) -> EngineResult<()> {
        let invalid = |message: String| EngineError::InvalidRule {
            rule_id: rule_id.to_string(),
            message,
        };

        let (hour, minute) = self.start_hour_minute();
        if hour > 23 {
            return Err(invalid(format!("hour {} must be between 0 and 23", hour)));
        }
        if minute > 59 {
            return Err(invalid(format!(
                "minute {} must be between 0 and 59",
                minute
            )));
        }

        match self {
            RecurrenceRule::Weekly {
                interval_weeks,
                anchor_date,
                ..
            } => {
                if *interval_weeks == 0 {
                    return Err(invalid("interval_weeks must be at least 1".to_string()));
                }
                if *interval_weeks > 1 && anchor_date.is_none() {
                    return Err(invalid(format!(
                        "an anchor_date is required when repeating every {} weeks",
                        interval_weeks
                    )));
                }
                Ok(())
            }
            RecurrenceRule::MonthlyNthDow { nth, .. } => check_nth(*nth).map_err(invalid),
            // days of month are clamped by the matcher, never rejected
            RecurrenceRule::MonthlyOnDay { .. } => Ok(()),
            RecurrenceRule::QuarterlyOnDay { months, .. } => check_months(months).map_err(invalid),
            RecurrenceRule::QuarterlyNthDow { months, nth, .. } => {
                check_months(months).map_err(invalid)?;
                check_nth(*nth).map_err(invalid)
            }
            RecurrenceRule::AnnualOnDate { month, .. } => check_month(*month).map_err(invalid),
            RecurrenceRule::AnnualNthDow { month, nth, .. } => {
                check_month(*month).map_err(invalid)?;
                check_nth(*nth).map_err(invalid)
            }
        }
    }
}

fn check_nth(nth: u32) -> Result<(), String> {
    if (1..=5).contains(&nth) {
        Ok(())
    } else {
        Err(format!("nth {} must be between 1 and 5", nth))
    }
}

fn check_month(month: u32) -> Result<(), String> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(format!("month {} must be between 1 and 12", month))
    }
}

fn check_months(months: &[u32]) -> Result<(), String> {
    if months.is_empty() {
        return Err("months must list at least one month".to_string());
    }
    months.iter().try_for_each(|m| check_month(*m))
}

/// Serde adapter writing weekdays as `0 = Sunday .. 6 = Saturday`.
pub mod weekday_index {
    use chrono::Weekday;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    /// Converts a Sunday-based index into a [`Weekday`].
    pub fn from_index(index: u8) -> Option<Weekday> {
        match index {
            0 => Some(Weekday::Sun),
            1 => Some(Weekday::Mon),
            2 => Some(Weekday::Tue),
            3 => Some(Weekday::Wed),
            4 => Some(Weekday::Thu),
            5 => Some(Weekday::Fri),
            6 => Some(Weekday::Sat),
            _ => None,
        }
    }

    /// Serializes a weekday as its Sunday-based index.
    pub fn serialize<S: Serializer>(weekday: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(weekday.num_days_from_sunday() as u8)
    }

    /// Deserializes a Sunday-based index into a weekday.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Weekday, D::Error> {
        let index = u8::deserialize(deserializer)?;
        from_index(index)
            .ok_or_else(|| D::Error::custom(format!("weekday {} must be between 0 and 6", index)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weekly(hour: u32, minute: u32) -> RecurrenceRule {
        RecurrenceRule::Weekly {
            weekday: Weekday::Wed,
            hour,
            minute,
            interval_weeks: 1,
            anchor_date: None,
        }
    }

    #[test]
    fn test_start_hour_minute_for_every_variant() {
        let rules = vec![
            weekly(19, 0),
            RecurrenceRule::MonthlyNthDow {
                nth: 1,
                weekday: Weekday::Thu,
                hour: 18,
                minute: 30,
            },
            RecurrenceRule::AnnualOnDate {
                month: 12,
                day_of_month: 5,
                hour: 10,
                minute: 15,
            },
        ];

        let times: Vec<(u32, u32)> = rules.iter().map(|r| r.start_hour_minute()).collect();
        assert_eq!(times, vec![(19, 0), (18, 30), (10, 15)]);
    }

    #[test]
    fn test_start_time_valid() {
        assert_eq!(
            weekly(19, 30).start_time(),
            NaiveTime::from_hms_opt(19, 30, 0)
        );
    }

    #[test]
    fn test_validate_accepts_valid_rule() {
        assert!(weekly(19, 0).validate("ok").is_ok());
    }

    #[test]
    fn test_validate_rejects_hour_out_of_range() {
        let err = weekly(24, 0).validate("late").unwrap_err();
        match err {
            EngineError::InvalidRule { rule_id, message } => {
                assert_eq!(rule_id, "late");
                assert!(message.contains("hour 24"));
            }
            other => panic!("Expected InvalidRule, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_minute_out_of_range() {
        assert!(weekly(19, 60).validate("r").is_err());
    }

    #[test]
    fn test_validate_biweekly_requires_anchor() {
        let rule = RecurrenceRule::Weekly {
            weekday: Weekday::Tue,
            hour: 19,
            minute: 0,
            interval_weeks: 2,
            anchor_date: None,
        };
        assert!(rule.validate("biweekly").is_err());

        let anchored = RecurrenceRule::Weekly {
            weekday: Weekday::Tue,
            hour: 19,
            minute: 0,
            interval_weeks: 2,
            anchor_date: NaiveDate::from_ymd_opt(2026, 1, 6),
        };
        assert!(anchored.validate("biweekly").is_ok());
    }

    #[test]
    fn test_validate_rejects_nth_out_of_range() {
        let rule = RecurrenceRule::MonthlyNthDow {
            nth: 6,
            weekday: Weekday::Mon,
            hour: 19,
            minute: 0,
        };
        assert!(rule.validate("r").is_err());
    }

    #[test]
    fn test_validate_rejects_empty_months() {
        let rule = RecurrenceRule::QuarterlyOnDay {
            months: vec![],
            day_of_month: 15,
            hour: 19,
            minute: 0,
        };
        assert!(rule.validate("r").is_err());
    }

    #[test]
    fn test_validate_accepts_non_quarterly_month_sets() {
        let rule = RecurrenceRule::QuarterlyNthDow {
            months: vec![2, 8],
            nth: 3,
            weekday: Weekday::Sat,
            hour: 12,
            minute: 0,
        };
        assert!(rule.validate("twice-a-year").is_ok());
    }

    #[test]
    fn test_validate_rejects_month_thirteen() {
        let rule = RecurrenceRule::AnnualOnDate {
            month: 13,
            day_of_month: 1,
            hour: 0,
            minute: 0,
        };
        assert!(rule.validate("r").is_err());
    }

    #[test]
    fn test_validate_accepts_out_of_range_day_of_month() {
        let rule = RecurrenceRule::MonthlyOnDay {
            day_of_month: 40,
            hour: 19,
            minute: 0,
        };
        assert!(rule.validate("clamped").is_ok());
    }

    #[test]
    fn test_deserialize_weekly_defaults_interval() {
        let json = r#"{ "kind": "weekly", "weekday": 3, "hour": 19, "minute": 0 }"#;
        let rule: RecurrenceRule = serde_json::from_str(json).unwrap();
        assert_eq!(rule, weekly(19, 0));
    }

    #[test]
    fn test_deserialize_sunday_is_zero() {
        let json = r#"{ "kind": "monthly_nth_dow", "nth": 1, "weekday": 0, "hour": 14, "minute": 0 }"#;
        let rule: RecurrenceRule = serde_json::from_str(json).unwrap();
        assert_eq!(
            rule,
            RecurrenceRule::MonthlyNthDow {
                nth: 1,
                weekday: Weekday::Sun,
                hour: 14,
                minute: 0,
            }
        );
    }

    #[test]
    fn test_deserialize_rejects_weekday_seven() {
        let json = r#"{ "kind": "weekly", "weekday": 7, "hour": 19, "minute": 0 }"#;
        assert!(serde_json::from_str::<RecurrenceRule>(json).is_err());
    }

    #[test]
    fn test_deserialize_rejects_unknown_kind() {
        let json = r#"{ "kind": "fortnightly", "weekday": 2, "hour": 19, "minute": 0 }"#;
        assert!(serde_json::from_str::<RecurrenceRule>(json).is_err());
    }

    #[test]
    fn test_serialize_uses_snake_case_kind() {
        let rule = RecurrenceRule::QuarterlyOnDay {
            months: vec![1, 4, 7, 10],
            day_of_month: 31,
            hour: 18,
            minute: 0,
        };
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(json["kind"], "quarterly_on_day");
        assert_eq!(json["months"], serde_json::json!([1, 4, 7, 10]));
    }

    #[test]
    fn test_weekday_index_round_trip_values() {
        assert_eq!(weekday_index::from_index(0), Some(Weekday::Sun));
        assert_eq!(weekday_index::from_index(6), Some(Weekday::Sat));
        assert_eq!(weekday_index::from_index(7), None);
    }
}
