//! Recurrence matching.
//!
//! Decides whether a [`RecurrenceRule`] fires on a calendar date. Everything
//! here works on calendar dates only, so daylight-saving transitions cannot
//! shift a biweekly pattern.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::models::{RecurrenceRule, days_in_month};

/// Returns true if an occurrence of `rule` falls on `date`.
///
/// Day-of-month rules are clamped to the last day of shorter months, so a
/// rule for the 31st fires on the 30th of April and the 28th (or 29th) of
/// February.
///
/// # Example
///
/// ```
/// use meetup_engine::calendar::matches_on_date;
/// use meetup_engine::models::RecurrenceRule;
/// use chrono::NaiveDate;
///
/// let rule = RecurrenceRule::MonthlyOnDay { day_of_month: 31, hour: 19, minute: 0 };
/// assert!(matches_on_date(&rule, NaiveDate::from_ymd_opt(2026, 4, 30).unwrap()));
/// assert!(!matches_on_date(&rule, NaiveDate::from_ymd_opt(2026, 4, 29).unwrap()));
/// ```
pub fn matches_on_date(rule: &RecurrenceRule, date: NaiveDate) -> bool {
    match rule {
        RecurrenceRule::Weekly {
            weekday,
            interval_weeks,
            anchor_date,
            ..
        } => date.weekday() == *weekday && is_on_interval(date, *interval_weeks, *anchor_date),
        RecurrenceRule::MonthlyNthDow { nth, weekday, .. } => {
            is_nth_weekday_of_month(date, *nth, *weekday)
        }
        RecurrenceRule::MonthlyOnDay { day_of_month, .. } => {
            date.day() == clamp_day_of_month(date, *day_of_month)
        }
        RecurrenceRule::QuarterlyOnDay {
            months,
            day_of_month,
            ..
        } => months.contains(&date.month()) && date.day() == clamp_day_of_month(date, *day_of_month),
        RecurrenceRule::QuarterlyNthDow {
            months,
            nth,
            weekday,
            ..
        } => months.contains(&date.month()) && is_nth_weekday_of_month(date, *nth, *weekday),
        RecurrenceRule::AnnualOnDate {
            month,
            day_of_month,
            ..
        } => date.month() == *month && date.day() == clamp_day_of_month(date, *day_of_month),
        RecurrenceRule::AnnualNthDow {
            month,
            nth,
            weekday,
            ..
        } => date.month() == *month && is_nth_weekday_of_month(date, *nth, *weekday),
    }
}

/// Which occurrence of its weekday `date` is within its month (1-based).
pub fn weekday_occurrence(date: NaiveDate) -> u32 {
    (date.day() - 1) / 7 + 1
}

/// Returns true if `date` is the `nth` `weekday` of its month.
pub fn is_nth_weekday_of_month(date: NaiveDate, nth: u32, weekday: Weekday) -> bool {
    date.weekday() == weekday && weekday_occurrence(date) == nth
}

/// Clamps a day-of-month into the month containing `date`.
pub fn clamp_day_of_month(date: NaiveDate, day_of_month: u32) -> u32 {
    day_of_month.clamp(1, days_in_month(date.year(), date.month()))
}

/// Whole weeks from `anchor` to `date`, counted in calendar days.
pub fn weeks_since(anchor: NaiveDate, date: NaiveDate) -> i64 {
    date.signed_duration_since(anchor).num_days().div_euclid(7)
}

fn is_on_interval(date: NaiveDate, interval_weeks: u32, anchor: Option<NaiveDate>) -> bool {
    if interval_weeks <= 1 {
        return true;
    }
    match anchor {
        Some(anchor) if date >= anchor => {
            weeks_since(anchor, date) % i64::from(interval_weeks) == 0
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn weekly(weekday: Weekday) -> RecurrenceRule {
        RecurrenceRule::Weekly {
            weekday,
            hour: 19,
            minute: 0,
            interval_weeks: 1,
            anchor_date: None,
        }
    }

    fn biweekly(anchor: NaiveDate) -> RecurrenceRule {
        RecurrenceRule::Weekly {
            weekday: anchor.weekday(),
            hour: 19,
            minute: 0,
            interval_weeks: 2,
            anchor_date: Some(anchor),
        }
    }

    // ==========================================================================
    // Weekly
    // ==========================================================================

    #[test]
    fn test_weekly_matches_weekday_only() {
        let rule = weekly(Weekday::Wed);
        assert!(matches_on_date(&rule, date(2026, 1, 7)));
        assert!(matches_on_date(&rule, date(2026, 1, 14)));
        assert!(!matches_on_date(&rule, date(2026, 1, 8)));
    }

    #[test]
    fn test_biweekly_every_other_week_from_anchor() {
        let anchor = date(2026, 1, 6); // Tuesday
        let rule = biweekly(anchor);

        let hits: Vec<i64> = (0..8)
            .map(|week| anchor + chrono::Duration::weeks(week))
            .filter(|d| matches_on_date(&rule, *d))
            .map(|d| weeks_since(anchor, d))
            .collect();

        assert_eq!(hits, vec![0, 2, 4, 6]);
    }

    #[test]
    fn test_biweekly_never_before_anchor() {
        let anchor = date(2026, 1, 6);
        let rule = biweekly(anchor);
        assert!(!matches_on_date(&rule, date(2025, 12, 23)));
        assert!(!matches_on_date(&rule, date(2025, 12, 30)));
    }

    #[test]
    fn test_biweekly_stable_across_dst_start() {
        // US daylight saving starts 2026-03-08; parity must not drift
        let anchor = date(2026, 2, 24);
        let rule = biweekly(anchor);
        assert!(matches_on_date(&rule, date(2026, 3, 10)));
        assert!(!matches_on_date(&rule, date(2026, 3, 17)));
        assert!(matches_on_date(&rule, date(2026, 3, 24)));
    }

    #[test]
    fn test_biweekly_without_anchor_never_matches() {
        let rule = RecurrenceRule::Weekly {
            weekday: Weekday::Tue,
            hour: 19,
            minute: 0,
            interval_weeks: 2,
            anchor_date: None,
        };
        assert!(!matches_on_date(&rule, date(2026, 1, 6)));
    }

    // ==========================================================================
    // Nth weekday
    // ==========================================================================

    #[test]
    fn test_weekday_occurrence() {
        assert_eq!(weekday_occurrence(date(2026, 1, 1)), 1);
        assert_eq!(weekday_occurrence(date(2026, 1, 7)), 1);
        assert_eq!(weekday_occurrence(date(2026, 1, 8)), 2);
        assert_eq!(weekday_occurrence(date(2026, 1, 29)), 5);
    }

    #[test]
    fn test_monthly_first_thursday() {
        let rule = RecurrenceRule::MonthlyNthDow {
            nth: 1,
            weekday: Weekday::Thu,
            hour: 19,
            minute: 0,
        };
        assert!(matches_on_date(&rule, date(2026, 1, 1)));
        assert!(!matches_on_date(&rule, date(2026, 1, 8)));
        assert!(matches_on_date(&rule, date(2026, 2, 5)));
    }

    #[test]
    fn test_monthly_fifth_weekday_skips_short_months() {
        let rule = RecurrenceRule::MonthlyNthDow {
            nth: 5,
            weekday: Weekday::Thu,
            hour: 19,
            minute: 0,
        };
        // January 2026 has five Thursdays, February 2026 has four
        assert!(matches_on_date(&rule, date(2026, 1, 29)));
        let february_hits = (1..=28)
            .filter(|d| matches_on_date(&rule, date(2026, 2, *d)))
            .count();
        assert_eq!(february_hits, 0);
    }

    // ==========================================================================
    // Day of month
    // ==========================================================================

    #[test]
    fn test_monthly_on_day_clamps_to_february() {
        let rule = RecurrenceRule::MonthlyOnDay {
            day_of_month: 31,
            hour: 19,
            minute: 0,
        };
        let hits: Vec<u32> = (1..=28)
            .filter(|d| matches_on_date(&rule, date(2026, 2, *d)))
            .collect();
        assert_eq!(hits, vec![28]);

        let leap_hits: Vec<u32> = (1..=29)
            .filter(|d| matches_on_date(&rule, date(2028, 2, *d)))
            .collect();
        assert_eq!(leap_hits, vec![29]);
    }

    #[test]
    fn test_clamp_day_of_month() {
        assert_eq!(clamp_day_of_month(date(2026, 4, 1), 31), 30);
        assert_eq!(clamp_day_of_month(date(2026, 4, 1), 15), 15);
        assert_eq!(clamp_day_of_month(date(2026, 4, 1), 0), 1);
    }

    // ==========================================================================
    // Quarterly and annual
    // ==========================================================================

    #[test]
    fn test_quarterly_on_day_only_in_listed_months() {
        let rule = RecurrenceRule::QuarterlyOnDay {
            months: vec![1, 4, 7, 10],
            day_of_month: 15,
            hour: 18,
            minute: 0,
        };
        assert!(matches_on_date(&rule, date(2026, 4, 15)));
        assert!(!matches_on_date(&rule, date(2026, 5, 15)));
    }

    #[test]
    fn test_quarterly_accepts_any_month_set() {
        let rule = RecurrenceRule::QuarterlyNthDow {
            months: vec![3, 9],
            nth: 2,
            weekday: Weekday::Sat,
            hour: 12,
            minute: 0,
        };
        // Second Saturday of March 2026 is the 14th
        assert!(matches_on_date(&rule, date(2026, 3, 14)));
        assert!(!matches_on_date(&rule, date(2026, 6, 13)));
    }

    #[test]
    fn test_annual_on_date_clamps() {
        let rule = RecurrenceRule::AnnualOnDate {
            month: 2,
            day_of_month: 30,
            hour: 10,
            minute: 0,
        };
        assert!(matches_on_date(&rule, date(2026, 2, 28)));
        assert!(!matches_on_date(&rule, date(2026, 3, 30)));
    }

    #[test]
    fn test_annual_nth_dow() {
        // Third Saturday of October 2026 is the 17th
        let rule = RecurrenceRule::AnnualNthDow {
            month: 10,
            nth: 3,
            weekday: Weekday::Sat,
            hour: 11,
            minute: 0,
        };
        assert!(matches_on_date(&rule, date(2026, 10, 17)));
        assert!(!matches_on_date(&rule, date(2026, 10, 10)));
        assert!(!matches_on_date(&rule, date(2026, 11, 21)));
    }

    proptest! {
        #[test]
        fn prop_day_of_month_rules_fire_exactly_once_per_month(
            year in 1970i32..2100,
            month in 1u32..=12,
            day_of_month in 1u32..=31,
        ) {
            let rule = RecurrenceRule::MonthlyOnDay { day_of_month, hour: 19, minute: 0 };
            let hits = (1..=days_in_month(year, month))
                .filter(|d| matches_on_date(&rule, date(year, month, *d)))
                .count();
            prop_assert_eq!(hits, 1);
        }

        #[test]
        fn prop_nth_weekday_fires_at_most_once_per_month(
            year in 1970i32..2100,
            month in 1u32..=12,
            nth in 1u32..=5,
            weekday_index in 0u8..7,
        ) {
            let weekday = crate::models::weekday_index::from_index(weekday_index).unwrap();
            let rule = RecurrenceRule::MonthlyNthDow { nth, weekday, hour: 19, minute: 0 };
            let hits = (1..=days_in_month(year, month))
                .filter(|d| matches_on_date(&rule, date(year, month, *d)))
                .count();
            prop_assert!(hits <= 1);
            if nth <= 4 {
                prop_assert_eq!(hits, 1);
            }
        }
    }
}
