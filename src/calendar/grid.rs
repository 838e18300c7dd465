//! Month display grid.
//!
//! A month is rendered as whole Sunday-to-Saturday weeks, padded with the
//! trailing days of the previous month and the leading days of the next.

use chrono::{Datelike, Days, NaiveDate};

use crate::models::CalendarMonth;

/// The Sunday on or before the first day of `month`.
pub fn start_of_grid(month: CalendarMonth) -> NaiveDate {
    let first = month.first_day();
    first - Days::new(u64::from(first.weekday().num_days_from_sunday()))
}

/// The Saturday on or after the last day of `month`.
pub fn end_of_grid(month: CalendarMonth) -> NaiveDate {
    let last = month.last_day();
    last + Days::new(u64::from(6 - last.weekday().num_days_from_sunday()))
}

/// Every date of the display grid for `month`, in order.
///
/// The result always starts on a Sunday, ends on a Saturday, and has a length
/// that is a multiple of seven.
///
/// # Example
///
/// ```
/// use meetup_engine::calendar::build_month_grid;
/// use meetup_engine::models::CalendarMonth;
/// use chrono::{Datelike, NaiveDate, Weekday};
///
/// // February 2026 starts on a Sunday and ends on a Saturday: exactly 4 weeks
/// let grid = build_month_grid(CalendarMonth::new(2026, 2).unwrap());
/// assert_eq!(grid.len(), 28);
/// assert_eq!(grid[0], NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
/// assert_eq!(grid[27].weekday(), Weekday::Sat);
/// ```
pub fn build_month_grid(month: CalendarMonth) -> Vec<NaiveDate> {
    let end = end_of_grid(month);
    start_of_grid(month)
        .iter_days()
        .take_while(|d| *d <= end)
        .collect()
}

/// Splits a grid into its weeks.
pub fn grid_weeks(grid: &[NaiveDate]) -> Vec<&[NaiveDate]> {
    grid.chunks(7).collect()
}
