//! Recurring event calendar.
//!
//! This module turns the directory's declarative recurrence rules into dated
//! event instances:
//!
//! - **Grid**: the whole-week date range shown for a month
//! - **Matcher**: whether a rule fires on a given date
//! - **Timezone**: wall-clock to instant conversion in the configured zone
//! - **Expander**: month expansion and single-instance lookup
//! - **Upcoming**: the home page "next meetup" cards

mod expander;
mod grid;
mod matcher;
mod timezone;
mod upcoming;

pub use expander::{build_instance, expand_month, find_instance};
pub use grid::{build_month_grid, end_of_grid, grid_weeks, start_of_grid};
pub use matcher::{
    clamp_day_of_month, is_nth_weekday_of_month, matches_on_date, weekday_occurrence, weeks_since,
};
pub use timezone::{parse_timezone, wall_clock_to_utc};
pub use upcoming::{
    MeetupOccurrence, OccurrenceKind, UpcomingMeetups, format_meetup_datetime, upcoming_meetups,
};
