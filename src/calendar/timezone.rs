//! Wall-clock to instant conversion in a configured timezone.
//!
//! The zone is always passed in explicitly; nothing here consults the host
//! machine's local timezone.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{EngineError, EngineResult};

/// Parses an IANA timezone name such as `America/Chicago`.
pub fn parse_timezone(name: &str) -> EngineResult<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| EngineError::UnknownTimezone {
            name: name.to_string(),
        })
}

/// Converts a local date and time in `tz` into an absolute instant.
///
/// A wall-clock time that occurs twice (the repeated hour when daylight
/// saving ends) resolves to the earlier instant. A time that never occurs
/// (the skipped hour when daylight saving starts) is moved forward by one
/// hour, which matches how clocks read on that night.
///
/// # Example
///
/// ```
/// use meetup_engine::calendar::{parse_timezone, wall_clock_to_utc};
/// use chrono::{NaiveDate, NaiveTime};
///
/// let tz = parse_timezone("America/Chicago").unwrap();
/// let date = NaiveDate::from_ymd_opt(2026, 1, 6).unwrap();
/// let time = NaiveTime::from_hms_opt(19, 0, 0).unwrap();
///
/// let start = wall_clock_to_utc(tz, date, time).unwrap();
/// assert_eq!(start.to_rfc3339(), "2026-01-07T01:00:00+00:00");
/// ```
pub fn wall_clock_to_utc(tz: Tz, date: NaiveDate, time: NaiveTime) -> EngineResult<DateTime<Utc>> {
    let local = date.and_time(time);
    let resolved = match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => tz.from_local_datetime(&(local + Duration::hours(1))).earliest(),
    };

    resolved
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| EngineError::UnresolvableWallClock {
            date,
            time,
            timezone: tz.name().to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chicago() -> Tz {
        parse_timezone("America/Chicago").unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_parse_timezone() {
        assert_eq!(chicago().name(), "America/Chicago");
        assert_eq!(parse_timezone(" UTC ").unwrap().name(), "UTC");
    }

    #[test]
    fn test_parse_timezone_unknown() {
        let result = parse_timezone("America/Fort_Worth");
        match result {
            Err(EngineError::UnknownTimezone { name }) => assert_eq!(name, "America/Fort_Worth"),
            other => panic!("Expected UnknownTimezone, got {:?}", other),
        }
    }

    #[test]
    fn test_standard_time_offset() {
        // CST is UTC-6
        let instant = wall_clock_to_utc(chicago(), date(2026, 1, 6), time(19, 0)).unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2026, 1, 7, 1, 0, 0).unwrap());
    }

    #[test]
    fn test_daylight_time_offset() {
        // CDT is UTC-5
        let instant = wall_clock_to_utc(chicago(), date(2026, 7, 7), time(19, 0)).unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2026, 7, 8, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_skipped_hour_moves_forward() {
        // 2026-03-08 02:30 does not exist in Chicago
        let instant = wall_clock_to_utc(chicago(), date(2026, 3, 8), time(2, 30)).unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2026, 3, 8, 8, 30, 0).unwrap());
    }

    #[test]
    fn test_repeated_hour_uses_earliest() {
        // 2026-11-01 01:30 happens twice in Chicago; the first is CDT
        let instant = wall_clock_to_utc(chicago(), date(2026, 11, 1), time(1, 30)).unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2026, 11, 1, 6, 30, 0).unwrap());
    }

    #[test]
    fn test_same_local_time_across_hosts() {
        let a = wall_clock_to_utc(chicago(), date(2026, 2, 10), time(18, 30)).unwrap();
        let b = wall_clock_to_utc(chicago(), date(2026, 2, 10), time(18, 30)).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            a.with_timezone(&chicago()).format("%H:%M").to_string(),
            "18:30"
        );
    }
}
