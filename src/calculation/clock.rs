//! Clock time parsing and shift length.

/// Minutes in a day, used to wrap shifts that cross midnight.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Parses a strict `HH:MM` 24-hour time into minutes after midnight.
///
/// Both parts must be exactly two digits; hours run 00-23 and minutes 00-59.
///
/// # Example
///
/// ```
/// use meetup_engine::calculation::parse_clock_minutes;
///
/// assert_eq!(parse_clock_minutes("07:30"), Some(450));
/// assert_eq!(parse_clock_minutes("7:30"), None);
/// assert_eq!(parse_clock_minutes("24:00"), None);
/// ```
pub fn parse_clock_minutes(input: &str) -> Option<u32> {
    let (hours, minutes) = input.trim().split_once(':')?;
    if hours.len() != 2 || minutes.len() != 2 {
        return None;
    }
    if !hours.bytes().chain(minutes.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }

    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(hours * 60 + minutes)
}

/// Minutes from `start` to `end`, wrapping into the next day when `end` is
/// earlier on the clock.
pub fn minutes_between(start: u32, end: u32) -> u32 {
    if end >= start {
        end - start
    } else {
        end + MINUTES_PER_DAY - start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_times() {
        assert_eq!(parse_clock_minutes("00:00"), Some(0));
        assert_eq!(parse_clock_minutes("23:59"), Some(1439));
        assert_eq!(parse_clock_minutes(" 19:00 "), Some(1140));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(parse_clock_minutes(""), None);
        assert_eq!(parse_clock_minutes("7:00"), None);
        assert_eq!(parse_clock_minutes("07:0"), None);
        assert_eq!(parse_clock_minutes("07-00"), None);
        assert_eq!(parse_clock_minutes("+1:00"), None);
        assert_eq!(parse_clock_minutes("12:60"), None);
        assert_eq!(parse_clock_minutes("7pm"), None);
    }

    #[test]
    fn test_minutes_between_same_day() {
        assert_eq!(minutes_between(420, 1140), 720);
        assert_eq!(minutes_between(600, 600), 0);
    }

    #[test]
    fn test_minutes_between_wraps_midnight() {
        // 22:00 to 06:00
        assert_eq!(minutes_between(1320, 360), 480);
    }
}
