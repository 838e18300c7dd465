//! Expansion of recurring events into dated instances.
//!
//! Walks the display grid of a month, asks the matcher which events fire on
//! each date, and converts each hit into an [`EventInstance`] with absolute
//! start and end instants in the configured timezone.

use chrono::{Duration, NaiveDate};
use chrono_tz::Tz;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{CalendarMonth, EventInstance, RecurringEvent};

use super::{build_month_grid, matches_on_date, wall_clock_to_utc};

/// Expands every event over the display grid of `month`.
///
/// The result covers the lead and trail days of neighbouring months and is
/// sorted by start instant. Events starting at the same instant keep the
/// order they have in `events`. Expanding the same month twice yields equal
/// output.
///
/// # Example
///
/// ```
/// use meetup_engine::calendar::{expand_month, parse_timezone};
/// use meetup_engine::models::{CalendarMonth, RecurrenceRule, RecurringEvent};
/// use chrono::Weekday;
///
/// let event = RecurringEvent {
///     id: "fwf-meetup-0".to_string(),
///     org_id: "fwf".to_string(),
///     org_name: "Fort Worth Filmmakers".to_string(),
///     label: "Monthly Mixer".to_string(),
///     rule: RecurrenceRule::MonthlyNthDow { nth: 1, weekday: Weekday::Tue, hour: 19, minute: 0 },
///     duration_minutes: 120,
///     is_tba: false,
///     venue_name: None,
///     venue_address: None,
///     notes: None,
///     rsvp_url: None,
///     rsvp_label: None,
/// };
///
/// let tz = parse_timezone("America/Chicago").unwrap();
/// let month = CalendarMonth::new(2026, 1).unwrap();
/// let instances = expand_month(month, &[event], tz).unwrap();
///
/// // The grid ends on Saturday January 31st, so only January 6th is shown
/// assert_eq!(instances.len(), 1);
/// assert_eq!(instances[0].instance_id, "fwf-meetup-0-2026-01-06");
/// ```
pub fn expand_month(
    month: CalendarMonth,
    events: &[RecurringEvent],
    tz: Tz,
) -> EngineResult<Vec<EventInstance>> {
    let grid = build_month_grid(month);
    let mut instances = Vec::new();

    for date in &grid {
        for event in events {
            if matches_on_date(&event.rule, *date) {
                instances.push(build_instance(event, *date, tz)?);
            }
        }
    }

    instances.sort_by_key(|instance| instance.start);

    debug!(
        year = month.year(),
        month = month.month(),
        events = events.len(),
        instances = instances.len(),
        "Expanded calendar month"
    );

    Ok(instances)
}

/// Builds the instance of `event` on `date`, without checking the rule.
pub fn build_instance(
    event: &RecurringEvent,
    date: NaiveDate,
    tz: Tz,
) -> EngineResult<EventInstance> {
    let time = event
        .rule
        .start_time()
        .ok_or_else(|| EngineError::InvalidRule {
            rule_id: event.id.clone(),
            message: "start time is out of range".to_string(),
        })?;

    let start = wall_clock_to_utc(tz, date, time)?;
    let end = start + Duration::minutes(i64::from(event.duration_minutes));

    // TBA events never carry a venue, even if one slipped through
    let (venue_name, venue_address) = if event.is_tba {
        (None, None)
    } else {
        (event.venue_name.clone(), event.venue_address.clone())
    };

    Ok(EventInstance {
        instance_id: EventInstance::make_id(&event.id, date),
        event_id: event.id.clone(),
        title: event.label.clone(),
        org_id: event.org_id.clone(),
        org_name: event.org_name.clone(),
        date,
        start,
        end,
        is_tba: event.is_tba,
        venue_name,
        venue_address,
        notes: event.notes.clone(),
        rsvp_url: event.rsvp_url.clone(),
        rsvp_label: event.rsvp_label.clone(),
    })
}

/// Rebuilds a single instance from its id.
///
/// Fails with [`EngineError::EventNotFound`] if the id is malformed, names
/// an unknown event, or names a date on which the event does not occur.
pub fn find_instance(
    instance_id: &str,
    events: &[RecurringEvent],
    tz: Tz,
) -> EngineResult<EventInstance> {
    let not_found = || EngineError::EventNotFound {
        instance_id: instance_id.to_string(),
    };

    let (event_id, date) = EventInstance::parse_id(instance_id).ok_or_else(not_found)?;
    let event = events
        .iter()
        .find(|e| e.id == event_id)
        .ok_or_else(not_found)?;

    if !matches_on_date(&event.rule, date) {
        return Err(not_found());
    }

    build_instance(event, date, tz)
}
