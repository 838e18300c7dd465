//! "Next meetup" and "also coming up" cards for the home page.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{CalendarMonth, Directory, EventInstance, Organization, RecurringEvent};

use super::expand_month;

/// Which card an occurrence fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OccurrenceKind {
    /// The home-featured organization's next meetup.
    Featured,
    /// The next actionable meetup from anyone else.
    Calendar,
}

/// One meetup as shown on a home page card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetupOccurrence {
    /// Which card this is.
    pub kind: OccurrenceKind,
    /// Card title.
    pub title: String,
    /// Start instant, or the request time for placeholder cards.
    pub when: DateTime<Utc>,
    /// Venue name or "TBA".
    pub location_name: String,
    /// Venue address, or the organization's city for TBA meetups.
    pub location_city: String,
    /// Organization id, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,
    /// Organization name, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_name: Option<String>,
    /// Venue is to be announced.
    pub is_tba: bool,
}

/// Both home page cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpcomingMeetups {
    /// The featured organization's next meetup.
    pub next: MeetupOccurrence,
    /// The next non-TBA meetup from another organization.
    pub also_coming_up: MeetupOccurrence,
}

const TBA: &str = "TBA";

/// Finds the next meetups that have not yet ended at `now`.
///
/// Looks at the current and the following month as seen in `tz`. `region`
/// is appended to the featured organization's location on TBA cards, e.g.
/// `"Fort Worth, TX"`.
pub fn upcoming_meetups(
    now: DateTime<Utc>,
    directory: &Directory,
    events: &[RecurringEvent],
    tz: Tz,
    region: &str,
) -> EngineResult<UpcomingMeetups> {
    let this_month = CalendarMonth::containing(now.with_timezone(&tz).date_naive());

    let mut all = expand_month(this_month, events, tz)?;
    all.extend(expand_month(this_month.next(), events, tz)?);
    all.sort_by_key(|instance| instance.start);
    // adjacent grids share a week of padding days
    let mut seen = HashSet::new();
    all.retain(|instance| seen.insert(instance.instance_id.clone()));

    let featured = directory.home_featured();
    let featured_id = featured.map(|org| org.id.as_str());

    let next_featured = featured_id.and_then(|id| {
        all.iter()
            .find(|i| i.org_id == id && i.is_upcoming(now))
    });
    let next_calendar = all.iter().find(|i| {
        Some(i.org_id.as_str()) != featured_id && !i.is_tba && i.is_upcoming(now)
    });

    let next = match next_featured {
        Some(instance) => featured_card(instance, featured, region),
        None => MeetupOccurrence {
            kind: OccurrenceKind::Featured,
            title: featured
                .map(|org| org.name.clone())
                .unwrap_or_else(|| "Next meetup".to_string()),
            when: now,
            location_name: TBA.to_string(),
            location_city: regional_location(featured, region),
            org_id: featured.map(|org| org.id.clone()),
            org_name: featured.map(|org| org.name.clone()),
            is_tba: true,
        },
    };

    let also_coming_up = match next_calendar {
        Some(instance) => MeetupOccurrence {
            kind: OccurrenceKind::Calendar,
            title: instance.title.clone(),
            when: instance.start,
            location_name: instance
                .venue_name
                .clone()
                .unwrap_or_else(|| TBA.to_string()),
            location_city: instance.venue_address.clone().unwrap_or_default(),
            org_id: Some(instance.org_id.clone()),
            org_name: Some(instance.org_name.clone()),
            is_tba: instance.is_tba,
        },
        None => MeetupOccurrence {
            kind: OccurrenceKind::Calendar,
            title: "No upcoming events listed".to_string(),
            when: now,
            location_name: TBA.to_string(),
            location_city: String::new(),
            org_id: None,
            org_name: None,
            is_tba: true,
        },
    };

    Ok(UpcomingMeetups {
        next,
        also_coming_up,
    })
}

fn featured_card(
    instance: &EventInstance,
    featured: Option<&Organization>,
    region: &str,
) -> MeetupOccurrence {
    let (location_name, location_city) = if instance.is_tba {
        (TBA.to_string(), regional_location(featured, region))
    } else {
        (
            instance
                .venue_name
                .clone()
                .unwrap_or_else(|| TBA.to_string()),
            instance.venue_address.clone().unwrap_or_default(),
        )
    };

    MeetupOccurrence {
        kind: OccurrenceKind::Featured,
        title: instance.title.clone(),
        when: instance.start,
        location_name,
        location_city,
        org_id: Some(instance.org_id.clone()),
        org_name: Some(instance.org_name.clone()),
        is_tba: instance.is_tba,
    }
}

fn regional_location(org: Option<&Organization>, region: &str) -> String {
    match org.and_then(|o| o.location.as_deref()) {
        Some(location) if !location.is_empty() && !region.is_empty() => {
            format!("{}, {}", location, region)
        }
        Some(location) => location.to_string(),
        None => String::new(),
    }
}

/// Formats an instant for a meetup card, e.g. `"Tuesday, Jan 6 at 7:00 PM"`.
///
/// # Example
///
/// ```
/// use meetup_engine::calendar::{format_meetup_datetime, parse_timezone};
/// use chrono::{TimeZone, Utc};
///
/// let tz = parse_timezone("America/Chicago").unwrap();
/// let start = Utc.with_ymd_and_hms(2026, 1, 7, 1, 0, 0).unwrap();
/// assert_eq!(format_meetup_datetime(start, tz), "Tuesday, Jan 6 at 7:00 PM");
/// ```
pub fn format_meetup_datetime(instant: DateTime<Utc>, tz: Tz) -> String {
    instant
        .with_timezone(&tz)
        .format("%A, %b %-d at %-I:%M %p")
        .to_string()
}
