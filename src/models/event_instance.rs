//! Concrete occurrences of recurring meetups.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One dated and timed occurrence of a [`RecurringEvent`](super::RecurringEvent).
///
/// Instances are value objects: they are rebuilt every time a month is
/// expanded and are never mutated. The organization is referenced by id and
/// name only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventInstance {
    /// `<event-id>-<YYYY-MM-DD>`; identical across re-expansions.
    pub instance_id: String,
    /// The recurring event this instance came from.
    pub event_id: String,
    /// Calendar title.
    pub title: String,
    /// Owning organization id.
    pub org_id: String,
    /// Owning organization name.
    pub org_name: String,
    /// Local calendar date of the occurrence.
    pub date: NaiveDate,
    /// Start instant.
    pub start: DateTime<Utc>,
    /// End instant.
    pub end: DateTime<Utc>,
    /// Venue is to be announced.
    pub is_tba: bool,
    /// Venue name; always `None` when `is_tba`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue_name: Option<String>,
    /// Venue address; always `None` when `is_tba`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue_address: Option<String>,
    /// Free-text note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// RSVP link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rsvp_url: Option<String>,
    /// RSVP link label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rsvp_label: Option<String>,
}

impl EventInstance {
    /// Builds the stable instance id for an event on a date.
    pub fn make_id(event_id: &str, date: NaiveDate) -> String {
        format!("{}-{}", event_id, date.format("%Y-%m-%d"))
    }

    /// Splits an instance id back into its event id and date.
    ///
    /// # Example
    ///
    /// ```
    /// use meetup_engine::models::EventInstance;
    /// use chrono::NaiveDate;
    ///
    /// let (event_id, date) = EventInstance::parse_id("dfa-meetup-0-2026-01-07").unwrap();
    /// assert_eq!(event_id, "dfa-meetup-0");
    /// assert_eq!(date, NaiveDate::from_ymd_opt(2026, 1, 7).unwrap());
    /// ```
    pub fn parse_id(instance_id: &str) -> Option<(&str, NaiveDate)> {
        // "-YYYY-MM-DD" is 11 bytes
        let split = instance_id.len().checked_sub(11)?;
        if !instance_id.is_char_boundary(split) {
            return None;
        }
        let (event_id, suffix) = instance_id.split_at(split);
        let date = NaiveDate::parse_from_str(suffix.strip_prefix('-')?, "%Y-%m-%d").ok()?;
        if event_id.is_empty() {
            return None;
        }
        Some((event_id, date))
    }

    /// Returns true if the instance has not ended at `now`.
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.end > now
    }
}
