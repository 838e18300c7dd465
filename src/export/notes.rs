//! Human-readable notes and location shared by every calendar export.
//!
//! The ICS file and the web calendar link both take their description and
//! location from here, so the two can never disagree.

use crate::models::{EventInstance, Organization};

/// Builds the multi-line description for an exported event.
///
/// Lines, in order: the disclaimer; the event note; the organizer's name,
/// description, and location; the meetup location; and every organizer link
/// as `- label: href`. Empty parts are left out.
pub fn build_calendar_notes(
    instance: &EventInstance,
    org: Option<&Organization>,
    disclaimer: &str,
) -> String {
    let mut parts: Vec<String> = vec![disclaimer.to_string()];

    if let Some(notes) = non_empty(instance.notes.as_deref()) {
        parts.push(String::new());
        parts.push(format!("Note: {}", notes));
    }

    let organizer = org
        .and_then(|o| non_empty(Some(o.name.as_str())))
        .or_else(|| non_empty(Some(instance.org_name.as_str())))
        .unwrap_or("Organizer");
    parts.push(String::new());
    parts.push(format!("Organizer: {}", organizer));

    if let Some(about) = org.and_then(|o| non_empty(Some(o.description.as_str()))) {
        parts.push(format!("About: {}", about));
    }
    if let Some(location) = org.and_then(|o| non_empty(o.location.as_deref())) {
        parts.push(format!("Organizer location: {}", location));
    }
    let venue = venue_line(instance);
    if !venue.is_empty() {
        parts.push(format!("Meetup location: {}", venue));
    }

    if let Some(org) = org.filter(|o| !o.links.is_empty()) {
        parts.push(String::new());
        parts.push("Links:".to_string());
        for link in &org.links {
            parts.push(format!("- {}: {}", link.display_label(), link.href));
        }
    }

    parts.join("\n")
}

/// Builds the location text for an exported event.
///
/// Uses the venue name and address when either is set, otherwise the
/// organization's location, otherwise an empty string.
pub fn build_calendar_location(instance: &EventInstance, org: Option<&Organization>) -> String {
    let venue = venue_line(instance);
    if !venue.is_empty() {
        return venue;
    }
    org.and_then(|o| non_empty(o.location.as_deref()))
        .unwrap_or_default()
        .to_string()
}

fn venue_line(instance: &EventInstance) -> String {
    [instance.venue_name.as_deref(), instance.venue_address.as_deref()]
        .into_iter()
        .filter_map(non_empty)
        .collect::<Vec<_>>()
        .join(", ")
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
