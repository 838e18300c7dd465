//! iCalendar (RFC 5545) export of a single event instance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::SiteSettings;
use crate::error::{EngineError, EngineResult};
use crate::models::{EventInstance, Organization, dash_separated};

use super::notes::{build_calendar_location, build_calendar_notes};

/// MIME type of generated calendar files.
pub const ICS_MIME_TYPE: &str = "text/calendar;charset=utf-8";

/// A generated `.ics` file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IcsDocument {
    /// Suggested download name, e.g. `monthly-mixer.ics`.
    pub filename: String,
    /// MIME type of the content.
    pub mime_type: String,
    /// The calendar text with CRLF line endings.
    pub content: String,
}

/// Formats an instant as `YYYYMMDDTHHMMSSZ`.
pub fn utc_stamp(instant: DateTime<Utc>) -> String {
    instant.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Escapes iCalendar text: backslash, newline, semicolon, and comma.
pub fn escape_ics_text(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace("\r\n", "\\n")
        .replace('\n', "\\n")
        .replace(';', "\\;")
        .replace(',', "\\,")
}

/// Folds a content line every `width` characters.
///
/// Continuation lines start with a single space, which counts towards the
/// width. Folding is by character so multi-byte text is never split.
pub fn fold_ics_line(line: &str, width: usize) -> String {
    let mut chars: Vec<char> = line.chars().collect();
    if width < 2 || chars.len() <= width {
        return line.to_string();
    }

    let mut folded = Vec::new();
    while chars.len() > width {
        let rest = chars.split_off(width);
        folded.push(chars.into_iter().collect::<String>());
        chars = std::iter::once(' ').chain(rest).collect();
    }
    folded.push(chars.into_iter().collect::<String>());
    folded.join("\r\n")
}

/// Builds a download filename from an event title.
///
/// # Example
///
/// ```
/// use meetup_engine::export::ics_filename;
///
/// assert_eq!(ics_filename("Screenwriters' Table Read #4"), "screenwriters-table-read-4.ics");
/// assert_eq!(ics_filename("!!!"), "event.ics");
/// ```
pub fn ics_filename(title: &str) -> String {
    let slug = dash_separated(title);
    if slug.is_empty() {
        "event.ics".to_string()
    } else {
        format!("{}.ics", slug)
    }
}

/// Builds a one-event calendar file for `instance`.
///
/// `now` becomes the `DTSTAMP`. The UID is the instance id at the configured
/// domain, so regenerating the file updates the same calendar entry.
///
/// # Errors
///
/// Returns [`EngineError::ExportError`] if the configured fold width is
/// below 2.
pub fn build_ics(
    instance: &EventInstance,
    org: Option<&Organization>,
    settings: &SiteSettings,
    now: DateTime<Utc>,
) -> EngineResult<IcsDocument> {
    let width = settings.ics.fold_width;
    if width < 2 {
        return Err(EngineError::ExportError {
            message: format!("ics fold width {} is too small", width),
        });
    }

    let uid = format!("{}@{}", instance.instance_id, settings.ics.uid_domain);
    let description = build_calendar_notes(instance, org, &settings.notes_disclaimer);
    let location = build_calendar_location(instance, org);

    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        format!("PRODID:{}", settings.ics.product_id),
        "CALSCALE:GREGORIAN".to_string(),
        "METHOD:PUBLISH".to_string(),
        "BEGIN:VEVENT".to_string(),
        format!("UID:{}", escape_ics_text(&uid)),
        format!("DTSTAMP:{}", utc_stamp(now)),
        format!("DTSTART:{}", utc_stamp(instance.start)),
        format!("DTEND:{}", utc_stamp(instance.end)),
        format!("SUMMARY:{}", escape_ics_text(&instance.title)),
    ];
    if !location.is_empty() {
        lines.push(format!("LOCATION:{}", escape_ics_text(&location)));
    }
    lines.push(format!("DESCRIPTION:{}", escape_ics_text(&description)));
    if let Some(url) = settings.public_event_url.as_deref().filter(|u| !u.is_empty()) {
        lines.push(format!("URL:{}", escape_ics_text(url)));
    }
    lines.push("END:VEVENT".to_string());
    lines.push("END:VCALENDAR".to_string());

    let mut content = String::new();
    for line in &lines {
        content.push_str(&fold_ics_line(line, width));
        content.push_str("\r\n");
    }

    Ok(IcsDocument {
        filename: ics_filename(&instance.title),
        mime_type: ICS_MIME_TYPE.to_string(),
        content,
    })
}
