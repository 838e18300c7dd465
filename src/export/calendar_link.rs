//! "Add to calendar" deep links for web calendar services.

use url::Url;

use crate::config::SiteSettings;
use crate::error::{EngineError, EngineResult};
use crate::models::{EventInstance, Organization};

use super::ics::utc_stamp;
use super::notes::{build_calendar_location, build_calendar_notes};

/// Builds a link that opens a pre-filled "add event" form.
///
/// Query parameters: `action=TEMPLATE`, `text` (title), `dates`
/// (`start/end` as UTC stamps), `details` (the shared notes), `location`
/// when known, and `sprop` when a public event page is configured.
///
/// # Errors
///
/// Returns [`EngineError::ExportError`] if the configured base URL does not
/// parse.
pub fn google_calendar_url(
    instance: &EventInstance,
    org: Option<&Organization>,
    settings: &SiteSettings,
) -> EngineResult<String> {
    let mut url =
        Url::parse(&settings.calendar_link_base).map_err(|e| EngineError::ExportError {
            message: format!(
                "invalid calendar link base '{}': {}",
                settings.calendar_link_base, e
            ),
        })?;

    let dates = format!("{}/{}", utc_stamp(instance.start), utc_stamp(instance.end));
    let details = build_calendar_notes(instance, org, &settings.notes_disclaimer);
    let location = build_calendar_location(instance, org);

    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("action", "TEMPLATE")
            .append_pair("text", &instance.title)
            .append_pair("dates", &dates)
            .append_pair("details", &details);
        if !location.is_empty() {
            query.append_pair("location", &location);
        }
        if let Some(public_url) = settings.public_event_url.as_deref().filter(|u| !u.is_empty()) {
            query.append_pair("sprop", public_url);
        }
    }

    Ok(url.into())
}
