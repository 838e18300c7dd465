//! Calendar exports and downloadable documents.
//!
//! An event instance can leave the site two ways: as an `.ics` file or as a
//! link to a web calendar's "add event" form. Both are built from the same
//! notes and location text.

mod calendar_link;
mod document;
mod ics;
mod maps;
mod notes;

pub use calendar_link::google_calendar_url;
pub use document::{DocumentHandle, DocumentStore, DownloadSlot, MemoryDocumentStore, StoredDocument};
pub use ics::{ICS_MIME_TYPE, IcsDocument, build_ics, escape_ics_text, fold_ics_line, ics_filename, utc_stamp};
pub use maps::maps_url;
pub use notes::{build_calendar_location, build_calendar_notes};

impl From<IcsDocument> for StoredDocument {
    fn from(document: IcsDocument) -> Self {
        StoredDocument {
            filename: document.filename,
            mime_type: document.mime_type,
            bytes: document.content.into_bytes(),
        }
    }
}
