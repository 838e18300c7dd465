//! Configuration types for the site.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, and the validated
//! [`SiteConfig`] built from them.

use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calendar::parse_timezone;
use crate::error::EngineResult;
use crate::models::{Directory, DirectorySection, RecurringEvent};

/// Settings for generated iCalendar files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IcsSettings {
    /// Domain appended to instance ids to form event UIDs.
    pub uid_domain: String,
    /// Value of the `PRODID` property.
    pub product_id: String,
    /// Column at which content lines are folded.
    pub fold_width: usize,
}

impl Default for IcsSettings {
    fn default() -> Self {
        Self {
            uid_domain: "fwfilmmakers.org".to_string(),
            product_id: "-//Fort Worth Filmmakers//Events//EN".to_string(),
            fold_width: 73,
        }
    }
}

/// Site-wide settings from `site.yaml`.
///
/// Every field has a default, so an empty file (or no file at all, via
/// [`SiteSettings::default`]) yields a working configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    /// Site name.
    pub name: String,
    /// IANA timezone every meetup time is written in.
    pub timezone: String,
    /// Region appended to city names, e.g. "TX".
    pub region: String,
    /// Meetup length when the directory does not give one.
    pub default_duration_minutes: u32,
    /// Mileage rate suggested to the pay calculator.
    pub default_mileage_rate: Decimal,
    /// iCalendar settings.
    pub ics: IcsSettings,
    /// Base URL of the web calendar "add event" page.
    pub calendar_link_base: String,
    /// Base URL of the maps search page.
    pub maps_search_base: String,
    /// First line of every exported event description.
    pub notes_disclaimer: String,
    /// Public events page linked from exported events.
    pub public_event_url: Option<String>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            name: "Fort Worth Filmmakers".to_string(),
            timezone: "America/Chicago".to_string(),
            region: "TX".to_string(),
            default_duration_minutes: 120,
            default_mileage_rate: Decimal::from_parts(725, 0, 0, false, 3),
            ics: IcsSettings::default(),
            calendar_link_base: "https://calendar.google.com/calendar/render".to_string(),
            maps_search_base: "https://www.google.com/maps/search/".to_string(),
            notes_disclaimer: "Recurring listings only: confirm updates on organizer channels."
                .to_string(),
            public_event_url: None,
        }
    }
}

/// The `directory.yaml` file structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectoryFile {
    /// Directory sections in display order.
    #[serde(default)]
    pub sections: Vec<DirectorySection>,
}

/// The complete, validated site configuration.
///
/// Holds the parsed timezone, the validated directory, and the recurring
/// events flattened from it.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    settings: SiteSettings,
    timezone: Tz,
    directory: Directory,
    events: Vec<RecurringEvent>,
}

impl SiteConfig {
    /// Validates settings and directory sections into a configuration.
    ///
    /// Fails on an unknown timezone or any invalid recurrence rule.
    pub fn new(settings: SiteSettings, sections: Vec<DirectorySection>) -> EngineResult<Self> {
        let timezone = parse_timezone(&settings.timezone)?;
        let directory = Directory::new(sections)?;
        let events = directory.recurring_events(settings.default_duration_minutes);
        Ok(Self {
            settings,
            timezone,
            directory,
            events,
        })
    }

    /// Returns the site settings.
    pub fn settings(&self) -> &SiteSettings {
        &self.settings
    }

    /// Returns the configured timezone.
    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Returns the organization directory.
    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    /// Returns every recurring event in the directory.
    pub fn events(&self) -> &[RecurringEvent] {
        &self.events
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            settings: SiteSettings::default(),
            timezone: chrono_tz::America::Chicago,
            directory: Directory::default(),
            events: Vec::new(),
        }
    }
}
