//! Directory of organizations and their recurring meetups.
//!
//! The directory is supplied by the site's static data and consumed read-only
//! by the calendar engine. Each organization may carry any number of meetups,
//! each with one [`RecurrenceRule`].

use serde::{Deserialize, Serialize};

use crate::error::EngineResult;

use super::RecurrenceRule;

/// Default length of a meetup when the directory does not say otherwise.
pub const DEFAULT_DURATION_MINUTES: u32 = 120;

/// The kind of an organization's outbound link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    /// A website.
    Website,
    /// An Instagram profile.
    Instagram,
    /// A Discord invite.
    Discord,
    /// A Facebook page or group.
    Facebook,
    /// A YouTube channel.
    Youtube,
    /// A TikTok profile.
    Tiktok,
    /// An X (Twitter) profile.
    X,
    /// A LinkedIn page.
    Linkedin,
    /// A mailto address.
    Email,
    /// A phone number.
    Phone,
}

impl LinkKind {
    /// The lowercase name used when no label is provided.
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkKind::Website => "website",
            LinkKind::Instagram => "instagram",
            LinkKind::Discord => "discord",
            LinkKind::Facebook => "facebook",
            LinkKind::Youtube => "youtube",
            LinkKind::Tiktok => "tiktok",
            LinkKind::X => "x",
            LinkKind::Linkedin => "linkedin",
            LinkKind::Email => "email",
            LinkKind::Phone => "phone",
        }
    }
}

/// An outbound link on an organization's listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationLink {
    /// What the link points at.
    pub kind: LinkKind,
    /// The target URL.
    pub href: String,
    /// Optional display label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl OrganizationLink {
    /// Label to display, falling back to the link kind.
    pub fn display_label(&self) -> &str {
        match self.label.as_deref() {
            Some(label) if !label.is_empty() => label,
            _ => self.kind.as_str(),
        }
    }
}

/// A recurring meetup hosted by an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meetup {
    /// Title shown on the calendar; defaults to the organization name.
    #[serde(default)]
    pub title: Option<String>,
    /// When the meetup repeats.
    pub recurrence: RecurrenceRule,
    /// Venue is to be announced; location must not be shown or exported.
    #[serde(default)]
    pub is_tba: bool,
    /// Venue name, e.g. "Strangeways".
    #[serde(default)]
    pub location_name: Option<String>,
    /// Venue city, e.g. "Dallas, TX".
    #[serde(default)]
    pub location_city: Option<String>,
    /// Full street address.
    #[serde(default)]
    pub address: Option<String>,
    /// Free-text note shown with the event and in calendar exports.
    #[serde(default)]
    pub notes: Option<String>,
    /// Overrides the default event duration.
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    /// Event-specific RSVP link.
    #[serde(default)]
    pub rsvp_url: Option<String>,
    /// Label for the RSVP link.
    #[serde(default)]
    pub rsvp_label: Option<String>,
}

/// An organization listed in the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    /// Stable id; generated from the name when left empty.
    #[serde(default)]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Short description.
    #[serde(default)]
    pub description: String,
    /// City or region, e.g. "Fort Worth".
    #[serde(default)]
    pub location: Option<String>,
    /// Outbound links.
    #[serde(default)]
    pub links: Vec<OrganizationLink>,
    /// Recurring meetups.
    #[serde(default)]
    pub meetups: Vec<Meetup>,
    /// Whether this is the organization featured on the home page.
    #[serde(default)]
    pub is_home_featured: bool,
}

/// A titled group of organizations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectorySection {
    /// Section id.
    pub id: String,
    /// Section heading.
    pub title: String,
    /// Optional subheading.
    #[serde(default)]
    pub subtitle: Option<String>,
    /// Organizations in the section.
    #[serde(default)]
    pub items: Vec<Organization>,
}

/// A meetup flattened together with its organization, ready for expansion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringEvent {
    /// Stable id, `<org-id>-meetup-<index>`.
    pub id: String,
    /// Owning organization id.
    pub org_id: String,
    /// Owning organization name.
    pub org_name: String,
    /// Calendar title.
    pub label: String,
    /// When the event repeats.
    pub rule: RecurrenceRule,
    /// Length of each occurrence.
    pub duration_minutes: u32,
    /// Venue is to be announced.
    pub is_tba: bool,
    /// Venue name (never set for TBA events).
    pub venue_name: Option<String>,
    /// Venue address or city (never set for TBA events).
    pub venue_address: Option<String>,
    /// Free-text note.
    pub notes: Option<String>,
    /// RSVP link.
    pub rsvp_url: Option<String>,
    /// RSVP link label.
    pub rsvp_label: Option<String>,
}

impl RecurringEvent {
    /// Flattens one meetup of an organization.
    pub fn from_meetup(
        org: &Organization,
        meetup: &Meetup,
        index: usize,
        default_duration_minutes: u32,
    ) -> Self {
        let (venue_name, venue_address) = if meetup.is_tba {
            (None, None)
        } else {
            (
                non_empty(meetup.location_name.as_deref()),
                non_empty(meetup.address.as_deref())
                    .or_else(|| non_empty(meetup.location_city.as_deref())),
            )
        };

        RecurringEvent {
            id: format!("{}-meetup-{}", org.id, index),
            org_id: org.id.clone(),
            org_name: org.name.clone(),
            label: non_empty(meetup.title.as_deref()).unwrap_or_else(|| org.name.clone()),
            rule: meetup.recurrence.clone(),
            duration_minutes: meetup.duration_minutes.unwrap_or(default_duration_minutes),
            is_tba: meetup.is_tba,
            venue_name,
            venue_address,
            notes: non_empty(meetup.notes.as_deref()),
            rsvp_url: non_empty(meetup.rsvp_url.as_deref()),
            rsvp_label: non_empty(meetup.rsvp_label.as_deref()),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// The full organization directory.
///
/// # Example
///
/// ```
/// use meetup_engine::models::{Directory, DirectorySection, Organization};
///
/// let directory = Directory::new(vec![DirectorySection {
///     id: "community".to_string(),
///     title: "Community".to_string(),
///     subtitle: None,
///     items: vec![Organization {
///         id: String::new(),
///         name: "Fort Worth Filmmakers & Friends".to_string(),
///         description: String::new(),
///         location: Some("Fort Worth".to_string()),
///         links: vec![],
///         meetups: vec![],
///         is_home_featured: true,
///     }],
/// }])
/// .unwrap();
///
/// let org = directory.find_by_id("fort-worth-filmmakers-and-friends").unwrap();
/// assert!(org.is_home_featured);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directory {
    sections: Vec<DirectorySection>,
}

impl Directory {
    /// Builds a directory, filling in missing ids and validating every rule.
    pub fn new(sections: Vec<DirectorySection>) -> EngineResult<Self> {
        let mut sections = sections;
        for org in sections.iter_mut().flat_map(|s| s.items.iter_mut()) {
            if org.id.trim().is_empty() {
                org.id = slugify(&org.name);
            }
        }

        let directory = Self { sections };
        for org in directory.organizations() {
            for (index, meetup) in org.meetups.iter().enumerate() {
                meetup
                    .recurrence
                    .validate(&format!("{}-meetup-{}", org.id, index))?;
            }
        }
        Ok(directory)
    }

    /// The directory sections in display order.
    pub fn sections(&self) -> &[DirectorySection] {
        &self.sections
    }

    /// Every organization across all sections, in display order.
    pub fn organizations(&self) -> impl Iterator<Item = &Organization> {
        self.sections.iter().flat_map(|s| s.items.iter())
    }

    /// Looks up an organization by id.
    pub fn find_by_id(&self, id: &str) -> Option<&Organization> {
        self.organizations().find(|o| o.id == id)
    }

    /// Looks up an organization by name, ignoring case and surrounding space.
    pub fn find_by_name(&self, name: &str) -> Option<&Organization> {
        let wanted = name.trim().to_lowercase();
        self.organizations()
            .find(|o| o.name.trim().to_lowercase() == wanted)
    }

    /// The organization featured on the home page, if any.
    pub fn home_featured(&self) -> Option<&Organization> {
        self.organizations().find(|o| o.is_home_featured)
    }

    /// Flattens every meetup into a [`RecurringEvent`].
    pub fn recurring_events(&self, default_duration_minutes: u32) -> Vec<RecurringEvent> {
        self.organizations()
            .flat_map(|org| {
                org.meetups.iter().enumerate().map(move |(index, meetup)| {
                    RecurringEvent::from_meetup(org, meetup, index, default_duration_minutes)
                })
            })
            .collect()
    }
}

/// Generates a URL-safe id from a display name.
///
/// # Example
///
/// ```
/// use meetup_engine::models::slugify;
///
/// assert_eq!(slugify("  Dallas Producers Association (DPA) "), "dallas-producers-association-dpa");
/// assert_eq!(slugify("Film & Photo Social"), "film-and-photo-social");
/// ```
pub fn slugify(input: &str) -> String {
    dash_separated(&input.trim().replace('&', "and"))
}

/// Lowercases `input` and joins its ASCII alphanumeric runs with dashes.
pub(crate) fn dash_separated(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;
    for c in input.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    slug
}
