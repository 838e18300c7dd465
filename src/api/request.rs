//! Request types for the meetup engine API.
//!
//! The pay calculator and invoice endpoints accept the engine's own input
//! models directly; this module adds the query types and the site defaults
//! applied before a calculation runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calculation::{InvoiceInput, PayInput};
use crate::config::SiteSettings;

/// Body of `POST /calculate`.
pub type CalculateRequest = PayInput;

/// Body of `POST /invoice`.
pub type InvoiceRequest = InvoiceInput;

/// Query string of `GET /calendar/upcoming`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpcomingQuery {
    /// Reference instant; the server clock when absent.
    #[serde(default)]
    pub now: Option<DateTime<Utc>>,
}

/// Fills a blank mileage rate with the site default.
///
/// A rate the user typed, even an unparsable one, is left alone so the
/// calculator can warn about it.
pub fn apply_site_defaults(mut pay: PayInput, settings: &SiteSettings) -> PayInput {
    if pay.mileage_rate.trim().is_empty() {
        pay.mileage_rate = settings.default_mileage_rate.to_string();
    }
    pay
}
