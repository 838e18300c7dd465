//! HTTP API module for the meetup engine.
//!
//! This module exposes the month calendar, the upcoming meetup cards,
//! calendar exports, and the crew pay calculator over REST.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculateRequest, InvoiceRequest, UpcomingQuery, apply_site_defaults};
pub use response::{ApiError, ApiErrorResponse, CalendarLinkResponse, InstanceView, MonthResponse};
pub use state::AppState;
