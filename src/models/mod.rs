//! Core data models for the meetup engine.
//!
//! This module contains the directory and recurrence types consumed by the
//! calendar, the event instances it produces, and the inputs and results of
//! the crew pay calculator.

mod calculation_result;
mod calendar_month;
mod day_entry;
mod directory;
mod event_instance;
mod invoice;
mod recurrence;

pub use calculation_result::{AuditStep, AuditTrace, AuditWarning, InvoiceTotals, PayCalculation};
pub use calendar_month::{CalendarMonth, days_in_month};
pub use day_entry::{DayBreakdown, DayCalc, DayEntry, LineItem};
pub use directory::{
    DEFAULT_DURATION_MINUTES, Directory, DirectorySection, LinkKind, Meetup, Organization,
    OrganizationLink, RecurringEvent, slugify,
};
pub use event_instance::EventInstance;
pub use invoice::{InvoiceDocument, InvoiceMeta, InvoiceParty, InvoiceRow};
pub use recurrence::{RecurrenceRule, weekday_index};

pub(crate) use directory::dash_separated;
