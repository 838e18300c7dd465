//! Pay calculator day inputs and per-day results.
//!
//! Inputs are kept as the raw strings a user typed so that blank and partial
//! fields survive a round trip through the calculator. Parsing happens in
//! [`crate::calculation`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::AuditStep;

/// One worked day as entered by the user.
///
/// # Example
///
/// ```
/// use meetup_engine::models::DayEntry;
///
/// let day = DayEntry::new("07:00", "19:00", "30");
/// assert_eq!(day.parsed_date(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayEntry {
    /// Optional `YYYY-MM-DD` date, used for display only.
    #[serde(default)]
    pub date: String,
    /// Clock-in time, `HH:MM` 24-hour.
    #[serde(default)]
    pub in_time: String,
    /// Clock-out time, `HH:MM` 24-hour.
    #[serde(default)]
    pub out_time: String,
    /// Unpaid meal minutes.
    #[serde(default)]
    pub meal_minutes: String,
}

impl DayEntry {
    /// Creates an undated entry.
    pub fn new(in_time: &str, out_time: &str, meal_minutes: &str) -> Self {
        Self {
            date: String::new(),
            in_time: in_time.to_string(),
            out_time: out_time.to_string(),
            meal_minutes: meal_minutes.to_string(),
        }
    }

    /// Returns a copy of the entry with a date attached.
    pub fn on(mut self, date: &str) -> Self {
        self.date = date.to_string();
        self
    }

    /// The entry's date, if it is a valid `YYYY-MM-DD` string.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").ok()
    }
}

/// The pay result for one day.
///
/// When `ok` is false the numeric fields are zeroed and must not be read as
/// meaningful zeros; `errors` explains what was wrong.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCalc {
    /// Whether the inputs were valid.
    pub ok: bool,
    /// Human-readable validation errors.
    pub errors: Vec<String>,
    /// Paid hours after the meal deduction.
    pub paid_hours: Decimal,
    /// Total pay for the day, rounded to cents.
    pub day_pay: Decimal,
    /// Hours beyond the guaranteed 12.
    pub overtime_hours: Decimal,
    /// Pay for those hours at 2.0x, rounded to cents.
    pub overtime_pay: Decimal,
    /// The base hourly rate used.
    pub base_hourly: Decimal,
    /// Steps recording how the result was reached.
    #[serde(default)]
    pub audit_steps: Vec<AuditStep>,
}

impl DayCalc {
    /// A not-ok result carrying validation errors.
    pub fn invalid(errors: Vec<String>, base_hourly: Decimal) -> Self {
        Self {
            ok: false,
            errors,
            paid_hours: Decimal::ZERO,
            day_pay: Decimal::ZERO,
            overtime_hours: Decimal::ZERO,
            overtime_pay: Decimal::ZERO,
            base_hourly,
            audit_steps: vec![],
        }
    }
}

/// Display split of a day that ran past the guarantee.
///
/// The first two tiers are the portions of the guaranteed day rate; only the
/// 2.0x tier is overtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayBreakdown {
    /// Hours at 1.0x (always 8).
    pub straight_hours: Decimal,
    /// Pay for the 1.0x hours.
    pub straight_pay: Decimal,
    /// Hours at 1.5x (always 4).
    pub time_and_half_hours: Decimal,
    /// Pay for the 1.5x hours.
    pub time_and_half_pay: Decimal,
    /// Hours at 2.0x.
    pub overtime_hours: Decimal,
    /// Pay for the 2.0x hours.
    pub overtime_pay: Decimal,
}

/// An itemized expense on the invoice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Short title, e.g. "Hard drive".
    #[serde(default)]
    pub title: String,
    /// Optional longer description.
    #[serde(default)]
    pub description: String,
    /// Cost as typed; unparsable values count as zero.
    #[serde(default)]
    pub cost: String,
}

impl LineItem {
    /// Creates a line item.
    pub fn new(title: &str, cost: &str) -> Self {
        Self {
            title: title.to_string(),
            description: String::new(),
            cost: cost.to_string(),
        }
    }
}
