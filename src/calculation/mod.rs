//! Crew pay calculation for the non-union rate calculator.
//!
//! This module contains lenient numeric parsing, clock time parsing, base
//! hourly derivation, per-day pay with the 12 hour guarantee, invoice
//! aggregation, and invoice document assembly.

mod base_rate;
mod clock;
mod day_pay;
mod invoice_document;
mod invoice_totals;
mod numeric;

pub use base_rate::{BaseHourlyResult, WEIGHTED_DAY_HOURS, compute_base_hourly, derive_base_hourly};
pub use clock::{MINUTES_PER_DAY, minutes_between, parse_clock_minutes};
pub use day_pay::{
    GUARANTEED_HOURS, OVERTIME_MULTIPLIER, STRAIGHT_HOURS, TIME_AND_HALF_HOURS,
    TIME_AND_HALF_MULTIPLIER, calc_day,
};
pub use invoice_document::{InvoiceInput, build_invoice_document, format_phone, party_lines};
pub use invoice_totals::{PayInput, aggregate, calculate_pay};
pub use numeric::{
    AmountError, MAX_AMOUNT, check_amount, display_quantity, format_money, parse_amount,
    round_money, try_parse_amount,
};
