//! Pay calculation result models.
//!
//! This module contains the [`PayCalculation`] type and its associated
//! structures that capture the output of one run of the crew pay calculator,
//! including per-day results, invoice totals, and the audit trace.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::DayCalc;

/// Aggregated invoice totals.
///
/// `grand_total` is exactly `labor_total + mileage_pay + expenses_total`.
/// `overtime_total` is already part of `labor_total` and is informational.
///
/// # Example
///
/// ```
/// use meetup_engine::models::InvoiceTotals;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let totals = InvoiceTotals {
///     labor_total: Decimal::from_str("685.71").unwrap(),
///     overtime_total: Decimal::from_str("85.71").unwrap(),
///     mileage_pay: Decimal::from_str("29.00").unwrap(),
///     expenses_total: Decimal::from_str("50.00").unwrap(),
///     grand_total: Decimal::from_str("764.71").unwrap(),
/// };
/// assert_eq!(totals.base_labor(), Decimal::from_str("600.00").unwrap());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    /// Sum of every valid day's pay.
    pub labor_total: Decimal,
    /// Sum of every valid day's overtime pay.
    pub overtime_total: Decimal,
    /// Miles multiplied by the mileage rate.
    pub mileage_pay: Decimal,
    /// Sum of line item costs.
    pub expenses_total: Decimal,
    /// Labor plus mileage plus expenses.
    pub grand_total: Decimal,
}

impl InvoiceTotals {
    /// Labor paid within the guaranteed day rates.
    pub fn base_labor(&self) -> Decimal {
        (self.labor_total - self.overtime_total).max(Decimal::ZERO)
    }
}

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag inputs that were ignored or coerced without stopping the
/// calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

impl AuditWarning {
    /// Creates a warning.
    pub fn new(code: &str, message: impl Into<String>, severity: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            severity: severity.to_string(),
        }
    }
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// The complete result of one pay calculator run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayCalculation {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The day rate used for every day.
    pub day_rate: Decimal,
    /// The base hourly rate derived from the day rate.
    pub base_hourly: Decimal,
    /// One result per entered day, in input order.
    pub days: Vec<DayCalc>,
    /// Aggregated totals.
    pub totals: InvoiceTotals,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}
