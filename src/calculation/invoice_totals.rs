//! Invoice aggregation.
//!
//! Sums valid days, mileage, and expenses into [`InvoiceTotals`], and wraps a
//! whole calculator run into a [`PayCalculation`] with its audit trace.

use std::time::Instant;

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::models::{
    AuditStep, AuditTrace, AuditWarning, DayCalc, DayEntry, InvoiceTotals, LineItem,
    PayCalculation,
};

use super::base_rate::derive_base_hourly;
use super::numeric::{AmountError, check_amount, parse_amount, round_money};

/// Everything typed into the pay calculator.
///
/// Numeric fields stay as strings so that blank and partial input is
/// accepted; anything unparsable counts as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayInput {
    /// Guaranteed day rate.
    pub day_rate: String,
    /// Miles driven.
    pub miles: String,
    /// Reimbursement per mile.
    pub mileage_rate: String,
    /// Worked days in entry order.
    pub days: Vec<DayEntry>,
    /// Itemized expenses.
    pub line_items: Vec<LineItem>,
}

/// Sums day results, mileage, and expenses.
///
/// Invalid days contribute nothing. `overtime_total` is informational and is
/// already part of `labor_total`. A product or sum that leaves the decimal
/// range counts as zero.
///
/// # Example
///
/// ```
/// use meetup_engine::calculation::{aggregate, calc_day, compute_base_hourly};
/// use meetup_engine::models::LineItem;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rate = Decimal::from(300);
/// let base = compute_base_hourly(rate);
/// let days = vec![
///     calc_day(rate, base, "07:00", "19:00", Decimal::from(30)),
///     calc_day(rate, base, "06:00", "20:30", Decimal::from(30)),
/// ];
/// let items = vec![LineItem::new("Hard drive", "50")];
///
/// let totals = aggregate(&days, Decimal::from(40), Decimal::from_str("0.725").unwrap(), &items);
/// assert_eq!(totals.grand_total, Decimal::from_str("764.71").unwrap());
/// ```
pub fn aggregate(
    day_calcs: &[DayCalc],
    miles: Decimal,
    mileage_rate: Decimal,
    line_items: &[LineItem],
) -> InvoiceTotals {
    let valid = || day_calcs.iter().filter(|calc| calc.ok);

    let labor_total = checked_sum(valid().map(|calc| calc.day_pay));
    let overtime_total = checked_sum(valid().map(|calc| calc.overtime_pay));
    let mileage_pay = round_money(miles.checked_mul(mileage_rate).unwrap_or(Decimal::ZERO));
    let expenses_total = round_money(checked_sum(
        line_items.iter().map(|item| parse_amount(&item.cost)),
    ));

    InvoiceTotals {
        labor_total,
        overtime_total,
        mileage_pay,
        expenses_total,
        grand_total: checked_sum([labor_total, mileage_pay, expenses_total]),
    }
}

fn checked_sum(values: impl IntoIterator<Item = Decimal>) -> Decimal {
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |total, value| total.checked_add(value))
        .unwrap_or(Decimal::ZERO)
}

/// Runs the whole calculator: every day, then the invoice totals.
///
/// The audit trace starts with the base hourly derivation, continues with
/// each valid day's steps in order, and ends with the totals. Invalid days
/// and unparsable numbers are reported as warnings.
pub fn calculate_pay(input: &PayInput) -> PayCalculation {
    let start_time = Instant::now();
    let mut warnings = Vec::new();

    let day_rate = parse_field("day_rate", &input.day_rate, &mut warnings);
    let miles = parse_field("miles", &input.miles, &mut warnings);
    let mileage_rate = parse_field("mileage_rate", &input.mileage_rate, &mut warnings);

    let base = derive_base_hourly(day_rate, 1);
    let mut steps = vec![base.audit_step];

    let mut days = Vec::with_capacity(input.days.len());
    for (index, entry) in input.days.iter().enumerate() {
        let day_number = index + 1;
        parse_field(&format!("days[{}].meal_minutes", index), &entry.meal_minutes, &mut warnings);

        let calc = entry.calculate(day_rate, base.rate);
        if calc.ok {
            for step in &calc.audit_steps {
                steps.push(AuditStep {
                    step_number: steps.len() as u32 + 1,
                    reasoning: format!("Day {}: {}", day_number, step.reasoning),
                    ..step.clone()
                });
            }
        } else {
            warnings.push(AuditWarning::new(
                "INVALID_DAY",
                format!("Day {} skipped: {}", day_number, calc.errors.join(" ")),
                "medium",
            ));
        }
        days.push(calc);
    }

    for (index, item) in input.line_items.iter().enumerate() {
        parse_field(&format!("line_items[{}].cost", index), &item.cost, &mut warnings);
    }

    let totals = aggregate(&days, miles, mileage_rate, &input.line_items);
    steps.push(AuditStep {
        step_number: steps.len() as u32 + 1,
        rule_id: "invoice_totals".to_string(),
        rule_name: "Invoice Totals".to_string(),
        input: serde_json::json!({
            "valid_days": days.iter().filter(|d| d.ok).count(),
            "miles": miles.to_string(),
            "mileage_rate": mileage_rate.to_string(),
            "line_items": input.line_items.len()
        }),
        output: serde_json::json!({
            "labor_total": totals.labor_total.to_string(),
            "overtime_total": totals.overtime_total.to_string(),
            "mileage_pay": totals.mileage_pay.to_string(),
            "expenses_total": totals.expenses_total.to_string(),
            "grand_total": totals.grand_total.to_string()
        }),
        reasoning: format!(
            "Labor ${} + mileage ${} + expenses ${} = ${}",
            totals.labor_total, totals.mileage_pay, totals.expenses_total, totals.grand_total
        ),
    });

    let duration_us = start_time.elapsed().as_micros() as u64;
    debug!(
        days = days.len(),
        warnings = warnings.len(),
        grand_total = %totals.grand_total,
        duration_us,
        "Calculated pay"
    );

    PayCalculation {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        day_rate,
        base_hourly: base.rate,
        days,
        totals,
        audit_trace: AuditTrace {
            steps,
            warnings,
            duration_us,
        },
    }
}

fn parse_field(field: &str, raw: &str, warnings: &mut Vec<AuditWarning>) -> Decimal {
    match check_amount(raw) {
        Ok(value) => value,
        Err(err) => {
            let (code, severity) = match err {
                AmountError::NotANumber => ("UNPARSABLE_AMOUNT", "low"),
                AmountError::OutOfRange => ("AMOUNT_OUT_OF_RANGE", "medium"),
            };
            warnings.push(AuditWarning::new(
                code,
                format!("{} value '{}' {}; using 0", field, raw.trim(), err),
                severity,
            ));
            Decimal::ZERO
        }
    }
}
