//! Day rate pay with a 12 hour guarantee.
//!
//! A day rate buys up to 12 paid hours: any shorter day is still paid the
//! full rate. Paid hours beyond 12 are overtime at double the base hourly
//! rate, on top of the day rate.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{AuditStep, DayBreakdown, DayCalc, DayEntry};

use super::clock::{minutes_between, parse_clock_minutes};
use super::numeric::{parse_amount, round_money};

/// Paid hours covered by the day rate.
pub const GUARANTEED_HOURS: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Multiplier applied to base hourly for hours beyond the guarantee.
pub const OVERTIME_MULTIPLIER: Decimal = Decimal::from_parts(20, 0, 0, false, 1);

/// Straight-time hours inside the guaranteed day.
pub const STRAIGHT_HOURS: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// Time-and-a-half hours inside the guaranteed day.
pub const TIME_AND_HALF_HOURS: Decimal = Decimal::from_parts(4, 0, 0, false, 0);

/// Multiplier for the time-and-a-half hours.
pub const TIME_AND_HALF_MULTIPLIER: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

const MINUTES_PER_HOUR: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

/// Calculates pay for one day.
///
/// # Arguments
///
/// * `day_rate` - The guaranteed day rate; negative rates are treated as zero
/// * `base_hourly` - The base hourly rate, normally `day_rate / 14`
/// * `in_time` - Clock-in time as `HH:MM`
/// * `out_time` - Clock-out time as `HH:MM`; earlier than `in_time` means the
///   shift ran past midnight
/// * `meal_minutes` - Unpaid meal minutes
///
/// # Returns
///
/// A [`DayCalc`]. Malformed times or negative meal minutes produce a not-ok
/// result with every reason listed and all amounts zeroed. So does pay too
/// large for the decimal range.
///
/// Overtime starts once paid hours, rounded to two places, exceed 12.
///
/// # Examples
///
/// ## Short day is paid the full rate
///
/// ```
/// use meetup_engine::calculation::{calc_day, compute_base_hourly};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rate = Decimal::from_str("300").unwrap();
/// let calc = calc_day(rate, compute_base_hourly(rate), "07:00", "19:00", Decimal::from(30));
///
/// assert!(calc.ok);
/// assert_eq!(calc.paid_hours, Decimal::from_str("11.5").unwrap());
/// assert_eq!(calc.day_pay, Decimal::from_str("300.00").unwrap());
/// ```
///
/// ## Long day earns double time past 12 hours
///
/// ```
/// use meetup_engine::calculation::{calc_day, compute_base_hourly};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rate = Decimal::from_str("300").unwrap();
/// let calc = calc_day(rate, compute_base_hourly(rate), "06:00", "20:30", Decimal::from(30));
///
/// assert_eq!(calc.overtime_hours, Decimal::from(2));
/// assert_eq!(calc.overtime_pay, Decimal::from_str("85.71").unwrap());
/// assert_eq!(calc.day_pay, Decimal::from_str("385.71").unwrap());
/// ```
pub fn calc_day(
    day_rate: Decimal,
    base_hourly: Decimal,
    in_time: &str,
    out_time: &str,
    meal_minutes: Decimal,
) -> DayCalc {
    let start = parse_clock_minutes(in_time);
    let end = parse_clock_minutes(out_time);

    let mut errors = Vec::new();
    if start.is_none() {
        errors.push("Invalid In time.".to_string());
    }
    if end.is_none() {
        errors.push("Invalid Out time.".to_string());
    }
    if meal_minutes < Decimal::ZERO {
        errors.push("Meal minutes cannot be negative.".to_string());
    }

    let (start, end) = match (start, end) {
        (Some(start), Some(end)) if errors.is_empty() => (start, end),
        _ => return DayCalc::invalid(errors, base_hourly),
    };

    let elapsed = minutes_between(start, end);
    let paid_minutes = (Decimal::from(elapsed) - meal_minutes).max(Decimal::ZERO);
    let paid_hours = paid_minutes / MINUTES_PER_HOUR;

    // overtime is decided on the reported hours so 12.00 never earns extra
    let is_overtime = round_hours(paid_hours) > GUARANTEED_HOURS;
    let overtime_hours = (paid_hours - GUARANTEED_HOURS).max(Decimal::ZERO);

    let guaranteed = round_money(day_rate.max(Decimal::ZERO));
    let priced = if is_overtime {
        overtime_hours
            .checked_mul(base_hourly)
            .and_then(|pay| pay.checked_mul(OVERTIME_MULTIPLIER))
            .map(round_money)
            .and_then(|pay| guaranteed.checked_add(pay).map(|total| (pay, total)))
    } else {
        Some((Decimal::ZERO, guaranteed))
    };
    let Some((overtime_pay, day_pay)) = priced else {
        return DayCalc::invalid(vec!["Pay is out of range.".to_string()], base_hourly);
    };

    let audit_steps = vec![
        AuditStep {
            step_number: 1,
            rule_id: "shift_length".to_string(),
            rule_name: "Shift Length".to_string(),
            input: serde_json::json!({
                "in_time": in_time.trim(),
                "out_time": out_time.trim()
            }),
            output: serde_json::json!({
                "elapsed_minutes": elapsed,
                "crosses_midnight": end < start
            }),
            reasoning: if end < start {
                format!(
                    "Out {} is before In {}; shift runs past midnight for {} minutes",
                    out_time.trim(),
                    in_time.trim(),
                    elapsed
                )
            } else {
                format!("{} minutes from In to Out", elapsed)
            },
        },
        AuditStep {
            step_number: 2,
            rule_id: "meal_deduction".to_string(),
            rule_name: "Unpaid Meal Deduction".to_string(),
            input: serde_json::json!({
                "elapsed_minutes": elapsed,
                "meal_minutes": meal_minutes.to_string()
            }),
            output: serde_json::json!({
                "paid_minutes": paid_minutes.to_string(),
                "paid_hours": round_hours(paid_hours).to_string()
            }),
            reasoning: format!(
                "{} minutes less {} unpaid meal minutes = {} paid hours",
                elapsed,
                meal_minutes,
                round_hours(paid_hours)
            ),
        },
        AuditStep {
            step_number: 3,
            rule_id: "overtime_beyond_guarantee".to_string(),
            rule_name: "Overtime Beyond 12 Hours".to_string(),
            input: serde_json::json!({
                "paid_hours": round_hours(paid_hours).to_string(),
                "guaranteed_hours": GUARANTEED_HOURS.to_string(),
                "base_hourly": base_hourly.to_string(),
                "multiplier": OVERTIME_MULTIPLIER.to_string()
            }),
            output: serde_json::json!({
                "overtime_hours": round_hours(overtime_hours).to_string(),
                "overtime_pay": overtime_pay.to_string()
            }),
            reasoning: if is_overtime {
                format!(
                    "{} hours beyond {} at {}x base = ${}",
                    round_hours(overtime_hours),
                    GUARANTEED_HOURS,
                    OVERTIME_MULTIPLIER,
                    overtime_pay
                )
            } else {
                format!("Paid hours within the {} hour guarantee", GUARANTEED_HOURS)
            },
        },
        AuditStep {
            step_number: 4,
            rule_id: "day_rate_guarantee".to_string(),
            rule_name: "Day Rate Guarantee".to_string(),
            input: serde_json::json!({
                "day_rate": day_rate.to_string(),
                "overtime_pay": overtime_pay.to_string()
            }),
            output: serde_json::json!({
                "day_pay": day_pay.to_string()
            }),
            reasoning: if is_overtime {
                format!("Day rate ${} plus overtime ${}", guaranteed, overtime_pay)
            } else {
                format!("Day rate ${} paid in full", guaranteed)
            },
        },
    ];

    DayCalc {
        ok: true,
        errors: vec![],
        paid_hours: round_hours(paid_hours),
        day_pay,
        overtime_hours: round_hours(overtime_hours),
        overtime_pay,
        base_hourly,
        audit_steps,
    }
}

fn round_hours(hours: Decimal) -> Decimal {
    hours.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

impl DayEntry {
    /// Calculates this day's pay, coercing unparsable meal minutes to zero.
    pub fn calculate(&self, day_rate: Decimal, base_hourly: Decimal) -> DayCalc {
        calc_day(
            day_rate,
            base_hourly,
            &self.in_time,
            &self.out_time,
            parse_amount(&self.meal_minutes),
        )
    }
}

impl DayCalc {
    /// Splits a valid day into its display tiers.
    ///
    /// The 1.0x and 1.5x tiers describe what the day rate covers and are the
    /// same for every day; only the 2.0x tier depends on hours worked.
    /// Returns `None` for an invalid day or a tier past the decimal range.
    pub fn breakdown(&self) -> Option<DayBreakdown> {
        if !self.ok {
            return None;
        }
        let straight_pay = STRAIGHT_HOURS.checked_mul(self.base_hourly)?;
        let time_and_half_pay = TIME_AND_HALF_HOURS
            .checked_mul(self.base_hourly)?
            .checked_mul(TIME_AND_HALF_MULTIPLIER)?;
        Some(DayBreakdown {
            straight_hours: STRAIGHT_HOURS,
            straight_pay: round_money(straight_pay),
            time_and_half_hours: TIME_AND_HALF_HOURS,
            time_and_half_pay: round_money(time_and_half_pay),
            overtime_hours: self.overtime_hours,
            overtime_pay: self.overtime_pay,
        })
    }
}
