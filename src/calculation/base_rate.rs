//! Base hourly rate derivation.
//!
//! A crew day rate is quoted for a 12 hour day: 8 hours at straight time and
//! 4 hours at time and a half, which is 14 weighted hours. The base hourly
//! rate is the day rate spread over those weighted hours.

use rust_decimal::Decimal;

use crate::models::AuditStep;

/// Weighted hours covered by one day rate (8 x 1.0 + 4 x 1.5).
pub const WEIGHTED_DAY_HOURS: Decimal = Decimal::from_parts(14, 0, 0, false, 0);

/// The result of deriving a base hourly rate, including the audit step.
#[derive(Debug, Clone)]
pub struct BaseHourlyResult {
    /// The derived base hourly rate.
    pub rate: Decimal,
    /// The audit step recording this derivation.
    pub audit_step: AuditStep,
}

/// Computes the base hourly rate for a day rate.
///
/// Returns zero for a zero or negative day rate.
///
/// # Example
///
/// ```
/// use meetup_engine::calculation::compute_base_hourly;
/// use rust_decimal::Decimal;
///
/// assert_eq!(compute_base_hourly(Decimal::new(280, 0)), Decimal::new(20, 0));
/// assert_eq!(compute_base_hourly(Decimal::new(-1, 0)), Decimal::ZERO);
/// ```
pub fn compute_base_hourly(day_rate: Decimal) -> Decimal {
    if day_rate <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    day_rate / WEIGHTED_DAY_HOURS
}

/// Computes the base hourly rate and records how it was reached.
pub fn derive_base_hourly(day_rate: Decimal, step_number: u32) -> BaseHourlyResult {
    let rate = compute_base_hourly(day_rate);

    let reasoning = if day_rate <= Decimal::ZERO {
        "Day rate is not positive; base hourly rate is $0".to_string()
    } else {
        format!(
            "Day rate ${} / {} weighted hours = ${} per hour",
            day_rate,
            WEIGHTED_DAY_HOURS,
            rate.round_dp(4)
        )
    };

    BaseHourlyResult {
        rate,
        audit_step: AuditStep {
            step_number,
            rule_id: "base_hourly".to_string(),
            rule_name: "Base Hourly Rate".to_string(),
            input: serde_json::json!({
                "day_rate": day_rate.to_string(),
                "weighted_hours": WEIGHTED_DAY_HOURS.to_string()
            }),
            output: serde_json::json!({
                "base_hourly": rate.to_string()
            }),
            reasoning,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_weighted_hours_constant() {
        assert_eq!(WEIGHTED_DAY_HOURS, dec("14"));
    }

    #[test]
    fn test_base_hourly_for_300_day() {
        let rate = compute_base_hourly(dec("300"));
        assert_eq!(rate.round_dp(2), dec("21.43"));
        // 14 weighted hours recover the day rate
        assert_eq!((rate * dec("14")).round_dp(10), dec("300"));
    }

    #[test]
    fn test_base_hourly_zero_for_non_positive() {
        assert_eq!(compute_base_hourly(Decimal::ZERO), Decimal::ZERO);
        assert_eq!(compute_base_hourly(dec("-50")), Decimal::ZERO);
    }

    #[test]
    fn test_derive_records_audit_step() {
        let result = derive_base_hourly(dec("280"), 1);
        assert_eq!(result.rate, dec("20"));
        assert_eq!(result.audit_step.step_number, 1);
        assert_eq!(result.audit_step.rule_id, "base_hourly");
        let recorded = result.audit_step.output["base_hourly"].as_str().unwrap();
        assert_eq!(dec(recorded), dec("20"));
    }
}
