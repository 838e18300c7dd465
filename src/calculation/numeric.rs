//! Lenient parsing and rounding of user-entered amounts.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Largest magnitude accepted for any entered amount (one trillion).
///
/// Keeping every input under this bound means the products and sums of a
/// pay calculation stay well inside the decimal range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Why an entered amount could not be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AmountError {
    /// The text is not a number.
    #[error("is not a number")]
    NotANumber,

    /// The number is larger than [`MAX_AMOUNT`] in magnitude.
    #[error("is larger than {} in magnitude", MAX_AMOUNT)]
    OutOfRange,
}

/// Parses a free-text numeric field, treating anything unusable as zero.
///
/// Empty strings, text, and values beyond [`MAX_AMOUNT`] all become zero so
/// that one bad field never blocks a total. Scientific notation is accepted.
///
/// # Example
///
/// ```
/// use meetup_engine::calculation::parse_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_amount(" 12.50 "), Decimal::new(1250, 2));
/// assert_eq!(parse_amount("abc"), Decimal::ZERO);
/// assert_eq!(parse_amount(""), Decimal::ZERO);
/// ```
pub fn parse_amount(input: &str) -> Decimal {
    try_parse_amount(input).unwrap_or(Decimal::ZERO)
}

/// Parses a numeric field, returning `None` when it is unusable.
///
/// An empty or blank field is a valid zero.
pub fn try_parse_amount(input: &str) -> Option<Decimal> {
    check_amount(input).ok()
}

/// Parses a numeric field and reports why it is unusable.
///
/// # Example
///
/// ```
/// use meetup_engine::calculation::{AmountError, check_amount};
/// use rust_decimal::Decimal;
///
/// assert_eq!(check_amount("40"), Ok(Decimal::from(40)));
/// assert_eq!(check_amount("forty"), Err(AmountError::NotANumber));
/// assert_eq!(check_amount("1e20"), Err(AmountError::OutOfRange));
/// ```
pub fn check_amount(input: &str) -> Result<Decimal, AmountError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(Decimal::ZERO);
    }
    let value = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| AmountError::NotANumber)?;
    if value.abs() > MAX_AMOUNT {
        return Err(AmountError::OutOfRange);
    }
    Ok(value)
}

/// Rounds a currency amount to cents, halves away from zero.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds to at most two places and drops trailing zeros, e.g. `11.5`.
pub fn display_quantity(value: Decimal) -> String {
    round_money(value).normalize().to_string()
}

/// Formats an amount as US dollars, e.g. `$1,234.50` or `-$3.00`.
///
/// # Example
///
/// ```
/// use meetup_engine::calculation::format_money;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_money(Decimal::new(123450, 2)), "$1,234.50");
/// assert_eq!(format_money(Decimal::new(725, 3)), "$0.73");
/// ```
pub fn format_money(amount: Decimal) -> String {
    let rounded = round_money(amount);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}${}.{}", sign, grouped, cents)
}
