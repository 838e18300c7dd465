//! Invoice document assembly.
//!
//! Lays out the header, parties, rows, and totals of an invoice. Every
//! amount is copied from a finished [`PayCalculation`]; nothing here
//! recomputes pay.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{InvoiceDocument, InvoiceMeta, InvoiceParty, InvoiceRow, PayCalculation};

use super::invoice_totals::PayInput;
use super::numeric::{display_quantity, format_money, parse_amount};

/// Everything needed to produce an invoice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceInput {
    /// Header fields.
    pub meta: InvoiceMeta,
    /// Who is billing.
    pub from: InvoiceParty,
    /// Who is being billed.
    pub to: InvoiceParty,
    /// The calculator input the invoice covers.
    pub pay: PayInput,
}

/// Builds the invoice for `input` from its finished calculation.
///
/// `calculation` must be the result of running `input.pay`; day rows are
/// matched to entries by position. `today` is used when the invoice has no
/// date.
pub fn build_invoice_document(
    input: &InvoiceInput,
    calculation: &PayCalculation,
    today: NaiveDate,
) -> InvoiceDocument {
    let meta = &input.meta;
    let invoice_date = meta.invoice_date.unwrap_or(today);
    let terms_days = meta.terms_days.max(0);
    let due_date = invoice_date
        .checked_add_days(Days::new(terms_days as u64))
        .unwrap_or(invoice_date);

    let terms_label = if terms_days == 0 {
        "Due on receipt".to_string()
    } else {
        format!("Net {}", terms_days)
    };

    let invoice_number = match meta.invoice_number.trim() {
        "" => "N/A".to_string(),
        number => number.to_string(),
    };

    InvoiceDocument {
        invoice_number,
        production_name: meta.production_name.trim().to_string(),
        invoice_date,
        due_date,
        terms_label,
        from_lines: party_lines(&input.from),
        to_lines: party_lines(&input.to),
        rows: invoice_rows(&input.pay, calculation),
        totals: calculation.totals.clone(),
    }
}

fn invoice_rows(pay: &PayInput, calculation: &PayCalculation) -> Vec<InvoiceRow> {
    let mut rows = Vec::new();

    for (index, (entry, calc)) in pay.days.iter().zip(&calculation.days).enumerate() {
        if !calc.ok {
            continue;
        }
        let label = match entry.parsed_date() {
            Some(date) => format!("Labor: Day {} ({})", index + 1, date.format("%m/%d/%Y")),
            None => format!("Labor: Day {}", index + 1),
        };
        let details = format!(
            "In {}, Out {}, Meal {} min, Paid {}h",
            or_na(&entry.in_time),
            or_na(&entry.out_time),
            display_quantity(parse_amount(&entry.meal_minutes)),
            display_quantity(calc.paid_hours)
        );
        rows.push(InvoiceRow {
            description: format!("{}\n{}", label, details),
            qty: Some("1".to_string()),
            rate: Some(format_money(calc.day_pay)),
            amount: calc.day_pay,
        });
    }

    let miles = parse_amount(&pay.miles);
    let mileage_rate = parse_amount(&pay.mileage_rate);
    let mileage_pay = calculation.totals.mileage_pay;
    if miles > Decimal::ZERO && mileage_rate > Decimal::ZERO && mileage_pay > Decimal::ZERO {
        rows.push(InvoiceRow {
            description: format!(
                "Mileage\n{} miles @ {}/mi",
                display_quantity(miles),
                format_money(mileage_rate)
            ),
            qty: None,
            rate: None,
            amount: mileage_pay,
        });
    }

    for item in &pay.line_items {
        let cost = parse_amount(&item.cost);
        if cost <= Decimal::ZERO {
            continue;
        }
        let title = match item.title.trim() {
            "" => "Expense",
            title => title,
        };
        let description = match item.description.trim() {
            "" => format!("Expense\n{}", title),
            desc => format!("Expense\n{}\n{}", title, desc),
        };
        rows.push(InvoiceRow {
            description,
            qty: None,
            rate: None,
            amount: cost,
        });
    }

    rows
}

fn or_na(value: &str) -> &str {
    match value.trim() {
        "" => "N/A",
        trimmed => trimmed,
    }
}

/// Display lines for an invoice party, or `["N/A"]` when it is empty.
///
/// # Example
///
/// ```
/// use meetup_engine::calculation::party_lines;
/// use meetup_engine::models::InvoiceParty;
///
/// let party = InvoiceParty {
///     name: "Sam Grip".to_string(),
///     city: "Fort Worth".to_string(),
///     state: "TX".to_string(),
///     phone: "8175551234".to_string(),
///     ..InvoiceParty::default()
/// };
/// assert_eq!(party_lines(&party), vec!["Sam Grip", "Fort Worth, TX", "(817) 555-1234"]);
/// assert_eq!(party_lines(&InvoiceParty::default()), vec!["N/A"]);
/// ```
pub fn party_lines(party: &InvoiceParty) -> Vec<String> {
    let mut lines = Vec::new();

    for field in [&party.name, &party.address1, &party.address2] {
        let value = field.trim();
        if !value.is_empty() {
            lines.push(value.to_string());
        }
    }

    let city_line = [&party.city, &party.state, &party.zip]
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    if !city_line.is_empty() {
        lines.push(city_line);
    }

    let email = party.email.trim();
    if !email.is_empty() {
        lines.push(email.to_string());
    }
    let phone = format_phone(&party.phone);
    if !phone.is_empty() {
        lines.push(phone);
    }

    if lines.is_empty() {
        lines.push("N/A".to_string());
    }
    lines
}

/// Formats up to ten digits of a phone number as `(817) 555-1234`.
///
/// Non-digits are ignored and partial numbers are formatted as far as they
/// go.
pub fn format_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).take(10).collect();
    match digits.len() {
        0 => String::new(),
        1..=3 => format!("({}", digits),
        4..=6 => format!("({}) {}", &digits[..3], &digits[3..]),
        _ => format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..]),
    }
}
