//! Invoice parties, metadata, and the rendered-ready invoice document.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::InvoiceTotals;

/// Sender or recipient of an invoice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceParty {
    /// Person or company name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Phone number; any non-digits are ignored.
    pub phone: String,
    /// First address line.
    pub address1: String,
    /// Second address line.
    pub address2: String,
    /// City.
    pub city: String,
    /// State.
    pub state: String,
    /// ZIP code.
    pub zip: String,
}

/// Invoice header fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceMeta {
    /// Invoice number as entered.
    pub invoice_number: String,
    /// Issue date; today when absent.
    pub invoice_date: Option<NaiveDate>,
    /// Production the work was for.
    pub production_name: String,
    /// Payment terms in days; 0 means due on receipt.
    pub terms_days: i64,
}

impl Default for InvoiceMeta {
    fn default() -> Self {
        Self {
            invoice_number: String::new(),
            invoice_date: None,
            production_name: String::new(),
            terms_days: 30,
        }
    }
}

/// One row of the invoice table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceRow {
    /// Multi-line description.
    pub description: String,
    /// Quantity column, when meaningful.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qty: Option<String>,
    /// Rate column, when meaningful.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<String>,
    /// Row amount, taken verbatim from the pay engine.
    pub amount: Decimal,
}

/// Everything a renderer needs to lay out an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceDocument {
    /// Invoice number.
    pub invoice_number: String,
    /// Production name.
    pub production_name: String,
    /// Issue date.
    pub invoice_date: NaiveDate,
    /// Date payment is due.
    pub due_date: NaiveDate,
    /// "Due on receipt" or "Net N".
    pub terms_label: String,
    /// Sender display lines.
    pub from_lines: Vec<String>,
    /// Recipient display lines.
    pub to_lines: Vec<String>,
    /// Table rows.
    pub rows: Vec<InvoiceRow>,
    /// Totals box.
    pub totals: InvoiceTotals,
}
