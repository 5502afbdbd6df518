//! Invoice records and their line items.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::dealer::DealerId;
use crate::types::product::ProductId;
use crate::types::vendor::VendorId;

/// Unique identifier for an invoice (e.g. "IN-0147").
pub type InvoiceId = String;

/// One product line within an invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLineItem {
    /// Product reference, resolvable only when the catalog contains it.
    pub product_id: ProductId,

    pub quantity: u32,

    /// Negotiated price per unit, in dollars.
    pub unit_price: f64,
}

impl InvoiceLineItem {
    /// Dollar amount this line contributes to the invoice total.
    pub fn line_total(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}

/// A purchase invoice issued by one vendor to one dealer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: InvoiceId,

    /// Dealer billed by this invoice.
    pub dealer_id: DealerId,

    /// Vendor that issued this invoice.
    pub vendor_id: VendorId,

    /// Human-facing invoice number (e.g. "GPO-2025-0147").
    pub invoice_number: String,

    /// Issue date.
    pub date: NaiveDate,

    /// Ordered product lines. May be empty.
    pub line_items: Vec<InvoiceLineItem>,
}
