//! Vendor records: the supplier side of the purchasing group.

use serde::{Deserialize, Serialize};

/// Unique identifier for a vendor (e.g. "V-012").
pub type VendorId = String;

/// A supplier with a negotiated rebate agreement.
///
/// Referenced by products, invoices, and rebate earnings via `vendor_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    /// Unique vendor identifier.
    pub id: VendorId,

    /// Display name.
    pub name: String,

    /// Product category the vendor supplies.
    pub category: String,

    /// Contractual base rebate rate, as a percentage.
    pub base_rebate_rate: f64,
}
