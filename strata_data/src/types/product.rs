//! Product catalog records.

use serde::{Deserialize, Serialize};

use crate::types::vendor::VendorId;

/// Unique identifier for a product (e.g. "PR-0201").
pub type ProductId = String;

/// A catalog product owned by one vendor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,

    /// Vendor that owns this product.
    pub vendor_id: VendorId,

    pub sku: String,

    pub name: String,

    pub category: String,

    /// Vendor list cost per unit, in dollars.
    pub unit_cost: f64,
}
