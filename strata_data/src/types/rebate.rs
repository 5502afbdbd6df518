//! Rebate earning records, reported per dealer, vendor, and period.

use serde::{Deserialize, Serialize};

use crate::types::dealer::DealerId;
use crate::types::vendor::VendorId;

/// Unique identifier for a rebate earning record (e.g. "RE-0093").
pub type RebateEarningId = String;

/// A rebate earned by one dealer from one vendor over one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RebateEarning {
    pub id: RebateEarningId,

    pub dealer_id: DealerId,

    pub vendor_id: VendorId,

    /// Period label such as "2025-Q1". Labels sort lexicographically.
    pub period: String,

    /// Qualifying spend for the period, in dollars.
    pub spend: f64,

    /// Rebate percentage applied to the spend.
    pub rebate_percent_applied: f64,

    /// Rebate earned in dollars, as reported upstream. Not re-derived from
    /// `spend` and `rebate_percent_applied` anywhere in this system.
    pub rebate_amount: f64,
}
