//! Dealer records: the buying members of the purchasing group.

use serde::{Deserialize, Serialize};

/// Unique identifier for a dealer (e.g. "D-003").
pub type DealerId = String;

/// A member dealer that purchases through the group.
///
/// Referenced by invoices and rebate earnings via `dealer_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dealer {
    /// Unique dealer identifier.
    pub id: DealerId,

    /// Display name.
    pub name: String,

    /// Sales region the dealer operates in.
    pub region: String,

    /// Annual spend capacity in dollars.
    pub annual_spend: f64,
}
