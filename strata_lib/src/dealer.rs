//! Per-dealer aggregation: directory rows sorted by spend and the
//! single-dealer profile view.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;
use strata_data::types::{Dealer, Invoice, Product, RebateEarning, Vendor};

use crate::invoice::invoice_total;
use crate::lookup::index_by;
use crate::rebate::{effective_rebate_percent, period_series, PeriodPoint};

/// One row of the dealer directory.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DealerMetrics {
    pub dealer: Dealer,
    pub total_spend: f64,
    pub total_rebate: f64,
    pub effective_rebate_percent: f64,
    /// Distinct vendors the dealer has invoices with.
    pub vendor_count: usize,
}

/// Build one metrics row per dealer in the master list, including dealers
/// with no recorded activity. Rows are sorted by total spend descending;
/// equal spend keeps master-list order.
pub fn build_dealer_metrics(
    dealers: &[Dealer],
    invoices: &[Invoice],
    earnings: &[RebateEarning],
) -> Vec<DealerMetrics> {
    let mut spend_by_dealer: HashMap<&str, f64> = HashMap::new();
    let mut vendors_by_dealer: HashMap<&str, HashSet<&str>> = HashMap::new();
    let mut rebate_by_dealer: HashMap<&str, f64> = HashMap::new();

    for invoice in invoices {
        *spend_by_dealer
            .entry(invoice.dealer_id.as_str())
            .or_default() += invoice_total(invoice);
        vendors_by_dealer
            .entry(invoice.dealer_id.as_str())
            .or_default()
            .insert(invoice.vendor_id.as_str());
    }
    for earning in earnings {
        *rebate_by_dealer
            .entry(earning.dealer_id.as_str())
            .or_default() += earning.rebate_amount;
    }

    let mut rows: Vec<DealerMetrics> = dealers
        .iter()
        .map(|dealer| {
            let total_spend = spend_by_dealer
                .get(dealer.id.as_str())
                .copied()
                .unwrap_or(0.0);
            let total_rebate = rebate_by_dealer
                .get(dealer.id.as_str())
                .copied()
                .unwrap_or(0.0);
            DealerMetrics {
                dealer: dealer.clone(),
                total_spend,
                total_rebate,
                effective_rebate_percent: effective_rebate_percent(total_rebate, total_spend),
                vendor_count: vendors_by_dealer
                    .get(dealer.id.as_str())
                    .map_or(0, HashSet::len),
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.total_spend
            .partial_cmp(&a.total_spend)
            .unwrap_or(Ordering::Equal)
    });
    rows
}

/// Plain sums across the dealer directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DealerSummary {
    pub total_dealers: usize,
    pub combined_spend: f64,
    pub combined_rebate: f64,
}

pub fn dealer_summary(rows: &[DealerMetrics]) -> DealerSummary {
    DealerSummary {
        total_dealers: rows.len(),
        combined_spend: rows.iter().map(|r| r.total_spend).sum(),
        combined_rebate: rows.iter().map(|r| r.total_rebate).sum(),
    }
}

/// Spend with one vendor, for the profile's top-vendor list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorSpend {
    pub vendor: Vendor,
    pub spend: f64,
}

/// Spend within one product category and its share of the dealer's total.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySpend {
    pub category: String,
    pub spend: f64,
    pub share_percent: f64,
}

/// Everything the dealer detail view shows.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DealerProfile {
    pub dealer: Dealer,
    pub total_spend: f64,
    pub total_rebate: f64,
    pub effective_rebate_percent: f64,
    /// Up to five vendors by spend; unresolvable vendor refs are skipped.
    pub top_vendors: Vec<VendorSpend>,
    /// Category spend mix; lines with an unknown product are skipped.
    pub category_mix: Vec<CategorySpend>,
    /// Five most recent invoices, newest first.
    pub recent_invoices: Vec<Invoice>,
    /// Per-period rebate series for this dealer, oldest first.
    pub quarterly_rebates: Vec<PeriodPoint>,
}

pub fn build_dealer_profile(
    dealer: &Dealer,
    invoices: &[Invoice],
    earnings: &[RebateEarning],
    vendors: &[Vendor],
    products: &[Product],
) -> DealerProfile {
    let vendors_by_id = index_by(vendors, |v| v.id.as_str());
    let products_by_id = index_by(products, |p| p.id.as_str());

    let dealer_invoices: Vec<&Invoice> = invoices
        .iter()
        .filter(|inv| inv.dealer_id == dealer.id)
        .collect();
    let dealer_earnings: Vec<RebateEarning> = earnings
        .iter()
        .filter(|e| e.dealer_id == dealer.id)
        .cloned()
        .collect();

    let total_spend: f64 = dealer_invoices.iter().map(|inv| invoice_total(inv)).sum();
    let total_rebate: f64 = dealer_earnings.iter().map(|e| e.rebate_amount).sum();

    let mut spend_by_vendor: BTreeMap<&str, f64> = BTreeMap::new();
    for inv in &dealer_invoices {
        *spend_by_vendor.entry(inv.vendor_id.as_str()).or_default() += invoice_total(inv);
    }
    let mut top_vendors: Vec<VendorSpend> = spend_by_vendor
        .into_iter()
        .filter_map(|(vendor_id, spend)| {
            vendors_by_id.get(vendor_id).map(|v| VendorSpend {
                vendor: (*v).clone(),
                spend,
            })
        })
        .collect();
    top_vendors.sort_by(|a, b| b.spend.partial_cmp(&a.spend).unwrap_or(Ordering::Equal));
    top_vendors.truncate(5);

    let mut spend_by_category: BTreeMap<&str, f64> = BTreeMap::new();
    for inv in &dealer_invoices {
        for item in &inv.line_items {
            if let Some(product) = products_by_id.get(item.product_id.as_str()) {
                *spend_by_category
                    .entry(product.category.as_str())
                    .or_default() += item.line_total();
            }
        }
    }
    let mut category_mix: Vec<CategorySpend> = spend_by_category
        .into_iter()
        .map(|(category, spend)| CategorySpend {
            category: category.to_string(),
            spend,
            share_percent: if total_spend > 0.0 {
                spend / total_spend * 100.0
            } else {
                0.0
            },
        })
        .collect();
    category_mix.sort_by(|a, b| b.spend.partial_cmp(&a.spend).unwrap_or(Ordering::Equal));

    let mut recent_invoices: Vec<Invoice> =
        dealer_invoices.iter().map(|inv| (*inv).clone()).collect();
    recent_invoices.sort_by(|a, b| b.date.cmp(&a.date));
    recent_invoices.truncate(5);

    DealerProfile {
        dealer: dealer.clone(),
        total_spend,
        total_rebate,
        effective_rebate_percent: effective_rebate_percent(total_rebate, total_spend),
        top_vendors,
        category_mix,
        recent_invoices,
        quarterly_rebates: period_series(&dealer_earnings),
    }
}
