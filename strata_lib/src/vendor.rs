//! Per-vendor aggregation, symmetric with the dealer side: directory rows
//! sorted by spend and the single-vendor profile view.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;
use strata_data::types::{Dealer, Invoice, Product, RebateEarning, Vendor};

use crate::invoice::invoice_total;
use crate::lookup::index_by;
use crate::rebate::{effective_rebate_percent, period_series, PeriodPoint};

/// One row of the vendor directory.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorMetrics {
    pub vendor: Vendor,
    pub total_spend: f64,
    pub total_rebate: f64,
    pub effective_rebate_percent: f64,
    /// Distinct dealers the vendor has invoices with.
    pub dealer_count: usize,
}

/// Build one metrics row per vendor in the master list, including vendors
/// with no recorded activity. Rows are sorted by total spend descending;
/// equal spend keeps master-list order.
pub fn build_vendor_metrics(
    vendors: &[Vendor],
    invoices: &[Invoice],
    earnings: &[RebateEarning],
) -> Vec<VendorMetrics> {
    let mut spend_by_vendor: HashMap<&str, f64> = HashMap::new();
    let mut dealers_by_vendor: HashMap<&str, HashSet<&str>> = HashMap::new();
    let mut rebate_by_vendor: HashMap<&str, f64> = HashMap::new();

    for invoice in invoices {
        *spend_by_vendor
            .entry(invoice.vendor_id.as_str())
            .or_default() += invoice_total(invoice);
        dealers_by_vendor
            .entry(invoice.vendor_id.as_str())
            .or_default()
            .insert(invoice.dealer_id.as_str());
    }
    for earning in earnings {
        *rebate_by_vendor
            .entry(earning.vendor_id.as_str())
            .or_default() += earning.rebate_amount;
    }

    let mut rows: Vec<VendorMetrics> = vendors
        .iter()
        .map(|vendor| {
            let total_spend = spend_by_vendor
                .get(vendor.id.as_str())
                .copied()
                .unwrap_or(0.0);
            let total_rebate = rebate_by_vendor
                .get(vendor.id.as_str())
                .copied()
                .unwrap_or(0.0);
            VendorMetrics {
                vendor: vendor.clone(),
                total_spend,
                total_rebate,
                effective_rebate_percent: effective_rebate_percent(total_rebate, total_spend),
                dealer_count: dealers_by_vendor
                    .get(vendor.id.as_str())
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

/// Plain sums across the vendor directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorSummary {
    pub total_vendors: usize,
    pub combined_spend: f64,
    pub combined_rebate: f64,
}

pub fn vendor_summary(rows: &[VendorMetrics]) -> VendorSummary {
    VendorSummary {
        total_vendors: rows.len(),
        combined_spend: rows.iter().map(|r| r.total_spend).sum(),
        combined_rebate: rows.iter().map(|r| r.total_rebate).sum(),
    }
}

/// Spend from one dealer, for the profile's top-dealer list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DealerSpend {
    pub dealer: Dealer,
    pub spend: f64,
}

/// Units and revenue sold for one of the vendor's products.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSales {
    pub product: Product,
    pub units: u32,
    pub revenue: f64,
}

/// Everything the vendor detail view shows.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorProfile {
    pub vendor: Vendor,
    pub total_spend: f64,
    pub total_rebate: f64,
    pub effective_rebate_percent: f64,
    /// Up to five dealers by spend; unresolvable dealer refs are skipped.
    pub top_dealers: Vec<DealerSpend>,
    /// Up to five of the vendor's products by revenue. Products with no
    /// sales are omitted.
    pub product_sales: Vec<ProductSales>,
    /// Distinct dealers with at least one invoice from this vendor.
    pub dealers_served: usize,
    /// Five most recent invoices, newest first.
    pub recent_invoices: Vec<Invoice>,
    /// Per-period rebate series for this vendor, oldest first.
    pub quarterly_rebates: Vec<PeriodPoint>,
}

pub fn build_vendor_profile(
    vendor: &Vendor,
    invoices: &[Invoice],
    earnings: &[RebateEarning],
    dealers: &[Dealer],
    products: &[Product],
) -> VendorProfile {
    let dealers_by_id = index_by(dealers, |d| d.id.as_str());
    let products_by_id = index_by(products, |p| p.id.as_str());

    let vendor_invoices: Vec<&Invoice> = invoices
        .iter()
        .filter(|inv| inv.vendor_id == vendor.id)
        .collect();
    let vendor_earnings: Vec<RebateEarning> = earnings
        .iter()
        .filter(|e| e.vendor_id == vendor.id)
        .cloned()
        .collect();

    let total_spend: f64 = vendor_invoices.iter().map(|inv| invoice_total(inv)).sum();
    let total_rebate: f64 = vendor_earnings.iter().map(|e| e.rebate_amount).sum();

    let mut spend_by_dealer: BTreeMap<&str, f64> = BTreeMap::new();
    for inv in &vendor_invoices {
        *spend_by_dealer.entry(inv.dealer_id.as_str()).or_default() += invoice_total(inv);
    }
    let mut top_dealers: Vec<DealerSpend> = spend_by_dealer
        .into_iter()
        .filter_map(|(dealer_id, spend)| {
            dealers_by_id.get(dealer_id).map(|d| DealerSpend {
                dealer: (*d).clone(),
                spend,
            })
        })
        .collect();
    top_dealers.sort_by(|a, b| b.spend.partial_cmp(&a.spend).unwrap_or(Ordering::Equal));
    top_dealers.truncate(5);

    // Accumulate sales per product id; only lines whose product resolves to
    // this vendor's catalog count.
    let mut sales_by_product: HashMap<&str, (u32, f64)> = HashMap::new();
    for inv in &vendor_invoices {
        for item in &inv.line_items {
            if let Some(product) = products_by_id.get(item.product_id.as_str()) {
                if product.vendor_id == vendor.id {
                    let entry = sales_by_product.entry(product.id.as_str()).or_default();
                    entry.0 += item.quantity;
                    entry.1 += item.line_total();
                }
            }
        }
    }
    let mut product_sales: Vec<ProductSales> = products
        .iter()
        .filter(|p| p.vendor_id == vendor.id)
        .filter_map(|product| {
            let (units, revenue) = sales_by_product
                .get(product.id.as_str())
                .copied()
                .unwrap_or((0, 0.0));
            (revenue > 0.0).then(|| ProductSales {
                product: product.clone(),
                units,
                revenue,
            })
        })
        .collect();
    product_sales.sort_by(|a, b| b.revenue.partial_cmp(&a.revenue).unwrap_or(Ordering::Equal));
    product_sales.truncate(5);

    let dealers_served = vendor_invoices
        .iter()
        .map(|inv| inv.dealer_id.as_str())
        .collect::<HashSet<_>>()
        .len();

    let mut recent_invoices: Vec<Invoice> =
        vendor_invoices.iter().map(|inv| (*inv).clone()).collect();
    recent_invoices.sort_by(|a, b| b.date.cmp(&a.date));
    recent_invoices.truncate(5);

    VendorProfile {
        vendor: vendor.clone(),
        total_spend,
        total_rebate,
        effective_rebate_percent: effective_rebate_percent(total_rebate, total_spend),
        top_dealers,
        product_sales,
        dealers_served,
        recent_invoices,
        quarterly_rebates: period_series(&vendor_earnings),
    }
}
