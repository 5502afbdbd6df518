//! Dashboard-level KPIs and the landing-view rankings.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;
use strata_data::types::{Dealer, Invoice, RebateEarning, Vendor};

use crate::invoice::invoice_total;
use crate::lookup::index_by;

/// Number of dealers in the master list.
pub fn total_dealers(dealers: &[Dealer]) -> usize {
    dealers.len()
}

/// Number of vendors in the master list.
pub fn total_vendors(vendors: &[Vendor]) -> usize {
    vendors.len()
}

/// Combined dollar value of all invoices.
pub fn total_spend(invoices: &[Invoice]) -> f64 {
    invoices.iter().map(invoice_total).sum()
}

/// Combined rebate dollars across all earnings.
pub fn total_rebate(earnings: &[RebateEarning]) -> f64 {
    earnings.iter().map(|e| e.rebate_amount).sum()
}

/// Spend-weighted mean of the per-record rebate percent, or 0 when total
/// spend is 0.
///
/// This is the dashboard KPI. It is not the same number as the effective
/// rebate percent (`total_rebate / total_spend`) used in the grouped views;
/// the two must not be conflated.
pub fn average_rebate_percent(earnings: &[RebateEarning]) -> f64 {
    let total_spend: f64 = earnings.iter().map(|e| e.spend).sum();
    if total_spend == 0.0 {
        return 0.0;
    }
    let weighted: f64 = earnings
        .iter()
        .map(|e| e.rebate_percent_applied * e.spend)
        .sum();
    weighted / total_spend
}

/// Stable descending sort by `key`, truncated to the first `n` rows.
/// Ties keep input order.
pub fn top_n_by<T, F>(rows: &[T], n: usize, key: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> f64,
{
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| key(b).partial_cmp(&key(a)).unwrap_or(Ordering::Equal));
    sorted.truncate(n);
    sorted
}

/// One row of the landing view's dealer ranking.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopDealerRow {
    pub dealer_id: String,
    pub dealer_name: String,
    pub region: String,
    pub total_spend: f64,
}

/// Dealers ranked by invoice spend, highest first; dealers with no invoices
/// do not appear. Unresolvable dealer refs keep the id with "Unknown" labels.
pub fn top_dealers_by_spend(
    dealers: &[Dealer],
    invoices: &[Invoice],
    limit: usize,
) -> Vec<TopDealerRow> {
    let dealers_by_id = index_by(dealers, |d| d.id.as_str());

    let mut spend_by_dealer: BTreeMap<&str, f64> = BTreeMap::new();
    for invoice in invoices {
        *spend_by_dealer
            .entry(invoice.dealer_id.as_str())
            .or_default() += invoice_total(invoice);
    }

    let rows: Vec<TopDealerRow> = spend_by_dealer
        .into_iter()
        .map(|(dealer_id, total_spend)| {
            let dealer = dealers_by_id.get(dealer_id);
            TopDealerRow {
                dealer_id: dealer_id.to_string(),
                dealer_name: dealer.map_or_else(|| "Unknown".to_string(), |d| d.name.clone()),
                region: dealer.map_or_else(|| "Unknown".to_string(), |d| d.region.clone()),
                total_spend,
            }
        })
        .collect();

    top_n_by(&rows, limit, |r| r.total_spend)
}

/// One row of the landing view's vendor ranking.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopVendorRow {
    pub vendor_id: String,
    pub vendor_name: String,
    pub category: String,
    pub total_rebate: f64,
}

/// Vendors ranked by rebate dollars earned, highest first; vendors with no
/// earnings do not appear.
pub fn top_vendors_by_rebate(
    vendors: &[Vendor],
    earnings: &[RebateEarning],
    limit: usize,
) -> Vec<TopVendorRow> {
    let vendors_by_id = index_by(vendors, |v| v.id.as_str());

    let mut rebate_by_vendor: BTreeMap<&str, f64> = BTreeMap::new();
    for earning in earnings {
        *rebate_by_vendor
            .entry(earning.vendor_id.as_str())
            .or_default() += earning.rebate_amount;
    }

    let rows: Vec<TopVendorRow> = rebate_by_vendor
        .into_iter()
        .map(|(vendor_id, total_rebate)| {
            let vendor = vendors_by_id.get(vendor_id);
            TopVendorRow {
                vendor_id: vendor_id.to_string(),
                vendor_name: vendor.map_or_else(|| "Unknown".to_string(), |v| v.name.clone()),
                category: vendor.map_or_else(|| "Unknown".to_string(), |v| v.category.clone()),
                total_rebate,
            }
        })
        .collect();

    top_n_by(&rows, limit, |r| r.total_rebate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use strata_data::types::InvoiceLineItem;

    fn dealer(id: &str, name: &str) -> Dealer {
        Dealer {
            id: id.to_string(),
            name: name.to_string(),
            region: "West".to_string(),
            annual_spend: 1_000_000.0,
        }
    }

    fn vendor(id: &str, name: &str) -> Vendor {
        Vendor {
            id: id.to_string(),
            name: name.to_string(),
            category: "Fasteners".to_string(),
            base_rebate_rate: 2.0,
        }
    }

    fn invoice(dealer_id: &str, vendor_id: &str, lines: Vec<(u32, f64)>) -> Invoice {
        Invoice {
            id: "IN-1".to_string(),
            dealer_id: dealer_id.to_string(),
            vendor_id: vendor_id.to_string(),
            invoice_number: "GPO-2025-0001".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            line_items: lines
                .into_iter()
                .map(|(quantity, unit_price)| InvoiceLineItem {
                    product_id: "PR-1".to_string(),
                    quantity,
                    unit_price,
                })
                .collect(),
        }
    }

    fn earning(vendor_id: &str, spend: f64, percent: f64, amount: f64) -> RebateEarning {
        RebateEarning {
            id: "RE-1".to_string(),
            dealer_id: "D-1".to_string(),
            vendor_id: vendor_id.to_string(),
            period: "2025-Q1".to_string(),
            spend,
            rebate_percent_applied: percent,
            rebate_amount: amount,
        }
    }

    #[test]
    fn test_total_spend_sums_all_lines() {
        let invoices = vec![
            invoice("D-1", "V-1", vec![(2, 10.0)]),
            invoice("D-2", "V-1", vec![(3, 20.0), (1, 5.0)]),
        ];
        assert_eq!(total_spend(&invoices), 85.0);
        assert_eq!(total_spend(&[]), 0.0);
    }

    #[test]
    fn test_total_rebate() {
        let earnings = vec![earning("V-1", 100.0, 2.0, 2.0), earning("V-2", 100.0, 3.0, 3.0)];
        assert_eq!(total_rebate(&earnings), 5.0);
    }

    #[test]
    fn test_average_rebate_percent_is_spend_weighted() {
        let earnings = vec![
            earning("V-1", 3000.0, 2.0, 60.0),
            earning("V-2", 1000.0, 6.0, 60.0),
        ];
        // (2.0 × 3000 + 6.0 × 1000) / 4000 = 3.0
        assert!((average_rebate_percent(&earnings) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_average_rebate_percent_zero_spend_is_zero() {
        let earnings = vec![earning("V-1", 0.0, 5.0, 0.0)];
        let percent = average_rebate_percent(&earnings);
        assert_eq!(percent, 0.0);
        assert!(!percent.is_nan());
    }

    #[test]
    fn test_weighted_average_differs_from_effective_percent() {
        use crate::rebate::effective_rebate_percent;
        // Reported percent says 10, but the reported amount implies 5.
        let earnings = vec![earning("V-1", 1000.0, 10.0, 50.0)];
        let weighted = average_rebate_percent(&earnings);
        let effective = effective_rebate_percent(total_rebate(&earnings), 1000.0);
        assert!((weighted - 10.0).abs() < 1e-9);
        assert!((effective - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_top_n_by_truncates_and_sorts() {
        let values = vec![3.0, 9.0, 1.0, 7.0];
        let top = top_n_by(&values, 2, |v| *v);
        assert_eq!(top, vec![9.0, 7.0]);
    }

    #[test]
    fn test_top_n_by_returns_fewer_when_collection_small() {
        let values = vec![3.0, 9.0];
        let top = top_n_by(&values, 10, |v| *v);
        assert_eq!(top.len(), 2);
        assert_eq!(top, vec![9.0, 3.0]);
    }

    #[test]
    fn test_top_n_by_is_subsequence_of_full_sort() {
        let values = vec![5.0, 2.0, 8.0, 8.0, 1.0];
        let full = top_n_by(&values, values.len(), |v| *v);
        let top = top_n_by(&values, 3, |v| *v);
        assert_eq!(top.as_slice(), &full[..3]);
    }

    #[test]
    fn test_top_dealers_by_spend_ranks_and_joins() {
        let dealers = vec![dealer("D-1", "Apex"), dealer("D-2", "Blue"), dealer("D-3", "Idle")];
        let invoices = vec![
            invoice("D-1", "V-1", vec![(1, 100.0)]),
            invoice("D-2", "V-1", vec![(1, 400.0)]),
            invoice("D-1", "V-2", vec![(1, 50.0)]),
        ];
        let rows = top_dealers_by_spend(&dealers, &invoices, 5);
        assert_eq!(rows.len(), 2); // D-3 has no invoices
        assert_eq!(rows[0].dealer_id, "D-2");
        assert_eq!(rows[0].total_spend, 400.0);
        assert_eq!(rows[1].dealer_name, "Apex");
        assert_eq!(rows[1].total_spend, 150.0);
    }

    #[test]
    fn test_top_dealers_unknown_fallback_and_limit() {
        let invoices = vec![
            invoice("D-9", "V-1", vec![(1, 10.0)]),
            invoice("D-8", "V-1", vec![(1, 90.0)]),
        ];
        let rows = top_dealers_by_spend(&[], &invoices, 1);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].dealer_id, "D-8");
        assert_eq!(rows[0].dealer_name, "Unknown");
        assert_eq!(rows[0].region, "Unknown");
    }

    #[test]
    fn test_top_vendors_by_rebate() {
        let vendors = vec![vendor("V-1", "Summit"), vendor("V-2", "Crestline")];
        let earnings = vec![
            earning("V-1", 1000.0, 2.0, 20.0),
            earning("V-2", 1000.0, 6.0, 60.0),
            earning("V-1", 500.0, 2.0, 10.0),
        ];
        let rows = top_vendors_by_rebate(&vendors, &earnings, 5);
        assert_eq!(rows[0].vendor_name, "Crestline");
        assert_eq!(rows[0].total_rebate, 60.0);
        assert_eq!(rows[1].vendor_name, "Summit");
        assert_eq!(rows[1].total_rebate, 30.0);
    }
}
