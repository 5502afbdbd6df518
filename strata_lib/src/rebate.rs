//! Rebate aggregation by dealer, by vendor, and by period.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use strata_data::types::{Dealer, RebateEarning, Vendor};

use crate::lookup::index_by;

/// `total_rebate / total_spend × 100`, or 0 when spend is 0.
///
/// Every percent-of-spend metric in the system goes through this guard; a
/// zero denominator yields 0, never NaN.
pub fn effective_rebate_percent(total_rebate: f64, total_spend: f64) -> f64 {
    if total_spend > 0.0 {
        total_rebate / total_spend * 100.0
    } else {
        0.0
    }
}

/// Headline rebate totals across all earnings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalRebateSummary {
    pub total_spend: f64,
    pub total_rebate: f64,
    pub effective_rebate_percent: f64,
    pub period_count: usize,
}

pub fn global_summary(earnings: &[RebateEarning]) -> GlobalRebateSummary {
    let total_spend: f64 = earnings.iter().map(|e| e.spend).sum();
    let total_rebate: f64 = earnings.iter().map(|e| e.rebate_amount).sum();
    let periods: HashSet<&str> = earnings.iter().map(|e| e.period.as_str()).collect();

    GlobalRebateSummary {
        total_spend,
        total_rebate,
        effective_rebate_percent: effective_rebate_percent(total_rebate, total_spend),
        period_count: periods.len(),
    }
}

/// Rebate totals for one dealer, joined with the master record when present.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DealerRebateRow {
    pub dealer_id: String,
    pub dealer_name: String,
    pub region: Option<String>,
    pub total_spend: f64,
    pub total_rebate: f64,
    pub effective_rebate_percent: f64,
}

/// Aggregate earnings per dealer, highest rebate first.
pub fn dealer_rows(earnings: &[RebateEarning], dealers: &[Dealer]) -> Vec<DealerRebateRow> {
    let dealers_by_id = index_by(dealers, |d| d.id.as_str());

    let mut by_dealer: BTreeMap<&str, (f64, f64)> = BTreeMap::new();
    for earning in earnings {
        let entry = by_dealer.entry(earning.dealer_id.as_str()).or_default();
        entry.0 += earning.spend;
        entry.1 += earning.rebate_amount;
    }

    let mut rows: Vec<DealerRebateRow> = by_dealer
        .into_iter()
        .map(|(dealer_id, (spend, rebate))| {
            let dealer = dealers_by_id.get(dealer_id);
            DealerRebateRow {
                dealer_id: dealer_id.to_string(),
                dealer_name: dealer
                    .map_or_else(|| "Unknown Dealer".to_string(), |d| d.name.clone()),
                region: dealer.map(|d| d.region.clone()),
                total_spend: spend,
                total_rebate: rebate,
                effective_rebate_percent: effective_rebate_percent(rebate, spend),
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.total_rebate
            .partial_cmp(&a.total_rebate)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    rows
}

/// Rebate totals for one vendor, joined with the master record when present.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorRebateRow {
    pub vendor_id: String,
    pub vendor_name: String,
    pub category: Option<String>,
    pub total_spend: f64,
    pub total_rebate: f64,
    pub effective_rebate_percent: f64,
}

/// Aggregate earnings per vendor, highest rebate first.
pub fn vendor_rows(earnings: &[RebateEarning], vendors: &[Vendor]) -> Vec<VendorRebateRow> {
    let vendors_by_id = index_by(vendors, |v| v.id.as_str());

    let mut by_vendor: BTreeMap<&str, (f64, f64)> = BTreeMap::new();
    for earning in earnings {
        let entry = by_vendor.entry(earning.vendor_id.as_str()).or_default();
        entry.0 += earning.spend;
        entry.1 += earning.rebate_amount;
    }

    let mut rows: Vec<VendorRebateRow> = by_vendor
        .into_iter()
        .map(|(vendor_id, (spend, rebate))| {
            let vendor = vendors_by_id.get(vendor_id);
            VendorRebateRow {
                vendor_id: vendor_id.to_string(),
                vendor_name: vendor
                    .map_or_else(|| "Unknown Vendor".to_string(), |v| v.name.clone()),
                category: vendor.map(|v| v.category.clone()),
                total_spend: spend,
                total_rebate: rebate,
                effective_rebate_percent: effective_rebate_percent(rebate, spend),
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.total_rebate
            .partial_cmp(&a.total_rebate)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    rows
}

/// Rebate totals and participation counts for one period.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodRebateRow {
    pub period: String,
    pub total_spend: f64,
    pub total_rebate: f64,
    pub effective_rebate_percent: f64,
    pub dealer_count: usize,
    pub vendor_count: usize,
}

/// Aggregate earnings per period label, oldest first.
///
/// Ordering is lexicographic on the label, which is chronological only for
/// the fixed "YYYY-Qn" shape the data uses.
pub fn period_rows(earnings: &[RebateEarning]) -> Vec<PeriodRebateRow> {
    #[derive(Default)]
    struct Acc<'a> {
        spend: f64,
        rebate: f64,
        dealers: HashSet<&'a str>,
        vendors: HashSet<&'a str>,
    }

    let mut by_period: BTreeMap<&str, Acc> = BTreeMap::new();
    for earning in earnings {
        let acc = by_period.entry(earning.period.as_str()).or_default();
        acc.spend += earning.spend;
        acc.rebate += earning.rebate_amount;
        acc.dealers.insert(earning.dealer_id.as_str());
        acc.vendors.insert(earning.vendor_id.as_str());
    }

    by_period
        .into_iter()
        .map(|(period, acc)| PeriodRebateRow {
            period: period.to_string(),
            total_spend: acc.spend,
            total_rebate: acc.rebate,
            effective_rebate_percent: effective_rebate_percent(acc.rebate, acc.spend),
            dealer_count: acc.dealers.len(),
            vendor_count: acc.vendors.len(),
        })
        .collect()
}

/// One point of the per-period rebate trend, for charting.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodPoint {
    pub period: String,
    pub total_spend: f64,
    pub total_rebate: f64,
}

/// Per-period `{spend, rebate}` points, oldest first. Same grouping as
/// [`period_rows`] without the counts.
pub fn period_series(earnings: &[RebateEarning]) -> Vec<PeriodPoint> {
    let mut by_period: BTreeMap<&str, (f64, f64)> = BTreeMap::new();
    for earning in earnings {
        let entry = by_period.entry(earning.period.as_str()).or_default();
        entry.0 += earning.spend;
        entry.1 += earning.rebate_amount;
    }

    by_period
        .into_iter()
        .map(|(period, (spend, rebate))| PeriodPoint {
            period: period.to_string(),
            total_spend: spend,
            total_rebate: rebate,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn earning(
        id: &str,
        dealer_id: &str,
        vendor_id: &str,
        period: &str,
        spend: f64,
        percent: f64,
        amount: f64,
    ) -> RebateEarning {
        RebateEarning {
            id: id.to_string(),
            dealer_id: dealer_id.to_string(),
            vendor_id: vendor_id.to_string(),
            period: period.to_string(),
            spend,
            rebate_percent_applied: percent,
            rebate_amount: amount,
        }
    }

    fn dealer(id: &str, name: &str, region: &str) -> Dealer {
        Dealer {
            id: id.to_string(),
            name: name.to_string(),
            region: region.to_string(),
            annual_spend: 0.0,
        }
    }

    fn vendor(id: &str, name: &str, category: &str) -> Vendor {
        Vendor {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            base_rebate_rate: 2.0,
        }
    }

    #[test]
    fn test_effective_rebate_percent_zero_spend_is_zero() {
        let percent = effective_rebate_percent(50.0, 0.0);
        assert_eq!(percent, 0.0);
        assert!(!percent.is_nan());
    }

    #[test]
    fn test_effective_rebate_percent() {
        assert!((effective_rebate_percent(50.0, 1000.0) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_global_summary_with_zero_spend_period() {
        let earnings = vec![
            earning("RE-1", "D-1", "V-1", "2025-Q1", 1000.0, 5.0, 50.0),
            earning("RE-2", "D-1", "V-1", "2025-Q2", 0.0, 0.0, 0.0),
        ];
        let summary = global_summary(&earnings);
        assert_eq!(summary.total_spend, 1000.0);
        assert_eq!(summary.total_rebate, 50.0);
        assert!((summary.effective_rebate_percent - 5.0).abs() < 1e-9);
        assert_eq!(summary.period_count, 2);
    }

    #[test]
    fn test_global_summary_empty() {
        let summary = global_summary(&[]);
        assert_eq!(summary.total_spend, 0.0);
        assert_eq!(summary.effective_rebate_percent, 0.0);
        assert_eq!(summary.period_count, 0);
    }

    #[test]
    fn test_dealer_rows_sums_and_sorts_by_rebate() {
        let dealers = vec![dealer("D-1", "Apex", "West"), dealer("D-2", "Blue Ridge", "East")];
        let earnings = vec![
            earning("RE-1", "D-1", "V-1", "2025-Q1", 1000.0, 2.0, 20.0),
            earning("RE-2", "D-2", "V-1", "2025-Q1", 500.0, 8.0, 40.0),
            earning("RE-3", "D-1", "V-2", "2025-Q2", 1000.0, 1.0, 10.0),
        ];
        let rows = dealer_rows(&earnings, &dealers);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].dealer_id, "D-2");
        assert_eq!(rows[0].total_rebate, 40.0);
        assert_eq!(rows[1].dealer_id, "D-1");
        assert_eq!(rows[1].total_spend, 2000.0);
        assert_eq!(rows[1].total_rebate, 30.0);
        assert!((rows[1].effective_rebate_percent - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_dealer_rows_unknown_dealer_fallback() {
        let earnings = vec![earning("RE-1", "D-9", "V-1", "2025-Q1", 100.0, 2.0, 2.0)];
        let rows = dealer_rows(&earnings, &[]);
        assert_eq!(rows[0].dealer_name, "Unknown Dealer");
        assert_eq!(rows[0].region, None);
    }

    #[test]
    fn test_vendor_rows_joins_category() {
        let vendors = vec![vendor("V-1", "Summit", "Fasteners")];
        let earnings = vec![
            earning("RE-1", "D-1", "V-1", "2025-Q1", 1000.0, 3.0, 30.0),
            earning("RE-2", "D-2", "V-9", "2025-Q1", 100.0, 3.0, 3.0),
        ];
        let rows = vendor_rows(&earnings, &vendors);
        assert_eq!(rows[0].vendor_name, "Summit");
        assert_eq!(rows[0].category.as_deref(), Some("Fasteners"));
        assert_eq!(rows[1].vendor_name, "Unknown Vendor");
        assert_eq!(rows[1].category, None);
    }

    #[test]
    fn test_period_rows_lexicographic_order() {
        let earnings = vec![
            earning("RE-1", "D-1", "V-1", "2025-Q2", 100.0, 2.0, 2.0),
            earning("RE-2", "D-1", "V-1", "2025-Q1", 100.0, 2.0, 2.0),
            earning("RE-3", "D-2", "V-2", "2025-Q3", 100.0, 2.0, 2.0),
        ];
        let rows = period_rows(&earnings);
        let order: Vec<&str> = rows.iter().map(|r| r.period.as_str()).collect();
        assert_eq!(order, vec!["2025-Q1", "2025-Q2", "2025-Q3"]);
    }

    #[test]
    fn test_period_rows_counts_distinct_participants() {
        let earnings = vec![
            earning("RE-1", "D-1", "V-1", "2025-Q1", 100.0, 2.0, 2.0),
            earning("RE-2", "D-1", "V-2", "2025-Q1", 100.0, 2.0, 2.0),
            earning("RE-3", "D-2", "V-1", "2025-Q1", 100.0, 2.0, 2.0),
        ];
        let rows = period_rows(&earnings);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].total_spend, 300.0);
        assert_eq!(rows[0].dealer_count, 2);
        assert_eq!(rows[0].vendor_count, 2);
    }

    #[test]
    fn test_period_series_matches_period_rows_totals() {
        let earnings = vec![
            earning("RE-1", "D-1", "V-1", "2025-Q2", 200.0, 2.0, 4.0),
            earning("RE-2", "D-1", "V-1", "2025-Q1", 100.0, 2.0, 2.0),
            earning("RE-3", "D-2", "V-2", "2025-Q2", 300.0, 2.0, 6.0),
        ];
        let series = period_series(&earnings);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].period, "2025-Q1");
        assert_eq!(series[0].total_spend, 100.0);
        assert_eq!(series[1].period, "2025-Q2");
        assert_eq!(series[1].total_spend, 500.0);
        assert_eq!(series[1].total_rebate, 10.0);
    }

    #[test]
    fn test_rows_are_json_serializable() {
        let dealers = vec![dealer("D-1", "Apex", "West")];
        let earnings = vec![earning("RE-1", "D-1", "V-1", "2025-Q1", 100.0, 2.0, 2.0)];
        let value = serde_json::to_value(dealer_rows(&earnings, &dealers)).unwrap();
        assert_eq!(value[0]["dealerName"], "Apex");
        assert_eq!(value[0]["totalSpend"], 100.0);
    }
}
