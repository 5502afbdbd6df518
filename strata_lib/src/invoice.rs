//! Invoice aggregation: per-invoice totals, the enriched invoice list, and
//! the line-item breakdown backing the single-invoice view.

use std::collections::HashSet;

use chrono::Datelike;
use serde::Serialize;
use strata_data::types::{Dealer, Invoice, Product, RebateEarning, Vendor};

use crate::lookup::index_by;

/// Sum of `quantity × unit_price` over the invoice's line items.
///
/// An invoice with no line items totals 0.
pub fn invoice_total(invoice: &Invoice) -> f64 {
    invoice.line_items.iter().map(|item| item.line_total()).sum()
}

/// An invoice enriched with joined display fields and computed totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceView {
    pub invoice: Invoice,
    pub dealer_name: String,
    /// `None` when the dealer reference does not resolve.
    pub dealer_region: Option<String>,
    pub vendor_name: String,
    pub total_amount: f64,
    pub line_count: usize,
}

/// Build the enriched invoice list, newest first.
///
/// Unresolvable dealer/vendor references fall back to "Unknown Dealer" and
/// "Unknown Vendor". Ties on date are broken by invoice number ascending.
pub fn build_invoice_list(
    invoices: &[Invoice],
    dealers: &[Dealer],
    vendors: &[Vendor],
) -> Vec<InvoiceView> {
    let dealers_by_id = index_by(dealers, |d| d.id.as_str());
    let vendors_by_id = index_by(vendors, |v| v.id.as_str());

    let mut rows: Vec<InvoiceView> = invoices
        .iter()
        .map(|invoice| {
            let dealer = dealers_by_id.get(invoice.dealer_id.as_str());
            let vendor = vendors_by_id.get(invoice.vendor_id.as_str());
            InvoiceView {
                dealer_name: dealer
                    .map_or_else(|| "Unknown Dealer".to_string(), |d| d.name.clone()),
                dealer_region: dealer.map(|d| d.region.clone()),
                vendor_name: vendor
                    .map_or_else(|| "Unknown Vendor".to_string(), |v| v.name.clone()),
                total_amount: invoice_total(invoice),
                line_count: invoice.line_items.len(),
                invoice: invoice.clone(),
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.invoice
            .date
            .cmp(&a.invoice.date)
            .then_with(|| a.invoice.invoice_number.cmp(&b.invoice.invoice_number))
    });
    rows
}

/// Aggregate headline metrics over an enriched invoice list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSummary {
    pub total_invoices: usize,
    pub total_spend: f64,
    /// 0 when there are no invoices.
    pub average_invoice_value: f64,
    pub distinct_dealers: usize,
    pub distinct_vendors: usize,
}

pub fn invoice_summary(rows: &[InvoiceView]) -> InvoiceSummary {
    let total_spend: f64 = rows.iter().map(|r| r.total_amount).sum();
    let distinct_dealers = rows
        .iter()
        .map(|r| r.invoice.dealer_id.as_str())
        .collect::<HashSet<_>>()
        .len();
    let distinct_vendors = rows
        .iter()
        .map(|r| r.invoice.vendor_id.as_str())
        .collect::<HashSet<_>>()
        .len();

    InvoiceSummary {
        total_invoices: rows.len(),
        total_spend,
        average_invoice_value: if rows.is_empty() {
            0.0
        } else {
            total_spend / rows.len() as f64
        },
        distinct_dealers,
        distinct_vendors,
    }
}

/// One line of an invoice breakdown, joined with catalog details.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemView {
    /// "Unknown Product" when the catalog does not contain the reference.
    pub product_name: String,
    pub sku: Option<String>,
    pub quantity: u32,
    pub unit_price: f64,
    pub line_total: f64,
}

/// Full breakdown of a single invoice for the detail view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceBreakdown {
    pub invoice: Invoice,
    pub dealer_name: String,
    pub vendor_name: String,
    pub lines: Vec<LineItemView>,
    pub subtotal: f64,
    pub total_units: u32,
    pub average_line_value: f64,
    /// Subtotal × the vendor's base rebate rate; 0 when the vendor is unknown.
    pub estimated_rebate: f64,
    /// Mean rebate percent from this dealer/vendor pair's earnings in the
    /// invoice year, falling back to the vendor base rate, then 0.
    pub applied_rebate_percent: f64,
    pub net_cost: f64,
}

pub fn build_invoice_breakdown(
    invoice: &Invoice,
    dealers: &[Dealer],
    vendors: &[Vendor],
    products: &[Product],
    earnings: &[RebateEarning],
) -> InvoiceBreakdown {
    let dealers_by_id = index_by(dealers, |d| d.id.as_str());
    let vendors_by_id = index_by(vendors, |v| v.id.as_str());
    let products_by_id = index_by(products, |p| p.id.as_str());

    let subtotal = invoice_total(invoice);
    let lines: Vec<LineItemView> = invoice
        .line_items
        .iter()
        .map(|item| {
            let product = products_by_id.get(item.product_id.as_str());
            LineItemView {
                product_name: product
                    .map_or_else(|| "Unknown Product".to_string(), |p| p.name.clone()),
                sku: product.map(|p| p.sku.clone()),
                quantity: item.quantity,
                unit_price: item.unit_price,
                line_total: item.line_total(),
            }
        })
        .collect();

    let dealer = dealers_by_id.get(invoice.dealer_id.as_str());
    let vendor = vendors_by_id.get(invoice.vendor_id.as_str());

    let year = invoice.date.year().to_string();
    let applied: Vec<f64> = earnings
        .iter()
        .filter(|e| {
            e.dealer_id == invoice.dealer_id
                && e.vendor_id == invoice.vendor_id
                && e.period.contains(&year)
        })
        .map(|e| e.rebate_percent_applied)
        .collect();
    let applied_rebate_percent = if applied.is_empty() {
        vendor.map_or(0.0, |v| v.base_rebate_rate)
    } else {
        applied.iter().sum::<f64>() / applied.len() as f64
    };

    let line_count = invoice.line_items.len();

    InvoiceBreakdown {
        dealer_name: dealer
            .map_or_else(|| "Unknown Dealer".to_string(), |d| d.name.clone()),
        vendor_name: vendor
            .map_or_else(|| "Unknown Vendor".to_string(), |v| v.name.clone()),
        lines,
        subtotal,
        total_units: invoice.line_items.iter().map(|i| i.quantity).sum(),
        average_line_value: if line_count == 0 {
            0.0
        } else {
            subtotal / line_count as f64
        },
        estimated_rebate: vendor.map_or(0.0, |v| subtotal * v.base_rebate_rate / 100.0),
        applied_rebate_percent,
        net_cost: subtotal - subtotal * applied_rebate_percent / 100.0,
        invoice: invoice.clone(),
    }
}
