use anyhow::Result;
use serde::Serialize;
use strata_lib::dealer::{CategorySpend, DealerMetrics, VendorSpend};
use strata_lib::format::{format_currency, format_date, format_percent};
use strata_lib::invoice::{InvoiceView, LineItemView};
use strata_lib::overview;
use strata_lib::rebate::{DealerRebateRow, PeriodPoint, PeriodRebateRow, VendorRebateRow};
use strata_lib::vendor::{DealerSpend, ProductSales, VendorMetrics};
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Markdown,
    Csv,
    Json,
}

#[derive(Tabled, Serialize)]
pub struct DealerRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "Dealer")]
    #[serde(rename = "Dealer")]
    dealer: String,
    #[tabled(rename = "Region")]
    #[serde(rename = "Region")]
    region: String,
    #[tabled(rename = "Total Spend")]
    #[serde(rename = "Total Spend")]
    total_spend: String,
    #[tabled(rename = "Total Rebate")]
    #[serde(rename = "Total Rebate")]
    total_rebate: String,
    #[tabled(rename = "Effective Rate")]
    #[serde(rename = "Effective Rate")]
    effective_rate: String,
    #[tabled(rename = "Vendors")]
    #[serde(rename = "Vendors")]
    vendors: usize,
}

#[derive(Tabled, Serialize)]
pub struct VendorRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "Vendor")]
    #[serde(rename = "Vendor")]
    vendor: String,
    #[tabled(rename = "Category")]
    #[serde(rename = "Category")]
    category: String,
    #[tabled(rename = "Total Spend")]
    #[serde(rename = "Total Spend")]
    total_spend: String,
    #[tabled(rename = "Total Rebate")]
    #[serde(rename = "Total Rebate")]
    total_rebate: String,
    #[tabled(rename = "Effective Rate")]
    #[serde(rename = "Effective Rate")]
    effective_rate: String,
    #[tabled(rename = "Dealers")]
    #[serde(rename = "Dealers")]
    dealers: usize,
}

#[derive(Tabled, Serialize)]
pub struct InvoiceRow {
    #[tabled(rename = "Date")]
    #[serde(rename = "Date")]
    date: String,
    #[tabled(rename = "Invoice")]
    #[serde(rename = "Invoice")]
    invoice: String,
    #[tabled(rename = "Dealer")]
    #[serde(rename = "Dealer")]
    dealer: String,
    #[tabled(rename = "Vendor")]
    #[serde(rename = "Vendor")]
    vendor: String,
    #[tabled(rename = "Lines")]
    #[serde(rename = "Lines")]
    lines: usize,
    #[tabled(rename = "Total")]
    #[serde(rename = "Total")]
    total: String,
}

#[derive(Tabled, Serialize)]
pub struct TopDealerRow {
    #[tabled(rename = "Dealer")]
    #[serde(rename = "Dealer")]
    dealer: String,
    #[tabled(rename = "Region")]
    #[serde(rename = "Region")]
    region: String,
    #[tabled(rename = "Total Spend")]
    #[serde(rename = "Total Spend")]
    total_spend: String,
}

#[derive(Tabled, Serialize)]
pub struct TopVendorRow {
    #[tabled(rename = "Vendor")]
    #[serde(rename = "Vendor")]
    vendor: String,
    #[tabled(rename = "Category")]
    #[serde(rename = "Category")]
    category: String,
    #[tabled(rename = "Total Rebate")]
    #[serde(rename = "Total Rebate")]
    total_rebate: String,
}

#[derive(Tabled, Serialize)]
pub struct PeriodRow {
    #[tabled(rename = "Period")]
    #[serde(rename = "Period")]
    period: String,
    #[tabled(rename = "Spend")]
    #[serde(rename = "Spend")]
    spend: String,
    #[tabled(rename = "Rebate")]
    #[serde(rename = "Rebate")]
    rebate: String,
    #[tabled(rename = "Effective Rate")]
    #[serde(rename = "Effective Rate")]
    effective_rate: String,
    #[tabled(rename = "Dealers")]
    #[serde(rename = "Dealers")]
    dealers: usize,
    #[tabled(rename = "Vendors")]
    #[serde(rename = "Vendors")]
    vendors: usize,
}

#[derive(Tabled, Serialize)]
pub struct TrendRow {
    #[tabled(rename = "Period")]
    #[serde(rename = "Period")]
    period: String,
    #[tabled(rename = "Spend")]
    #[serde(rename = "Spend")]
    spend: String,
    #[tabled(rename = "Rebate")]
    #[serde(rename = "Rebate")]
    rebate: String,
}

#[derive(Tabled, Serialize)]
pub struct RebateDealerRow {
    #[tabled(rename = "Dealer")]
    #[serde(rename = "Dealer")]
    dealer: String,
    #[tabled(rename = "Region")]
    #[serde(rename = "Region")]
    region: String,
    #[tabled(rename = "Spend")]
    #[serde(rename = "Spend")]
    spend: String,
    #[tabled(rename = "Rebate")]
    #[serde(rename = "Rebate")]
    rebate: String,
    #[tabled(rename = "Effective Rate")]
    #[serde(rename = "Effective Rate")]
    effective_rate: String,
}

#[derive(Tabled, Serialize)]
pub struct RebateVendorRow {
    #[tabled(rename = "Vendor")]
    #[serde(rename = "Vendor")]
    vendor: String,
    #[tabled(rename = "Category")]
    #[serde(rename = "Category")]
    category: String,
    #[tabled(rename = "Spend")]
    #[serde(rename = "Spend")]
    spend: String,
    #[tabled(rename = "Rebate")]
    #[serde(rename = "Rebate")]
    rebate: String,
    #[tabled(rename = "Effective Rate")]
    #[serde(rename = "Effective Rate")]
    effective_rate: String,
}

#[derive(Tabled, Serialize)]
pub struct LineItemRow {
    #[tabled(rename = "Product")]
    #[serde(rename = "Product")]
    product: String,
    #[tabled(rename = "SKU")]
    #[serde(rename = "SKU")]
    sku: String,
    #[tabled(rename = "Qty")]
    #[serde(rename = "Qty")]
    qty: u32,
    #[tabled(rename = "Unit Price")]
    #[serde(rename = "Unit Price")]
    unit_price: String,
    #[tabled(rename = "Line Total")]
    #[serde(rename = "Line Total")]
    line_total: String,
}

#[derive(Tabled, Serialize)]
pub struct VendorSpendRow {
    #[tabled(rename = "Vendor")]
    #[serde(rename = "Vendor")]
    vendor: String,
    #[tabled(rename = "Category")]
    #[serde(rename = "Category")]
    category: String,
    #[tabled(rename = "Spend")]
    #[serde(rename = "Spend")]
    spend: String,
}

#[derive(Tabled, Serialize)]
pub struct DealerSpendRow {
    #[tabled(rename = "Dealer")]
    #[serde(rename = "Dealer")]
    dealer: String,
    #[tabled(rename = "Region")]
    #[serde(rename = "Region")]
    region: String,
    #[tabled(rename = "Spend")]
    #[serde(rename = "Spend")]
    spend: String,
}

#[derive(Tabled, Serialize)]
pub struct CategoryRow {
    #[tabled(rename = "Category")]
    #[serde(rename = "Category")]
    category: String,
    #[tabled(rename = "Spend")]
    #[serde(rename = "Spend")]
    spend: String,
    #[tabled(rename = "Share")]
    #[serde(rename = "Share")]
    share: String,
}

#[derive(Tabled, Serialize)]
pub struct ProductSalesRow {
    #[tabled(rename = "Product")]
    #[serde(rename = "Product")]
    product: String,
    #[tabled(rename = "SKU")]
    #[serde(rename = "SKU")]
    sku: String,
    #[tabled(rename = "Units")]
    #[serde(rename = "Units")]
    units: u32,
    #[tabled(rename = "Revenue")]
    #[serde(rename = "Revenue")]
    revenue: String,
}

// -- Row builders --

pub fn dealer_rows(metrics: &[DealerMetrics]) -> Vec<DealerRow> {
    metrics
        .iter()
        .map(|m| DealerRow {
            id: m.dealer.id.clone(),
            dealer: m.dealer.name.clone(),
            region: m.dealer.region.clone(),
            total_spend: format_currency(m.total_spend),
            total_rebate: format_currency(m.total_rebate),
            effective_rate: format_percent(m.effective_rebate_percent),
            vendors: m.vendor_count,
        })
        .collect()
}

pub fn vendor_rows(metrics: &[VendorMetrics]) -> Vec<VendorRow> {
    metrics
        .iter()
        .map(|m| VendorRow {
            id: m.vendor.id.clone(),
            vendor: m.vendor.name.clone(),
            category: m.vendor.category.clone(),
            total_spend: format_currency(m.total_spend),
            total_rebate: format_currency(m.total_rebate),
            effective_rate: format_percent(m.effective_rebate_percent),
            dealers: m.dealer_count,
        })
        .collect()
}

pub fn invoice_rows(views: &[InvoiceView]) -> Vec<InvoiceRow> {
    views
        .iter()
        .map(|v| InvoiceRow {
            date: format_date(v.invoice.date),
            invoice: v.invoice.invoice_number.clone(),
            dealer: v.dealer_name.clone(),
            vendor: v.vendor_name.clone(),
            lines: v.line_count,
            total: format_currency(v.total_amount),
        })
        .collect()
}

pub fn top_dealer_rows(rows: &[overview::TopDealerRow]) -> Vec<TopDealerRow> {
    rows.iter()
        .map(|r| TopDealerRow {
            dealer: r.dealer_name.clone(),
            region: r.region.clone(),
            total_spend: format_currency(r.total_spend),
        })
        .collect()
}

pub fn top_vendor_rows(rows: &[overview::TopVendorRow]) -> Vec<TopVendorRow> {
    rows.iter()
        .map(|r| TopVendorRow {
            vendor: r.vendor_name.clone(),
            category: r.category.clone(),
            total_rebate: format_currency(r.total_rebate),
        })
        .collect()
}

pub fn period_rows(rows: &[PeriodRebateRow]) -> Vec<PeriodRow> {
    rows.iter()
        .map(|r| PeriodRow {
            period: r.period.clone(),
            spend: format_currency(r.total_spend),
            rebate: format_currency(r.total_rebate),
            effective_rate: format_percent(r.effective_rebate_percent),
            dealers: r.dealer_count,
            vendors: r.vendor_count,
        })
        .collect()
}

pub fn trend_rows(points: &[PeriodPoint]) -> Vec<TrendRow> {
    points
        .iter()
        .map(|p| TrendRow {
            period: p.period.clone(),
            spend: format_currency(p.total_spend),
            rebate: format_currency(p.total_rebate),
        })
        .collect()
}

pub fn rebate_dealer_rows(rows: &[DealerRebateRow]) -> Vec<RebateDealerRow> {
    rows.iter()
        .map(|r| RebateDealerRow {
            dealer: r.dealer_name.clone(),
            region: r.region.clone().unwrap_or_default(),
            spend: format_currency(r.total_spend),
            rebate: format_currency(r.total_rebate),
            effective_rate: format_percent(r.effective_rebate_percent),
        })
        .collect()
}

pub fn rebate_vendor_rows(rows: &[VendorRebateRow]) -> Vec<RebateVendorRow> {
    rows.iter()
        .map(|r| RebateVendorRow {
            vendor: r.vendor_name.clone(),
            category: r.category.clone().unwrap_or_default(),
            spend: format_currency(r.total_spend),
            rebate: format_currency(r.total_rebate),
            effective_rate: format_percent(r.effective_rebate_percent),
        })
        .collect()
}

pub fn line_item_rows(lines: &[LineItemView]) -> Vec<LineItemRow> {
    lines
        .iter()
        .map(|l| LineItemRow {
            product: l.product_name.clone(),
            sku: l.sku.clone().unwrap_or_default(),
            qty: l.quantity,
            unit_price: format_currency(l.unit_price),
            line_total: format_currency(l.line_total),
        })
        .collect()
}

pub fn vendor_spend_rows(rows: &[VendorSpend]) -> Vec<VendorSpendRow> {
    rows.iter()
        .map(|r| VendorSpendRow {
            vendor: r.vendor.name.clone(),
            category: r.vendor.category.clone(),
            spend: format_currency(r.spend),
        })
        .collect()
}

pub fn dealer_spend_rows(rows: &[DealerSpend]) -> Vec<DealerSpendRow> {
    rows.iter()
        .map(|r| DealerSpendRow {
            dealer: r.dealer.name.clone(),
            region: r.dealer.region.clone(),
            spend: format_currency(r.spend),
        })
        .collect()
}

pub fn category_rows(rows: &[CategorySpend]) -> Vec<CategoryRow> {
    rows.iter()
        .map(|r| CategoryRow {
            category: r.category.clone(),
            spend: format_currency(r.spend),
            share: format_percent(r.share_percent),
        })
        .collect()
}

pub fn product_sales_rows(rows: &[ProductSales]) -> Vec<ProductSalesRow> {
    rows.iter()
        .map(|r| ProductSalesRow {
            product: r.product.name.clone(),
            sku: r.product.sku.clone(),
            units: r.units,
            revenue: format_currency(r.revenue),
        })
        .collect()
}

// -- Printing --

/// Render rows in the chosen format. JSON and CSV go to stdout like the
/// tables do, so output can be piped.
pub fn print_rows<T: Tabled + Serialize>(rows: &[T], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", Table::new(rows)),
        OutputFormat::Markdown => {
            let mut table = Table::new(rows);
            table.with(Style::markdown());
            println!("{}", table);
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            for row in rows {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
        OutputFormat::Json => print_json(&rows),
    }
    Ok(())
}

pub fn print_json<T: Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}
