//! The `invoices` subcommand: the enriched invoice list and single-invoice
//! breakdowns.

use anyhow::{bail, Result};
use clap::Args;
use strata_lib::format::{format_currency, format_date, format_percent};
use strata_lib::invoice::{build_invoice_breakdown, build_invoice_list, invoice_summary};
use strata_lib::Dataset;

use crate::output::{self, OutputFormat};

/// Arguments for the `invoices` subcommand.
#[derive(Args)]
pub struct InvoicesArgs {
    /// Show the full breakdown for one invoice id (e.g. IN-0012)
    #[arg(long)]
    pub id: Option<String>,

    /// Show at most this many invoices (newest first)
    #[arg(long)]
    pub limit: Option<usize>,
}

pub fn run(args: &InvoicesArgs, dataset: &Dataset, format: &OutputFormat) -> Result<()> {
    if let Some(id) = &args.id {
        return run_breakdown(id, dataset, format);
    }

    let mut views = build_invoice_list(&dataset.invoices, &dataset.dealers, &dataset.vendors);
    let summary = invoice_summary(&views);
    if let Some(limit) = args.limit {
        views.truncate(limit);
    }

    if matches!(format, OutputFormat::Json) {
        output::print_json(&serde_json::json!({
            "summary": summary,
            "invoices": views,
        }));
        return Ok(());
    }

    if matches!(format, OutputFormat::Table | OutputFormat::Markdown) {
        println!(
            "{} invoices | total {} | average {} | {} dealers | {} vendors\n",
            summary.total_invoices,
            format_currency(summary.total_spend),
            format_currency(summary.average_invoice_value),
            summary.distinct_dealers,
            summary.distinct_vendors
        );
    }
    output::print_rows(&output::invoice_rows(&views), format)
}

fn run_breakdown(id: &str, dataset: &Dataset, format: &OutputFormat) -> Result<()> {
    let Some(invoice) = dataset.invoices.iter().find(|inv| inv.id == *id) else {
        bail!("no invoice with id '{}'", id);
    };

    let breakdown = build_invoice_breakdown(
        invoice,
        &dataset.dealers,
        &dataset.vendors,
        &dataset.products,
        &dataset.rebate_earnings,
    );

    match format {
        OutputFormat::Json => {
            output::print_json(&breakdown);
            return Ok(());
        }
        OutputFormat::Csv => {
            bail!("csv output is not supported for breakdowns; use table, markdown, or json")
        }
        OutputFormat::Table | OutputFormat::Markdown => {}
    }

    println!(
        "Invoice {} | {}",
        breakdown.invoice.invoice_number,
        format_date(breakdown.invoice.date)
    );
    println!("Dealer: {}", breakdown.dealer_name);
    println!("Vendor: {}", breakdown.vendor_name);

    if !breakdown.lines.is_empty() {
        println!("\nLine Items");
        output::print_rows(&output::line_item_rows(&breakdown.lines), format)?;
    }

    println!("\nSubtotal:           {}", format_currency(breakdown.subtotal));
    println!("Total Units:        {}", breakdown.total_units);
    println!(
        "Average Line Value: {}",
        format_currency(breakdown.average_line_value)
    );
    println!(
        "Estimated Rebate:   {}",
        format_currency(breakdown.estimated_rebate)
    );
    println!(
        "Applied Rate:       {}",
        format_percent(breakdown.applied_rebate_percent)
    );
    println!("Net Cost:           {}", format_currency(breakdown.net_cost));

    Ok(())
}
