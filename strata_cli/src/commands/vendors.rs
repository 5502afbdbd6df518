//! The `vendors` subcommand: the vendor directory and per-vendor profiles.

use anyhow::{bail, Result};
use clap::Args;
use strata_lib::format::{format_currency, format_percent};
use strata_lib::invoice::build_invoice_list;
use strata_lib::vendor::{build_vendor_metrics, build_vendor_profile, vendor_summary};
use strata_lib::Dataset;

use crate::output::{self, OutputFormat};

/// Arguments for the `vendors` subcommand.
#[derive(Args)]
pub struct VendorsArgs {
    /// Show the full profile for one vendor id (e.g. V-002)
    #[arg(long)]
    pub id: Option<String>,
}

pub fn run(args: &VendorsArgs, dataset: &Dataset, format: &OutputFormat) -> Result<()> {
    if let Some(id) = &args.id {
        return run_profile(id, dataset, format);
    }

    let metrics = build_vendor_metrics(
        &dataset.vendors,
        &dataset.invoices,
        &dataset.rebate_earnings,
    );
    let summary = vendor_summary(&metrics);

    if matches!(format, OutputFormat::Json) {
        output::print_json(&serde_json::json!({
            "summary": summary,
            "vendors": metrics,
        }));
        return Ok(());
    }

    if matches!(format, OutputFormat::Table | OutputFormat::Markdown) {
        println!(
            "{} vendors | combined spend {} | combined rebates {}\n",
            summary.total_vendors,
            format_currency(summary.combined_spend),
            format_currency(summary.combined_rebate)
        );
    }
    output::print_rows(&output::vendor_rows(&metrics), format)
}

fn run_profile(id: &str, dataset: &Dataset, format: &OutputFormat) -> Result<()> {
    let Some(vendor) = dataset.vendors.iter().find(|v| v.id == *id) else {
        bail!("no vendor with id '{}'", id);
    };

    let profile = build_vendor_profile(
        vendor,
        &dataset.invoices,
        &dataset.rebate_earnings,
        &dataset.dealers,
        &dataset.products,
    );

    match format {
        OutputFormat::Json => {
            output::print_json(&profile);
            return Ok(());
        }
        OutputFormat::Csv => {
            bail!("csv output is not supported for profiles; use table, markdown, or json")
        }
        OutputFormat::Table | OutputFormat::Markdown => {}
    }

    println!(
        "{} ({}) | {}",
        profile.vendor.name, profile.vendor.id, profile.vendor.category
    );
    println!(
        "Base Rebate Rate: {}",
        format_percent(profile.vendor.base_rebate_rate)
    );
    println!("Total Spend:      {}", format_currency(profile.total_spend));
    println!("Total Rebates:    {}", format_currency(profile.total_rebate));
    println!(
        "Effective Rate:   {}",
        format_percent(profile.effective_rebate_percent)
    );
    println!("Dealers Served:   {}", profile.dealers_served);

    if !profile.top_dealers.is_empty() {
        println!("\nTop Dealers by Spend");
        output::print_rows(&output::dealer_spend_rows(&profile.top_dealers), format)?;
    }

    if !profile.product_sales.is_empty() {
        println!("\nProduct Sales");
        output::print_rows(&output::product_sales_rows(&profile.product_sales), format)?;
    }

    if !profile.recent_invoices.is_empty() {
        println!("\nRecent Invoices");
        let views = build_invoice_list(&profile.recent_invoices, &dataset.dealers, &dataset.vendors);
        output::print_rows(&output::invoice_rows(&views), format)?;
    }

    if !profile.quarterly_rebates.is_empty() {
        println!("\nQuarterly Rebates");
        output::print_rows(&output::trend_rows(&profile.quarterly_rebates), format)?;
    }

    Ok(())
}
