//! The `dealers` subcommand: the dealer directory and per-dealer profiles.

use anyhow::{bail, Result};
use clap::Args;
use strata_lib::dealer::{build_dealer_metrics, build_dealer_profile, dealer_summary};
use strata_lib::format::{format_currency, format_percent};
use strata_lib::invoice::build_invoice_list;
use strata_lib::Dataset;

use crate::output::{self, OutputFormat};

/// Arguments for the `dealers` subcommand.
#[derive(Args)]
pub struct DealersArgs {
    /// Show the full profile for one dealer id (e.g. D-003)
    #[arg(long)]
    pub id: Option<String>,
}

pub fn run(args: &DealersArgs, dataset: &Dataset, format: &OutputFormat) -> Result<()> {
    if let Some(id) = &args.id {
        return run_profile(id, dataset, format);
    }

    let metrics = build_dealer_metrics(
        &dataset.dealers,
        &dataset.invoices,
        &dataset.rebate_earnings,
    );
    let summary = dealer_summary(&metrics);

    if matches!(format, OutputFormat::Json) {
        output::print_json(&serde_json::json!({
            "summary": summary,
            "dealers": metrics,
        }));
        return Ok(());
    }

    if matches!(format, OutputFormat::Table | OutputFormat::Markdown) {
        println!(
            "{} dealers | combined spend {} | combined rebates {}\n",
            summary.total_dealers,
            format_currency(summary.combined_spend),
            format_currency(summary.combined_rebate)
        );
    }
    output::print_rows(&output::dealer_rows(&metrics), format)
}

fn run_profile(id: &str, dataset: &Dataset, format: &OutputFormat) -> Result<()> {
    let Some(dealer) = dataset.dealers.iter().find(|d| d.id == *id) else {
        bail!("no dealer with id '{}'", id);
    };

    let profile = build_dealer_profile(
        dealer,
        &dataset.invoices,
        &dataset.rebate_earnings,
        &dataset.vendors,
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
        profile.dealer.name, profile.dealer.id, profile.dealer.region
    );
    println!(
        "Annual Spend Capacity: {}",
        format_currency(profile.dealer.annual_spend)
    );
    println!("Total Spend:           {}", format_currency(profile.total_spend));
    println!("Total Rebates:         {}", format_currency(profile.total_rebate));
    println!(
        "Effective Rate:        {}",
        format_percent(profile.effective_rebate_percent)
    );

    if !profile.top_vendors.is_empty() {
        println!("\nTop Vendors by Spend");
        output::print_rows(&output::vendor_spend_rows(&profile.top_vendors), format)?;
    }

    if !profile.category_mix.is_empty() {
        println!("\nSpend by Category");
        output::print_rows(&output::category_rows(&profile.category_mix), format)?;
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
