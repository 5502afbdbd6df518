//! The `dashboard` subcommand: headline KPIs and the landing-view rankings.

use anyhow::{bail, Result};
use clap::Args;
use serde::Serialize;
use strata_lib::format::{format_currency, format_percent};
use strata_lib::overview::{self, TopDealerRow, TopVendorRow};
use strata_lib::rebate::{self, PeriodPoint};
use strata_lib::Dataset;

use crate::output::{self, OutputFormat};

/// Arguments for the `dashboard` subcommand.
#[derive(Args)]
pub struct DashboardArgs {
    /// Number of rows in each ranking
    #[arg(long, default_value = "5")]
    pub top: usize,
}

/// Everything the landing view shows, bundled for JSON output.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DashboardReport {
    total_dealers: usize,
    total_vendors: usize,
    total_spend: f64,
    total_rebate: f64,
    average_rebate_percent: f64,
    top_dealers: Vec<TopDealerRow>,
    top_vendors: Vec<TopVendorRow>,
    rebate_trend: Vec<PeriodPoint>,
}

pub fn run(args: &DashboardArgs, dataset: &Dataset, format: &OutputFormat) -> Result<()> {
    let report = DashboardReport {
        total_dealers: overview::total_dealers(&dataset.dealers),
        total_vendors: overview::total_vendors(&dataset.vendors),
        total_spend: overview::total_spend(&dataset.invoices),
        total_rebate: overview::total_rebate(&dataset.rebate_earnings),
        average_rebate_percent: overview::average_rebate_percent(&dataset.rebate_earnings),
        top_dealers: overview::top_dealers_by_spend(&dataset.dealers, &dataset.invoices, args.top),
        top_vendors: overview::top_vendors_by_rebate(
            &dataset.vendors,
            &dataset.rebate_earnings,
            args.top,
        ),
        rebate_trend: rebate::period_series(&dataset.rebate_earnings),
    };

    match format {
        OutputFormat::Json => {
            output::print_json(&report);
            return Ok(());
        }
        OutputFormat::Csv => {
            bail!("csv output is not supported for the dashboard; use table, markdown, or json")
        }
        OutputFormat::Table | OutputFormat::Markdown => {}
    }

    println!("Dealers:          {}", report.total_dealers);
    println!("Vendors:          {}", report.total_vendors);
    println!("Total Spend:      {}", format_currency(report.total_spend));
    println!("Total Rebates:    {}", format_currency(report.total_rebate));
    println!(
        "Avg Rebate Rate:  {}",
        format_percent(report.average_rebate_percent)
    );

    println!("\nTop Dealers by Spend");
    output::print_rows(&output::top_dealer_rows(&report.top_dealers), format)?;

    println!("\nTop Vendors by Rebate");
    output::print_rows(&output::top_vendor_rows(&report.top_vendors), format)?;

    println!("\nRebates by Period");
    output::print_rows(&output::trend_rows(&report.rebate_trend), format)?;

    Ok(())
}
