mod commands;
mod output;

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use strata_lib::{sample, Dataset};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "strata")]
#[command(about = "Dealer, vendor, invoice, and rebate reporting for the purchasing group")]
struct Cli {
    /// Directory of JSON collections (defaults to the built-in sample data)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Output format: table, markdown, csv, or json
    #[arg(long, default_value = "table", global = true)]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Headline KPIs, top rankings, and the rebate trend
    Dashboard(commands::dashboard::DashboardArgs),
    /// Dealer directory and single-dealer profiles
    Dealers(commands::dealers::DealersArgs),
    /// Vendor directory and single-vendor profiles
    Vendors(commands::vendors::VendorsArgs),
    /// Enriched invoice list and single-invoice breakdowns
    Invoices(commands::invoices::InvoicesArgs),
    /// Rebate summaries grouped by period, dealer, or vendor
    Rebates(commands::rebates::RebatesArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("strata_data=info".parse().unwrap()),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "table" => OutputFormat::Table,
        "markdown" => OutputFormat::Markdown,
        "csv" => OutputFormat::Csv,
        "json" => OutputFormat::Json,
        other => bail!(
            "Invalid --output value: '{}'. Valid options: table, markdown, csv, json",
            other
        ),
    };

    let dataset = match &cli.data {
        Some(dir) => Dataset::from_dir(dir)?,
        None => sample::dataset(),
    };

    match &cli.command {
        Commands::Dashboard(args) => commands::dashboard::run(args, &dataset, &format)?,
        Commands::Dealers(args) => commands::dealers::run(args, &dataset, &format)?,
        Commands::Vendors(args) => commands::vendors::run(args, &dataset, &format)?,
        Commands::Invoices(args) => commands::invoices::run(args, &dataset, &format)?,
        Commands::Rebates(args) => commands::rebates::run(args, &dataset, &format)?,
    }

    Ok(())
}
