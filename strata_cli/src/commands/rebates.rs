//! The `rebates` subcommand: global rebate summary plus a chosen grouping.

use anyhow::{bail, Result};
use clap::Args;
use strata_lib::format::{format_currency, format_percent};
use strata_lib::rebate::{self, global_summary};
use strata_lib::Dataset;

use crate::output::{self, OutputFormat};

/// Arguments for the `rebates` subcommand.
#[derive(Args)]
pub struct RebatesArgs {
    /// Grouping: period, dealer, or vendor
    #[arg(long, default_value = "period")]
    pub by: String,
}

pub fn run(args: &RebatesArgs, dataset: &Dataset, format: &OutputFormat) -> Result<()> {
    let by = args.by.trim().to_lowercase();
    if !matches!(by.as_str(), "period" | "dealer" | "vendor") {
        bail!(
            "Invalid --by value: '{}'. Valid options: period, dealer, vendor",
            args.by
        );
    }

    let summary = global_summary(&dataset.rebate_earnings);

    if matches!(format, OutputFormat::Json) {
        let grouped = match by.as_str() {
            "dealer" => serde_json::to_value(rebate::dealer_rows(
                &dataset.rebate_earnings,
                &dataset.dealers,
            )),
            "vendor" => serde_json::to_value(rebate::vendor_rows(
                &dataset.rebate_earnings,
                &dataset.vendors,
            )),
            _ => serde_json::to_value(rebate::period_rows(&dataset.rebate_earnings)),
        }?;
        output::print_json(&serde_json::json!({
            "summary": summary,
            "rows": grouped,
        }));
        return Ok(());
    }

    if matches!(format, OutputFormat::Table | OutputFormat::Markdown) {
        println!(
            "{} spend | {} rebates | effective {} | {} periods\n",
            format_currency(summary.total_spend),
            format_currency(summary.total_rebate),
            format_percent(summary.effective_rebate_percent),
            summary.period_count
        );
    }

    match by.as_str() {
        "dealer" => {
            let rows = rebate::dealer_rows(&dataset.rebate_earnings, &dataset.dealers);
            output::print_rows(&output::rebate_dealer_rows(&rows), format)
        }
        "vendor" => {
            let rows = rebate::vendor_rows(&dataset.rebate_earnings, &dataset.vendors);
            output::print_rows(&output::rebate_vendor_rows(&rows), format)
        }
        _ => {
            let rows = rebate::period_rows(&dataset.rebate_earnings);
            output::print_rows(&output::period_rows(&rows), format)
        }
    }
}
