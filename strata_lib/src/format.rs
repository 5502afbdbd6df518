//! Display formatting for currency, percent, and date values.
//!
//! These define the only externally visible string contract; every view
//! renders amounts through the same three helpers.

use chrono::NaiveDate;

/// Format a dollar amount, abbreviating thousands and millions.
///
/// Amounts of $1M and up render as `$X.XM`, $1K and up as `$X.XK`, and
/// everything else with two decimals.
pub fn format_currency(amount: f64) -> String {
    if amount >= 1_000_000.0 {
        format!("${:.1}M", amount / 1_000_000.0)
    } else if amount >= 1_000.0 {
        format!("${:.1}K", amount / 1_000.0)
    } else {
        format!("${:.2}", amount)
    }
}

/// Format a percentage with two decimals.
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Format a date like "Mar 1, 2025".
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}
