//! CLI subcommand implementations.

pub mod dashboard;
pub mod dealers;
pub mod invoices;
pub mod rebates;
pub mod vendors;
