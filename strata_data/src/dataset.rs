//! The five record collections a reporting pass reads.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::DataError;
use crate::types::{Dealer, Invoice, Product, RebateEarning, Vendor};

/// Fully materialized record collections for one reporting pass.
///
/// The aggregation layer borrows these slices and never mutates them;
/// lifecycle is owned by whoever loads the dataset.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub dealers: Vec<Dealer>,
    pub vendors: Vec<Vendor>,
    pub products: Vec<Product>,
    pub invoices: Vec<Invoice>,
    pub rebate_earnings: Vec<RebateEarning>,
}

impl Dataset {
    /// Load all five collections from a directory of JSON files:
    /// `dealers.json`, `vendors.json`, `products.json`, `invoices.json`,
    /// and `rebate_earnings.json`.
    pub fn from_dir(dir: &Path) -> Result<Self, DataError> {
        let dataset = Dataset {
            dealers: load_collection(dir, "dealers.json")?,
            vendors: load_collection(dir, "vendors.json")?,
            products: load_collection(dir, "products.json")?,
            invoices: load_collection(dir, "invoices.json")?,
            rebate_earnings: load_collection(dir, "rebate_earnings.json")?,
        };
        debug!(
            dealers = dataset.dealers.len(),
            vendors = dataset.vendors.len(),
            products = dataset.products.len(),
            invoices = dataset.invoices.len(),
            rebate_earnings = dataset.rebate_earnings.len(),
            "dataset loaded"
        );
        Ok(dataset)
    }
}

fn load_collection<T: DeserializeOwned>(dir: &Path, file: &str) -> Result<Vec<T>, DataError> {
    let path: PathBuf = dir.join(file);
    let raw = std::fs::read_to_string(&path).map_err(|source| DataError::Io {
        path: path.clone(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| DataError::Json { path, source })
}
