use std::path::Path;

use chrono::NaiveDate;
use strata_data::types::{Dealer, Invoice, Product, RebateEarning, Vendor};
use strata_data::{DataError, Dataset};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[test]
fn deserialize_dealers() {
    let json = load_fixture("dealers.json");
    let dealers: Vec<Dealer> = serde_json::from_str(&json).unwrap();
    assert_eq!(dealers.len(), 2);
    assert_eq!(dealers[0].id, "D-001");
    assert_eq!(dealers[0].name, "Apex Industrial Supply");
    assert_eq!(dealers[0].region, "Northeast");
    assert_eq!(dealers[0].annual_spend, 1_200_000.0);
}

#[test]
fn deserialize_vendors() {
    let json = load_fixture("vendors.json");
    let vendors: Vec<Vendor> = serde_json::from_str(&json).unwrap();
    assert_eq!(vendors.len(), 2);
    assert_eq!(vendors[1].id, "V-002");
    assert_eq!(vendors[1].category, "Abrasives");
    assert_eq!(vendors[1].base_rebate_rate, 3.5);
}

#[test]
fn deserialize_products() {
    let json = load_fixture("products.json");
    let products: Vec<Product> = serde_json::from_str(&json).unwrap();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].vendor_id, "V-001");
    assert_eq!(products[0].sku, "FAS-S01");
    assert_eq!(products[0].unit_cost, 24.5);
}

#[test]
fn deserialize_invoices_full() {
    let json = load_fixture("invoices.json");
    let invoices: Vec<Invoice> = serde_json::from_str(&json).unwrap();
    assert_eq!(invoices.len(), 2);

    let first = &invoices[0];
    assert_eq!(first.id, "IN-0001");
    assert_eq!(first.dealer_id, "D-001");
    assert_eq!(first.vendor_id, "V-001");
    assert_eq!(first.invoice_number, "GPO-2025-0001");
    assert_eq!(first.date, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
    assert_eq!(first.line_items.len(), 2);
    assert_eq!(first.line_items[0].product_id, "PR-0001");
    assert_eq!(first.line_items[0].quantity, 10);
    assert_eq!(first.line_items[0].unit_price, 27.8);
}

#[test]
fn deserialize_invoice_with_empty_lines() {
    let json = load_fixture("invoices.json");
    let invoices: Vec<Invoice> = serde_json::from_str(&json).unwrap();
    assert!(invoices[1].line_items.is_empty());
}

#[test]
fn deserialize_rebate_earnings() {
    let json = load_fixture("rebate_earnings.json");
    let earnings: Vec<RebateEarning> = serde_json::from_str(&json).unwrap();
    assert_eq!(earnings.len(), 2);
    assert_eq!(earnings[0].period, "2025-Q1");
    assert_eq!(earnings[0].spend, 42_000.0);
    assert_eq!(earnings[0].rebate_percent_applied, 2.25);
    assert_eq!(earnings[0].rebate_amount, 945.0);
}

#[test]
fn line_total_multiplies_quantity_and_price() {
    let json = load_fixture("invoices.json");
    let invoices: Vec<Invoice> = serde_json::from_str(&json).unwrap();
    assert_eq!(invoices[0].line_items[0].line_total(), 278.0);
}

#[test]
fn dataset_from_dir_loads_all_collections() {
    let dataset = Dataset::from_dir(Path::new("tests/fixtures")).unwrap();
    assert_eq!(dataset.dealers.len(), 2);
    assert_eq!(dataset.vendors.len(), 2);
    assert_eq!(dataset.products.len(), 2);
    assert_eq!(dataset.invoices.len(), 2);
    assert_eq!(dataset.rebate_earnings.len(), 2);
}

#[test]
fn dataset_from_dir_missing_file_is_io_error() {
    let err = Dataset::from_dir(Path::new("tests")).unwrap_err();
    assert!(matches!(err, DataError::Io { .. }));
}

#[test]
fn deserialize_malformed_json_returns_error() {
    let bad_json = r#"[{"id": not valid json}]"#;
    let result = serde_json::from_str::<Vec<Dealer>>(bad_json);
    assert!(result.is_err());
}

#[test]
fn deserialize_missing_required_fields_returns_error() {
    let json = r#"[{"id": "D-001", "name": "Apex"}]"#;
    let result = serde_json::from_str::<Vec<Dealer>>(json);
    assert!(result.is_err());
}
