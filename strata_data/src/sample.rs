//! Built-in demo dataset.
//!
//! A small deterministic dataset so every report works with no data
//! directory on hand, standing in for a real export from the purchasing
//! platform. The fixed seed means repeated calls produce identical records.

use chrono::{Datelike, Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::{Dealer, Invoice, InvoiceLineItem, Product, RebateEarning, Vendor};
use crate::Dataset;

const SEED: u64 = 0x5747504f; // "WGPO"

const DEALERS: [(&str, &str, f64); 8] = [
    ("Apex Industrial Supply", "Northeast", 1_200_000.0),
    ("Blue Ridge Equipment", "Southeast", 850_000.0),
    ("Cascade Tool & Die", "West", 2_000_000.0),
    ("Great Lakes Machinery", "Midwest", 1_500_000.0),
    ("Lone Star Components", "Southwest", 950_000.0),
    ("Monadnock Hardware", "Northeast", 400_000.0),
    ("Prairie Fabrication", "Midwest", 700_000.0),
    ("Sierra Supply Co", "West", 1_100_000.0),
];

const VENDORS: [(&str, &str, f64); 6] = [
    ("Summit Fasteners", "Fasteners", 2.0),
    ("Crestline Abrasives", "Abrasives", 3.5),
    ("Harbor Seal & Gasket", "Sealants", 2.5),
    ("Pioneer Cutting Tools", "Cutting Tools", 4.0),
    ("Lakeside Adhesives", "Adhesives", 3.0),
    ("Ridgeway Safety Supply", "Safety", 1.5),
];

// One base item per vendor, offered in three grades.
const ITEMS: [&str; 6] = [
    "Hex Bolt Kit",
    "Grinding Disc Pack",
    "O-Ring Assortment",
    "Carbide End Mill",
    "Epoxy Cartridge",
    "Nitrile Glove Case",
];

const GRADES: [&str; 3] = ["Standard", "Premium", "Industrial"];

const PERIODS: [&str; 4] = ["2024-Q3", "2024-Q4", "2025-Q1", "2025-Q2"];

const INVOICE_COUNT: usize = 48;

/// Build the sample dataset. Deterministic across calls.
pub fn dataset() -> Dataset {
    let mut rng = StdRng::seed_from_u64(SEED);

    let dealers: Vec<Dealer> = DEALERS
        .iter()
        .enumerate()
        .map(|(i, (name, region, annual_spend))| Dealer {
            id: format!("D-{:03}", i + 1),
            name: (*name).to_string(),
            region: (*region).to_string(),
            annual_spend: *annual_spend,
        })
        .collect();

    let vendors: Vec<Vendor> = VENDORS
        .iter()
        .enumerate()
        .map(|(i, (name, category, base_rebate_rate))| Vendor {
            id: format!("V-{:03}", i + 1),
            name: (*name).to_string(),
            category: (*category).to_string(),
            base_rebate_rate: *base_rebate_rate,
        })
        .collect();

    let mut products: Vec<Product> = Vec::new();
    for (vi, vendor) in vendors.iter().enumerate() {
        for (gi, grade) in GRADES.iter().enumerate() {
            products.push(Product {
                id: format!("PR-{:04}", vi * GRADES.len() + gi + 1),
                vendor_id: vendor.id.clone(),
                sku: format!("{}-{}{:02}", vendor.category[..3].to_uppercase(), &grade[..1], gi + 1),
                name: format!("{} {}", grade, ITEMS[vi]),
                category: vendor.category.clone(),
                unit_cost: round2(rng.gen_range(8.0..120.0)),
            });
        }
    }

    let window_start = NaiveDate::from_ymd_opt(2024, 7, 1).expect("valid date");
    let mut invoices: Vec<Invoice> = Vec::new();
    for n in 1..=INVOICE_COUNT {
        let dealer = &dealers[rng.gen_range(0..dealers.len())];
        let vi = rng.gen_range(0..vendors.len());
        let vendor = &vendors[vi];
        let date = window_start + Duration::days(rng.gen_range(0..365));

        let line_count = rng.gen_range(1..=4);
        let line_items: Vec<InvoiceLineItem> = (0..line_count)
            .map(|_| {
                let product = &products[vi * GRADES.len() + rng.gen_range(0..GRADES.len())];
                InvoiceLineItem {
                    product_id: product.id.clone(),
                    quantity: rng.gen_range(1..=25),
                    unit_price: round2(product.unit_cost * rng.gen_range(1.08..1.35)),
                }
            })
            .collect();

        invoices.push(Invoice {
            id: format!("IN-{:04}", n),
            dealer_id: dealer.id.clone(),
            vendor_id: vendor.id.clone(),
            invoice_number: format!("GPO-{}-{:04}", date.year(), n),
            date,
            line_items,
        });
    }

    let mut rebate_earnings: Vec<RebateEarning> = Vec::new();
    let mut seq = 0;
    for dealer in &dealers {
        for vendor in &vendors {
            if !rng.gen_bool(0.55) {
                continue;
            }
            for period in PERIODS {
                seq += 1;
                let spend = round2(rng.gen_range(5_000.0..90_000.0));
                let percent = round2(vendor.base_rebate_rate + rng.gen_range(-0.5..1.5));
                rebate_earnings.push(RebateEarning {
                    id: format!("RE-{:04}", seq),
                    dealer_id: dealer.id.clone(),
                    vendor_id: vendor.id.clone(),
                    period: period.to_string(),
                    spend,
                    rebate_percent_applied: percent,
                    rebate_amount: round2(spend * percent / 100.0),
                });
            }
        }
    }

    Dataset {
        dealers,
        vendors,
        products,
        invoices,
        rebate_earnings,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
