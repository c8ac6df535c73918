//! Test utilities for the CSV engine
//!
//! Shared fixtures used across the engine test modules.

use crate::app::models::Record;

mod serializer_tests;
mod template_tests;

/// Header row with exactly the required asset columns
pub fn required_asset_headers() -> Vec<String> {
    strings(&["name", "tag", "category", "status"])
}

/// Full asset header row including the constrained optional columns
pub fn full_asset_headers() -> Vec<String> {
    strings(&[
        "name",
        "tag",
        "category",
        "status",
        "status_color",
        "qty",
        "purchase_cost",
    ])
}

/// A row matching [`full_asset_headers`] that passes validation
pub fn valid_full_asset_row() -> Vec<String> {
    strings(&["Laptop", "A-1", "Computers", "ready", "green", "2", "999.99"])
}

/// Convert string literals to owned strings
pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

/// A typical exported asset record
pub fn sample_asset_record() -> Record {
    Record::new()
        .with("name", "Dell XPS 13")
        .with("tag", "ASSET-0042")
        .with("category", "Laptops")
        .with("status", "deployed")
        .with("qty", 1)
        .with("purchase_cost", 1249.5)
}
