//! Application constants for asset CSV processing
//!
//! This module contains field lists, allowed values, template defaults
//! and file naming conventions used throughout the crate.

// =============================================================================
// Asset Schema
// =============================================================================

/// Asset fields in canonical column order
pub const ASSET_FIELDS: &[&str] = &[
    "name",
    "tag",
    "category",
    "status",
    "status_color",
    "serial",
    "model",
    "manufacturer",
    "location",
    "assigned_to",
    "purchase_date",
    "purchase_cost",
    "qty",
    "notes",
];

/// Asset fields that must be present and non-empty on import
pub const ASSET_REQUIRED_FIELDS: &[&str] = &["name", "tag", "category", "status"];

/// Asset lifecycle states
pub mod asset_status {
    pub const READY: &str = "ready";
    pub const DEPLOYED: &str = "deployed";
    pub const PENDING: &str = "pending";
    pub const MAINTENANCE: &str = "maintenance";
    pub const BROKEN: &str = "broken";
    pub const LOST: &str = "lost";
    pub const ARCHIVED: &str = "archived";

    /// All accepted status values, in the order shown to users
    pub const ALL: &[&str] = &[READY, DEPLOYED, PENDING, MAINTENANCE, BROKEN, LOST, ARCHIVED];
}

/// Traffic-light colours attached to a status label
pub mod status_color {
    pub const GREEN: &str = "green";
    pub const YELLOW: &str = "yellow";
    pub const RED: &str = "red";

    pub const ALL: &[&str] = &[GREEN, YELLOW, RED];
}

/// Non-negative integer, ASCII digits only
pub const INTEGER_PATTERN: &str = r"^[0-9]+$";

/// Non-negative integer or decimal, ASCII digits only
pub const DECIMAL_PATTERN: &str = r"^[0-9]+(\.[0-9]+)?$";

// =============================================================================
// Employee Schema
// =============================================================================

/// Employee fields in canonical column order
pub const EMPLOYEE_FIELDS: &[&str] = &[
    "name",
    "email",
    "department",
    "job_title",
    "phone",
    "location",
];

/// Employee fields that must be present and non-empty on import
pub const EMPLOYEE_REQUIRED_FIELDS: &[&str] = &["name", "email"];

// =============================================================================
// Import Templates
// =============================================================================

/// Bumped whenever a template header or example row changes
pub const TEMPLATE_SCHEMA_VERSION: u32 = 1;

/// Example row for the asset import template, aligned with [`ASSET_FIELDS`]
pub const ASSET_TEMPLATE_EXAMPLE: &[&str] = &[
    "MacBook Pro 14",
    "ASSET-0001",
    "Laptops",
    asset_status::READY,
    status_color::GREEN,
    "C02XK0AAJGH5",
    "MBP14-M3",
    "Apple",
    "HQ Floor 2",
    "",
    "2024-01-15",
    "1999.00",
    "1",
    "",
];

/// Example row for the employee import template, aligned with [`EMPLOYEE_FIELDS`]
pub const EMPLOYEE_TEMPLATE_EXAMPLE: &[&str] = &[
    "Jane Doe",
    "jane.doe@example.com",
    "Engineering",
    "Software Engineer",
    "",
    "HQ",
];

// =============================================================================
// Files and Storage
// =============================================================================

/// Date format appended to download file names
pub const DOWNLOAD_DATE_FORMAT: &str = "%Y-%m-%d";

/// Extension for every generated download
pub const CSV_EXTENSION: &str = "csv";

/// Default base name for asset exports
pub const ASSET_EXPORT_BASE: &str = "assets";

/// Default base name for employee exports
pub const EMPLOYEE_EXPORT_BASE: &str = "employees";

/// Application directory name under the platform data/config dirs
pub const APP_DIR_NAME: &str = "asset-csv";

/// Default store file name
pub const STORE_FILE_NAME: &str = "store.json";

/// Default config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable overriding the store path
pub const ENV_STORE_PATH: &str = "ASSET_CSV_STORE";

/// Environment variable overriding the download directory
pub const ENV_OUTPUT_DIR: &str = "ASSET_CSV_OUTPUT_DIR";
