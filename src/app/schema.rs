//! Import schemas for each entity kind
//!
//! A schema is the ordered field list, the required subset and the value
//! constraints the import validator enforces. Schemas are built once and
//! shared as `&'static` references.

use crate::constants::{
    ASSET_FIELDS, ASSET_REQUIRED_FIELDS, DECIMAL_PATTERN, EMPLOYEE_FIELDS,
    EMPLOYEE_REQUIRED_FIELDS, INTEGER_PATTERN, asset_status, status_color,
};
use regex::Regex;
use std::sync::LazyLock;

static INTEGER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(INTEGER_PATTERN).expect("integer pattern is valid"));

static DECIMAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DECIMAL_PATTERN).expect("decimal pattern is valid"));

static ASSET_SCHEMA: LazyLock<Schema> = LazyLock::new(|| Schema {
    name: "asset",
    fields: ASSET_FIELDS,
    required: ASSET_REQUIRED_FIELDS,
    rules: vec![
        FieldRule::new("status", FieldConstraint::OneOf(asset_status::ALL)),
        FieldRule::new("status_color", FieldConstraint::OneOf(status_color::ALL)),
        FieldRule::new("qty", FieldConstraint::Integer),
        FieldRule::new("purchase_cost", FieldConstraint::Decimal),
    ],
});

static EMPLOYEE_SCHEMA: LazyLock<Schema> = LazyLock::new(|| Schema {
    name: "employee",
    fields: EMPLOYEE_FIELDS,
    required: EMPLOYEE_REQUIRED_FIELDS,
    rules: Vec::new(),
});

/// Schema for asset imports and templates
pub fn asset_schema() -> &'static Schema {
    &ASSET_SCHEMA
}

/// Schema for employee imports and templates
pub fn employee_schema() -> &'static Schema {
    &EMPLOYEE_SCHEMA
}

/// Value constraint applied to a non-empty cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldConstraint {
    /// Case-insensitive membership in a fixed set
    OneOf(&'static [&'static str]),
    /// Non-negative integer, no sign, no decimal point, fits in `i64`
    Integer,
    /// Non-negative integer or decimal, kept as written
    Decimal,
}

impl FieldConstraint {
    /// Check a trimmed, non-empty value
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            FieldConstraint::OneOf(allowed) => {
                allowed.iter().any(|option| option.eq_ignore_ascii_case(value))
            }
            FieldConstraint::Integer => {
                INTEGER_RE.is_match(value) && value.parse::<i64>().is_ok()
            }
            FieldConstraint::Decimal => DECIMAL_RE.is_match(value),
        }
    }

    /// Human-readable reason a value was rejected
    pub fn violation(&self, field: &str, value: &str) -> String {
        match self {
            FieldConstraint::OneOf(allowed) => format!(
                "Invalid {} '{}'. Valid options: {}",
                field,
                value,
                allowed.join(", ")
            ),
            FieldConstraint::Integer if INTEGER_RE.is_match(value) => format!(
                "Invalid {} '{}'. Must be at most {}",
                field,
                value,
                i64::MAX
            ),
            FieldConstraint::Integer => {
                format!("Invalid {} '{}'. Must be a whole number", field, value)
            }
            FieldConstraint::Decimal => {
                format!("Invalid {} '{}'. Must be a number", field, value)
            }
        }
    }
}

/// Constraint bound to a named field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub field: &'static str,
    pub constraint: FieldConstraint,
}

impl FieldRule {
    pub const fn new(field: &'static str, constraint: FieldConstraint) -> Self {
        Self { field, constraint }
    }
}

/// Ordered field list plus validation constraints for one entity kind
#[derive(Debug, Clone)]
pub struct Schema {
    pub name: &'static str,
    pub fields: &'static [&'static str],
    pub required: &'static [&'static str],
    pub rules: Vec<FieldRule>,
}

impl Schema {
    pub fn rule_for(&self, field: &str) -> Option<&FieldRule> {
        self.rules.iter().find(|rule| rule.field == field)
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.fields.contains(&field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_constraint() {
        let constraint = FieldConstraint::Integer;
        assert!(constraint.accepts("0"));
        assert!(constraint.accepts("42"));
        assert!(!constraint.accepts("3.5"));
        assert!(!constraint.accepts("-1"));
        assert!(!constraint.accepts("+1"));
        assert!(!constraint.accepts("1e3"));
        // Non-ASCII digits are not numbers here
        assert!(!constraint.accepts("\u{0663}"));
    }

    #[test]
    fn test_integer_constraint_rejects_overflow() {
        let constraint = FieldConstraint::Integer;
        assert!(constraint.accepts("9223372036854775807"));
        assert!(!constraint.accepts("9223372036854775808"));
        assert_eq!(
            constraint.violation("qty", "12345678901234567891"),
            "Invalid qty '12345678901234567891'. Must be at most 9223372036854775807"
        );
        assert_eq!(
            constraint.violation("qty", "3.5"),
            "Invalid qty '3.5'. Must be a whole number"
        );
    }

    #[test]
    fn test_decimal_constraint() {
        let constraint = FieldConstraint::Decimal;
        assert!(constraint.accepts("12"));
        assert!(constraint.accepts("12.50"));
        assert!(!constraint.accepts("12."));
        assert!(!constraint.accepts(".5"));
        assert!(!constraint.accepts("abc"));
        assert!(!constraint.accepts("1,000"));
    }

    #[test]
    fn test_one_of_is_case_insensitive() {
        let constraint = FieldConstraint::OneOf(status_color::ALL);
        assert!(constraint.accepts("GREEN"));
        assert!(constraint.accepts("Yellow"));
        assert!(!constraint.accepts("blue"));
        assert_eq!(
            constraint.violation("status_color", "blue"),
            "Invalid status_color 'blue'. Valid options: green, yellow, red"
        );
    }

    #[test]
    fn test_asset_schema_shape() {
        let schema = asset_schema();
        assert_eq!(schema.required, &["name", "tag", "category", "status"]);
        assert_eq!(
            schema.rule_for("qty").map(|rule| rule.constraint),
            Some(FieldConstraint::Integer)
        );
        assert_eq!(
            schema.rule_for("purchase_cost").map(|rule| rule.constraint),
            Some(FieldConstraint::Decimal)
        );
        assert!(schema.rule_for("notes").is_none());
    }

    #[test]
    fn test_employee_schema_has_no_value_rules() {
        let schema = employee_schema();
        assert!(schema.rules.is_empty());
        assert_eq!(schema.required, &["name", "email"]);
        assert!(schema.has_field("department"));
    }
}
