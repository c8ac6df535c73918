//! Tests for import template generation

use super::super::reader::parse_csv;
use super::super::template::{generate_template, template_base_name};
use super::super::validator::validate_parsed;
use crate::app::models::EntityKind;

#[test]
fn test_asset_template_content() {
    let template = generate_template(EntityKind::Asset);

    assert_eq!(
        template,
        "name,tag,category,status,status_color,serial,model,manufacturer,location,\
         assigned_to,purchase_date,purchase_cost,qty,notes\n\
         MacBook Pro 14,ASSET-0001,Laptops,ready,green,C02XK0AAJGH5,MBP14-M3,Apple,\
         HQ Floor 2,,2024-01-15,1999.00,1,"
    );
}

#[test]
fn test_employee_template_content() {
    let template = generate_template(EntityKind::Employee);

    assert_eq!(
        template,
        "name,email,department,job_title,phone,location\n\
         Jane Doe,jane.doe@example.com,Engineering,Software Engineer,,HQ"
    );
}

#[test]
fn test_template_is_stable() {
    assert_eq!(
        generate_template(EntityKind::Asset),
        generate_template(EntityKind::Asset)
    );
}

#[test]
fn test_templates_pass_their_own_validation() {
    for kind in [EntityKind::Asset, EntityKind::Employee] {
        let parsed = parse_csv(&generate_template(kind)).unwrap();
        let result = validate_parsed(kind, &parsed);

        assert!(result.valid, "{} template errors: {:?}", kind, result.errors);
        assert_eq!(parsed.headers.len(), kind.schema().fields.len());
    }
}

#[test]
fn test_template_base_name() {
    assert_eq!(template_base_name(EntityKind::Asset), "asset-import-template");
    assert_eq!(
        template_base_name(EntityKind::Employee),
        "employee-import-template"
    );
}
