//! Bulk-import templates
//!
//! Each template is the schema's header row plus one illustrative example
//! row. Output only changes when [`TEMPLATE_SCHEMA_VERSION`] is bumped.

use super::serializer::serialize;
use crate::app::models::{EntityKind, Record};
use crate::constants::{ASSET_TEMPLATE_EXAMPLE, EMPLOYEE_TEMPLATE_EXAMPLE, TEMPLATE_SCHEMA_VERSION};
use tracing::debug;

/// Template CSV text for an entity kind
pub fn generate_template(kind: EntityKind) -> String {
    let schema = kind.schema();
    let example = match kind {
        EntityKind::Asset => ASSET_TEMPLATE_EXAMPLE,
        EntityKind::Employee => EMPLOYEE_TEMPLATE_EXAMPLE,
    };

    let record: Record = schema
        .fields
        .iter()
        .zip(example.iter())
        .map(|(field, value)| (*field, *value))
        .collect();

    debug!(
        "Generated {} template v{} with {} columns",
        kind,
        TEMPLATE_SCHEMA_VERSION,
        record.len()
    );

    serialize(&[record])
}

/// Download base name for a kind's template
pub fn template_base_name(kind: EntityKind) -> String {
    format!("{}-import-template", kind.as_str())
}
