//! CloudFormation resource provider schema parsing
//!
//! This crate loads AWS CloudFormation resource provider schemas (JSON
//! Schema dialect, one document per resource type) and lowers them into the
//! intermediate representation (`ModuleDef`) consumed by the emitter.
//!
//! ## Lowering strategy
//!
//! A provider schema describes one resource: top-level `properties` become
//! the fields of the resource's `Properties` interface, and `definitions`
//! become Nested Structures declared in the same module. `$ref` targets that
//! are object-shaped stay references; refs to primitive aliases are inlined.
//! Properties listed under `readOnlyProperties` are attribute outputs, not
//! template inputs, so they are dropped from the emitted property bag.

mod convert;
mod loader;
mod types;
mod type_mapper;

pub use convert::convert_schema_to_module;
pub use loader::{SchemaCatalog, SchemaLoader};
pub use types::{AdditionalProperties, PropertySchema, ResourceSchema};
pub use type_mapper::TypeMapper;

use cfn_typegen_common::{ModuleDef, Result};
use std::path::Path;

/// Parse one resource provider schema file into a `ModuleDef`
///
/// # Arguments
/// * `path` - Path to the schema JSON document
///
/// # Returns
/// * `ModuleDef` - Intermediate representation of the output module
pub fn parse_schema_file<P: AsRef<Path>>(path: P) -> Result<ModuleDef> {
    let loader = SchemaLoader::from_file(path)?;
    loader.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_missing_file_is_error() {
        let result = parse_schema_file("/nonexistent/aws-s3-bucket.json");
        assert!(result.is_err());
    }
}
