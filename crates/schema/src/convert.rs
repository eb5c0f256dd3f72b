//! Lowers a resource provider schema into the module IR

use crate::type_mapper::TypeMapper;
use crate::types::{pointer_property_name, ResourceSchema};
use cfn_typegen_common::{FieldDef, ModuleDef, ResourceTypeName, Result, StructDef, UpdateBehavior};
use std::collections::BTreeSet;

/// Convert a parsed schema document into a `ModuleDef`
///
/// Declared definitions keep their names and declared order; structures
/// synthesized for inline object nodes follow. Read-only properties are
/// provider outputs and never appear in the emitted property bag.
pub fn convert_schema_to_module(schema: &ResourceSchema) -> Result<ModuleDef> {
    let type_name = ResourceTypeName::parse(&schema.type_name)?;

    let mut mapper = TypeMapper::new(&schema.definitions, &type_name.resource);

    // The top-level interface names are minted by the emitter; reserve them
    // so no nested structure can collide with them
    let interface = format!("{}{}", type_name.service, type_name.resource);
    mapper.reserve(&interface);
    mapper.reserve(&format!("{}Properties", interface));

    let mut structs = Vec::new();
    for (name, def) in &schema.definitions {
        if def.has_members() {
            structs.push(StructDef {
                name: name.clone(),
                description: def.description.clone(),
                fields: mapper.convert_members(def),
            });
        }
    }

    let create_only = pointer_set(&schema.create_only_properties);
    let conditional = pointer_set(&schema.conditional_create_only_properties);
    let read_only = pointer_set(&schema.read_only_properties);

    let mut properties = Vec::new();
    for (name, node) in &schema.properties {
        if read_only.contains(name.as_str()) {
            continue;
        }

        let update = if create_only.contains(name.as_str()) {
            UpdateBehavior::Replacement
        } else if conditional.contains(name.as_str()) {
            UpdateBehavior::SomeInterruption
        } else {
            UpdateBehavior::NoInterruption
        };

        properties.push(FieldDef {
            ty: mapper.map_type(node, name),
            name: name.clone(),
            required: schema.required.iter().any(|r| r == name),
            description: node.description.clone(),
            constraints: TypeMapper::constraints(node),
            update,
        });
    }

    structs.extend(mapper.into_synthesized());

    Ok(ModuleDef {
        type_name,
        description: schema.description.clone(),
        structs,
        properties,
    })
}

/// Collect the top-level property names named by a pointer list
fn pointer_set(pointers: &[String]) -> BTreeSet<&str> {
    pointers
        .iter()
        .filter_map(|p| pointer_property_name(p))
        .collect()
}
