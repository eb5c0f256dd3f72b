//! Post-lowering consistency checking
//!
//! Runs after a module is lowered and before anything is written. A
//! violation here is a generation bug or a broken schema, never a
//! target-language type error, so it blocks output for the module.

use cfn_typegen_common::{GeneratorError, ModuleDef, Result, TypeExpr};
use std::collections::BTreeSet;

/// Facts taken from the source schema document, carried alongside the
/// lowered module so the checker can compare against the original
#[derive(Debug, Clone)]
pub struct SourceFacts {
    /// Canonical resource type string from the schema's `typeName`
    pub canonical_type: String,
    /// Schema `required` list for top-level properties
    pub required: Vec<String>,
}

/// Verify a lowered module against its source schema
///
/// Checks, in order: structure names are unique, every structure reference
/// resolves within the module, required/optional markers match the schema,
/// and the `Type` literal matches the canonical type name.
pub fn check_module(module: &ModuleDef, facts: &SourceFacts) -> Result<()> {
    let module_name = module.type_name.to_string();

    let mut names: BTreeSet<&str> = BTreeSet::new();
    for def in &module.structs {
        if !names.insert(&def.name) {
            return Err(GeneratorError::NameCollision {
                module: module_name,
                name: def.name.clone(),
            });
        }
    }

    let mut references: BTreeSet<&str> = BTreeSet::new();
    for def in &module.structs {
        for field in &def.fields {
            collect_refs(&field.ty, &mut references);
        }
    }
    for field in &module.properties {
        collect_refs(&field.ty, &mut references);
    }
    for reference in references {
        if !names.contains(reference) {
            return Err(GeneratorError::DanglingReference {
                module: module_name,
                reference: reference.to_string(),
            });
        }
    }

    // Required fields in the schema must be non-optional in the emitted
    // type, and nothing may be promoted to required that the schema does
    // not list. Read-only properties never reach the module, so a required
    // name with no emitted counterpart is left to the schema author.
    for field in &module.properties {
        let schema_required = facts.required.iter().any(|r| r == &field.name);
        if schema_required != field.required {
            return Err(GeneratorError::RequiredFieldMismatch {
                module: module_name,
                field: field.name.clone(),
            });
        }
    }

    if module_name != facts.canonical_type {
        return Err(GeneratorError::TypeLiteralMismatch {
            module: module_name.clone(),
            expected: facts.canonical_type.clone(),
            found: module_name,
        });
    }

    Ok(())
}

fn collect_refs<'a>(ty: &'a TypeExpr, refs: &mut BTreeSet<&'a str>) {
    match ty {
        TypeExpr::Ref(name) => {
            refs.insert(name);
        }
        TypeExpr::Array(inner) | TypeExpr::Record(inner) => collect_refs(inner, refs),
        _ => {}
    }
}
