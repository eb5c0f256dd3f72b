//! Type expression and module view rendering
//!
//! Turns the IR into the string forms the templates consume: TypeScript
//! type expressions, field signatures, and fully formatted documentation
//! blocks.

use crate::docs;
use crate::order::sort_structs;
use cfn_typegen_common::{EmitterConfig, FieldDef, ModuleDef, StructDef, TypeExpr};
use serde::Serialize;

/// Render a type expression to TypeScript
///
/// Primitive and enum leaves are unioned with `Intrinsic`: any property may
/// be supplied as an intrinsic function call instead of a literal. This is
/// a fixed policy, not schema-driven.
pub fn render_type(ty: &TypeExpr) -> String {
    match ty {
        TypeExpr::String => "string | Intrinsic".to_string(),
        TypeExpr::Number => "number | Intrinsic".to_string(),
        TypeExpr::Boolean => "boolean | Intrinsic".to_string(),
        TypeExpr::Json => "Record<string, unknown> | Intrinsic".to_string(),
        TypeExpr::StringEnum(values) => {
            let literals: Vec<String> = values.iter().map(|v| format!("\"{}\"", v)).collect();
            format!("{} | Intrinsic", literals.join(" | "))
        }
        TypeExpr::Array(inner) => {
            let inner = render_type(inner);
            if inner.contains(" | ") {
                format!("({})[]", inner)
            } else {
                format!("{}[]", inner)
            }
        }
        TypeExpr::Record(inner) => format!("Record<string, {}>", render_type(inner)),
        TypeExpr::Ref(name) => name.clone(),
    }
}

/// Short declared-type name used in documentation blocks
/// e.g., `Array(Ref("Tag"))` -> "List of Tag"
pub fn declared_type(ty: &TypeExpr) -> String {
    match ty {
        TypeExpr::String | TypeExpr::StringEnum(_) => "String".to_string(),
        TypeExpr::Number => "Number".to_string(),
        TypeExpr::Boolean => "Boolean".to_string(),
        TypeExpr::Json => "Json".to_string(),
        TypeExpr::Array(inner) => format!("List of {}", declared_type(inner)),
        TypeExpr::Record(inner) => format!("Map of {}", declared_type(inner)),
        TypeExpr::Ref(name) => name.clone(),
    }
}

/// Template view of one output module
#[derive(Debug, Serialize)]
pub struct ModuleView {
    pub canonical: String,
    pub interface_name: String,
    pub properties_name: String,
    pub intrinsic_import: String,
    pub attributes_import: String,
    pub properties_doc: String,
    pub structs: Vec<StructView>,
    pub properties: Vec<FieldView>,
}

/// Template view of one declared structure
#[derive(Debug, Serialize)]
pub struct StructView {
    pub name: String,
    pub doc: String,
    pub fields: Vec<FieldView>,
}

/// Template view of one field: a formatted doc block plus its signature
#[derive(Debug, Serialize)]
pub struct FieldView {
    pub doc: String,
    pub signature: String,
}

/// Build the template view for a module
///
/// Nested structures are declaration-ordered here (leaves first); the
/// template emits them verbatim, then `Properties`, then the top-level
/// resource interface.
pub fn build_view(module: &ModuleDef, config: &EmitterConfig) -> ModuleView {
    let interface_name = format!("{}{}", module.type_name.service, module.type_name.resource);
    let properties_name = format!("{}Properties", interface_name);

    let structs = sort_structs(module.structs.clone())
        .into_iter()
        .map(struct_view)
        .collect();

    let properties_doc = docs::comment_block(
        &[module
            .description
            .clone()
            .unwrap_or_else(|| format!("Properties of {}", module.type_name))],
        0,
    );

    ModuleView {
        canonical: module.type_name.to_string(),
        interface_name,
        properties_name,
        intrinsic_import: config.intrinsic_import.clone(),
        attributes_import: config.attributes_import.clone(),
        properties_doc,
        structs,
        properties: module.properties.iter().map(field_view).collect(),
    }
}

fn struct_view(def: StructDef) -> StructView {
    let doc = docs::comment_block(
        &[def
            .description
            .clone()
            .unwrap_or_else(|| docs::PLACEHOLDER.to_string())],
        0,
    );

    StructView {
        fields: def.fields.iter().map(field_view).collect(),
        name: def.name,
        doc,
    }
}

fn field_view(field: &FieldDef) -> FieldView {
    let doc = docs::comment_block(&docs::field_doc_lines(field, &declared_type(&field.ty)), 2);
    let optional = if field.required { "" } else { "?" };
    let signature = format!("{}{}: {};", field.name, optional, render_type(&field.ty));
    FieldView { doc, signature }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_primitives_union_intrinsic() {
        assert_eq!(render_type(&TypeExpr::String), "string | Intrinsic");
        assert_eq!(render_type(&TypeExpr::Number), "number | Intrinsic");
        assert_eq!(render_type(&TypeExpr::Boolean), "boolean | Intrinsic");
    }

    #[test]
    fn test_render_enum_union() {
        let ty = TypeExpr::StringEnum(vec!["A".to_string(), "B".to_string()]);
        assert_eq!(render_type(&ty), "\"A\" | \"B\" | Intrinsic");
    }

    #[test]
    fn test_render_array_parenthesizes_unions() {
        assert_eq!(
            render_type(&TypeExpr::Array(Box::new(TypeExpr::String))),
            "(string | Intrinsic)[]"
        );
        assert_eq!(
            render_type(&TypeExpr::Array(Box::new(TypeExpr::Ref("Tag".to_string())))),
            "Tag[]"
        );
    }

    #[test]
    fn test_render_record() {
        assert_eq!(
            render_type(&TypeExpr::Record(Box::new(TypeExpr::String))),
            "Record<string, string | Intrinsic>"
        );
    }

    #[test]
    fn test_declared_type() {
        assert_eq!(
            declared_type(&TypeExpr::Array(Box::new(TypeExpr::Ref("Tag".to_string())))),
            "List of Tag"
        );
        assert_eq!(
            declared_type(&TypeExpr::StringEnum(vec!["A".to_string()])),
            "String"
        );
    }
}
