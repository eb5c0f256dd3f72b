//! Declaration ordering for Nested Structures
//!
//! Orders structures so each is declared before its first use. The cyclic
//! remainder (recursive schemas are legal) is emitted in original declared
//! order; TypeScript tolerates mutually referencing interfaces, so the
//! no-forward-reference rule is best-effort there.

use cfn_typegen_common::{StructDef, TypeExpr};
use std::collections::BTreeSet;

/// Sort structures dependencies-first, stably
///
/// Ties are broken by original position, so the output order is a pure
/// function of the input and regeneration stays byte-stable.
pub fn sort_structs(structs: Vec<StructDef>) -> Vec<StructDef> {
    let mut remaining = structs;
    let mut sorted: Vec<StructDef> = Vec::with_capacity(remaining.len());
    let mut declared: BTreeSet<String> = BTreeSet::new();

    while !remaining.is_empty() {
        let names: BTreeSet<String> = remaining.iter().map(|s| s.name.clone()).collect();

        // First (in original order) structure whose in-module dependencies
        // are all declared already; self-references don't count
        let next = remaining.iter().position(|s| {
            struct_refs(s)
                .iter()
                .all(|r| r == &s.name || declared.contains(r) || !names.contains(r))
        });

        // No candidate means everything left is part of a cycle
        let idx = next.unwrap_or(0);
        let def = remaining.remove(idx);
        declared.insert(def.name.clone());
        sorted.push(def);
    }

    sorted
}

/// All structure names referenced from a structure's fields
fn struct_refs(def: &StructDef) -> BTreeSet<String> {
    let mut refs = BTreeSet::new();
    for field in &def.fields {
        collect_refs(&field.ty, &mut refs);
    }
    refs
}

fn collect_refs(ty: &TypeExpr, refs: &mut BTreeSet<String>) {
    match ty {
        TypeExpr::Ref(name) => {
            refs.insert(name.clone());
        }
        TypeExpr::Array(inner) | TypeExpr::Record(inner) => collect_refs(inner, refs),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfn_typegen_common::{FieldConstraints, FieldDef, UpdateBehavior};

    fn field(name: &str, ty: TypeExpr) -> FieldDef {
        FieldDef {
            name: name.to_string(),
            ty,
            required: false,
            description: None,
            constraints: FieldConstraints::default(),
            update: UpdateBehavior::NoInterruption,
        }
    }

    fn def(name: &str, fields: Vec<FieldDef>) -> StructDef {
        StructDef {
            name: name.to_string(),
            description: None,
            fields,
        }
    }

    #[test]
    fn test_leaf_declared_before_user() {
        let structs = vec![
            def(
                "LifecycleConfiguration",
                vec![field(
                    "Rules",
                    TypeExpr::Array(Box::new(TypeExpr::Ref("Rule".to_string()))),
                )],
            ),
            def("Rule", vec![field("Id", TypeExpr::String)]),
        ];

        let sorted = sort_structs(structs);
        let names: Vec<&str> = sorted.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Rule", "LifecycleConfiguration"]);
    }

    #[test]
    fn test_independent_structs_keep_declared_order() {
        let structs = vec![
            def("B", vec![field("X", TypeExpr::String)]),
            def("A", vec![field("Y", TypeExpr::String)]),
        ];
        let sorted = sort_structs(structs);
        let names: Vec<&str> = sorted.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn test_self_reference_is_not_a_cycle() {
        let structs = vec![def(
            "Filter",
            vec![field(
                "And",
                TypeExpr::Array(Box::new(TypeExpr::Ref("Filter".to_string()))),
            )],
        )];
        let sorted = sort_structs(structs);
        assert_eq!(sorted.len(), 1);
    }

    #[test]
    fn test_cycle_falls_back_to_declared_order() {
        let structs = vec![
            def("A", vec![field("B", TypeExpr::Ref("B".to_string()))]),
            def("B", vec![field("A", TypeExpr::Ref("A".to_string()))]),
        ];
        let sorted = sort_structs(structs);
        let names: Vec<&str> = sorted.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn test_sort_is_deterministic() {
        let make = || {
            vec![
                def("C", vec![field("A", TypeExpr::Ref("A".to_string()))]),
                def("A", vec![field("B", TypeExpr::Ref("B".to_string()))]),
                def("B", vec![field("X", TypeExpr::String)]),
            ]
        };
        let first: Vec<String> = sort_structs(make()).into_iter().map(|s| s.name).collect();
        let second: Vec<String> = sort_structs(make()).into_iter().map(|s| s.name).collect();
        assert_eq!(first, vec!["B", "A", "C"]);
        assert_eq!(first, second);
    }
}
