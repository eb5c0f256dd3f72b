//! Type mapping from schema nodes to the intermediate representation
//!
//! Maps resource provider schema constructs to our `TypeExpr` IR. Mapping is
//! deterministic: an unchanged schema node always lowers to the identical
//! type expression, so regeneration stays diff-stable.

use crate::types::PropertySchema;
use cfn_typegen_common::{FieldConstraints, FieldDef, StructDef, TypeExpr, UpdateBehavior};
use indexmap::IndexMap;
use std::collections::BTreeSet;

/// Maps schema nodes to `TypeExpr`, synthesizing Nested Structures for
/// inline object nodes as it goes
///
/// One mapper instance covers one output module; nothing is shared across
/// modules, which is what keeps every emitted file self-contained.
pub struct TypeMapper<'a> {
    definitions: &'a IndexMap<String, PropertySchema>,
    resource_name: &'a str,
    synthesized: IndexMap<String, StructDef>,
    reserved: BTreeSet<String>,
    visiting: Vec<String>,
}

impl<'a> TypeMapper<'a> {
    /// Create a mapper for one module
    ///
    /// Definition names that will become declared structures are reserved up
    /// front so synthesized inline structures cannot shadow them.
    pub fn new(definitions: &'a IndexMap<String, PropertySchema>, resource_name: &'a str) -> Self {
        let reserved = definitions
            .iter()
            .filter(|(_, def)| def.has_members())
            .map(|(name, _)| name.clone())
            .collect();

        Self {
            definitions,
            resource_name,
            synthesized: IndexMap::new(),
            reserved,
            visiting: Vec::new(),
        }
    }

    /// Reserve a type name so no synthesized structure can claim it
    pub fn reserve(&mut self, name: &str) {
        self.reserved.insert(name.to_string());
    }

    /// Map a schema node to a type expression
    ///
    /// `hint` names the node's position (usually the property name) and
    /// seeds the name of any structure synthesized for an inline object.
    pub fn map_type(&mut self, node: &PropertySchema, hint: &str) -> TypeExpr {
        // $ref to a declared structure stays a reference; refs to primitive
        // aliases (e.g. a named string with a pattern) are inlined
        if let Some(name) = node.ref_name() {
            return match self.definitions.get(name) {
                Some(def) if def.has_members() => TypeExpr::Ref(name.to_string()),
                Some(def) => {
                    if self.visiting.iter().any(|v| v == name) {
                        // Ref cycle through primitive aliases; give up on inlining
                        return TypeExpr::Json;
                    }
                    self.visiting.push(name.to_string());
                    let def = def.clone();
                    let expr = self.map_type(&def, name);
                    self.visiting.pop();
                    expr
                }
                // Dangling target: keep the reference so the consistency
                // checker reports it against this module
                None => TypeExpr::Ref(name.to_string()),
            };
        }

        if let Some(expr) = string_enum(node) {
            return expr;
        }

        match node.ty.as_deref() {
            Some("string") => TypeExpr::String,
            Some("integer") | Some("number") => TypeExpr::Number,
            Some("boolean") => TypeExpr::Boolean,
            Some("array") => match &node.items {
                Some(items) => TypeExpr::Array(Box::new(self.map_type(items, &singular(hint)))),
                None => TypeExpr::Array(Box::new(TypeExpr::Json)),
            },
            Some("object") => {
                if let Some(value) = node.map_value_schema() {
                    return TypeExpr::Record(Box::new(self.map_type(value, hint)));
                }
                if node.has_members() {
                    let name = self.synthesize_struct(node, hint);
                    return TypeExpr::Ref(name);
                }
                TypeExpr::Json
            }
            _ => TypeExpr::Json,
        }
    }

    /// Convert an object node's members to field definitions
    ///
    /// Used for declared definitions and synthesized inline structures
    /// alike; nested-structure fields always classify as no-interruption
    /// (update impact is tracked per top-level property only).
    pub fn convert_members(&mut self, node: &PropertySchema) -> Vec<FieldDef> {
        node.properties
            .iter()
            .map(|(name, member)| {
                FieldDef {
                    ty: self.map_type(member, name),
                    name: name.clone(),
                    required: node.required.iter().any(|r| r == name),
                    description: member.description.clone(),
                    constraints: Self::constraints(member),
                    update: UpdateBehavior::NoInterruption,
                }
            })
            .collect()
    }

    /// Extract length/range/pattern constraints from a node
    pub fn constraints(node: &PropertySchema) -> FieldConstraints {
        FieldConstraints {
            min_length: node.min_length,
            max_length: node.max_length,
            minimum: node.minimum,
            maximum: node.maximum,
            pattern: node.pattern.clone(),
        }
    }

    /// Consume the mapper, returning synthesized structures in
    /// dependencies-first discovery order
    pub fn into_synthesized(self) -> Vec<StructDef> {
        self.synthesized.into_values().collect()
    }

    /// Register an inline object node as a Nested Structure and return the
    /// name it was declared under
    fn synthesize_struct(&mut self, node: &PropertySchema, hint: &str) -> String {
        let fields = self.convert_members(node);
        let candidate = pascal(hint);

        // Identical re-occurrence of the same inline shape reuses the
        // existing declaration instead of minting a duplicate
        if let Some(existing) = self.synthesized.get(&candidate) {
            if existing.fields == fields {
                return candidate;
            }
        }

        let name = self.disambiguate(candidate, &fields);
        self.synthesized.insert(
            name.clone(),
            StructDef {
                name: name.clone(),
                description: node.description.clone(),
                fields,
            },
        );
        name
    }

    /// Pick a free name, qualifying with the resource name on collision
    fn disambiguate(&self, candidate: String, fields: &[FieldDef]) -> String {
        if !self.is_taken(&candidate) {
            return candidate;
        }

        let qualified = format!("{}{}", self.resource_name, candidate);
        if let Some(existing) = self.synthesized.get(&qualified) {
            if existing.fields == fields {
                return qualified;
            }
        }
        if !self.is_taken(&qualified) {
            return qualified;
        }

        // Last resort for repeated collisions: stable numeric suffix
        let mut n = 2;
        loop {
            let name = format!("{}{}", qualified, n);
            if !self.is_taken(&name) {
                return name;
            }
            n += 1;
        }
    }

    fn is_taken(&self, name: &str) -> bool {
        self.reserved.contains(name) || self.synthesized.contains_key(name)
    }
}

/// Lower a string `enum` to a union of literals
///
/// Numeric enums carry no extra type information for the target language,
/// so they fall through to plain primitive mapping.
fn string_enum(node: &PropertySchema) -> Option<TypeExpr> {
    if node.enum_values.is_empty() {
        return None;
    }
    let literals: Option<Vec<String>> = node
        .enum_values
        .iter()
        .map(|v| v.as_str().map(String::from))
        .collect();
    literals.map(TypeExpr::StringEnum)
}

/// Uppercase the first character (property names are already PascalCase)
fn pascal(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Strip a plural "s" so an array property hints a singular item name
/// e.g., "Tags" -> "Tag"
fn singular(s: &str) -> String {
    if s.len() > 1 && s.ends_with('s') && !s.ends_with("ss") {
        s[..s.len() - 1].to_string()
    } else {
        s.to_string()
    }
}
