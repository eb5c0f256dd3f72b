//! Documentation block rendering
//!
//! Formats schema metadata (description, constraints, update-behavior
//! classification) into the JSDoc blocks attached to each generated field.
//! Missing metadata renders a placeholder rather than failing the module.

use cfn_typegen_common::FieldDef;

/// Rendered when a schema node carries no description
pub const PLACEHOLDER: &str = "Property description not available";

/// Assemble the documentation lines for one field, in stable order:
/// description, required marker, declared type, constraints, allowed
/// values, update-impact classification.
pub fn field_doc_lines(field: &FieldDef, declared_type: &str) -> Vec<String> {
    let mut lines = Vec::new();

    match &field.description {
        Some(description) => lines.extend(description.lines().map(String::from)),
        None => lines.push(PLACEHOLDER.to_string()),
    }

    lines.push(String::new());
    lines.push(format!(
        "Required: {}",
        if field.required { "Yes" } else { "No" }
    ));
    lines.push(format!("Type: {}", declared_type));

    let c = &field.constraints;
    if let Some(min) = c.min_length {
        lines.push(format!("Minimum length: {}", min));
    }
    if let Some(max) = c.max_length {
        lines.push(format!("Maximum length: {}", max));
    }
    if let Some(min) = c.minimum {
        lines.push(format!("Minimum: {}", min));
    }
    if let Some(max) = c.maximum {
        lines.push(format!("Maximum: {}", max));
    }
    if let Some(pattern) = &c.pattern {
        lines.push(format!("Pattern: {}", pattern));
    }

    if let cfn_typegen_common::TypeExpr::StringEnum(values) = &field.ty {
        lines.push(format!("Allowed values: {}", values.join(" | ")));
    }

    lines.push(format!("Update requires: {}", field.update.label()));
    lines
}

/// Format lines into an indented JSDoc block (no trailing newline)
pub fn comment_block(lines: &[String], indent: usize) -> String {
    let pad = " ".repeat(indent);
    let mut out = format!("{}/**", pad);
    for line in lines {
        // A literal comment terminator inside a description would cut the
        // block short
        let line = line.replace("*/", "* /");
        if line.is_empty() {
            out.push_str(&format!("\n{} *", pad));
        } else {
            out.push_str(&format!("\n{} * {}", pad, line));
        }
    }
    out.push_str(&format!("\n{} */", pad));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfn_typegen_common::{FieldConstraints, TypeExpr, UpdateBehavior};

    fn field(description: Option<&str>) -> FieldDef {
        FieldDef {
            name: "BucketName".to_string(),
            ty: TypeExpr::String,
            required: true,
            description: description.map(String::from),
            constraints: FieldConstraints::default(),
            update: UpdateBehavior::Replacement,
        }
    }

    #[test]
    fn test_doc_lines_order() {
        let lines = field_doc_lines(&field(Some("A name for the bucket.")), "String");
        assert_eq!(
            lines,
            vec![
                "A name for the bucket.",
                "",
                "Required: Yes",
                "Type: String",
                "Update requires: Replacement",
            ]
        );
    }

    #[test]
    fn test_missing_description_renders_placeholder() {
        let lines = field_doc_lines(&field(None), "String");
        assert_eq!(lines[0], PLACEHOLDER);
    }

    #[test]
    fn test_constraints_and_allowed_values() {
        let mut f = field(Some("Access level."));
        f.ty = TypeExpr::StringEnum(vec!["Private".to_string(), "PublicRead".to_string()]);
        f.constraints = FieldConstraints {
            min_length: Some(1),
            max_length: Some(64),
            ..Default::default()
        };
        f.update = UpdateBehavior::NoInterruption;

        let lines = field_doc_lines(&f, "String");
        assert!(lines.contains(&"Minimum length: 1".to_string()));
        assert!(lines.contains(&"Maximum length: 64".to_string()));
        assert!(lines.contains(&"Allowed values: Private | PublicRead".to_string()));
        assert_eq!(lines.last().unwrap(), "Update requires: No interruption");
    }

    #[test]
    fn test_comment_block_formatting() {
        let block = comment_block(&["First".to_string(), String::new(), "Last".to_string()], 2);
        assert_eq!(block, "  /**\n   * First\n   *\n   * Last\n   */");
    }

    #[test]
    fn test_comment_terminator_is_defanged() {
        let block = comment_block(&["bad */ text".to_string()], 0);
        assert!(!block[..block.len() - 2].contains("*/"));
    }
}
