//! Template loading and management

use cfn_typegen_common::{GeneratorError, Result};
use tera::Tera;

/// Load all templates
pub fn load_templates() -> Result<Tera> {
    let mut tera = Tera::default();

    tera.add_raw_template("module.ts", include_str!("../templates/module.ts.tera"))
        .map_err(|e| {
            GeneratorError::Emit(format!("Failed to load module.ts template: {}", e))
        })?;

    tera.add_raw_template("intrinsic.ts", include_str!("../templates/intrinsic.ts.tera"))
        .map_err(|e| {
            GeneratorError::Emit(format!("Failed to load intrinsic.ts template: {}", e))
        })?;

    tera.add_raw_template(
        "attributes.ts",
        include_str!("../templates/attributes.ts.tera"),
    )
    .map_err(|e| {
        GeneratorError::Emit(format!("Failed to load attributes.ts template: {}", e))
    })?;

    tera.add_raw_template(
        "service_index.ts",
        include_str!("../templates/service_index.ts.tera"),
    )
    .map_err(|e| {
        GeneratorError::Emit(format!("Failed to load service_index.ts template: {}", e))
    })?;

    Ok(tera)
}
