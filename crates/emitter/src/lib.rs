//! TypeScript module emission for cfn-typegen
//!
//! This crate turns lowered modules (`ModuleDef`) into the generated
//! catalogue: one declaration module per resource type under
//! `cf/<service>/<service>-<resource>.ts`, plus the shared intrinsic and
//! attributes support modules and one barrel `index.ts` per service.
//!
//! Every module is checked for internal consistency before anything is
//! written; a failing module produces no file.

mod check;
mod docs;
mod order;
mod render;
mod templates;

pub use check::{check_module, SourceFacts};
pub use docs::PLACEHOLDER;
pub use render::{declared_type, render_type};

use cfn_typegen_common::{EmitterConfig, GeneratorError, ModuleDef, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tera::Tera;

/// Module emitter
///
/// Holds the emitter configuration and loaded templates; one instance can
/// emit any number of modules.
pub struct ModuleEmitter {
    config: EmitterConfig,
    tera: Tera,
}

impl ModuleEmitter {
    /// Create an emitter with the given configuration
    pub fn new(config: EmitterConfig) -> Result<Self> {
        let tera = templates::load_templates()?;
        Ok(Self { config, tera })
    }

    /// Emit one module below `out_dir`, returning the written path
    ///
    /// The module is consistency-checked against its source facts first;
    /// violations block the write.
    pub fn emit_module(
        &self,
        module: &ModuleDef,
        facts: &SourceFacts,
        out_dir: &Path,
    ) -> Result<PathBuf> {
        check::check_module(module, facts)?;

        let view = render::build_view(module, &self.config);
        let mut context = tera::Context::new();
        context.insert("canonical", &view.canonical);
        context.insert("interface_name", &view.interface_name);
        context.insert("properties_name", &view.properties_name);
        context.insert("intrinsic_import", &view.intrinsic_import);
        context.insert("attributes_import", &view.attributes_import);
        context.insert("properties_doc", &view.properties_doc);
        context.insert("structs", &view.structs);
        context.insert("properties", &view.properties);

        let rendered = self
            .tera
            .render("module.ts", &context)
            .map_err(|e| GeneratorError::Emit(format!("Template error: {}", e)))?;

        let service_dir = self.service_dir(out_dir, &module.type_name.service_dir());
        fs::create_dir_all(&service_dir).map_err(|e| {
            GeneratorError::Emit(format!(
                "Failed to create service directory {}: {}",
                service_dir.display(),
                e
            ))
        })?;

        let output_path = service_dir.join(format!("{}.ts", module.type_name.module_stem()));
        fs::write(&output_path, rendered).map_err(|e| {
            GeneratorError::Emit(format!(
                "Failed to write module {}: {}",
                output_path.display(),
                e
            ))
        })?;

        Ok(output_path)
    }

    /// Write the shared `intrinsic` and `attributes` support modules
    pub fn emit_support_modules(&self, out_dir: &Path) -> Result<()> {
        if !self.config.emit_support_modules {
            return Ok(());
        }

        for (template, dir) in [("intrinsic.ts", "intrinsic"), ("attributes.ts", "attributes")] {
            let rendered = self
                .tera
                .render(template, &tera::Context::new())
                .map_err(|e| GeneratorError::Emit(format!("Template error: {}", e)))?;

            let target_dir = out_dir.join(&self.config.out_root).join(dir);
            fs::create_dir_all(&target_dir).map_err(|e| {
                GeneratorError::Emit(format!(
                    "Failed to create directory {}: {}",
                    target_dir.display(),
                    e
                ))
            })?;

            let output_path = target_dir.join("index.ts");
            fs::write(&output_path, rendered).map_err(|e| {
                GeneratorError::Emit(format!(
                    "Failed to write {}: {}",
                    output_path.display(),
                    e
                ))
            })?;
        }

        Ok(())
    }

    /// Write one barrel `index.ts` per service, re-exporting its modules
    pub fn emit_service_indexes(&self, modules: &[&ModuleDef], out_dir: &Path) -> Result<()> {
        let mut by_service: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for module in modules {
            by_service
                .entry(module.type_name.service_dir())
                .or_default()
                .push(module.type_name.module_stem());
        }

        for (service, mut stems) in by_service {
            stems.sort();

            let mut context = tera::Context::new();
            context.insert("service", &service);
            context.insert("stems", &stems);

            let rendered = self
                .tera
                .render("service_index.ts", &context)
                .map_err(|e| GeneratorError::Emit(format!("Template error: {}", e)))?;

            let service_dir = self.service_dir(out_dir, &service);
            fs::create_dir_all(&service_dir).map_err(|e| {
                GeneratorError::Emit(format!(
                    "Failed to create service directory {}: {}",
                    service_dir.display(),
                    e
                ))
            })?;

            let output_path = service_dir.join("index.ts");
            fs::write(&output_path, rendered).map_err(|e| {
                GeneratorError::Emit(format!(
                    "Failed to write {}: {}",
                    output_path.display(),
                    e
                ))
            })?;
        }

        Ok(())
    }

    fn service_dir(&self, out_dir: &Path, service: &str) -> PathBuf {
        out_dir.join(&self.config.out_root).join(service)
    }
}

/// Emit one module with the default configuration (convenience function)
pub fn emit_module(module: &ModuleDef, facts: &SourceFacts, out_dir: &Path) -> Result<PathBuf> {
    let emitter = ModuleEmitter::new(EmitterConfig::default())?;
    emitter.emit_module(module, facts, out_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emitter_creation() {
        let result = ModuleEmitter::new(EmitterConfig::default());
        assert!(result.is_ok());
    }
}
