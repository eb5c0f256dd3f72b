//! Schema document loading
//!
//! Loads resource provider schema documents from files, and catalogues a
//! directory of them (a registry snapshot) keyed by resource type name.

use crate::convert::convert_schema_to_module;
use crate::types::ResourceSchema;
use cfn_typegen_common::{GeneratorError, ModuleDef, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Resource provider schema loader
///
/// # Example
/// ```rust,ignore
/// let loader = SchemaLoader::from_file("schemas/aws-s3-bucket.json")?;
/// let module = loader.parse()?;
/// ```
pub struct SchemaLoader {
    schema: ResourceSchema,
}

impl SchemaLoader {
    /// Load a schema document from a file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            GeneratorError::SchemaParse(format!(
                "Failed to read schema file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_json(&content)
    }

    /// Parse a schema document from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let schema: ResourceSchema = serde_json::from_str(json)
            .map_err(|e| GeneratorError::SchemaParse(format!("Failed to parse schema JSON: {}", e)))?;

        Ok(Self { schema })
    }

    /// Lower the schema into the module IR
    pub fn parse(&self) -> Result<ModuleDef> {
        convert_schema_to_module(&self.schema)
    }

    /// Get reference to the underlying schema document
    pub fn schema(&self) -> &ResourceSchema {
        &self.schema
    }
}

/// A directory of schema documents keyed by `typeName`
///
/// Iteration order is sorted by type name, so batch generation is
/// deterministic regardless of directory listing order.
pub struct SchemaCatalog {
    entries: BTreeMap<String, PathBuf>,
    skipped: usize,
}

/// Just enough of a schema document to read its key
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SchemaKey {
    type_name: String,
}

impl SchemaCatalog {
    /// Scan a directory (recursively) for schema documents
    ///
    /// Files that are not JSON, or whose `typeName` cannot be read, are
    /// counted as skipped rather than failing the whole scan.
    pub fn discover(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(GeneratorError::SchemaParse(format!(
                "Not a directory: {}",
                dir.display()
            )));
        }

        let mut entries = BTreeMap::new();
        let mut skipped = 0;
        walk_dir(dir, &mut entries, &mut skipped)?;

        Ok(Self { entries, skipped })
    }

    /// Look up a schema by canonical type name
    pub fn get(&self, type_name: &str) -> Result<SchemaLoader> {
        let path = self
            .entries
            .get(type_name)
            .ok_or_else(|| GeneratorError::SchemaNotFound(type_name.to_string()))?;
        SchemaLoader::from_file(path)
    }

    /// All catalogued type names, sorted
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Catalogued (type name, path) pairs, sorted by type name
    pub fn iter(&self) -> impl Iterator<Item = (&String, &PathBuf)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of files passed over during discovery
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

fn walk_dir(
    dir: &Path,
    entries: &mut BTreeMap<String, PathBuf>,
    skipped: &mut usize,
) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            walk_dir(&path, entries, skipped)?;
            continue;
        }

        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }

        match read_type_name(&path) {
            Some(type_name) => {
                entries.insert(type_name, path);
            }
            None => *skipped += 1,
        }
    }
    Ok(())
}

fn read_type_name(path: &Path) -> Option<String> {
    let content = fs::read_to_string(path).ok()?;
    let key: SchemaKey = serde_json::from_str(&content).ok()?;
    Some(key.type_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_minimal() {
        let loader = SchemaLoader::from_json(
            r#"{
                "typeName": "AWS::SNS::Topic",
                "properties": { "TopicName": { "type": "string" } }
            }"#,
        )
        .unwrap();
        assert_eq!(loader.schema().type_name, "AWS::SNS::Topic");

        let module = loader.parse().unwrap();
        assert_eq!(module.type_name.to_string(), "AWS::SNS::Topic");
    }

    #[test]
    fn test_from_json_malformed_is_parse_error() {
        let result = SchemaLoader::from_json("{ not json");
        assert!(matches!(result, Err(GeneratorError::SchemaParse(_))));
    }
}
