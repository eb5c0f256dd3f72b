//! Common types and utilities for cfn-typegen
//!
//! This crate contains the shared intermediate representation, error types,
//! and emitter configuration used across the schema, emitter, and CLI
//! components.

mod config;
mod ir;

pub use config::EmitterConfig;
pub use ir::{
    FieldConstraints, FieldDef, ModuleDef, ResourceTypeName, StructDef, TypeExpr, UpdateBehavior,
};

use thiserror::Error;

/// Errors that can occur during type generation
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Schema not found for resource type: {0}")]
    SchemaNotFound(String),

    #[error("Schema parse error: {0}")]
    SchemaParse(String),

    #[error("Emit error: {0}")]
    Emit(String),

    #[error("Name collision in module {module}: {name}")]
    NameCollision { module: String, name: String },

    #[error("Required field mismatch in module {module}: {field}")]
    RequiredFieldMismatch { module: String, field: String },

    #[error("Dangling type reference in module {module}: {reference}")]
    DanglingReference { module: String, reference: String },

    #[error("Type literal mismatch in module {module}: expected {expected}, found {found}")]
    TypeLiteralMismatch {
        module: String,
        expected: String,
        found: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, GeneratorError>;
