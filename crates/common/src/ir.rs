//! Intermediate representation for generated declaration modules
//!
//! The schema crate lowers CloudFormation resource provider schemas into
//! these types; the emitter renders them to TypeScript source.

use crate::{GeneratorError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical CloudFormation resource type name
///
/// Three `::`-separated segments, e.g. `AWS::S3::Bucket`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceTypeName {
    /// Vendor prefix (almost always "AWS")
    pub vendor: String,
    /// Service name (e.g., "S3", "EC2")
    pub service: String,
    /// Resource name within the service (e.g., "Bucket", "Subnet")
    pub resource: String,
}

impl ResourceTypeName {
    /// Parse a canonical type name string
    ///
    /// # Examples
    /// ```
    /// use cfn_typegen_common::ResourceTypeName;
    ///
    /// let name = ResourceTypeName::parse("AWS::EC2::Subnet").unwrap();
    /// assert_eq!(name.service, "EC2");
    /// assert_eq!(name.resource, "Subnet");
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split("::").collect();
        match parts.as_slice() {
            [vendor, service, resource]
                if !vendor.is_empty() && !service.is_empty() && !resource.is_empty() =>
            {
                Ok(Self {
                    vendor: (*vendor).to_string(),
                    service: (*service).to_string(),
                    resource: (*resource).to_string(),
                })
            }
            _ => Err(GeneratorError::SchemaParse(format!(
                "Invalid resource type name: {}",
                s
            ))),
        }
    }

    /// Output directory name for this resource's service (e.g., "s3")
    pub fn service_dir(&self) -> String {
        self.service.to_lowercase()
    }

    /// Output module file stem (e.g., "s3-bucket")
    pub fn module_stem(&self) -> String {
        format!(
            "{}-{}",
            self.service.to_lowercase(),
            self.resource.to_lowercase()
        )
    }
}

impl fmt::Display for ResourceTypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}::{}", self.vendor, self.service, self.resource)
    }
}

/// A target-language type expression in the intermediate representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeExpr {
    String,
    Number,
    Boolean,
    /// Untyped object or schema node with no usable type information
    Json,
    /// Union of string literals from a schema `enum`
    StringEnum(Vec<String>),
    Array(Box<TypeExpr>),
    /// `Record<string, T>` from patternProperties or typed additionalProperties
    Record(Box<TypeExpr>),
    /// Reference to a Nested Structure declared in the same module
    Ref(String),
}

/// Update-impact classification for a property
///
/// Derived from the schema's `createOnlyProperties` and
/// `conditionalCreateOnlyProperties` lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateBehavior {
    NoInterruption,
    SomeInterruption,
    Replacement,
}

impl UpdateBehavior {
    /// Human-readable label used in generated documentation blocks
    pub fn label(&self) -> &'static str {
        match self {
            UpdateBehavior::NoInterruption => "No interruption",
            UpdateBehavior::SomeInterruption => "Some interruptions",
            UpdateBehavior::Replacement => "Replacement",
        }
    }
}

/// Length/range/pattern constraints attached to a field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldConstraints {
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub pattern: Option<String>,
}

impl FieldConstraints {
    /// True when no constraint is set
    pub fn is_empty(&self) -> bool {
        self.min_length.is_none()
            && self.max_length.is_none()
            && self.minimum.is_none()
            && self.maximum.is_none()
            && self.pattern.is_none()
    }
}

/// A named, typed field within `Properties` or a Nested Structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    pub ty: TypeExpr,
    pub required: bool,
    pub description: Option<String>,
    pub constraints: FieldConstraints,
    pub update: UpdateBehavior,
}

/// A Nested Structure declared within one module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructDef {
    pub name: String,
    pub description: Option<String>,
    pub fields: Vec<FieldDef>,
}

/// One output module: all Nested Structures plus the top-level resource
/// interface for a single resource type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleDef {
    pub type_name: ResourceTypeName,
    pub description: Option<String>,
    pub structs: Vec<StructDef>,
    pub properties: Vec<FieldDef>,
}
