//! CloudFormation resource provider schema type definitions
//!
//! These types represent the structure of resource provider schema JSON
//! documents as published in the CloudFormation registry.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Root resource provider schema document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSchema {
    /// Canonical resource type name (e.g., "AWS::S3::Bucket")
    pub type_name: String,

    /// Resource description
    #[serde(default)]
    pub description: Option<String>,

    /// Named sub-object definitions referenced via `#/definitions/...`
    #[serde(default)]
    pub definitions: IndexMap<String, PropertySchema>,

    /// Top-level resource properties
    #[serde(default)]
    pub properties: IndexMap<String, PropertySchema>,

    /// Names of required top-level properties
    #[serde(default)]
    pub required: Vec<String>,

    /// Property pointers whose change forces resource replacement
    /// (e.g., "/properties/BucketName")
    #[serde(default)]
    pub create_only_properties: Vec<String>,

    /// Property pointers whose change may force replacement depending on
    /// other property values
    #[serde(default)]
    pub conditional_create_only_properties: Vec<String>,

    /// Property pointers that are provider outputs, never template inputs
    #[serde(default)]
    pub read_only_properties: Vec<String>,

    /// Property pointers forming the resource's primary identifier
    #[serde(default)]
    pub primary_identifier: Vec<String>,
}

/// One schema node: a property, definition, or nested item schema
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySchema {
    /// Reference to a named definition (e.g., "#/definitions/Tag")
    #[serde(rename = "$ref", default)]
    pub reference: Option<String>,

    /// JSON Schema type keyword ("string", "integer", "number", "boolean",
    /// "array", "object")
    #[serde(rename = "type", default)]
    pub ty: Option<String>,

    /// Property description
    #[serde(default)]
    pub description: Option<String>,

    /// Allowed values for enumerated fields
    #[serde(rename = "enum", default)]
    pub enum_values: Vec<serde_json::Value>,

    /// Item schema for array-typed nodes
    #[serde(default)]
    pub items: Option<Box<PropertySchema>>,

    /// Member properties for object-typed nodes
    #[serde(default)]
    pub properties: IndexMap<String, PropertySchema>,

    /// Required member names for object-typed nodes
    #[serde(default)]
    pub required: Vec<String>,

    /// Value schemas keyed by key pattern; marks a map/dictionary node
    #[serde(default)]
    pub pattern_properties: IndexMap<String, PropertySchema>,

    /// Either a boolean or a value schema for open-ended objects
    #[serde(default)]
    pub additional_properties: Option<AdditionalProperties>,

    #[serde(default)]
    pub min_length: Option<u64>,

    #[serde(default)]
    pub max_length: Option<u64>,

    #[serde(default)]
    pub minimum: Option<f64>,

    #[serde(default)]
    pub maximum: Option<f64>,

    #[serde(default)]
    pub pattern: Option<String>,

    /// Whether array element order is significant
    #[serde(default)]
    pub insertion_order: Option<bool>,
}

/// `additionalProperties`: schemas use both the boolean and the schema form
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Allowed(bool),
    Schema(Box<PropertySchema>),
}

impl PropertySchema {
    /// Simple definition name from a `$ref` target
    /// e.g., "#/definitions/Tag" -> Some("Tag")
    pub fn ref_name(&self) -> Option<&str> {
        self.reference
            .as_deref()
            .and_then(|r| r.strip_prefix("#/definitions/"))
    }

    /// True when this node declares object members of its own
    pub fn has_members(&self) -> bool {
        !self.properties.is_empty()
    }

    /// Value schema when this node is a map/dictionary
    ///
    /// `patternProperties` wins; a schema-valued `additionalProperties` is
    /// the other way registry schemas spell an open string-keyed map.
    pub fn map_value_schema(&self) -> Option<&PropertySchema> {
        if let Some(value) = self.pattern_properties.values().next() {
            return Some(value);
        }
        match &self.additional_properties {
            Some(AdditionalProperties::Schema(schema)) => Some(schema),
            _ => None,
        }
    }
}

/// Strip a property JSON pointer down to the top-level property name
/// e.g., "/properties/BucketName" -> Some("BucketName")
pub(crate) fn pointer_property_name(pointer: &str) -> Option<&str> {
    let rest = pointer.strip_prefix("/properties/")?;
    // Nested pointers ("/properties/A/B") classify their top-level property
    Some(rest.split('/').next().unwrap_or(rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_schema() {
        let json = r#"{
            "typeName": "AWS::SNS::Topic",
            "description": "Resource Type definition for AWS::SNS::Topic",
            "properties": {
                "TopicName": { "type": "string" }
            },
            "createOnlyProperties": ["/properties/TopicName"]
        }"#;

        let schema: ResourceSchema = serde_json::from_str(json).unwrap();
        assert_eq!(schema.type_name, "AWS::SNS::Topic");
        assert_eq!(schema.properties.len(), 1);
        assert_eq!(schema.create_only_properties.len(), 1);
        assert!(schema.definitions.is_empty());
    }

    #[test]
    fn test_ref_name() {
        let node: PropertySchema =
            serde_json::from_str(r##"{ "$ref": "#/definitions/Tag" }"##).unwrap();
        assert_eq!(node.ref_name(), Some("Tag"));

        let node = PropertySchema::default();
        assert_eq!(node.ref_name(), None);
    }

    #[test]
    fn test_additional_properties_forms() {
        let node: PropertySchema =
            serde_json::from_str(r#"{ "type": "object", "additionalProperties": false }"#).unwrap();
        assert!(matches!(
            node.additional_properties,
            Some(AdditionalProperties::Allowed(false))
        ));
        assert!(node.map_value_schema().is_none());

        let node: PropertySchema = serde_json::from_str(
            r#"{ "type": "object", "additionalProperties": { "type": "string" } }"#,
        )
        .unwrap();
        assert!(node.map_value_schema().is_some());
    }

    #[test]
    fn test_pattern_properties_is_map() {
        let node: PropertySchema = serde_json::from_str(
            r#"{
                "type": "object",
                "patternProperties": { "[a-zA-Z0-9]+": { "type": "string" } }
            }"#,
        )
        .unwrap();
        let value = node.map_value_schema().unwrap();
        assert_eq!(value.ty.as_deref(), Some("string"));
    }

    #[test]
    fn test_pointer_property_name() {
        assert_eq!(
            pointer_property_name("/properties/BucketName"),
            Some("BucketName")
        );
        assert_eq!(
            pointer_property_name("/properties/Config/LogLevel"),
            Some("Config")
        );
        assert_eq!(pointer_property_name("/definitions/Tag"), None);
    }
}
