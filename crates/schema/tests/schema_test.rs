//! Integration test for schema loading and lowering

use cfn_typegen_common::{TypeExpr, UpdateBehavior};
use cfn_typegen_schema::{SchemaCatalog, SchemaLoader};
use tempfile::TempDir;

const BUCKET_SCHEMA: &str = r##"{
    "typeName": "AWS::S3::Bucket",
    "description": "Resource Type definition for AWS::S3::Bucket",
    "definitions": {
        "Tag": {
            "type": "object",
            "description": "A key-value pair to associate with a resource.",
            "properties": {
                "Key": { "type": "string", "minLength": 1, "maxLength": 128 },
                "Value": { "type": "string", "minLength": 0, "maxLength": 256 }
            },
            "required": ["Key", "Value"]
        },
        "LifecycleConfiguration": {
            "type": "object",
            "properties": {
                "Rules": { "type": "array", "items": { "$ref": "#/definitions/Rule" } }
            },
            "required": ["Rules"]
        },
        "Rule": {
            "type": "object",
            "properties": {
                "Id": { "type": "string", "maxLength": 255 },
                "Status": { "type": "string", "enum": ["Enabled", "Disabled"] }
            },
            "required": ["Status"]
        }
    },
    "properties": {
        "BucketName": {
            "type": "string",
            "description": "A name for the bucket.",
            "minLength": 3,
            "maxLength": 63,
            "pattern": "^[a-z0-9][a-z0-9.-]*$"
        },
        "AccessControl": {
            "type": "string",
            "enum": ["Private", "PublicRead"]
        },
        "LifecycleConfiguration": { "$ref": "#/definitions/LifecycleConfiguration" },
        "Tags": { "type": "array", "items": { "$ref": "#/definitions/Tag" } },
        "Arn": { "type": "string" }
    },
    "readOnlyProperties": ["/properties/Arn"],
    "createOnlyProperties": ["/properties/BucketName"],
    "primaryIdentifier": ["/properties/BucketName"]
}"##;

#[test]
fn test_lower_bucket_schema() {
    let loader = SchemaLoader::from_json(BUCKET_SCHEMA).unwrap();
    let module = loader.parse().unwrap();

    assert_eq!(module.type_name.to_string(), "AWS::S3::Bucket");
    assert_eq!(
        module.description.as_deref(),
        Some("Resource Type definition for AWS::S3::Bucket")
    );

    // Arn is read-only and must not appear in the property bag
    let names: Vec<&str> = module.properties.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["BucketName", "AccessControl", "LifecycleConfiguration", "Tags"]
    );

    let bucket_name = &module.properties[0];
    assert_eq!(bucket_name.ty, TypeExpr::String);
    assert_eq!(bucket_name.update, UpdateBehavior::Replacement);
    assert_eq!(bucket_name.constraints.min_length, Some(3));
    assert_eq!(bucket_name.constraints.max_length, Some(63));
    assert!(bucket_name.constraints.pattern.is_some());

    let access_control = &module.properties[1];
    assert_eq!(
        access_control.ty,
        TypeExpr::StringEnum(vec!["Private".to_string(), "PublicRead".to_string()])
    );

    // All three definitions are object-shaped and become structures
    let struct_names: Vec<&str> = module.structs.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(struct_names, vec!["Tag", "LifecycleConfiguration", "Rule"]);

    // LifecycleConfiguration.Rules references Rule, declared later in the
    // schema; ordering is the emitter's concern, reference-wise it is fine
    let lifecycle = &module.structs[1];
    assert_eq!(
        lifecycle.fields[0].ty,
        TypeExpr::Array(Box::new(TypeExpr::Ref("Rule".to_string())))
    );
}

#[test]
fn test_lowering_is_reproducible() {
    let first = SchemaLoader::from_json(BUCKET_SCHEMA).unwrap().parse().unwrap();
    let second = SchemaLoader::from_json(BUCKET_SCHEMA).unwrap().parse().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_catalog_discovery_and_lookup() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("aws-s3-bucket.json"), BUCKET_SCHEMA).unwrap();
    std::fs::write(
        dir.path().join("aws-sns-topic.json"),
        r#"{ "typeName": "AWS::SNS::Topic", "properties": { "TopicName": { "type": "string" } } }"#,
    )
    .unwrap();
    std::fs::write(dir.path().join("notes.txt"), "not a schema").unwrap();
    std::fs::write(dir.path().join("broken.json"), "{ not json").unwrap();

    let catalog = SchemaCatalog::discover(dir.path()).unwrap();
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.skipped(), 1);

    // Sorted by type name
    let names: Vec<&str> = catalog.type_names().collect();
    assert_eq!(names, vec!["AWS::S3::Bucket", "AWS::SNS::Topic"]);

    let loader = catalog.get("AWS::S3::Bucket").unwrap();
    assert_eq!(loader.schema().type_name, "AWS::S3::Bucket");

    let missing = catalog.get("AWS::EC2::Subnet");
    assert!(missing.is_err());
}
