//! Tests for blueprint parsing

use sketch_schema::{FieldType, PrimaryKey, SchemaParser, SketchError};
use std::fs;
use tempfile::TempDir;

fn schema_error(yaml: &str) -> String {
    match SchemaParser::parse(yaml) {
        Err(SketchError::Schema(message)) => message,
        other => panic!("expected schema error, got {:?}", other),
    }
}

#[test]
fn test_parse_full_blueprint() {
    let yaml = r#"
model: Post
primaryKey:
  name: id
  type: integer
fields:
  - name: title
    type: string
    nullable: false
  - name: content
    type: text
    nullable: true
  - name: status
    type: enum
    options: [draft, published]
  - name: price
    type: decimal
timestamps: true
softDeletes: true
relationships:
  - type: belongsTo
    model: User
    foreignKey: user_id
    ownerKey: id
  - type: belongsToMany
    model: Tag
    pivotTable: post_tag
    foreignPivot: { key: post_id, type: integer, references: id, table: posts }
    pivotColumns:
      - { name: order, type: integer }
    withTimestamps: true
"#;

    let schema = SchemaParser::parse(yaml).unwrap();

    assert_eq!(schema.model, "Post");
    assert_eq!(schema.primary_key, PrimaryKey::default());
    assert_eq!(schema.fields.len(), 4);
    assert_eq!(schema.fields[0].name, "title");
    assert!(schema.fields[1].nullable);
    assert_eq!(schema.fields[2].field_type, FieldType::Enum);
    assert_eq!(schema.fields[2].options, vec!["draft", "published"]);
    assert_eq!(schema.fields[3].field_type, FieldType::Decimal);
    assert!(schema.timestamps);
    assert!(schema.soft_deletes);

    let pivot = &schema.relationships[1];
    assert_eq!(pivot.kind, "belongsToMany");
    assert_eq!(pivot.pivot_table.as_deref(), Some("post_tag"));
    assert_eq!(pivot.foreign_pivot.as_ref().unwrap().key.as_deref(), Some("post_id"));
    assert_eq!(pivot.pivot_columns[0].name, "order");
    assert!(pivot.with_timestamps);
}

#[test]
fn test_field_order_is_preserved() {
    let schema = SchemaParser::parse(
        "model: Item\nfields:\n  - { name: z, type: string }\n  - { name: a, type: string }\n  - { name: m, type: string }\n",
    )
    .unwrap();

    let names: Vec<&str> = schema.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["z", "a", "m"]);
}

#[test]
fn test_missing_model() {
    let message = schema_error("fields:\n  - { name: title, type: string }\n");
    assert_eq!(message, "Model name is required");
}

#[test]
fn test_empty_model() {
    let message = schema_error("model: ''\nfields:\n  - { name: title, type: string }\n");
    assert_eq!(message, "Model name is required");
}

#[test]
fn test_missing_fields() {
    assert_eq!(schema_error("model: Post\n"), "At least one field is required");
    assert_eq!(schema_error("model: Post\nfields: []\n"), "At least one field is required");
}

#[test]
fn test_field_without_type() {
    let message = schema_error("model: Post\nfields:\n  - { name: title }\n");
    assert_eq!(message, "Field type is required for field title");
}

#[test]
fn test_enum_without_options() {
    let message = schema_error("model: Post\nfields:\n  - { name: status, type: enum }\n");
    assert_eq!(message, "Enum options are required for field status");
}

#[test]
fn test_relationship_without_type_or_model() {
    let message = schema_error(
        "model: Post\nfields:\n  - { name: title, type: string }\nrelationships:\n  - { foreignKey: user_id }\n",
    );
    assert!(message.contains("Relationship type is required"));
    assert!(message.contains("Related model is required"));
}

#[test]
fn test_belongs_to_without_foreign_key() {
    let message = schema_error(
        "model: Post\nfields:\n  - { name: title, type: string }\nrelationships:\n  - { type: belongsTo, model: User }\n",
    );
    assert!(message.starts_with("Foreign key is required"));
}

#[test]
fn test_through_without_intermediate_model() {
    let message = schema_error(
        "model: Country\nfields:\n  - { name: name, type: string }\nrelationships:\n  - { type: hasManyThrough, model: Post }\n",
    );
    assert!(message.starts_with("Through model is required"));
}

#[test]
fn test_unknown_relationship_type_parses() {
    // Rejected when relationships are resolved, not while parsing
    let schema = SchemaParser::parse(
        "model: Post\nfields:\n  - { name: title, type: string }\nrelationships:\n  - { type: polymorphicFoo, model: Tag }\n",
    )
    .unwrap();

    let err = schema.resolved_relationships().unwrap_err();
    assert!(matches!(err, SketchError::UnsupportedRelationship(ref t) if t == "polymorphicFoo"));
}

#[test]
fn test_parse_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Post.yaml");
    fs::write(&path, "model: Post\nfields:\n  - { name: title, type: string }\n").unwrap();

    assert_eq!(SchemaParser::parse_file(&path).unwrap().model, "Post");
}

#[test]
fn test_parse_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = SchemaParser::parse_file(&dir.path().join("Missing.yaml")).unwrap_err();

    assert!(matches!(err, SketchError::Io { .. }));
    assert!(err.to_string().contains("Missing.yaml"));
}
