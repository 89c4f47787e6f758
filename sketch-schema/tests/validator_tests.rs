//! Tests for schema validation and rule derivation

use sketch_schema::naming::pivot_table_name;
use sketch_schema::rules::field_rules;
use sketch_schema::{Field, FieldType, Mode, PrimaryKey, Relationship, Schema, SchemaValidator};

fn schema(fields: Vec<Field>, relationships: Vec<Relationship>) -> Schema {
    Schema {
        model: "Post".to_string(),
        primary_key: PrimaryKey::default(),
        fields,
        timestamps: true,
        soft_deletes: false,
        relationships,
    }
}

#[test]
fn test_valid_schema_with_every_relationship_kind() {
    let schema = schema(
        vec![Field::new("title", FieldType::String)],
        vec![
            Relationship::new("belongsTo", "User").with_foreign_key("user_id"),
            Relationship::new("hasOne", "Cover").with_foreign_key("post_id"),
            Relationship::new("hasMany", "Comment").with_foreign_key("post_id"),
            Relationship::new("belongsToMany", "Tag"),
            Relationship::new("hasOneThrough", "Country").with_through("User"),
            Relationship::new("hasManyThrough", "Like").with_through("Comment"),
        ],
    );

    let result = SchemaValidator::validate_comprehensive(&schema);
    assert!(!result.has_errors(), "{:?}", result.errors);
    assert!(!result.has_warnings(), "{:?}", result.warnings);
}

#[test]
fn test_errors_are_collected() {
    let schema = schema(
        vec![
            Field::new("status", FieldType::Enum),
            Field::new("status", FieldType::String),
        ],
        vec![Relationship::new("hasMany", "Comment")],
    );

    let result = SchemaValidator::validate_comprehensive(&schema);
    assert_eq!(result.errors.len(), 3);

    let message = SchemaValidator::validate(&schema).unwrap_err().to_string();
    assert!(message.contains("(and 2 more)"));
}

#[test]
fn test_update_rules_always_start_with_sometimes() {
    let types = [
        FieldType::String,
        FieldType::Text,
        FieldType::Integer,
        FieldType::Decimal,
        FieldType::Float,
        FieldType::Double,
        FieldType::Boolean,
        FieldType::Date,
        FieldType::DateTime,
        FieldType::Email,
        FieldType::Url,
        FieldType::Enum,
        FieldType::Json,
        FieldType::Other("geometry".to_string()),
    ];

    for field_type in types {
        for nullable in [false, true] {
            let mut field = Field::new("value", field_type.clone()).with_options(["a", "b"]);
            field.nullable = nullable;
            field.rules = vec!["bail".to_string()];

            let update = field_rules(&field, Mode::Update);
            let create = field_rules(&field, Mode::Create);

            assert_eq!(update.first().map(String::as_str), Some("sometimes"));
            assert!(!create.iter().any(|rule| rule == "sometimes"));
            assert_eq!(create.last().map(String::as_str), Some("bail"));
        }
    }
}

#[test]
fn test_enum_rule_keeps_declared_order() {
    let field = Field::new("status", FieldType::Enum).with_options(["active", "inactive"]);
    assert!(field_rules(&field, Mode::Create).contains(&"in:active,inactive".to_string()));

    let reversed = Field::new("status", FieldType::Enum).with_options(["inactive", "active"]);
    assert!(field_rules(&reversed, Mode::Create).contains(&"in:inactive,active".to_string()));
}

#[test]
fn test_pivot_table_name_order_independence() {
    let models = ["Post", "Tag", "User", "Role", "Category", "Person", "BlogPost", "Address"];

    for a in models {
        for b in models {
            assert_eq!(pivot_table_name(a, b), pivot_table_name(b, a), "{} / {}", a, b);
        }
    }
    assert_eq!(pivot_table_name("Person", "Category"), "categories_people");
}
