//! Schema validation system

use crate::relations::RelationKind;
use crate::{Field, FieldType, Relationship, Result, Schema, ValidationResult};
use std::collections::HashSet;
use std::str::FromStr;

/// Columns added by `$table->timestamps()`
const TIMESTAMP_COLUMNS: [&str; 2] = ["created_at", "updated_at"];

/// Schema validator
pub struct SchemaValidator;

impl SchemaValidator {
    /// Validate the schema, failing on the first batch of errors
    pub fn validate(schema: &Schema) -> Result<()> {
        Self::validate_comprehensive(schema).into_result()
    }

    /// Validate the schema and return every error and warning found
    pub fn validate_comprehensive(schema: &Schema) -> ValidationResult {
        let mut result = ValidationResult::new();

        // 1. Fields
        let mut seen = HashSet::new();
        for field in &schema.fields {
            if !seen.insert(field.name.as_str()) {
                result.add_error(format!("Duplicate field name: {}", field.name));
            }
            result.merge(Self::validate_field(field));

            if schema.timestamps && TIMESTAMP_COLUMNS.contains(&field.name.as_str()) {
                result.add_warning(format!(
                    "Field '{}' duplicates a column added by timestamps",
                    field.name
                ));
            }
        }

        // 2. Relationships
        for relation in &schema.relationships {
            result.merge(Self::validate_relationship(relation));
        }

        result
    }

    /// Validate a single field
    pub fn validate_field(field: &Field) -> ValidationResult {
        let mut result = ValidationResult::new();

        match field.field_type {
            FieldType::Enum if field.options.is_empty() => {
                result.add_error(format!("Enum options are required for field {}", field.name));
            }
            FieldType::Enum => {}
            _ if !field.options.is_empty() => {
                result.add_warning(format!(
                    "Options on field '{}' are ignored for type {}",
                    field.name, field.field_type
                ));
            }
            _ => {}
        }

        result
    }

    /// Validate the keys a relationship needs before it can be resolved
    ///
    /// An unrecognised kind is only a warning here. Resolution rejects it
    /// before any artifact is written.
    pub fn validate_relationship(relation: &Relationship) -> ValidationResult {
        let mut result = ValidationResult::new();

        if relation.kind.is_empty() {
            result.add_error("Relationship type is required");
        }
        if relation.model.is_empty() {
            result.add_error("Related model is required");
        }
        if relation.kind.is_empty() {
            return result;
        }

        match RelationKind::from_str(&relation.kind) {
            Ok(kind) if kind.is_direct() && is_blank(&relation.foreign_key) => {
                result.add_error(format!(
                    "Foreign key is required for {} relationship to {}",
                    relation.kind, relation.model
                ));
            }
            Ok(kind) if kind.is_through() && is_blank(&relation.through) => {
                result.add_error(format!(
                    "Through model is required for {} relationship to {}",
                    relation.kind, relation.model
                ));
            }
            Ok(_) => {}
            Err(_) => {
                result.add_warning(format!(
                    "Relationship type '{}' is not supported",
                    relation.kind
                ));
            }
        }

        result
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PrimaryKey;

    fn schema_with(fields: Vec<Field>, relationships: Vec<Relationship>) -> Schema {
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
    fn test_validate_simple_schema() {
        let schema = schema_with(
            vec![Field::new("title", FieldType::String)],
            vec![Relationship::new("belongsTo", "User").with_foreign_key("user_id")],
        );

        assert!(SchemaValidator::validate(&schema).is_ok());
    }

    #[test]
    fn test_enum_without_options() {
        let schema = schema_with(vec![Field::new("status", FieldType::Enum)], vec![]);

        let err = SchemaValidator::validate(&schema).unwrap_err();
        assert!(err.to_string().contains("Enum options are required for field status"));
    }

    #[test]
    fn test_duplicate_fields() {
        let schema = schema_with(
            vec![Field::new("title", FieldType::String), Field::new("title", FieldType::Text)],
            vec![],
        );

        let result = SchemaValidator::validate_comprehensive(&schema);
        assert_eq!(result.errors, vec!["Duplicate field name: title"]);
    }

    #[test]
    fn test_direct_relationship_requires_foreign_key() {
        for kind in ["belongsTo", "hasOne", "hasMany"] {
            let result = SchemaValidator::validate_relationship(&Relationship::new(kind, "User"));
            assert!(result.has_errors(), "{} should require a foreign key", kind);
            assert!(result.errors[0].starts_with("Foreign key is required"));
        }
    }

    #[test]
    fn test_through_relationship_requires_through() {
        let result = SchemaValidator::validate_relationship(&Relationship::new("hasManyThrough", "Comment"));
        assert!(result.errors[0].starts_with("Through model is required"));

        let ok = Relationship::new("hasOneThrough", "Owner").with_through("Car");
        assert!(!SchemaValidator::validate_relationship(&ok).has_errors());
    }

    #[test]
    fn test_missing_type_and_model() {
        let result = SchemaValidator::validate_relationship(&Relationship::default());
        assert_eq!(
            result.errors,
            vec!["Relationship type is required", "Related model is required"]
        );
    }

    #[test]
    fn test_unknown_kind_is_only_a_warning() {
        let result = SchemaValidator::validate_relationship(&Relationship::new("polymorphicFoo", "Tag"));
        assert!(!result.has_errors());
        assert!(result.has_warnings());
    }

    #[test]
    fn test_warnings() {
        let schema = schema_with(
            vec![
                Field::new("title", FieldType::String).with_options(["a"]),
                Field::new("created_at", FieldType::DateTime),
            ],
            vec![],
        );

        let result = SchemaValidator::validate_comprehensive(&schema);
        assert!(!result.has_errors());
        assert_eq!(result.warnings.len(), 2);
    }
}
