//! Schema parser for YAML blueprints

use crate::validator::SchemaValidator;
use crate::{Field, FieldType, PrimaryKey, Relationship, Result, Schema, SketchError, ValidationResult};
use serde::Deserialize;
use std::path::Path;

/// Blueprint as decoded, before required keys are checked
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSchema {
    model: Option<String>,
    primary_key: Option<RawPrimaryKey>,
    fields: Option<Vec<RawField>>,
    timestamps: Option<bool>,
    soft_deletes: Option<bool>,
    #[serde(default)]
    relationships: Vec<Relationship>,
}

#[derive(Debug, Deserialize)]
struct RawPrimaryKey {
    name: Option<String>,
    #[serde(rename = "type")]
    key_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawField {
    name: Option<String>,
    #[serde(rename = "type")]
    field_type: Option<String>,
    #[serde(default)]
    nullable: bool,
    #[serde(default)]
    options: Vec<String>,
    #[serde(default)]
    rules: Option<RawRules>,
}

/// `rules` may be a single pipe-free token or a list
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawRules {
    One(String),
    Many(Vec<String>),
}

impl RawRules {
    fn into_vec(self) -> Vec<String> {
        match self {
            RawRules::One(rule) => vec![rule],
            RawRules::Many(rules) => rules,
        }
    }
}

/// Schema parser
pub struct SchemaParser;

impl SchemaParser {
    /// Parse and validate a blueprint file
    pub fn parse_file(path: &Path) -> Result<Schema> {
        log::debug!("Reading blueprint {}", path.display());
        let contents = std::fs::read_to_string(path).map_err(|e| SketchError::io(path, e))?;
        Self::parse(&contents)
    }

    /// Parse and validate blueprint text
    ///
    /// Every structural problem is collected before failing, so a single run
    /// reports all missing keys at once. Warnings are logged and do not fail.
    pub fn parse(text: &str) -> Result<Schema> {
        let raw: RawSchema = serde_yaml::from_str(text)
            .map_err(|e| SketchError::Schema(format!("Failed to parse blueprint: {}", e)))?;

        let mut result = ValidationResult::new();
        let schema = Self::convert(raw, &mut result);
        result.merge(SchemaValidator::validate_comprehensive(&schema));

        for warning in &result.warnings {
            log::warn!("{}", warning);
        }
        result.into_result()?;

        log::debug!(
            "Parsed blueprint for {} ({} fields, {} relationships)",
            schema.model,
            schema.fields.len(),
            schema.relationships.len()
        );
        Ok(schema)
    }

    fn convert(raw: RawSchema, result: &mut ValidationResult) -> Schema {
        let model = raw.model.map(|m| m.trim().to_string()).unwrap_or_default();
        if model.is_empty() {
            result.add_error("Model name is required");
        }

        let raw_fields = raw.fields.unwrap_or_default();
        if raw_fields.is_empty() {
            result.add_error("At least one field is required");
        }

        let fields = raw_fields
            .into_iter()
            .enumerate()
            .filter_map(|(index, field)| Self::convert_field(index, field, result))
            .collect();

        let defaults = PrimaryKey::default();
        let primary_key = match raw.primary_key {
            Some(pk) => PrimaryKey {
                name: pk.name.filter(|n| !n.is_empty()).unwrap_or(defaults.name),
                key_type: pk.key_type.filter(|t| !t.is_empty()).unwrap_or(defaults.key_type),
            },
            None => defaults,
        };

        Schema {
            model,
            primary_key,
            fields,
            timestamps: raw.timestamps.unwrap_or(true),
            soft_deletes: raw.soft_deletes.unwrap_or(false),
            relationships: raw.relationships,
        }
    }

    fn convert_field(index: usize, raw: RawField, result: &mut ValidationResult) -> Option<Field> {
        let name = match raw.name.filter(|n| !n.is_empty()) {
            Some(name) => name,
            None => {
                result.add_error(format!("Field name is required (field #{})", index + 1));
                return None;
            }
        };

        let field_type = match raw.field_type.filter(|t| !t.is_empty()) {
            Some(token) => FieldType::parse(&token),
            None => {
                result.add_error(format!("Field type is required for field {}", name));
                return None;
            }
        };

        Some(Field {
            name,
            field_type,
            nullable: raw.nullable,
            options: raw.options,
            rules: raw.rules.map(RawRules::into_vec).unwrap_or_default(),
        })
    }
}
