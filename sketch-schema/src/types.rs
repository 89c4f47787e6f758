//! Schema type definitions

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// One model blueprint, validated and immutable once parsed
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// Model class name, possibly namespaced (`Blog/Post`)
    pub model: String,

    pub primary_key: PrimaryKey,

    /// Columns in declaration order
    pub fields: Vec<Field>,

    pub timestamps: bool,

    pub soft_deletes: bool,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub relationships: Vec<Relationship>,
}

/// Primary key column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrimaryKey {
    pub name: String,

    #[serde(rename = "type")]
    pub key_type: String,
}

impl Default for PrimaryKey {
    fn default() -> Self {
        Self {
            name: "id".to_string(),
            key_type: "integer".to_string(),
        }
    }
}

/// Column definition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub name: String,

    #[serde(rename = "type")]
    pub field_type: FieldType,

    pub nullable: bool,

    /// Allowed values, required for enum fields
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,

    /// Extra validation tokens appended after the derived ones
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<String>,
}

impl Field {
    /// Create a non-nullable field without options or extra rules
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            nullable: false,
            options: Vec::new(),
            rules: Vec::new(),
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }
}

/// Field type definitions
///
/// Unknown tokens are kept verbatim in `Other` and passed through to the
/// migration as a column method.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    String,
    Text,
    Integer,
    Decimal,
    Float,
    Double,
    Boolean,
    Date,
    DateTime,
    Email,
    Url,
    Enum,
    Json,
    Other(String),
}

impl FieldType {
    /// Parse a type token from a blueprint
    pub fn parse(token: &str) -> Self {
        match token {
            "string" => FieldType::String,
            "text" => FieldType::Text,
            "integer" => FieldType::Integer,
            "decimal" => FieldType::Decimal,
            "float" => FieldType::Float,
            "double" => FieldType::Double,
            "boolean" => FieldType::Boolean,
            "date" => FieldType::Date,
            "datetime" => FieldType::DateTime,
            "email" => FieldType::Email,
            "url" => FieldType::Url,
            "enum" => FieldType::Enum,
            "json" => FieldType::Json,
            other => FieldType::Other(other.to_string()),
        }
    }

    /// The token as written in the blueprint
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::String => "string",
            FieldType::Text => "text",
            FieldType::Integer => "integer",
            FieldType::Decimal => "decimal",
            FieldType::Float => "float",
            FieldType::Double => "double",
            FieldType::Boolean => "boolean",
            FieldType::Date => "date",
            FieldType::DateTime => "datetime",
            FieldType::Email => "email",
            FieldType::Url => "url",
            FieldType::Enum => "enum",
            FieldType::Json => "json",
            FieldType::Other(token) => token,
        }
    }

    /// Column method used by the migration
    ///
    /// `email` and `url` only exist for validation and are stored as strings.
    pub fn column_type(&self) -> &str {
        match self {
            FieldType::Email | FieldType::Url => "string",
            other => other.as_str(),
        }
    }

    /// Attribute cast emitted on the model, if any
    pub fn cast(&self) -> Option<&'static str> {
        match self {
            FieldType::Enum => Some("string"),
            FieldType::Json => Some("array"),
            FieldType::DateTime => Some("datetime"),
            FieldType::Boolean => Some("boolean"),
            _ => None,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FieldType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Relationship declaration as written in the blueprint
///
/// Only `type` and `model` are shared by every kind; the remaining attributes
/// apply to some kinds and are defaulted by [`crate::RelationshipResolver`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default)]
    pub model: String,

    #[serde(default, skip_serializing_if = "is_false")]
    pub nullable: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreign_key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_key: Option<String>,

    /// Column type of the foreign key: integer, uuid or ulid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_update: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_delete: Option<String>,

    /// Table checked by the existence rule
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,

    /// Column checked by the existence rule
    #[serde(skip_serializing_if = "Option::is_none")]
    pub references: Option<String>,

    // Through relationships
    #[serde(skip_serializing_if = "Option::is_none")]
    pub through: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub second_key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub second_local_key: Option<String>,

    // Many to many
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pivot_table: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pivot_table_key_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreign_pivot: Option<PivotKey>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_pivot: Option<PivotKey>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pivot_columns: Vec<PivotColumn>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub with_timestamps: bool,
}

impl Relationship {
    /// Declaration with only the kind and target model set
    pub fn new(kind: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            model: model.into(),
            ..Default::default()
        }
    }

    pub fn with_foreign_key(mut self, key: impl Into<String>) -> Self {
        self.foreign_key = Some(key.into());
        self
    }

    pub fn with_through(mut self, through: impl Into<String>) -> Self {
        self.through = Some(through.into());
        self
    }
}

/// One side of a pivot table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PivotKey {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub key_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub references: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
}

/// Extra column stored on a pivot table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PivotColumn {
    pub name: String,

    #[serde(rename = "type")]
    pub column_type: String,

    #[serde(default)]
    pub nullable: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}
