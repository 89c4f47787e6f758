//! Validation rule derivation for form requests

use crate::relations::ResolvedRelationship;
use crate::{Field, FieldType, PivotColumn};
use std::fmt;

/// Which request the rules are for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Create,
    Update,
}

impl Mode {
    /// Class name suffix: `Create` or `Update`
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Create => "Create",
            Mode::Update => "Update",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rules for one request key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    pub key: String,
    pub rules: Vec<String>,
}

impl RuleSet {
    pub fn new(key: impl Into<String>, rules: Vec<String>) -> Self {
        Self { key: key.into(), rules }
    }
}

impl fmt::Display for RuleSet {
    /// `'title' => ['required', 'string', 'max:255']`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' => ['{}']", self.key, self.rules.join("', '"))
    }
}

/// Presence tokens: `sometimes` leads on update
fn presence(nullable: bool, mode: Mode) -> Vec<String> {
    let mut rules = Vec::with_capacity(2);
    if mode == Mode::Update {
        rules.push("sometimes".to_string());
    }
    rules.push(if nullable { "nullable" } else { "required" }.to_string());
    rules
}

/// Ordered rule tokens for a field
pub fn field_rules(field: &Field, mode: Mode) -> Vec<String> {
    let mut rules = presence(field.nullable, mode);

    match &field.field_type {
        FieldType::String => rules.extend(["string".to_string(), "max:255".to_string()]),
        FieldType::Text => rules.push("string".to_string()),
        FieldType::Integer => rules.push("integer".to_string()),
        FieldType::Decimal | FieldType::Float | FieldType::Double => rules.push("numeric".to_string()),
        FieldType::Boolean => rules.push("boolean".to_string()),
        FieldType::Date | FieldType::DateTime => rules.push("date".to_string()),
        FieldType::Email => rules.push("email:rfc,dns".to_string()),
        FieldType::Url => rules.push("url".to_string()),
        FieldType::Enum if !field.options.is_empty() => rules.push(format!("in:{}", field.options.join(","))),
        FieldType::Json => rules.push("json".to_string()),
        FieldType::Enum | FieldType::Other(_) => {}
    }

    rules.extend(field.rules.iter().cloned());
    rules
}

/// Rule sets contributed by a resolved relationship
///
/// Through relationships have no column on the owning table and produce none.
/// A belongsToMany key carries the same presence prefix as a foreign key, so
/// it is required on create unless the relationship is `nullable`.
pub fn relationship_rules(relation: &ResolvedRelationship, mode: Mode) -> Vec<RuleSet> {
    match relation {
        ResolvedRelationship::BelongsTo(r) | ResolvedRelationship::HasOne(r) | ResolvedRelationship::HasMany(r) => {
            let mut rules = presence(r.target.nullable, mode);
            rules.push(format!("exists:{},{}", r.table, r.references));
            vec![RuleSet::new(&r.foreign_key, rules)]
        }
        ResolvedRelationship::BelongsToMany(r) => {
            let mut rules = presence(r.target.nullable, mode);
            rules.push("array".to_string());
            rules.push(format!("exists:{},{}", r.related_pivot.table, r.related_pivot.references));

            let key = crate::naming::pluralize(&crate::naming::snake_case(&r.target.class_name));
            let mut sets = vec![RuleSet::new(key, rules)];
            sets.extend(r.columns.iter().map(|column| pivot_column_rules(column, mode)));
            sets
        }
        ResolvedRelationship::HasOneThrough(_) | ResolvedRelationship::HasManyThrough(_) => Vec::new(),
    }
}

fn pivot_column_rules(column: &PivotColumn, mode: Mode) -> RuleSet {
    let mut rules = presence(column.nullable, mode);
    match column.column_type.as_str() {
        "timestamp" => rules.push("date".to_string()),
        "boolean" => rules.push("boolean".to_string()),
        _ => {}
    }
    RuleSet::new(&column.name, rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relations::RelationshipResolver;
    use crate::Relationship;

    #[test]
    fn test_type_mapping() {
        let cases = [
            (FieldType::String, vec!["required", "string", "max:255"]),
            (FieldType::Text, vec!["required", "string"]),
            (FieldType::Integer, vec!["required", "integer"]),
            (FieldType::Double, vec!["required", "numeric"]),
            (FieldType::Boolean, vec!["required", "boolean"]),
            (FieldType::DateTime, vec!["required", "date"]),
            (FieldType::Email, vec!["required", "email:rfc,dns"]),
            (FieldType::Url, vec!["required", "url"]),
            (FieldType::Json, vec!["required", "json"]),
            (FieldType::Other("uuid".to_string()), vec!["required"]),
        ];

        for (field_type, expected) in cases {
            let field = Field::new("value", field_type.clone());
            assert_eq!(field_rules(&field, Mode::Create), expected, "type {}", field_type);
        }
    }

    #[test]
    fn test_update_leads_with_sometimes() {
        for nullable in [false, true] {
            let mut field = Field::new("title", FieldType::String);
            field.nullable = nullable;

            let update = field_rules(&field, Mode::Update);
            let create = field_rules(&field, Mode::Create);
            assert_eq!(update[0], "sometimes");
            assert!(!create.contains(&"sometimes".to_string()));
            assert_eq!(&update[1..], &create[..]);
        }
    }

    #[test]
    fn test_enum_lists_options_in_order() {
        let field = Field::new("status", FieldType::Enum).with_options(["active", "inactive"]);
        assert_eq!(field_rules(&field, Mode::Create), vec!["required", "in:active,inactive"]);

        let empty = Field::new("status", FieldType::Enum);
        assert_eq!(field_rules(&empty, Mode::Create), vec!["required"]);
    }

    #[test]
    fn test_custom_rules_are_appended() {
        let mut field = Field::new("slug", FieldType::String).nullable();
        field.rules = vec!["unique:posts".to_string()];

        assert_eq!(
            field_rules(&field, Mode::Create),
            vec!["nullable", "string", "max:255", "unique:posts"]
        );
    }

    #[test]
    fn test_rule_set_display() {
        let set = RuleSet::new("title", vec!["required".to_string(), "string".to_string()]);
        assert_eq!(set.to_string(), "'title' => ['required', 'string']");
    }

    #[test]
    fn test_belongs_to_rules() {
        let relation = Relationship::new("belongsTo", "User").with_foreign_key("user_id");
        let resolved = RelationshipResolver::resolve(&relation, "Post").unwrap();

        let create = relationship_rules(&resolved, Mode::Create);
        assert_eq!(create, vec![RuleSet::new("user_id", vec!["required".into(), "exists:users,id".into()])]);

        let update = relationship_rules(&resolved, Mode::Update);
        assert_eq!(update[0].rules, vec!["sometimes", "required", "exists:users,id"]);
    }

    #[test]
    fn test_belongs_to_many_rules() {
        let relation = Relationship {
            pivot_columns: vec![
                PivotColumn {
                    name: "approved".to_string(),
                    column_type: "boolean".to_string(),
                    nullable: false,
                },
                PivotColumn {
                    name: "approved_at".to_string(),
                    column_type: "timestamp".to_string(),
                    nullable: true,
                },
            ],
            ..Relationship::new("belongsToMany", "Tag")
        };
        let resolved = RelationshipResolver::resolve(&relation, "Post").unwrap();

        let sets = relationship_rules(&resolved, Mode::Create);
        assert_eq!(sets.len(), 3);
        assert_eq!(sets[0].to_string(), "'tags' => ['required', 'array', 'exists:tags,id']");
        assert_eq!(sets[1].to_string(), "'approved' => ['required', 'boolean']");
        assert_eq!(sets[2].to_string(), "'approved_at' => ['nullable', 'date']");
    }

    #[test]
    fn test_nullable_belongs_to_many_is_optional() {
        let relation = Relationship {
            nullable: true,
            ..Relationship::new("belongsToMany", "Tag")
        };
        let resolved = RelationshipResolver::resolve(&relation, "Post").unwrap();

        let create = relationship_rules(&resolved, Mode::Create);
        assert_eq!(create[0].rules, vec!["nullable", "array", "exists:tags,id"]);

        let update = relationship_rules(&resolved, Mode::Update);
        assert_eq!(update[0].rules, vec!["sometimes", "nullable", "array", "exists:tags,id"]);
    }

    #[test]
    fn test_through_has_no_rules() {
        let relation = Relationship::new("hasOneThrough", "Owner").with_through("Car");
        let resolved = RelationshipResolver::resolve(&relation, "Mechanic").unwrap();
        assert!(relationship_rules(&resolved, Mode::Create).is_empty());
    }
}
