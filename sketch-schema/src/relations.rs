//! Relationship resolution
//!
//! A [`Relationship`] as written in a blueprint leaves most keys optional.
//! [`RelationshipResolver::resolve`] turns it into a [`ResolvedRelationship`]
//! with every key filled in, so the model, migration and validation
//! generators all see the same names for the same declaration.

use crate::naming::{camel_case, class_basename, default_foreign_key, pivot_table_name, pluralize, table_name};
use crate::{PivotColumn, PivotKey, Relationship, Result, Schema, SketchError};
use std::fmt;
use std::str::FromStr;

const DEFAULT_KEY: &str = "id";
const DEFAULT_KEY_TYPE: &str = "integer";
const DEFAULT_CASCADE: &str = "cascade";

/// The six supported association kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    BelongsTo,
    HasOne,
    HasMany,
    BelongsToMany,
    HasOneThrough,
    HasManyThrough,
}

impl RelationKind {
    pub const ALL: [RelationKind; 6] = [
        RelationKind::BelongsTo,
        RelationKind::HasOne,
        RelationKind::HasMany,
        RelationKind::BelongsToMany,
        RelationKind::HasOneThrough,
        RelationKind::HasManyThrough,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RelationKind::BelongsTo => "belongsTo",
            RelationKind::HasOne => "hasOne",
            RelationKind::HasMany => "hasMany",
            RelationKind::BelongsToMany => "belongsToMany",
            RelationKind::HasOneThrough => "hasOneThrough",
            RelationKind::HasManyThrough => "hasManyThrough",
        }
    }

    /// Accessor class returned by the generated method
    pub fn class_name(&self) -> &'static str {
        match self {
            RelationKind::BelongsTo => "BelongsTo",
            RelationKind::HasOne => "HasOne",
            RelationKind::HasMany => "HasMany",
            RelationKind::BelongsToMany => "BelongsToMany",
            RelationKind::HasOneThrough => "HasOneThrough",
            RelationKind::HasManyThrough => "HasManyThrough",
        }
    }

    /// Kinds keyed by a single foreign key column
    pub fn is_direct(&self) -> bool {
        matches!(self, RelationKind::BelongsTo | RelationKind::HasOne | RelationKind::HasMany)
    }

    pub fn is_through(&self) -> bool {
        matches!(self, RelationKind::HasOneThrough | RelationKind::HasManyThrough)
    }

    /// Kinds whose accessor returns a collection
    pub fn is_plural(&self) -> bool {
        matches!(
            self,
            RelationKind::HasMany | RelationKind::BelongsToMany | RelationKind::HasManyThrough
        )
    }
}

impl FromStr for RelationKind {
    type Err = SketchError;

    fn from_str(s: &str) -> Result<Self> {
        RelationKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| SketchError::UnsupportedRelationship(s.to_string()))
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What every resolved relationship points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationTarget {
    /// Accessor method name on the owning model
    pub method: String,
    /// Related model as declared, possibly namespaced
    pub model: String,
    /// Last segment of `model`
    pub class_name: String,
    pub nullable: bool,
}

/// belongsTo, hasOne or hasMany
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectRelation {
    pub target: RelationTarget,
    pub foreign_key: String,
    /// Owner key for belongsTo, local key otherwise
    pub parent_key: String,
    pub key_type: String,
    pub on_update: String,
    pub on_delete: String,
    /// Table referenced by the constraint and the existence rule
    pub table: String,
    /// Column checked by the existence rule
    pub references: String,
}

/// One resolved side of a pivot table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PivotSide {
    pub key: String,
    pub key_type: String,
    pub references: String,
    pub table: String,
}

/// belongsToMany
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PivotRelation {
    pub target: RelationTarget,
    pub pivot_table: String,
    /// Primary key type of the pivot table
    pub key_type: String,
    /// Points back at the owning model
    pub foreign_pivot: PivotSide,
    /// Points at the related model
    pub related_pivot: PivotSide,
    pub columns: Vec<PivotColumn>,
    pub with_timestamps: bool,
}

/// hasOneThrough or hasManyThrough
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThroughRelation {
    pub target: RelationTarget,
    pub through: String,
    pub first_key: String,
    pub second_key: String,
    pub local_key: String,
    pub second_local_key: String,
}

/// A relationship with every optional key defaulted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedRelationship {
    BelongsTo(DirectRelation),
    HasOne(DirectRelation),
    HasMany(DirectRelation),
    BelongsToMany(PivotRelation),
    HasOneThrough(ThroughRelation),
    HasManyThrough(ThroughRelation),
}

impl ResolvedRelationship {
    pub fn kind(&self) -> RelationKind {
        match self {
            ResolvedRelationship::BelongsTo(_) => RelationKind::BelongsTo,
            ResolvedRelationship::HasOne(_) => RelationKind::HasOne,
            ResolvedRelationship::HasMany(_) => RelationKind::HasMany,
            ResolvedRelationship::BelongsToMany(_) => RelationKind::BelongsToMany,
            ResolvedRelationship::HasOneThrough(_) => RelationKind::HasOneThrough,
            ResolvedRelationship::HasManyThrough(_) => RelationKind::HasManyThrough,
        }
    }

    pub fn target(&self) -> &RelationTarget {
        match self {
            ResolvedRelationship::BelongsTo(r)
            | ResolvedRelationship::HasOne(r)
            | ResolvedRelationship::HasMany(r) => &r.target,
            ResolvedRelationship::BelongsToMany(r) => &r.target,
            ResolvedRelationship::HasOneThrough(r) | ResolvedRelationship::HasManyThrough(r) => &r.target,
        }
    }

    /// The foreign key side, for kinds that have one
    pub fn as_direct(&self) -> Option<&DirectRelation> {
        match self {
            ResolvedRelationship::BelongsTo(r)
            | ResolvedRelationship::HasOne(r)
            | ResolvedRelationship::HasMany(r) => Some(r),
            _ => None,
        }
    }
}

/// Relationship resolver
pub struct RelationshipResolver;

impl RelationshipResolver {
    /// Resolve one declaration owned by `owner`
    pub fn resolve(relation: &Relationship, owner: &str) -> Result<ResolvedRelationship> {
        let kind = RelationKind::from_str(&relation.kind)?;
        let target = Self::target(relation, kind);

        let resolved = match kind {
            RelationKind::BelongsTo => ResolvedRelationship::BelongsTo(Self::direct(relation, kind, owner, target)),
            RelationKind::HasOne => ResolvedRelationship::HasOne(Self::direct(relation, kind, owner, target)),
            RelationKind::HasMany => ResolvedRelationship::HasMany(Self::direct(relation, kind, owner, target)),
            RelationKind::BelongsToMany => ResolvedRelationship::BelongsToMany(Self::pivot(relation, owner, target)),
            RelationKind::HasOneThrough => ResolvedRelationship::HasOneThrough(Self::through(relation, owner, target)),
            RelationKind::HasManyThrough => {
                ResolvedRelationship::HasManyThrough(Self::through(relation, owner, target))
            }
        };

        log::trace!("Resolved {} {} -> {:?}", kind, relation.model, resolved);
        Ok(resolved)
    }

    /// Resolve every relationship of a schema, failing on the first unknown kind
    pub fn resolve_all(schema: &Schema) -> Result<Vec<ResolvedRelationship>> {
        schema
            .relationships
            .iter()
            .map(|relation| Self::resolve(relation, &schema.model))
            .collect()
    }

    fn target(relation: &Relationship, kind: RelationKind) -> RelationTarget {
        let class_name = class_basename(&relation.model).to_string();
        let method = if kind.is_plural() {
            camel_case(&pluralize(&class_name))
        } else {
            camel_case(&class_name)
        };

        RelationTarget {
            method,
            model: relation.model.clone(),
            class_name,
            nullable: relation.nullable,
        }
    }

    fn direct(relation: &Relationship, kind: RelationKind, owner: &str, target: RelationTarget) -> DirectRelation {
        let (foreign_key, parent_key) = if kind == RelationKind::BelongsTo {
            (
                or_default(&relation.foreign_key, || default_foreign_key(&target.class_name)),
                or_default(&relation.owner_key, || DEFAULT_KEY.to_string()),
            )
        } else {
            (
                or_default(&relation.foreign_key, || default_foreign_key(owner)),
                or_default(&relation.local_key, || DEFAULT_KEY.to_string()),
            )
        };

        DirectRelation {
            foreign_key,
            parent_key,
            key_type: or_default(&relation.key_type, || DEFAULT_KEY_TYPE.to_string()),
            on_update: or_default(&relation.on_update, || DEFAULT_CASCADE.to_string()),
            on_delete: or_default(&relation.on_delete, || DEFAULT_CASCADE.to_string()),
            table: or_default(&relation.table, || table_name(&target.class_name)),
            references: or_default(&relation.references, || DEFAULT_KEY.to_string()),
            target,
        }
    }

    fn pivot(relation: &Relationship, owner: &str, target: RelationTarget) -> PivotRelation {
        let pivot_table = or_default(&relation.pivot_table, || pivot_table_name(owner, &target.class_name));

        PivotRelation {
            pivot_table,
            key_type: or_default(&relation.pivot_table_key_type, || DEFAULT_KEY_TYPE.to_string()),
            foreign_pivot: Self::pivot_side(relation.foreign_pivot.as_ref(), owner),
            related_pivot: Self::pivot_side(relation.related_pivot.as_ref(), &target.class_name),
            columns: relation.pivot_columns.clone(),
            with_timestamps: relation.with_timestamps,
            target,
        }
    }

    fn pivot_side(declared: Option<&PivotKey>, model: &str) -> PivotSide {
        let empty = PivotKey::default();
        let declared = declared.unwrap_or(&empty);

        PivotSide {
            key: or_default(&declared.key, || default_foreign_key(model)),
            key_type: or_default(&declared.key_type, || DEFAULT_KEY_TYPE.to_string()),
            references: or_default(&declared.references, || DEFAULT_KEY.to_string()),
            table: or_default(&declared.table, || table_name(model)),
        }
    }

    fn through(relation: &Relationship, owner: &str, target: RelationTarget) -> ThroughRelation {
        let through = relation.through.clone().unwrap_or_default();

        ThroughRelation {
            first_key: or_default(&relation.first_key, || default_foreign_key(owner)),
            second_key: or_default(&relation.second_key, || default_foreign_key(&through)),
            local_key: or_default(&relation.local_key, || DEFAULT_KEY.to_string()),
            second_local_key: or_default(&relation.second_local_key, || DEFAULT_KEY.to_string()),
            through,
            target,
        }
    }
}

fn or_default(value: &Option<String>, default: impl FnOnce() -> String) -> String {
    match value.as_deref() {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => default(),
    }
}

impl Schema {
    /// Resolve every relationship declared by this schema
    pub fn resolved_relationships(&self) -> Result<Vec<ResolvedRelationship>> {
        RelationshipResolver::resolve_all(self)
    }
}
