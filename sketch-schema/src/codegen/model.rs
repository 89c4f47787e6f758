//! Eloquent model generator

use super::{Artifact, ArtifactKind, CodeGenerator, TemplateData, TemplateGenerator};
use crate::config::SketchConfig;
use crate::naming::{class_basename, table_name};
use crate::relations::{DirectRelation, PivotRelation, ResolvedRelationship, ThroughRelation};
use crate::{Result, Schema};
use std::collections::BTreeSet;
use std::path::PathBuf;

pub struct ModelGenerator<'a> {
    config: &'a SketchConfig,
    templates: &'a TemplateGenerator,
}

impl<'a> ModelGenerator<'a> {
    pub fn new(config: &'a SketchConfig, templates: &'a TemplateGenerator) -> Self {
        Self { config, templates }
    }

    /// `<models>/<Model>.php`
    pub fn output_path(&self, schema: &Schema) -> PathBuf {
        self.config
            .paths
            .models
            .join(format!("{}.php", class_basename(&schema.model)))
    }

    /// Render the model class
    pub fn render(&self, schema: &Schema) -> Result<String> {
        let relations = schema.resolved_relationships()?;
        let class = class_basename(&schema.model);

        let mut data = TemplateData::new();
        data.insert("namespace", self.config.model_namespace.clone());
        data.insert("class", class.to_string());
        data.insert("table", table_name(&schema.model));
        data.insert("imports", imports(schema, &relations));
        data.insert("traits", traits(schema));
        data.insert("fillable", fillable(schema));
        data.insert("casts", casts(schema));
        data.insert("relationships", accessors(class, &relations));

        self.templates.render(TemplateGenerator::MODEL, &data)
    }
}

impl CodeGenerator for ModelGenerator<'_> {
    fn name(&self) -> &'static str {
        "model"
    }

    fn generate(&self, schema: &Schema) -> Result<Vec<Artifact>> {
        Ok(vec![Artifact {
            kind: ArtifactKind::Model,
            path: self.output_path(schema),
            content: self.render(schema)?,
        }])
    }
}

/// Extra `use` lines, sorted, each ending in a newline
fn imports(schema: &Schema, relations: &[ResolvedRelationship]) -> String {
    let mut imports = BTreeSet::new();

    if schema.soft_deletes {
        imports.insert("Illuminate\\Database\\Eloquent\\SoftDeletes".to_string());
    }
    for relation in relations {
        imports.insert(format!(
            "Illuminate\\Database\\Eloquent\\Relations\\{}",
            relation.kind().class_name()
        ));
        imports.extend(qualified(&relation.target().model));
        if let ResolvedRelationship::HasOneThrough(r) | ResolvedRelationship::HasManyThrough(r) = relation {
            imports.extend(qualified(&r.through));
        }
    }

    imports.iter().map(|class| format!("use {};\n", class)).collect()
}

/// Fully qualified names need a `use`; bare names live in the model namespace
fn qualified(model: &str) -> Option<String> {
    model
        .contains('\\')
        .then(|| model.trim_start_matches('\\').to_string())
}

fn traits(schema: &Schema) -> String {
    if schema.soft_deletes {
        "HasFactory, SoftDeletes".to_string()
    } else {
        "HasFactory".to_string()
    }
}

fn fillable(schema: &Schema) -> String {
    if schema.fields.is_empty() {
        return String::new();
    }

    let entries: Vec<String> = schema
        .fields
        .iter()
        .map(|field| format!("        '{}'", field.name))
        .collect();
    format!("\n{},\n    ", entries.join(",\n"))
}

fn casts(schema: &Schema) -> String {
    let entries: Vec<String> = schema
        .fields
        .iter()
        .filter_map(|field| {
            field
                .field_type
                .cast()
                .map(|cast| format!("            '{}' => '{}'", field.name, cast))
        })
        .collect();

    if entries.is_empty() {
        "return [];".to_string()
    } else {
        format!("return [\n{},\n        ];", entries.join(",\n"))
    }
}

fn accessors(owner: &str, relations: &[ResolvedRelationship]) -> String {
    relations
        .iter()
        .map(|relation| {
            let body = match relation {
                ResolvedRelationship::BelongsTo(r) => belongs_to(r),
                ResolvedRelationship::HasOne(r) => has_one_or_many(owner, r, "hasOne", "HasOne", "associated with"),
                ResolvedRelationship::HasMany(r) => has_one_or_many(owner, r, "hasMany", "HasMany", "for"),
                ResolvedRelationship::BelongsToMany(r) => belongs_to_many(owner, r),
                ResolvedRelationship::HasOneThrough(r) => through(owner, r, "hasOneThrough", "HasOneThrough", "Get the"),
                ResolvedRelationship::HasManyThrough(r) => {
                    through(owner, r, "hasManyThrough", "HasManyThrough", "Get all")
                }
            };
            format!("\n\n{}", body)
        })
        .collect()
}

fn belongs_to(r: &DirectRelation) -> String {
    format!(
        r#"    /**
     * Get the {method} that owns the model.
     */
    public function {method}(): BelongsTo
    {{
        return $this->belongsTo({class}::class, '{foreign}', '{owner}');
    }}"#,
        method = r.target.method,
        class = r.target.class_name,
        foreign = r.foreign_key,
        owner = r.parent_key,
    )
}

fn has_one_or_many(owner: &str, r: &DirectRelation, call: &str, returns: &str, phrase: &str) -> String {
    format!(
        r#"    /**
     * Get the {method} {phrase} the {owner}.
     */
    public function {method}(): {returns}
    {{
        return $this->{call}({class}::class, '{foreign}', '{local}');
    }}"#,
        method = r.target.method,
        class = r.target.class_name,
        foreign = r.foreign_key,
        local = r.parent_key,
    )
}

fn belongs_to_many(owner: &str, r: &PivotRelation) -> String {
    let mut chain = String::new();
    if !r.columns.is_empty() {
        let names: Vec<&str> = r.columns.iter().map(|c| c.name.as_str()).collect();
        chain.push_str(&format!("->withPivot('{}')", names.join("', '")));
    }
    if r.with_timestamps {
        chain.push_str("->withTimestamps()");
    }

    format!(
        r#"    /**
     * The {method} that belong to the {owner}.
     */
    public function {method}(): BelongsToMany
    {{
        return $this->belongsToMany({class}::class, '{table}', '{foreign}', '{related}'){chain};
    }}"#,
        method = r.target.method,
        class = r.target.class_name,
        table = r.pivot_table,
        foreign = r.foreign_pivot.key,
        related = r.related_pivot.key,
    )
}

fn through(owner: &str, r: &ThroughRelation, call: &str, returns: &str, lead: &str) -> String {
    let through = class_basename(&r.through);

    format!(
        r#"    /**
     * {lead} {method} associated with the {owner} through {through}.
     */
    public function {method}(): {returns}
    {{
        return $this->{call}(
            {class}::class,
            {through}::class,
            '{first}',
            '{second}',
            '{local}',
            '{second_local}'
        );
    }}"#,
        method = r.target.method,
        class = r.target.class_name,
        first = r.first_key,
        second = r.second_key,
        local = r.local_key,
        second_local = r.second_local_key,
    )
}
