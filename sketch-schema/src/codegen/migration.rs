//! Migration generator
//!
//! Column order in the main table is fixed: primary key, fields, foreign
//! keys, timestamps, soft deletes. Each belongsToMany relationship adds its
//! own `Schema::create` block after the main table.

use super::{Artifact, ArtifactKind, CodeGenerator, TemplateData, TemplateGenerator};
use crate::config::SketchConfig;
use crate::naming::table_name;
use crate::relations::{DirectRelation, PivotRelation, PivotSide, ResolvedRelationship};
use crate::{Field, FieldType, PrimaryKey, Result, Schema};
use std::fmt::Write;
use std::path::PathBuf;

/// chrono format of the migration file prefix, e.g. `2024_01_31_120000`
pub const TIMESTAMP_FORMAT: &str = "%Y_%m_%d_%H%M%S";

const COLUMN_INDENT: &str = "            ";
const CHAIN_INDENT: &str = "                ";

pub struct MigrationGenerator<'a> {
    config: &'a SketchConfig,
    templates: &'a TemplateGenerator,
    timestamp: String,
}

impl<'a> MigrationGenerator<'a> {
    /// Generator stamping file names with the current local time
    pub fn new(config: &'a SketchConfig, templates: &'a TemplateGenerator) -> Self {
        Self {
            config,
            templates,
            timestamp: chrono::Local::now().format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    /// Use a fixed file name prefix instead of the current time
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    /// `<migrations>/<timestamp>_create_<table>_table.php`
    pub fn output_path(&self, schema: &Schema) -> PathBuf {
        self.config
            .paths
            .migrations
            .join(format!("{}_{}", self.timestamp, file_suffix(schema)))
    }

    /// Render the migration class
    pub fn render(&self, schema: &Schema) -> Result<String> {
        let relations = schema.resolved_relationships()?;
        let table = table_name(&schema.model);

        let pivots: Vec<&PivotRelation> = relations
            .iter()
            .filter_map(|relation| match relation {
                ResolvedRelationship::BelongsToMany(r) => Some(r),
                _ => None,
            })
            .collect();

        let mut data = TemplateData::new();
        data.insert("schema", table_body(schema, &relations));
        data.insert("pivots", pivots.iter().map(|r| pivot_block(r)).collect());
        data.insert("drops", drops(&table, &pivots));
        data.insert("table", table);

        self.templates.render(TemplateGenerator::MIGRATION, &data)
    }
}

impl CodeGenerator for MigrationGenerator<'_> {
    fn name(&self) -> &'static str {
        "migration"
    }

    fn generate(&self, schema: &Schema) -> Result<Vec<Artifact>> {
        Ok(vec![Artifact {
            kind: ArtifactKind::Migration,
            path: self.output_path(schema),
            content: self.render(schema)?,
        }])
    }
}

/// `create_<table>_table.php`, shared by every run for the same model
pub fn file_suffix(schema: &Schema) -> String {
    format!("create_{}_table.php", table_name(&schema.model))
}

fn table_body(schema: &Schema, relations: &[ResolvedRelationship]) -> String {
    let mut body = String::new();

    line(&mut body, &primary_key(&schema.primary_key));
    for field in &schema.fields {
        line(&mut body, &column(field));
    }
    for relation in relations.iter().filter_map(ResolvedRelationship::as_direct) {
        body.push_str(&foreign_key(relation));
    }
    if schema.timestamps {
        line(&mut body, "$table->timestamps()");
    }
    if schema.soft_deletes {
        line(&mut body, "$table->softDeletes()");
    }

    body
}

fn line(out: &mut String, statement: &str) {
    let _ = writeln!(out, "{}{};", COLUMN_INDENT, statement);
}

fn primary_key(pk: &PrimaryKey) -> String {
    format!("$table->{}('{}')->primary()", pk.key_type, pk.name)
}

fn column(field: &Field) -> String {
    let mut column = match field.field_type {
        FieldType::Enum => format!("$table->enum('{}', ['{}'])", field.name, field.options.join("', '")),
        _ => format!("$table->{}('{}')", field.field_type.column_type(), field.name),
    };
    if field.nullable {
        column.push_str("->nullable()");
    }
    column
}

/// `foreignId`, `foreignUuid` or `foreignUlid` by key type
fn foreign_method(key_type: &str) -> &'static str {
    match key_type {
        "uuid" => "foreignUuid",
        "ulid" => "foreignUlid",
        _ => "foreignId",
    }
}

fn constraint(key: &str, key_type: &str, nullable: bool, references: &str, on: &str, on_update: &str, on_delete: &str) -> String {
    let mut block = format!("{}$table->{}('{}')\n", COLUMN_INDENT, foreign_method(key_type), key);
    if nullable {
        let _ = writeln!(block, "{}->nullable()", CHAIN_INDENT);
    }
    let _ = writeln!(block, "{}->references('{}')", CHAIN_INDENT, references);
    let _ = writeln!(block, "{}->on('{}')", CHAIN_INDENT, on);
    let _ = writeln!(block, "{}->onUpdate('{}')", CHAIN_INDENT, on_update);
    let _ = writeln!(block, "{}->onDelete('{}');", CHAIN_INDENT, on_delete);
    block
}

fn foreign_key(r: &DirectRelation) -> String {
    constraint(
        &r.foreign_key,
        &r.key_type,
        r.target.nullable,
        &r.parent_key,
        &r.table,
        &r.on_update,
        &r.on_delete,
    )
}

fn pivot_foreign_key(side: &PivotSide) -> String {
    constraint(&side.key, &side.key_type, false, &side.references, &side.table, "cascade", "cascade")
}

fn pivot_block(r: &PivotRelation) -> String {
    let mut block = format!(
        "\n        Schema::create('{}', function (Blueprint $table) {{\n",
        r.pivot_table
    );

    if r.key_type == "integer" {
        line(&mut block, "$table->id()");
    } else {
        line(&mut block, &format!("$table->{}('id')->primary()", r.key_type));
    }
    block.push_str(&pivot_foreign_key(&r.foreign_pivot));
    block.push_str(&pivot_foreign_key(&r.related_pivot));
    for extra in &r.columns {
        let nullable = if extra.nullable { "->nullable()" } else { "" };
        line(&mut block, &format!("$table->{}('{}'){}", extra.column_type, extra.name, nullable));
    }
    if r.with_timestamps {
        line(&mut block, "$table->timestamps()");
    }

    block.push_str("        });\n");
    block
}

/// Pivot tables reference the main table, so they are dropped first
fn drops(table: &str, pivots: &[&PivotRelation]) -> String {
    pivots
        .iter()
        .map(|r| r.pivot_table.as_str())
        .chain(std::iter::once(table))
        .map(|name| format!("        Schema::dropIfExists('{}');\n", name))
        .collect()
}
