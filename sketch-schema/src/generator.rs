//! Generation run for one blueprint
//!
//! A run validates the schema and resolves every relationship, renders all
//! artifacts in memory, then writes them one by one. Nothing is written if
//! validation, resolution or rendering fails. Writes are independent: a
//! failed write does not undo earlier ones.

use crate::codegen::migration::file_suffix;
use crate::codegen::{
    ActionGenerator, Artifact, ArtifactKind, CodeGenerator, MigrationGenerator, ModelGenerator, TemplateGenerator,
    ValidationGenerator,
};
use crate::config::SketchConfig;
use crate::parser::SchemaParser;
use crate::relations::RelationshipResolver;
use crate::scaffold::{CommandScaffolder, NoopScaffolder, ScaffoldOptions, ServiceScaffolder};
use crate::validator::SchemaValidator;
use crate::{Result, Schema, SketchError};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Options for one run
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerateOptions {
    /// Overwrite files that already exist
    pub force: bool,
    pub scaffold: ScaffoldOptions,
}

/// What happened to one artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactStatus {
    Written,
    Skipped,
}

impl fmt::Display for ArtifactStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactStatus::Written => f.write_str("generated"),
            ArtifactStatus::Skipped => f.write_str("skipped: already exists"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactOutcome {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub status: ArtifactStatus,
}

/// Per-artifact outcomes of a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub model: String,
    pub outcomes: Vec<ArtifactOutcome>,
    /// Messages from successful scaffolding modes
    pub scaffolded: Vec<String>,
}

impl GenerationReport {
    pub fn written(&self) -> usize {
        self.count(ArtifactStatus::Written)
    }

    pub fn skipped(&self) -> usize {
        self.count(ArtifactStatus::Skipped)
    }

    fn count(&self, status: ArtifactStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }
}

/// Runs every generator for a schema and writes the results
pub struct Orchestrator<'a> {
    config: &'a SketchConfig,
    templates: &'a TemplateGenerator,
    scaffolder: Box<dyn ServiceScaffolder + 'a>,
    timestamp: Option<String>,
}

impl<'a> Orchestrator<'a> {
    /// Orchestrator using the scaffold command from the config, if any
    pub fn new(config: &'a SketchConfig, templates: &'a TemplateGenerator) -> Self {
        let scaffolder: Box<dyn ServiceScaffolder + 'a> = match CommandScaffolder::from_config(&config.scaffold) {
            Some(command) => Box::new(command),
            None => Box::new(NoopScaffolder),
        };

        Self {
            config,
            templates,
            scaffolder,
            timestamp: None,
        }
    }

    pub fn with_scaffolder(mut self, scaffolder: Box<dyn ServiceScaffolder + 'a>) -> Self {
        self.scaffolder = scaffolder;
        self
    }

    /// Fix the migration file name prefix instead of using the current time
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Parse a blueprint file and generate its artifacts
    pub fn run_file(&self, path: &Path, options: &GenerateOptions) -> Result<GenerationReport> {
        let schema = SchemaParser::parse_file(path)?;
        self.run(&schema, options)
    }

    /// Generate and write every artifact for `schema`
    pub fn run(&self, schema: &Schema, options: &GenerateOptions) -> Result<GenerationReport> {
        SchemaValidator::validate(schema)?;
        RelationshipResolver::resolve_all(schema)?;

        let artifacts = self.render_all(schema)?;
        log::debug!("Rendered {} artifacts for {}", artifacts.len(), schema.model);

        let mut report = GenerationReport {
            model: schema.model.clone(),
            ..Default::default()
        };

        for artifact in artifacts {
            let path = match artifact.kind {
                ArtifactKind::Migration => self.existing_migration(schema).unwrap_or_else(|| artifact.path.clone()),
                _ => artifact.path.clone(),
            };

            let status = match write_artifact(&path, &artifact.content, options.force) {
                Ok(()) => {
                    log::info!("Generated {} {}", artifact.kind, path.display());
                    ArtifactStatus::Written
                }
                Err(conflict @ SketchError::FileConflict(_)) => {
                    log::warn!("{}, skipping {}", conflict, artifact.kind);
                    ArtifactStatus::Skipped
                }
                Err(e) => return Err(e),
            };

            report.outcomes.push(ArtifactOutcome {
                kind: artifact.kind,
                path,
                status,
            });
        }

        if !options.scaffold.is_empty() {
            match self.scaffolder.generate(&schema.model, &options.scaffold) {
                Ok(messages) => report.scaffolded = messages,
                Err(e) => log::error!("Scaffolding for {} failed: {}", schema.model, e),
            }
        }

        Ok(report)
    }

    /// Render every artifact without touching the file system
    pub fn render_all(&self, schema: &Schema) -> Result<Vec<Artifact>> {
        let mut migration = MigrationGenerator::new(self.config, self.templates);
        if let Some(timestamp) = &self.timestamp {
            migration = migration.with_timestamp(timestamp.clone());
        }

        let generators: [&dyn CodeGenerator; 4] = [
            &ModelGenerator::new(self.config, self.templates),
            &migration,
            &ValidationGenerator::new(self.config, self.templates),
            &ActionGenerator::new(self.config, self.templates),
        ];

        let mut artifacts = Vec::new();
        for generator in generators {
            let rendered = generator.generate(schema).map_err(|e| SketchError::Generation {
                artifact: generator.name().to_string(),
                model: schema.model.clone(),
                source: Box::new(e),
            })?;
            artifacts.extend(rendered);
        }
        Ok(artifacts)
    }

    /// Newest migration already creating this schema's table
    fn existing_migration(&self, schema: &Schema) -> Option<PathBuf> {
        let dir = self.config.paths.migrations.to_string_lossy();
        let pattern = format!("{}/*_{}", glob::Pattern::escape(&dir), file_suffix(schema));

        let existing = glob::glob(&pattern).ok()?.filter_map(|entry| entry.ok()).max();
        if let Some(path) = &existing {
            log::debug!("Found existing migration {}", path.display());
        }
        existing
    }
}

/// Write one file, creating parent directories on demand
///
/// Returns [`SketchError::FileConflict`] when the file exists and `force` is off.
fn write_artifact(path: &Path, content: &str, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(SketchError::FileConflict(path.to_path_buf()));
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| SketchError::io(parent, e))?;
    }
    fs::write(path, content).map_err(|e| SketchError::io(path, e))
}
