//! Sketch Schema - model blueprints and artifact generation
//!
//! This crate turns a YAML blueprint describing one data model (fields, primary
//! key, relationships, timestamps and soft deletes) into the boilerplate a web
//! application needs around it.
//!
//! # Features
//!
//! - **YAML blueprints** parsed and validated into a typed [`Schema`]
//! - **Relationship resolution** for the six association kinds, with every
//!   optional key defaulted by naming convention
//! - **Validation rules** derived from field types for create and update requests
//! - **Template-based generation** of model, migration, form request and action
//!   classes
//! - **Conflict-safe emission** that skips existing files unless forced
//!
//! # Example
//!
//! ```rust
//! use sketch_schema::{SchemaParser, SketchConfig, TemplateGenerator};
//! use sketch_schema::codegen::{CodeGenerator, ModelGenerator};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let schema = SchemaParser::parse(r#"
//! model: Post
//! fields:
//!   - { name: title, type: string }
//! relationships:
//!   - { type: belongsTo, model: User, foreignKey: user_id }
//! "#)?;
//!
//! let config = SketchConfig::default();
//! let templates = TemplateGenerator::from_config(&config)?;
//! let generator = ModelGenerator::new(&config, &templates);
//! let artifacts = generator.generate(&schema)?;
//! assert!(artifacts[0].content.contains("public function user(): BelongsTo"));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

use std::path::PathBuf;
use thiserror::Error;

pub mod blueprint;
pub mod codegen;
pub mod config;
pub mod generator;
pub mod naming;
pub mod parser;
pub mod relations;
pub mod rules;
pub mod scaffold;
pub mod types;
pub mod validator;

pub use blueprint::Blueprint;
pub use codegen::{Artifact, ArtifactKind, TemplateGenerator};
pub use config::SketchConfig;
pub use generator::{ArtifactOutcome, ArtifactStatus, GenerateOptions, GenerationReport, Orchestrator};
pub use parser::SchemaParser;
pub use relations::{RelationKind, RelationshipResolver, ResolvedRelationship};
pub use rules::{Mode, RuleSet};
pub use scaffold::{CommandScaffolder, NoopScaffolder, ScaffoldOptions, ServiceScaffolder};
pub use types::*;
pub use validator::SchemaValidator;

/// Sketch errors
#[derive(Error, Debug)]
pub enum SketchError {
    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Unsupported relationship type: {0}")]
    UnsupportedRelationship(String),

    #[error("File already exists: {}", .0.display())]
    FileConflict(PathBuf),

    #[error("IO error at '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Template error: {0}")]
    Template(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Scaffolding error: {0}")]
    Scaffold(String),

    #[error("Failed to generate {artifact} for model '{model}': {source}")]
    Generation {
        artifact: String,
        model: String,
        #[source]
        source: Box<SketchError>,
    },
}

impl SketchError {
    /// Attach the failing path to an IO error
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SketchError::Io {
            path: path.into(),
            source,
        }
    }

    /// The innermost error, looking through generation context wrappers
    pub fn root(&self) -> &SketchError {
        match self {
            SketchError::Generation { source, .. } => source.root(),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, SketchError>;

/// Validation result containing all errors and warnings
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Create a new empty validation result
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a validation error
    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
    }

    /// Add a validation warning
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Check if there are any validation errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check if there are any validation warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Merge another validation result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// Convert to a schema error if there are validation errors
    ///
    /// The first error leads the message so single-problem blueprints read naturally.
    pub fn into_result(self) -> Result<()> {
        match self.errors.len() {
            0 => Ok(()),
            1 => Err(SketchError::Schema(self.errors.join(""))),
            n => Err(SketchError::Schema(format!(
                "{} (and {} more):\n{}",
                self.errors[0],
                n - 1,
                self.errors.join("\n")
            ))),
        }
    }
}
