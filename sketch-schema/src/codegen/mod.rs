//! Code generation for the artifacts of one schema
//!
//! Every generator renders through a shared [`TemplateGenerator`]:
//! - Eloquent model class
//! - Table migration, including pivot tables
//! - Create and update form requests
//! - CRUD actions class

use crate::config::SketchConfig;
use crate::{Result, Schema, SketchError};
use handlebars::Handlebars;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

pub mod actions;
pub mod migration;
pub mod model;
pub mod templates;
pub mod validation;

pub use actions::ActionGenerator;
pub use migration::MigrationGenerator;
pub use model::ModelGenerator;
pub use validation::ValidationGenerator;

/// Placeholder values for one render
pub type TemplateData<'a> = BTreeMap<&'a str, String>;

/// Kinds of generated files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArtifactKind {
    Model,
    Migration,
    CreateRequest,
    UpdateRequest,
    Action,
}

impl ArtifactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Model => "model",
            ArtifactKind::Migration => "migration",
            ArtifactKind::CreateRequest => "create request",
            ArtifactKind::UpdateRequest => "update request",
            ArtifactKind::Action => "action",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rendered file, not yet written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub content: String,
}

/// Base trait for code generators
pub trait CodeGenerator {
    /// Short name used in error context
    fn name(&self) -> &'static str;

    /// Render every artifact this generator produces for `schema`
    fn generate(&self, schema: &Schema) -> Result<Vec<Artifact>>;
}

/// Template-based renderer shared by all generators
pub struct TemplateGenerator {
    handlebars: Handlebars<'static>,
}

impl TemplateGenerator {
    pub const MODEL: &'static str = "model";
    pub const MIGRATION: &'static str = "migration";
    pub const REQUEST: &'static str = "request";
    pub const ACTION: &'static str = "action";

    /// Create a renderer with no templates registered
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();

        // Output is PHP, never HTML
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.set_strict_mode(true);

        Self { handlebars }
    }

    /// Register the built-in stubs
    pub fn builtin() -> Result<Self> {
        Self::from_config(&SketchConfig::default())
    }

    /// Register the stubs named in the config, falling back to the built-in ones
    pub fn from_config(config: &SketchConfig) -> Result<Self> {
        let mut generator = Self::new();
        let stubs = [
            (Self::MODEL, &config.stubs.model, templates::MODEL_TEMPLATE),
            (Self::MIGRATION, &config.stubs.migration, templates::MIGRATION_TEMPLATE),
            (Self::REQUEST, &config.stubs.request, templates::REQUEST_TEMPLATE),
            (Self::ACTION, &config.stubs.action, templates::ACTION_TEMPLATE),
        ];

        for (name, custom, builtin) in stubs {
            match custom {
                Some(path) => {
                    let source = Self::read_stub(name, path)?;
                    generator.register_template(name, &source)?;
                }
                None => generator.register_template(name, builtin)?,
            }
        }

        Ok(generator)
    }

    fn read_stub(name: &str, path: &Path) -> Result<String> {
        log::debug!("Using custom {} stub {}", name, path.display());
        fs::read_to_string(path).map_err(|e| {
            SketchError::Template(format!(
                "Stub for {} not found at '{}': {}",
                name,
                path.display(),
                e
            ))
        })
    }

    /// Register a template
    pub fn register_template(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(|e| SketchError::Template(format!("Template registration failed for {}: {}", name, e)))
    }

    /// Render a template with placeholder values
    pub fn render(&self, template_name: &str, data: &TemplateData<'_>) -> Result<String> {
        self.handlebars
            .render(template_name, data)
            .map_err(|e| SketchError::Template(format!("Template rendering failed for {}: {}", template_name, e)))
    }
}

impl Default for TemplateGenerator {
    fn default() -> Self {
        Self::new()
    }
}
