//! `sketch generate`

use anyhow::{Context, Result};
use clap::Args;
use sketch_schema::{GenerateOptions, Orchestrator, ScaffoldOptions, SketchConfig, TemplateGenerator};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct GenerateCommand {
    /// Path to the blueprint YAML file
    #[arg(short, long)]
    pub file: PathBuf,

    /// Overwrite existing files
    #[arg(long)]
    pub force: bool,

    /// Also scaffold a service and a repository
    #[arg(long)]
    pub service_repository: bool,

    /// Also scaffold a service
    #[arg(long)]
    pub service_only: bool,

    /// Also scaffold a repository
    #[arg(long)]
    pub repository_only: bool,
}

impl GenerateCommand {
    pub fn execute(self, config: &SketchConfig) -> Result<()> {
        let templates = TemplateGenerator::from_config(config)?;
        let options = GenerateOptions {
            force: self.force,
            scaffold: ScaffoldOptions {
                service_repository: self.service_repository,
                service_only: self.service_only,
                repository_only: self.repository_only,
            },
        };

        log::info!("Generating from {}", self.file.display());
        let report = Orchestrator::new(config, &templates)
            .run_file(&self.file, &options)
            .with_context(|| format!("Failed to generate from {}", self.file.display()))?;

        for outcome in &report.outcomes {
            println!("{}: {} ({})", outcome.status, outcome.path.display(), outcome.kind);
        }
        for message in &report.scaffolded {
            println!("scaffolded: {}", message);
        }

        log::info!(
            "{}: {} generated, {} skipped",
            report.model,
            report.written(),
            report.skipped()
        );
        Ok(())
    }
}
