pub mod blueprint;
pub mod generate;

use anyhow::{Context, Result};
use sketch_schema::SketchConfig;
use std::path::Path;

/// Load the project config, from an explicit file when one is given
pub fn load_config(project_path: &Path, config_path: Option<&Path>) -> Result<SketchConfig> {
    let config = match config_path {
        Some(path) => SketchConfig::load_from(path, project_path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => SketchConfig::load_with_base_dir(project_path)?,
    };

    log::debug!("Models: {}", config.paths.models.display());
    log::debug!("Migrations: {}", config.paths.migrations.display());
    Ok(config)
}
