//! Generator configuration
//!
//! Loaded from `sketch.toml` in the project root. Every key is optional, and
//! a missing file yields the defaults. Output directories may also be
//! overridden through `SKETCH_*` environment variables.

use crate::{Result, SketchError};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Config file looked up in the base directory
pub const CONFIG_FILE: &str = "sketch.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SketchConfig {
    /// Namespace of generated models; request and action namespaces derive from it
    #[serde(default = "default_model_namespace")]
    pub model_namespace: String,

    /// Whether new blueprints enable timestamps
    #[serde(default = "default_timestamps")]
    pub timestamps: bool,

    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub stubs: StubsConfig,

    #[serde(default)]
    pub scaffold: ScaffoldConfig,
}

/// Output directories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_models_path")]
    pub models: PathBuf,

    #[serde(default = "default_migrations_path")]
    pub migrations: PathBuf,

    #[serde(default = "default_requests_path")]
    pub requests: PathBuf,

    #[serde(default = "default_actions_path")]
    pub actions: PathBuf,

    #[serde(default = "default_blueprints_path")]
    pub blueprints: PathBuf,
}

/// Custom stub files replacing the built-in templates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StubsConfig {
    #[serde(default)]
    pub model: Option<PathBuf>,

    #[serde(default)]
    pub migration: Option<PathBuf>,

    #[serde(default)]
    pub request: Option<PathBuf>,

    #[serde(default)]
    pub action: Option<PathBuf>,
}

/// External service/repository generator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScaffoldConfig {
    /// Program and leading arguments; the mode flag and model name are appended
    #[serde(default)]
    pub command: Vec<String>,
}

fn default_model_namespace() -> String {
    "App\\Models".to_string()
}
fn default_timestamps() -> bool {
    true
}
fn default_models_path() -> PathBuf {
    PathBuf::from("app/Models")
}
fn default_migrations_path() -> PathBuf {
    PathBuf::from("database/migrations")
}
fn default_requests_path() -> PathBuf {
    PathBuf::from("app/Http/Requests")
}
fn default_actions_path() -> PathBuf {
    PathBuf::from("app/Actions")
}
fn default_blueprints_path() -> PathBuf {
    PathBuf::from("resources/blueprints")
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            model_namespace: default_model_namespace(),
            timestamps: default_timestamps(),
            paths: PathsConfig::default(),
            stubs: StubsConfig::default(),
            scaffold: ScaffoldConfig::default(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            models: default_models_path(),
            migrations: default_migrations_path(),
            requests: default_requests_path(),
            actions: default_actions_path(),
            blueprints: default_blueprints_path(),
        }
    }
}

impl SketchConfig {
    /// Load `sketch.toml` from the current directory
    pub fn load() -> Result<Self> {
        Self::load_with_base_dir(".")
    }

    /// Load `sketch.toml` from `base_dir`, falling back to defaults
    ///
    /// Relative paths are resolved against `base_dir`.
    pub fn load_with_base_dir<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        let config_path = base_dir.join(CONFIG_FILE);

        let mut config = if config_path.exists() {
            Self::from_file(&config_path)?
        } else {
            log::debug!("No {} in {}, using defaults", CONFIG_FILE, base_dir.display());
            Self::default()
        };

        config.apply_env_overrides();
        config.resolve_paths(base_dir);
        Ok(config)
    }

    /// Load an explicitly named config file, which must exist
    pub fn load_from<P: AsRef<Path>, Q: AsRef<Path>>(config_path: P, base_dir: Q) -> Result<Self> {
        let mut config = Self::from_file(config_path)?;
        config.apply_env_overrides();
        config.resolve_paths(base_dir.as_ref());
        Ok(config)
    }

    /// Parse a TOML config file without overrides or path resolution
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();

        let content = fs::read_to_string(path_ref).map_err(|e| {
            SketchError::Config(format!(
                "Failed to read config file '{}': {}",
                path_ref.display(),
                e
            ))
        })?;

        let config: SketchConfig = toml::from_str(&content).map_err(|e| {
            SketchError::Config(format!(
                "Failed to parse config file '{}': {}. Check TOML syntax.",
                path_ref.display(),
                e
            ))
        })?;

        log::debug!("Loaded configuration from {}", path_ref.display());
        Ok(config)
    }

    /// Apply `SKETCH_*` environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| env::var(key).ok());
    }

    fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let paths = [
            ("SKETCH_MODELS_PATH", &mut self.paths.models),
            ("SKETCH_MIGRATIONS_PATH", &mut self.paths.migrations),
            ("SKETCH_REQUESTS_PATH", &mut self.paths.requests),
            ("SKETCH_ACTIONS_PATH", &mut self.paths.actions),
            ("SKETCH_BLUEPRINTS_PATH", &mut self.paths.blueprints),
        ];
        for (key, target) in paths {
            if let Some(value) = lookup(key).filter(|v| !v.is_empty()) {
                log::debug!("{} overrides path with {}", key, value);
                *target = PathBuf::from(value);
            }
        }

        if let Some(namespace) = lookup("SKETCH_MODEL_NAMESPACE").filter(|v| !v.is_empty()) {
            self.model_namespace = namespace;
        }
    }

    /// Make relative output and stub paths absolute against `base_dir`
    pub fn resolve_paths(&mut self, base_dir: &Path) {
        let resolve = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base_dir.join(&*path);
            }
        };

        resolve(&mut self.paths.models);
        resolve(&mut self.paths.migrations);
        resolve(&mut self.paths.requests);
        resolve(&mut self.paths.actions);
        resolve(&mut self.paths.blueprints);

        for stub in [
            &mut self.stubs.model,
            &mut self.stubs.migration,
            &mut self.stubs.request,
            &mut self.stubs.action,
        ]
        .into_iter()
        .flatten()
        {
            resolve(stub);
        }
    }

    /// Namespace for the form requests of `model`
    pub fn request_namespace(&self, model: &str) -> String {
        self.model_namespace
            .replace("Models", &format!("Http\\Requests\\{}", model))
    }

    /// Namespace for the actions class of `model`
    pub fn action_namespace(&self, model: &str) -> String {
        format!("{}\\{}", self.model_namespace.replace("Models", "Actions"), model)
    }
}
