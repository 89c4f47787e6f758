//! Optional service/repository scaffolding
//!
//! Service and repository classes come from an external generator. This
//! crate only decides whether to call it and with which mode flags.

use crate::config::ScaffoldConfig;
use crate::{Result, SketchError};
use std::process::Command;

/// Which scaffolding modes were requested
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScaffoldOptions {
    pub service_repository: bool,
    pub service_only: bool,
    pub repository_only: bool,
}

impl ScaffoldOptions {
    pub fn is_empty(&self) -> bool {
        !(self.service_repository || self.service_only || self.repository_only)
    }

    /// Flags of the requested modes, in a fixed order
    pub fn flags(&self) -> Vec<&'static str> {
        [
            (self.service_repository, "--service-repository"),
            (self.service_only, "--service-only"),
            (self.repository_only, "--repository-only"),
        ]
        .into_iter()
        .filter_map(|(requested, flag)| requested.then_some(flag))
        .collect()
    }
}

/// Pluggable service/repository generator
pub trait ServiceScaffolder {
    /// Run every requested mode for `model`, returning one message per success
    fn generate(&self, model: &str, options: &ScaffoldOptions) -> Result<Vec<String>>;
}

impl<T: ServiceScaffolder + ?Sized> ServiceScaffolder for &T {
    fn generate(&self, model: &str, options: &ScaffoldOptions) -> Result<Vec<String>> {
        (**self).generate(model, options)
    }
}

/// Scaffolder used when no external generator is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopScaffolder;

impl ServiceScaffolder for NoopScaffolder {
    fn generate(&self, model: &str, options: &ScaffoldOptions) -> Result<Vec<String>> {
        if !options.is_empty() {
            log::warn!(
                "Scaffolding requested for {} but no [scaffold] command is configured",
                model
            );
        }
        Ok(Vec::new())
    }
}

/// Runs an external command once per requested mode
///
/// The command line is `program args... <mode flag> <model>`. A failing mode
/// is logged and skipped so the other modes still run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandScaffolder {
    program: String,
    args: Vec<String>,
}

impl CommandScaffolder {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Build from `[scaffold] command`, if one is set
    pub fn from_config(config: &ScaffoldConfig) -> Option<Self> {
        let (program, args) = config.command.split_first()?;
        Some(Self::new(program.clone(), args.to_vec()))
    }

    fn run(&self, flag: &str, model: &str) -> Result<String> {
        log::debug!("Running {} {:?} {} {}", self.program, self.args, flag, model);

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(flag)
            .arg(model)
            .output()
            .map_err(|e| SketchError::Scaffold(format!("Failed to run '{}': {}", self.program, e)))?;

        if !output.status.success() {
            return Err(SketchError::Scaffold(format!(
                "'{} {}' exited with {}: {}",
                self.program,
                flag,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(format!("{} {} completed for {}", self.program, flag, model))
    }
}

impl ServiceScaffolder for CommandScaffolder {
    fn generate(&self, model: &str, options: &ScaffoldOptions) -> Result<Vec<String>> {
        let mut messages = Vec::new();

        for flag in options.flags() {
            match self.run(flag, model) {
                Ok(message) => messages.push(message),
                Err(e) => log::error!("Scaffolding {} for {} failed: {}", flag, model, e),
            }
        }

        Ok(messages)
    }
}
