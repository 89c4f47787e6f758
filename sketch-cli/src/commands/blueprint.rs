//! `sketch make-blueprint`

use anyhow::Result;
use clap::Args;
use sketch_schema::{Blueprint, SketchConfig};

#[derive(Debug, Args)]
pub struct MakeBlueprintCommand {
    /// Model name, optionally nested like `blog/post`
    pub name: String,

    /// Enable soft deletes in the starter blueprint
    #[arg(long)]
    pub soft_delete: bool,
}

impl MakeBlueprintCommand {
    pub fn execute(self, config: &SketchConfig) -> Result<()> {
        let path = Blueprint::new(config).create(&self.name, self.soft_delete)?;

        println!("created: {}", path.display());
        println!("\nNext: sketch generate --file {}", path.display());
        Ok(())
    }
}
