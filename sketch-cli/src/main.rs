use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "sketch")]
#[command(about = "Generate models, migrations, form requests and actions from YAML model blueprints")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Project directory (defaults to current directory)
    #[arg(short = 'P', long, global = true)]
    project: Option<PathBuf>,

    /// Config file (defaults to sketch.toml in the project directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate every artifact for one blueprint
    Generate(commands::generate::GenerateCommand),

    /// Create a starter blueprint file
    MakeBlueprint(commands::blueprint::MakeBlueprintCommand),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    let project_path = match cli.project {
        Some(path) => path,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };
    let config = commands::load_config(&project_path, cli.config.as_deref())?;

    match cli.command {
        Commands::Generate(cmd) => cmd.execute(&config),
        Commands::MakeBlueprint(cmd) => cmd.execute(&config),
    }
}
