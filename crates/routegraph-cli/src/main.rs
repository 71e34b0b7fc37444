//! Routegraph CLI - Run graph traversals from the command line

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod graph_args;
mod output;

use commands::{best, completions, hops};
use config::Config;
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "routegraph")]
#[command(author, version, about = "Shortest-hop and best-path search over small graphs")]
pub struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(short, long, env = "ROUTEGRAPH_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format: table, json (overrides the config file)
    #[arg(short, long, global = true)]
    pub format: Option<String>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Get the config file path
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(config::default_config_path)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find the path with the fewest edges between two nodes
    Hops(hops::HopsArgs),
    /// Find the best path to every node reachable from a start node
    Best(best::BestArgs),
    /// Manage configuration
    Config(commands::config::ConfigArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Settings resolved from the config file and global flags
pub struct AppContext {
    pub config: Config,
    pub format: OutputFormat,
}

impl AppContext {
    pub fn new(cli: &Cli) -> anyhow::Result<Self> {
        let path = cli.config_path();
        tracing::debug!("Using config at: {:?}", path);

        let config = Config::load(&path)?;
        let format = cli
            .format
            .as_deref()
            .unwrap_or(config.format.as_str())
            .into();

        Ok(Self { config, format })
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    tracing::debug!("Starting routegraph CLI");

    match &cli.command {
        Commands::Config(args) => commands::config::run(args, &cli.config_path())?,
        Commands::Completions(args) => completions::run(args)?,
        Commands::Hops(args) => {
            let ctx = AppContext::new(&cli)?;
            hops::run(args, &ctx)?
        }
        Commands::Best(args) => {
            let ctx = AppContext::new(&cli)?;
            best::run(args, &ctx)?
        }
    }

    Ok(())
}
