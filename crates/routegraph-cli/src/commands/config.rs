//! Config command for managing CLI configuration

use clap::{Args, Subcommand};

use crate::config::Config;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Get a config value
    Get {
        /// Config key name
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key name
        key: String,
        /// New value
        value: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
    /// Initialize default config file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

pub fn run(args: &ConfigArgs, path: &std::path::Path) -> anyhow::Result<()> {
    match &args.command {
        ConfigCommands::Get { key } => {
            let config = Config::load(path)?;
            match config.get(key) {
                Some(value) => println!("{}", value),
                None => anyhow::bail!(
                    "Unknown config key: {} (available: {})",
                    key,
                    Config::keys().join(", ")
                ),
            }
        }
        ConfigCommands::Set { key, value } => {
            let mut config = Config::load(path)?;
            config.set(key, value)?;
            config.save(path)?;
            tracing::info!("Updated config at {}", path.display());
            println!("Set {} = {}", key, value);
        }
        ConfigCommands::List => {
            let config = Config::load(path)?;
            println!("Config file: {}", path.display());
            println!();
            for key in Config::keys() {
                let value = config.get(key).unwrap_or_default();
                println!("{} = {}", key, value);
            }
        }
        ConfigCommands::Path => println!("{}", path.display()),
        ConfigCommands::Init { force } => {
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            Config::default().save(path)?;
            println!("Created config file at {}", path.display());
        }
    }
    Ok(())
}
