//! CLI configuration

use std::path::{Path, PathBuf};

use anyhow::Context;
use routegraph_core::limits::{DEFAULT_MAX_FRONTIER, DEFAULT_MAX_STEPS};
use routegraph_core::TraversalLimits;
use serde::{Deserialize, Serialize};

/// Get default config file path
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("routegraph")
        .join("config.toml")
}

/// Configuration for the CLI
///
/// A limit of `0` disables that limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub format: String,
    pub max_steps: usize,
    pub max_frontier: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: "table".to_string(),
            max_steps: DEFAULT_MAX_STEPS,
            max_frontier: DEFAULT_MAX_FRONTIER,
        }
    }
}

impl Config {
    /// Load config from `path`, falling back to defaults when the file is missing
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn keys() -> &'static [&'static str] {
        &["format", "max_steps", "max_frontier"]
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "format" => Some(self.format.clone()),
            "max_steps" => Some(self.max_steps.to_string()),
            "max_frontier" => Some(self.max_frontier.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "format" => match value {
                "table" | "json" => self.format = value.to_string(),
                _ => anyhow::bail!("Unknown format '{}': expected table or json", value),
            },
            "max_steps" => self.max_steps = value.parse()?,
            "max_frontier" => self.max_frontier = value.parse()?,
            _ => anyhow::bail!("Unknown config key: {}", key),
        }
        Ok(())
    }

    /// Traversal limits, with `overrides` taking precedence over the file
    pub fn limits(&self, max_steps: Option<usize>, max_frontier: Option<usize>) -> TraversalLimits {
        TraversalLimits {
            max_steps: non_zero(max_steps.unwrap_or(self.max_steps)),
            max_frontier: non_zero(max_frontier.unwrap_or(self.max_frontier)),
        }
    }
}

fn non_zero(limit: usize) -> Option<usize> {
    (limit > 0).then_some(limit)
}
