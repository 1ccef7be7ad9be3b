use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::session::Scope;

/// Global Cache Nuker configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Scope a session starts in
    #[serde(default)]
    pub default_scope: Scope,

    /// Browser profile directory cleared by the profile backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_dir: Option<PathBuf>,

    /// Pause after each category so progress stays readable
    #[serde(default = "default_step_delay_ms")]
    pub step_delay_ms: u64,

    /// Pause on the final progress frame before results are shown
    #[serde(default = "default_finish_delay_ms")]
    pub finish_delay_ms: u64,

    /// Output format used when `--format` is not given
    #[serde(default)]
    pub output_format: OutputFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
    Quiet,
}

fn default_step_delay_ms() -> u64 {
    250
}
fn default_finish_delay_ms() -> u64 {
    500
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_scope: Scope::Global,
            profile_dir: None,
            step_delay_ms: default_step_delay_ms(),
            finish_delay_ms: default_finish_delay_ms(),
            output_format: OutputFormat::Human,
        }
    }
}

impl Config {
    /// Get the Cache Nuker data directory (~/.cachenuker)
    pub fn data_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp"))
            .join(".cachenuker")
    }

    /// Get the config file path
    pub fn config_path() -> PathBuf {
        Self::data_dir().join("config.toml")
    }

    /// Load config from file, or fall back to defaults if not exists
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            let config: Config = toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config: {}", path.display()))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config dir: {}", dir.display()))?;
        }
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Initialize the Cache Nuker data directory
    pub fn init_dirs() -> Result<()> {
        let dir = Self::data_dir();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        Ok(())
    }

    /// Apply a `config set KEY VALUE` assignment
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "default_scope" => {
                self.default_scope = match value {
                    "global" => Scope::Global,
                    "site" => Scope::Site,
                    _ => anyhow::bail!("Invalid scope '{}'. Expected 'global' or 'site'", value),
                }
            }
            "profile_dir" => self.profile_dir = Some(PathBuf::from(value)),
            "step_delay_ms" => self.step_delay_ms = value.parse()?,
            "finish_delay_ms" => self.finish_delay_ms = value.parse()?,
            "output_format" => {
                self.output_format = match value {
                    "human" => OutputFormat::Human,
                    "json" => OutputFormat::Json,
                    "quiet" => OutputFormat::Quiet,
                    _ => anyhow::bail!("Invalid output format '{}'", value),
                }
            }
            _ => anyhow::bail!("Unknown config key: {}", key),
        }
        Ok(())
    }

    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }

    pub fn finish_delay(&self) -> Duration {
        Duration::from_millis(self.finish_delay_ms)
    }
}
