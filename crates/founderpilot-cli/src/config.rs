//! Configuration file management for founderpilot.
//!
//! Provides a TOML-based config file at
//! `~/.config/founderpilot/config.toml` and a resolution chain:
//! CLI flag > env var > config file > default.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub model: ModelSection,
    #[serde(default)]
    pub generation: GenerationSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ModelSection {
    /// Path to the model CLI binary.
    pub binary: String,
    /// Model name, or "auto" to let the CLI route.
    pub model: String,
    /// Wall-time limit per model call, in seconds.
    pub timeout_secs: u64,
}

impl Default for ModelSection {
    fn default() -> Self {
        Self {
            binary: "gemini".to_string(),
            model: "auto".to_string(),
            timeout_secs: 120,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationSection {
    /// Total generation attempts before giving up.
    pub max_attempts: u32,
}

impl Default for GenerationSection {
    fn default() -> Self {
        Self { max_attempts: 3 }
    }
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the founderpilot config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/founderpilot` or
/// `~/.config/founderpilot`. We intentionally ignore the platform-specific
/// `dirs::config_dir()` (which returns `~/Library/Application Support` on
/// macOS).
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("founderpilot");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("founderpilot")
}

/// Return the path to the config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

fn load_config_from(path: &Path) -> Result<ConfigFile> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents).context("failed to parse config file")?;
    Ok(config)
}

/// Load and parse the config file. Returns an error if it does not exist.
pub fn load_config() -> Result<ConfigFile> {
    load_config_from(&config_path())
}

fn save_config_to(path: &Path, config: &ConfigFile) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create config directory {}", dir.display()))?;
    }
    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;
    Ok(())
}

/// Serialize and write the config file, creating parent dirs as needed.
pub fn save_config(config: &ConfigFile) -> Result<()> {
    save_config_to(&config_path(), config)
}

// -----------------------------------------------------------------------
// Resolution
// -----------------------------------------------------------------------

/// CLI-flag overrides, highest priority in the chain.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub binary: Option<String>,
    pub model: Option<String>,
    pub timeout_secs: Option<u64>,
    pub max_attempts: Option<u32>,
}

/// Fully-resolved settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub binary: String,
    pub model: String,
    pub timeout: Duration,
    pub max_attempts: u32,
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Resolve settings via flag > env var > config file > default.
///
/// A missing config file is not an error; the defaults apply.
pub fn resolve(overrides: &Overrides) -> Result<Resolved> {
    let file = match load_config() {
        Ok(file) => file,
        Err(_) if !config_path().exists() => ConfigFile::default(),
        Err(e) => return Err(e),
    };

    let binary = overrides
        .binary
        .clone()
        .or_else(|| env_var("FPILOT_MODEL_BINARY"))
        .unwrap_or(file.model.binary);

    let model = overrides
        .model
        .clone()
        .or_else(|| env_var("FPILOT_MODEL"))
        .unwrap_or(file.model.model);

    let timeout_secs = overrides
        .timeout_secs
        .or_else(|| env_var("FPILOT_TIMEOUT_SECS").and_then(|v| v.parse().ok()))
        .unwrap_or(file.model.timeout_secs);

    let max_attempts = overrides
        .max_attempts
        .or_else(|| env_var("FPILOT_MAX_ATTEMPTS").and_then(|v| v.parse().ok()))
        .unwrap_or(file.generation.max_attempts);

    Ok(Resolved {
        binary,
        model,
        timeout: Duration::from_secs(timeout_secs),
        max_attempts,
    })
}
