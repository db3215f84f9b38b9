//! Configuration loader plus strongly typed settings structures.
//!
//! The config file only seeds the form at startup. Nothing the user changes in
//! the form is written back to disk.

use crate::data::ui_state::{GeneratorConfig, DEFAULT_LENGTH};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

// Embed default configuration at compile time
const DEFAULT_CONFIG: &str = include_str!("../defaults/config.toml");

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "PASSGEN_DIR";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub generator: GeneratorSettings,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Initial form settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorSettings {
    #[serde(default = "default_length")]
    pub length: i64,
    #[serde(default = "default_true")]
    pub lowercase: bool,
    #[serde(default = "default_true")]
    pub uppercase: bool,
    #[serde(default = "default_true")]
    pub digits: bool,
    #[serde(default)]
    pub symbols: bool,
}

fn default_length() -> i64 {
    DEFAULT_LENGTH as i64
}

fn default_true() -> bool {
    true
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            length: default_length(),
            lowercase: true,
            uppercase: true,
            digits: true,
            symbols: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout_ms: u64, // Event poll timeout - lower = higher FPS, higher CPU
    #[serde(default = "default_slider_fill")]
    pub slider_fill: String, // Hex color
    #[serde(default = "default_slider_background")]
    pub slider_background: String,
    #[serde(default = "default_accent")]
    pub accent: String,
    #[serde(default = "default_text")]
    pub text: String,
}

fn default_poll_timeout() -> u64 {
    16 // ~60 FPS
}

fn default_slider_fill() -> String {
    "#0B1EDF".to_string()
}

fn default_slider_background() -> String {
    "#3a3a3a".to_string()
}

fn default_accent() -> String {
    "#00ffff".to_string()
}

fn default_text() -> String {
    "#ffffff".to_string()
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            poll_timeout_ms: default_poll_timeout(),
            slider_fill: default_slider_fill(),
            slider_background: default_slider_background(),
            accent: default_accent(),
            text: default_text(),
        }
    }
}

impl Config {
    /// Load config.toml from the data directory, falling back to the embedded defaults
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            Self::load_from_path(&path)
        } else {
            tracing::info!("No config at {:?}, using built-in defaults", path);
            Self::parse(DEFAULT_CONFIG).context("Failed to parse embedded default config")
        }
    }

    /// Load config from a custom file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents =
            fs::read_to_string(path).context(format!("Failed to read config file: {:?}", path))?;
        let config =
            Self::parse(&contents).context(format!("Failed to parse config file: {:?}", path))?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Initial generator settings, with the length clamped into the slider range
    pub fn generator_config(&self) -> GeneratorConfig {
        let settings = &self.generator;
        let length = GeneratorConfig::clamp_length(settings.length);
        if length as i64 != settings.length {
            tracing::warn!(
                "Configured length {} is out of range, using {}",
                settings.length,
                length
            );
        }

        GeneratorConfig {
            length,
            include_lowercase: settings.lowercase,
            include_uppercase: settings.uppercase,
            include_digits: settings.digits,
            include_symbols: settings.symbols,
        }
    }

    /// Get the base passgen directory (~/.passgen/)
    /// Can be overridden with PASSGEN_DIR environment variable
    pub fn base_dir() -> Result<PathBuf> {
        if let Ok(custom_dir) = std::env::var(DATA_DIR_ENV) {
            return Ok(PathBuf::from(custom_dir));
        }

        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".passgen"))
    }

    /// Returns: ~/.passgen/config.toml
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("config.toml"))
    }

    /// Returns: ~/.passgen/passgen.log
    pub fn log_path() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("passgen.log"))
    }
}
