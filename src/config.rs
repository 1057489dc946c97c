use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::prompt::DEFAULT_MAX_CONTEXT_CHARS;

/// Environment variable overriding `ollama.base_url`.
pub const ENV_OLLAMA_URL: &str = "PDF_QA_OLLAMA_URL";
/// Environment variable overriding `ollama.default_model`.
pub const ENV_MODEL: &str = "PDF_QA_MODEL";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub ollama: OllamaConfig,
    pub prompt: PromptConfig,
    pub tui: TuiConfig,
    pub data: DataConfig,
}

/// Local Ollama server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OllamaConfig {
    /// Server root; `/api/generate` and `/api/tags` are appended.
    pub base_url: String,
    /// Model selected until the registry probe reports otherwise.
    pub default_model: String,
    pub generate_timeout_secs: u64,
    pub probe_timeout_secs: u64,
    pub temperature: f64,
    pub top_p: f64,
    pub num_predict: u32,
}

/// Prompt construction settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    /// Characters of document text embedded in each prompt.
    pub max_context_chars: usize,
}

/// TUI-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Tick interval in milliseconds for the event loop.
    pub tick_rate_ms: u64,
}

/// Data directory configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DataConfig {
    /// Override the default data directory.
    pub data_dir: Option<PathBuf>,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            default_model: "llama2".to_string(),
            generate_timeout_secs: 120,
            probe_timeout_secs: 5,
            temperature: 0.1,
            top_p: 0.9,
            num_predict: 500,
        }
    }
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            max_context_chars: DEFAULT_MAX_CONTEXT_CHARS,
        }
    }
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self { tick_rate_ms: 100 }
    }
}

/// A message produced while loading configuration.
///
/// Loading runs before the file logger exists, so these are collected and
/// emitted by the caller once logging is up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigNotice {
    pub level: log::Level,
    pub message: String,
}

impl ConfigNotice {
    fn new(level: log::Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn emit(&self) {
        log::log!(self.level, "{}", self.message);
    }
}

impl AppConfig {
    /// Load configuration from `~/.config/pdf-qa/config.toml`, then apply
    /// environment overrides. Returns defaults if the file is missing or
    /// unparseable, along with notices to log once logging is initialized.
    pub fn load() -> (Self, Vec<ConfigNotice>) {
        Self::load_with(&Self::config_path(), |key| std::env::var(key).ok())
    }

    /// [`AppConfig::load`] against an explicit file and environment.
    pub fn load_with<F>(config_path: &Path, lookup: F) -> (Self, Vec<ConfigNotice>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut notices = Vec::new();
        let mut config = if config_path.exists() {
            match Self::load_from(config_path) {
                Ok(config) => {
                    notices.push(ConfigNotice::new(
                        log::Level::Info,
                        format!("Loaded config from {}", config_path.display()),
                    ));
                    config
                }
                Err(e) => {
                    notices.push(ConfigNotice::new(
                        log::Level::Warn,
                        format!("{e}; using defaults"),
                    ));
                    Self::default()
                }
            }
        } else {
            notices.push(ConfigNotice::new(
                log::Level::Debug,
                format!("No config file at {}; using defaults", config_path.display()),
            ));
            Self::default()
        };

        notices.extend(config.apply_env_overrides(lookup));
        (config, notices)
    }

    /// Read and parse a config file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Apply overrides looked up through `lookup` (the process environment
    /// in production).
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Vec<ConfigNotice>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut notices = Vec::new();
        if let Some(url) = lookup(ENV_OLLAMA_URL).filter(|v| !v.trim().is_empty()) {
            notices.push(ConfigNotice::new(
                log::Level::Info,
                format!("Ollama URL overridden by {ENV_OLLAMA_URL}: {url}"),
            ));
            self.ollama.base_url = url;
        }
        if let Some(model) = lookup(ENV_MODEL).filter(|v| !v.trim().is_empty()) {
            notices.push(ConfigNotice::new(
                log::Level::Info,
                format!("Default model overridden by {ENV_MODEL}: {model}"),
            ));
            self.ollama.default_model = model;
        }
        notices
    }

    /// Resolved data directory (override or XDG default).
    pub fn data_dir(&self) -> PathBuf {
        self.data.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|d| d.join("pdf-qa"))
                .unwrap_or_else(|| PathBuf::from("data"))
        })
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("pdf-qa").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
