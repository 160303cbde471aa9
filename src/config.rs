use crate::error::ConfigError;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_FIELD_NAME: &str = "Back";
pub const DEFAULT_TEMPERATURE: f64 = 0.0;
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Settings as they sit in `config.json`. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
struct RawConfig {
    openai_api_key: Option<String>,
    model: Option<String>,
    field_name: Option<String>,
    temperature: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub openai_api_key: String,
    pub model: String,
    pub field_name: String,
    pub temperature: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openai_api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            field_name: DEFAULT_FIELD_NAME.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl Config {
    /// Reads `path` and fills in defaults. A missing file is the same as an
    /// empty one.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.display().to_string(),
                    source,
                });
            }
        };
        Self::from_json(&content, std::env::var(API_KEY_ENV).ok()).map_err(|source| {
            ConfigError::Parse {
                path: path.display().to_string(),
                source,
            }
        })
    }

    /// `env_key` is only consulted when the file has no `openai_api_key` entry
    /// at all; an explicit empty string in the file wins over the environment.
    pub fn from_json(content: &str, env_key: Option<String>) -> Result<Self, serde_json::Error> {
        let raw: RawConfig = if content.trim().is_empty() {
            RawConfig::default()
        } else {
            serde_json::from_str(content)?
        };
        Ok(Self::resolve(raw, env_key))
    }

    fn resolve(raw: RawConfig, env_key: Option<String>) -> Self {
        let defaults = Config::default();
        Self {
            openai_api_key: raw.openai_api_key.or(env_key).unwrap_or_default(),
            model: raw.model.unwrap_or(defaults.model),
            field_name: raw.field_name.unwrap_or(defaults.field_name),
            temperature: raw.temperature.unwrap_or(defaults.temperature),
        }
    }

    pub fn api_key(&self) -> &str {
        self.openai_api_key.trim()
    }
}

fn get_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("answer-eval")
}

pub fn default_config_path() -> PathBuf {
    get_config_dir().join(CONFIG_FILE_NAME)
}
