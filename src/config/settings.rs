//! TOML-based configuration for semantiaz.
//!
//! Supports a config file (`semantiaz.toml`) with environment variable
//! expansion in path and namespace values.
//!
//! Example configuration:
//! ```toml
//! [builder]
//! model_name = "clinical"
//! enum_max_distinct = 12
//! naming_fallback = true
//!
//! [ontology]
//! namespace = "https://data.example.org/ontology/clinical"
//!
//! [graph]
//! row_limit = 500
//!
//! [provider]
//! max_concurrency = 4
//! snapshot = "${SEMANTIAZ_DATA}/snapshot.json"
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::convert::ontology::DEFAULT_NAMESPACE;
use crate::convert::{GraphOptions, OntologyCodec};
use crate::convert::graph::DEFAULT_ROW_LIMIT;
use crate::metadata::DEFAULT_MAX_CONCURRENCY;
use crate::semantic::BuildOptions;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "SEMANTIAZ_CONFIG";

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Model builder options.
    pub builder: BuildOptions,

    /// Ontology codec settings.
    pub ontology: OntologySettings,

    /// Graph codec settings.
    pub graph: GraphSettings,

    /// Metadata provider settings.
    pub provider: ProviderSettings,
}

/// Ontology codec settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OntologySettings {
    /// Namespace for minted IRIs (supports ${ENV_VAR} expansion).
    pub namespace: String,
}

impl Default for OntologySettings {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}

impl OntologySettings {
    /// Build the codec, expanding environment variables in the namespace.
    pub fn codec(&self) -> Result<OntologyCodec, SettingsError> {
        Ok(OntologyCodec::new(expand_env_vars(&self.namespace)?))
    }
}

/// Graph codec settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GraphSettings {
    /// Sampled rows emitted per table in content mode.
    pub row_limit: usize,
}

impl Default for GraphSettings {
    fn default() -> Self {
        Self {
            row_limit: DEFAULT_ROW_LIMIT,
        }
    }
}

impl From<&GraphSettings> for GraphOptions {
    fn from(settings: &GraphSettings) -> Self {
        GraphOptions {
            row_limit: settings.row_limit,
        }
    }
}

/// Metadata provider settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// Concurrent table fetches.
    pub max_concurrency: usize,

    /// Default metadata snapshot (supports ${ENV_VAR} expansion).
    pub snapshot: Option<String>,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            snapshot: None,
        }
    }
}

impl ProviderSettings {
    /// Get the snapshot path with environment variables expanded.
    pub fn resolved_snapshot(&self) -> Result<Option<PathBuf>, SettingsError> {
        self.snapshot
            .as_deref()
            .map(|path| expand_env_vars(path).map(PathBuf::from))
            .transpose()
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and check settings from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `SEMANTIAZ_CONFIG`
    /// 2. `./semantiaz.toml`
    /// 3. `~/.config/semantiaz/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var(CONFIG_ENV_VAR) {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("semantiaz.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("semantiaz").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        log::debug!("no config file found, using defaults");
        Ok(Settings::default())
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.builder.model_name.trim().is_empty() {
            return Err(SettingsError::InvalidConfig("builder.model_name is empty".to_string()));
        }
        if self.provider.max_concurrency == 0 {
            return Err(SettingsError::InvalidConfig(
                "provider.max_concurrency must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax. A lone `$` is kept.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        let braced = chars.next_if_eq(&'{').is_some();
        let mut var_name = String::new();
        if braced {
            let mut closed = false;
            for ch in chars.by_ref() {
                if ch == '}' {
                    closed = true;
                    break;
                }
                var_name.push(ch);
            }
            if !closed {
                return Err(SettingsError::InvalidConfig(format!("unterminated '${{{}'", var_name)));
            }
        } else {
            while let Some(ch) = chars.next_if(|ch| ch.is_alphanumeric() || *ch == '_') {
                var_name.push(ch);
            }
            if var_name.is_empty() {
                result.push('$');
                continue;
            }
        }

        let value = env::var(&var_name).map_err(|_| SettingsError::MissingEnvVar(var_name.clone()))?;
        result.push_str(&value);
    }

    Ok(result)
}
