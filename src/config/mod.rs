//! Configuration module for semantiaz.
//!
//! Handles the TOML settings file and environment variable expansion.

mod settings;

pub use settings::{
    expand_env_vars, GraphSettings, OntologySettings, ProviderSettings, Settings, SettingsError,
    CONFIG_ENV_VAR,
};
