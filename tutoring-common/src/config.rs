//! Configuration loading and resolution
//!
//! Each setting resolves in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing config file is not an error: the service logs a warning and starts
//! on defaults. A config file that exists but fails to parse is an error.

use crate::db::DbOptions;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const DATABASE_ENV: &str = "TUTORING_DATABASE";
pub const BIND_ENV: &str = "TUTORING_BIND";

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

/// Logging section of the TOML file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `EnvFilter` directive; `RUST_LOG` still overrides it
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Contents of `config.toml`; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub database_path: Option<PathBuf>,
    pub bind_addr: Option<String>,
    pub cors_origins: Option<Vec<String>>,
    pub max_connections: Option<u32>,
    pub busy_timeout_ms: Option<u64>,
    pub logging: LoggingConfig,
}

impl TomlConfig {
    /// Parse a config file that is known to exist
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
    }

    /// Load the explicit path, or the platform default path, falling back to defaults
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => match default_config_path() {
                Some(p) => p,
                None => {
                    warn!("Could not determine config directory, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        if !path.exists() {
            warn!("Config file not found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let config = Self::load(&path)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub database_path: Option<PathBuf>,
    pub bind_addr: Option<String>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub database_path: PathBuf,
    pub bind_addr: String,
    pub cors_origins: Vec<String>,
    pub db_options: DbOptions,
    pub log_level: String,
}

impl ServiceConfig {
    pub fn resolve(overrides: &ConfigOverrides, toml: &TomlConfig) -> Self {
        let defaults = DbOptions::default();

        Self {
            database_path: resolve_database_path(overrides.database_path.as_deref(), DATABASE_ENV, toml),
            bind_addr: resolve_bind_addr(overrides.bind_addr.as_deref(), BIND_ENV, toml),
            cors_origins: toml
                .cors_origins
                .clone()
                .unwrap_or_else(|| vec![DEFAULT_CORS_ORIGIN.to_string()]),
            db_options: DbOptions {
                max_connections: toml.max_connections.unwrap_or(defaults.max_connections),
                busy_timeout_ms: toml.busy_timeout_ms.unwrap_or(defaults.busy_timeout_ms),
            },
            log_level: toml.logging.level.clone(),
        }
    }
}

pub fn resolve_database_path(cli_arg: Option<&Path>, env_var_name: &str, toml: &TomlConfig) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(env_var_name) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Some(path) = &toml.database_path {
        return path.clone();
    }

    default_database_path()
}

pub fn resolve_bind_addr(cli_arg: Option<&str>, env_var_name: &str, toml: &TomlConfig) -> String {
    if let Some(addr) = cli_arg {
        return addr.to_string();
    }

    if let Ok(addr) = std::env::var(env_var_name) {
        if !addr.trim().is_empty() {
            return addr;
        }
    }

    toml.bind_addr
        .clone()
        .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
}

/// `~/.config/tutoring/config.toml` (platform equivalent elsewhere)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tutoring").join("config.toml"))
}

/// OS-dependent default database location
pub fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("tutoring"))
        .unwrap_or_else(|| PathBuf::from("./tutoring_data"))
        .join("tutoring.db")
}
