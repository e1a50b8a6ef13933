//! Configuration management for the Liftwise backend
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: LW__)

use anyhow::Result;
use liftwise_shared::EngineConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub engine: EngineConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Per-request timeout
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout_secs() -> u64 {
    30
}

/// Where the JSON record files live
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

/// Exercise catalog source
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON file replacing the bundled catalog
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                request_timeout_secs: default_request_timeout_secs(),
            },
            storage: StorageConfig {
                data_dir: PathBuf::from("data/records"),
            },
            catalog: CatalogConfig::default(),
            engine: EngineConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with LW__ prefix
    pub fn load() -> Result<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?)
            .add_source(config::File::with_name(&config_file).required(false))
            // e.g., LW__SERVER__PORT=9000 sets server.port
            .add_source(config::Environment::with_prefix("LW").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }

    /// Problems that make the configuration unusable in production
    ///
    /// Returns hard errors; soft issues are only logged.
    pub fn production_problems(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.engine.progression_step_kg <= 0.0 || self.engine.progression_step_lbs <= 0.0 {
            errors.push("engine progression steps must be positive".to_string());
        }
        if self.engine.progress_series_len == 0 {
            errors.push("engine.progress_series_len must be at least 1".to_string());
        }
        if let Some(path) = &self.catalog.path {
            if !path.exists() {
                errors.push(format!("catalog file {} does not exist", path.display()));
            }
        }

        errors
    }

    /// Data directory under a temporary location
    pub fn uses_temporary_storage(&self) -> bool {
        let dir = &self.storage.data_dir;
        dir.starts_with("/tmp") || dir.starts_with(env::temp_dir())
    }
}
