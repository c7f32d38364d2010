use std::env;
use std::fmt;
use std::path::PathBuf;

use crate::rentals::DEFAULT_STORAGE_KEY;

const DEFAULT_STORE_PATH: &str = "rentals.json";

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub storage: StorageConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let path = env::var("RENTALS_STORE_PATH").unwrap_or_else(|_| DEFAULT_STORE_PATH.to_string());
        let key =
            env::var("RENTALS_STORAGE_KEY").unwrap_or_else(|_| DEFAULT_STORAGE_KEY.to_string());
        let storage = StorageConfig::new(path, key)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            storage,
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Where the rental collection is persisted.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub path: PathBuf,
    pub key: String,
}

impl StorageConfig {
    pub fn new(path: impl Into<PathBuf>, key: impl Into<String>) -> Result<Self, ConfigError> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyStorePath);
        }

        let key = key.into();
        if key.trim().is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }

        Ok(Self { path, key })
    }

    /// Replace the store path, as the `--store` flag does.
    pub fn with_path(self, path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        Self::new(path, self.key)
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    EmptyStorePath,
    EmptyStorageKey,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyStorePath => write!(f, "RENTALS_STORE_PATH must not be empty"),
            ConfigError::EmptyStorageKey => write!(f, "RENTALS_STORAGE_KEY must not be blank"),
        }
    }
}

impl std::error::Error for ConfigError {}
