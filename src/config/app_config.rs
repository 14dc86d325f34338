//! Application configuration structures
//!
//! This module contains the main configuration structures for the application.

use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use validator::Validate;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ServerConfig {
    /// Server address to bind to
    pub bind_address: IpAddr,

    /// Server port
    #[validate(range(min = 1, max = 65535))]
    pub port: u16,

    /// Maximum request size in bytes
    #[validate(range(min = 1024, max = 10485760))] // 1KB to 10MB
    pub max_request_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".parse().unwrap(),
            port: 8080,
            max_request_size: 1024 * 1024,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[validate(length(min = 1))]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Expiration sweep configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SweepConfig {
    /// Enable the periodic sweep task
    pub enabled: bool,

    /// Interval between sweep runs in seconds
    #[validate(range(min = 10, max = 86400))]
    pub interval_seconds: u64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_seconds: 300,
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Expiration sweep configuration
    #[serde(default)]
    pub sweep: SweepConfig,
}

impl AppConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> crate::shared::error::AppResult<Self> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("Conf").required(false))
            .add_source(config::Environment::with_prefix("MARKETPAY").separator("__"))
            .build()?;

        let config: AppConfig = config.try_deserialize()?;

        config.validate_config().map_err(|e| {
            crate::shared::error::AppError::Validation(format!(
                "Configuration validation failed: {}",
                e
            ))
        })?;

        Ok(config)
    }

    /// Validate the entire configuration
    pub fn validate_config(&self) -> Result<(), validator::ValidationErrors> {
        self.server.validate()?;
        self.logging.validate()?;
        self.sweep.validate()?;
        Ok(())
    }

    /// Get server address as string
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.bind_address, self.server.port)
    }
}
