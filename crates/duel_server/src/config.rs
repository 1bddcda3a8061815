//! Server configuration.
//!
//! Precedence, lowest first: built-in defaults, TOML file, `PORT`
//! environment variable, command-line flags.

use crate::registry::{DEFAULT_MAX_TOKEN_ATTEMPTS, DEFAULT_TOKEN_BYTES, TOKEN_BYTES_RANGE};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Environment variable that overrides the configured port.
pub const PORT_ENV: &str = "PORT";

/// Runtime settings for the server.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Interface to bind.
    host: String,

    /// Port to bind.
    port: u16,

    /// Random bytes per room token; tokens are hex, so twice as many characters.
    room_token_bytes: usize,

    /// Token draws before room creation gives up.
    max_token_attempts: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            room_token_bytes: DEFAULT_TOKEN_BYTES,
            max_token_attempts: DEFAULT_MAX_TOKEN_ATTEMPTS,
        }
    }
}

impl ServerConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(host = %config.host, port = config.port, "Config loaded successfully");
        Ok(config)
    }

    /// Parses and validates TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the file at `path` if it exists (defaults otherwise) and
    /// applies the `PORT` environment variable.
    #[instrument(skip(path), fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = if path.exists() {
            Self::from_file(path)?
        } else {
            info!("Config file not found, using defaults");
            Self::default()
        };
        config.with_port_env(std::env::var(PORT_ENV).ok().as_deref())
    }

    /// Applies a `PORT` value, if one was set.
    pub fn with_port_env(mut self, value: Option<&str>) -> Result<Self, ConfigError> {
        if let Some(raw) = value {
            self.port = raw.trim().parse().map_err(|e| {
                ConfigError::new(format!("Invalid {} value {:?}: {}", PORT_ENV, raw, e))
            })?;
            debug!(port = self.port, "Port taken from environment");
        }
        Ok(self)
    }

    /// Applies command-line overrides.
    pub fn with_overrides(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !TOKEN_BYTES_RANGE.contains(&self.room_token_bytes) {
            return Err(ConfigError::new(format!(
                "room_token_bytes must be within {:?}, got {}",
                TOKEN_BYTES_RANGE, self.room_token_bytes
            )));
        }
        if self.max_token_attempts == 0 {
            return Err(ConfigError::new(
                "max_token_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// `host:port` for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
