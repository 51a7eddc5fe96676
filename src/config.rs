//! Configuration for kvqueue clients
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::command::{CommandOptions, Expiration};
use crate::error::{KvqError, Result};

/// Client configuration
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Store Configuration
    // -------------------------------------------------------------------------
    /// Snapshot file of the in-memory store
    pub state_path: PathBuf,

    /// Save the store back to `state_path` after each command
    pub persist: bool,

    // -------------------------------------------------------------------------
    // Command Configuration
    // -------------------------------------------------------------------------
    /// Options applied to commands that don't override them
    pub defaults: CommandOptions,

    // -------------------------------------------------------------------------
    // Logging Configuration
    // -------------------------------------------------------------------------
    /// tracing filter used when RUST_LOG is unset
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            state_path: PathBuf::from("./kvqueue.state"),
            persist: true,
            defaults: CommandOptions::default(),
            log_filter: "warn,kvqueue=info".to_string(),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Reject settings no command could be built from
    pub fn validate(&self) -> Result<()> {
        if self.state_path.as_os_str().is_empty() {
            return Err(KvqError::Config("state path is empty".to_string()));
        }
        Expiration::from_secs(self.defaults.expiration_secs)
            .map_err(|e| KvqError::Config(format!("default expiration: {}", e)))?;
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the snapshot file path
    pub fn state_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.state_path = path.into();
        self
    }

    /// Enable or disable saving after each command
    pub fn persist(mut self, persist: bool) -> Self {
        self.config.persist = persist;
        self
    }

    /// Set the default command options
    pub fn defaults(mut self, defaults: CommandOptions) -> Self {
        self.config.defaults = defaults;
        self
    }

    /// Set the fallback log filter
    pub fn log_filter(mut self, filter: impl Into<String>) -> Self {
        self.config.log_filter = filter.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
