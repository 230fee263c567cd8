//! Configuration management for the ACL service
//!
//! This module handles loading, validation, and management of all service configuration.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{AclError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the service
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub service: ServiceConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AclError::Config(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_yaml(&content)?;
        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let service: ServiceConfig = serde_yaml::from_str(content)
            .map_err(|e| AclError::Config(format!("Failed to parse config: {}", e)))?;

        let config = Self { service };
        config.validate()?;
        Ok(config)
    }

    /// Apply `ACL_*` environment variable overrides
    pub fn apply_env(self) -> Result<Self> {
        self.apply_env_from(|key| std::env::var(key).ok().filter(|v| !v.is_empty()))
    }

    /// Apply overrides from an arbitrary variable source
    pub fn apply_env_from<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let service = &mut self.service;

        if let Some(host) = lookup("ACL_HOST") {
            service.server.host = host;
        }
        if let Some(port) = lookup("ACL_PORT") {
            service.server.port = port
                .parse()
                .map_err(|e| AclError::Config(format!("Invalid ACL_PORT: {}", e)))?;
        }
        if let Some(workers) = lookup("ACL_WORKERS") {
            service.server.workers = Some(
                workers
                    .parse()
                    .map_err(|e| AclError::Config(format!("Invalid ACL_WORKERS: {}", e)))?,
            );
        }
        if let Some(backend) = lookup("ACL_STORAGE_BACKEND") {
            service.storage.backend = match backend.to_lowercase().as_str() {
                "memory" => StorageBackend::Memory,
                "file" => StorageBackend::File,
                other => {
                    return Err(AclError::Config(format!(
                        "Invalid ACL_STORAGE_BACKEND: {}",
                        other
                    )));
                }
            };
        }
        if let Some(path) = lookup("ACL_STORAGE_PATH") {
            service.storage.path = Some(path);
        }
        if let Some(header) = lookup("ACL_USER_HEADER") {
            service.auth.user_header = header;
        }
        if let Some(level) = lookup("ACL_LOG_LEVEL") {
            service.logging.level = level;
        }
        if let Some(json) = lookup("ACL_LOG_JSON") {
            service.logging.json = matches!(json.to_lowercase().as_str(), "true" | "1" | "yes");
        }

        self.validate()?;
        Ok(self)
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.service.server
    }

    /// Get storage configuration
    pub fn storage(&self) -> &StorageConfig {
        &self.service.storage
    }

    /// Get directory configuration
    pub fn directory(&self) -> &DirectoryConfig {
        &self.service.directory
    }

    /// Get auth configuration
    pub fn auth(&self) -> &AuthConfig {
        &self.service.auth
    }

    /// Get logging configuration
    pub fn logging(&self) -> &LoggingConfig {
        &self.service.logging
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        self.service.validate().map_err(AclError::Config)?;
        self.service.server.cors.warn_if_open();
        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.service)
            .map_err(|e| AclError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
