//! Section validators

use super::trait_def::Validate;
use crate::config::models::*;
use std::collections::HashSet;
use tracing::debug;

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating service configuration");

        self.server.validate()?;
        self.storage.validate()?;
        self.directory.validate()?;
        self.auth.validate()?;
        self.logging.validate()?;

        debug!("Service configuration validation completed");
        Ok(())
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.host.is_empty() {
            return Err("Server host cannot be empty".to_string());
        }

        if self.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }

        if self.workers == Some(0) {
            return Err("Worker count must be greater than 0".to_string());
        }

        self.cors.validate()
    }
}

impl Validate for CorsConfig {
    fn validate(&self) -> Result<(), String> {
        if self.enabled && self.allows_all_origins() && self.allow_credentials {
            return Err(
                "CORS cannot allow all origins (*) when credentials are enabled".to_string(),
            );
        }
        Ok(())
    }
}

impl Validate for StorageConfig {
    fn validate(&self) -> Result<(), String> {
        match (self.backend, self.path.as_deref()) {
            (StorageBackend::File, None) | (StorageBackend::File, Some("")) => {
                Err("File storage backend requires a path".to_string())
            }
            _ => Ok(()),
        }
    }
}

impl Validate for DirectoryConfig {
    fn validate(&self) -> Result<(), String> {
        let mut names = HashSet::new();
        for user in &self.users {
            if user.name.trim().is_empty() {
                return Err("Directory user name cannot be empty".to_string());
            }
            if !names.insert(user.name.as_str()) {
                return Err(format!("Duplicate directory user: {}", user.name));
            }
            if user.groups.iter().any(|g| g.trim().is_empty()) {
                return Err(format!("User {} has an empty group name", user.name));
            }
        }
        Ok(())
    }
}

impl Validate for AuthConfig {
    fn validate(&self) -> Result<(), String> {
        if self.user_header.trim().is_empty() {
            return Err("auth.user_header cannot be empty".to_string());
        }
        actix_web::http::header::HeaderName::from_bytes(self.user_header.as_bytes())
            .map_err(|_| format!("Invalid header name: {}", self.user_header))?;
        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        tracing_subscriber::EnvFilter::try_new(&self.level)
            .map(|_| ())
            .map_err(|e| format!("Invalid log level '{}': {}", self.level, e))
    }
}

