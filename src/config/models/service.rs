//! Top-level service configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Service configuration, one section per concern
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ServiceConfig {
    /// HTTP server
    #[serde(default)]
    pub server: ServerConfig,
    /// ACL and pipeline stores
    #[serde(default)]
    pub storage: StorageConfig,
    /// User directory
    #[serde(default)]
    pub directory: DirectoryConfig,
    /// Principal extraction and save semantics
    #[serde(default)]
    pub auth: AuthConfig,
    /// Tracing output
    #[serde(default)]
    pub logging: LoggingConfig,
}
