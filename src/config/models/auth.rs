//! Authentication configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Header carrying the authenticated principal, set by a trusted proxy
    #[serde(default = "default_user_header")]
    pub user_header: String,
    /// Reject ACL saves based on a stale `lastModifiedOn`
    #[serde(default = "default_true")]
    pub optimistic_concurrency: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            user_header: default_user_header(),
            optimistic_concurrency: true,
        }
    }
}
