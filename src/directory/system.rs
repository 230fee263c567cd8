//! Directory implementations

use super::types::{Role, UserIdentity};
use crate::config::DirectoryConfig;
use crate::utils::error::{AclError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Resolves an authenticated principal to a user identity
#[async_trait]
pub trait Directory: Send + Sync {
    async fn resolve(&self, principal: &str) -> Result<UserIdentity>;
}

/// Directory backed by the `directory.users` configuration section
#[derive(Debug, Clone)]
pub struct StaticDirectory {
    users: HashMap<String, UserIdentity>,
    allow_unknown_users: bool,
    default_roles: Vec<Role>,
}

impl StaticDirectory {
    pub fn from_config(config: &DirectoryConfig) -> Self {
        let users: HashMap<String, UserIdentity> = config
            .users
            .iter()
            .map(|entry| {
                let identity = UserIdentity::new(entry.name.clone())
                    .with_groups(entry.groups.iter().cloned())
                    .with_roles(entry.roles.iter().copied());
                (entry.name.clone(), identity)
            })
            .collect();

        info!(
            users = users.len(),
            allow_unknown_users = config.allow_unknown_users,
            "Static directory initialized"
        );
        if config.allow_unknown_users {
            warn!("Unknown principals will be accepted with default roles");
        }

        Self {
            users,
            allow_unknown_users: config.allow_unknown_users,
            default_roles: config.default_roles.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl Directory for StaticDirectory {
    async fn resolve(&self, principal: &str) -> Result<UserIdentity> {
        let principal = principal.trim();
        if principal.is_empty() {
            return Err(AclError::unauthorized("Missing principal"));
        }

        if let Some(identity) = self.users.get(principal) {
            return Ok(identity.clone());
        }

        if self.allow_unknown_users {
            debug!(principal, "Resolving unknown principal with default roles");
            return Ok(UserIdentity::new(principal).with_roles(self.default_roles.iter().copied()));
        }

        debug!(principal, "Unknown principal rejected");
        Err(AclError::unauthorized(format!(
            "Unknown user '{}'",
            principal
        )))
    }
}
