//! User directory configuration

use crate::directory::Role;
use serde::{Deserialize, Serialize};

/// A user known to the static directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserEntry {
    pub name: String,
    #[serde(default)]
    pub groups: Vec<String>,
    #[serde(default)]
    pub roles: Vec<Role>,
}

/// Directory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    #[serde(default)]
    pub users: Vec<UserEntry>,
    /// Resolve principals missing from `users` instead of rejecting them
    #[serde(default)]
    pub allow_unknown_users: bool,
    /// Roles given to principals resolved through `allow_unknown_users`
    #[serde(default = "default_roles")]
    pub default_roles: Vec<Role>,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            users: Vec::new(),
            allow_unknown_users: false,
            default_roles: default_roles(),
        }
    }
}

fn default_roles() -> Vec<Role> {
    vec![Role::Guest]
}
