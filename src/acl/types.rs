//! ACL type definitions

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Operation kinds that can be granted on a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    Read,
    Write,
    Execute,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Read => "READ",
            Action::Write => "WRITE",
            Action::Execute => "EXECUTE",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "READ" => Ok(Action::Read),
            "WRITE" => Ok(Action::Write),
            "EXECUTE" => Ok(Action::Execute),
            other => Err(format!("Unknown action: {}", other)),
        }
    }
}

/// Kinds of resources that carry an ACL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceType {
    #[default]
    Pipeline,
}

impl ResourceType {
    /// The universe of grantable actions for this resource type
    pub fn actions(&self) -> BTreeSet<Action> {
        match self {
            ResourceType::Pipeline => [Action::Read, Action::Write, Action::Execute]
                .into_iter()
                .collect(),
        }
    }

    pub fn supports(&self, action: Action) -> bool {
        self.actions().contains(&action)
    }
}

/// How a permission's subject id is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubjectType {
    #[default]
    User,
    Group,
}

/// A grant of one or more actions to one subject on one resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    /// Resource this permission applies to
    #[serde(default)]
    pub resource_id: String,
    /// User name or group name
    pub subject_id: String,
    /// Whether `subject_id` names a user or a group
    #[serde(default)]
    pub subject_type: SubjectType,
    /// Granted actions
    #[serde(default)]
    pub actions: BTreeSet<Action>,
    /// Who last changed this grant
    #[serde(default)]
    pub last_modified_by: String,
    /// When this grant last changed (epoch millis)
    #[serde(default)]
    pub last_modified_on: i64,
}

impl Permission {
    pub fn allows(&self, action: Action) -> bool {
        self.actions.contains(&action)
    }
}

/// Access control list of a single resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Acl {
    pub resource_id: String,
    /// Creator of the resource
    pub resource_owner: String,
    #[serde(default)]
    pub resource_type: ResourceType,
    /// Resource creation time (epoch millis)
    #[serde(default)]
    pub resource_created_time: i64,
    #[serde(default)]
    pub last_modified_by: String,
    /// Version stamp used for optimistic concurrency (epoch millis)
    #[serde(default)]
    pub last_modified_on: i64,
    /// Grants, in display order
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

/// Resource metadata the resolver needs from the pipeline store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceMeta {
    pub owner: String,
    pub resource_type: ResourceType,
    /// Creation time (epoch millis)
    pub created_time: i64,
}
