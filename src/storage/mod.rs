//! Storage layer for the ACL service
//!
//! This module defines the store collaborators the authorization core
//! depends on and provides in-memory and file-backed implementations.

/// JSON-file backed stores
pub mod file;
/// In-memory stores
pub mod memory;

use crate::acl::{Acl, ResourceMeta, ResourceType};
use crate::config::{StorageBackend, StorageConfig};
use crate::utils::error::{AclError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

pub use file::{FileAclStore, FilePipelineStore};
pub use memory::{MemoryAclStore, MemoryPipelineStore};

/// Precondition attached to an ACL write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteCondition {
    /// Last writer wins
    Always,
    /// Reject the write when a stored ACL exists with a different
    /// `last_modified_on` than the one the editor read
    Unmodified { last_modified_on: i64 },
}

impl WriteCondition {
    /// Check the condition against the currently stored ACL.
    pub fn check(&self, resource_id: &str, current: Option<&Acl>) -> Result<()> {
        match (self, current) {
            (WriteCondition::Always, _) | (WriteCondition::Unmodified { .. }, None) => Ok(()),
            (WriteCondition::Unmodified { last_modified_on }, Some(acl)) => {
                if acl.last_modified_on == *last_modified_on {
                    Ok(())
                } else {
                    Err(AclError::concurrent_modification(format!(
                        "ACL for '{}' was modified at {} by '{}' (expected version {})",
                        resource_id, acl.last_modified_on, acl.last_modified_by, last_modified_on
                    )))
                }
            }
        }
    }
}

/// Move `acl`'s version past both the stored version and the one the
/// editor read.
///
/// Clock readings can repeat or step backwards. Every accepted write must
/// still produce a version no earlier reader holds, or a stale editor would
/// pass [`WriteCondition::Unmodified`].
pub fn advance_version(acl: &mut Acl, current: Option<&Acl>, condition: WriteCondition) {
    let stored = current.map(|c| c.last_modified_on);
    let read = match condition {
        WriteCondition::Always => None,
        WriteCondition::Unmodified { last_modified_on } => Some(last_modified_on),
    };
    if let Some(floor) = stored.max(read) {
        if acl.last_modified_on <= floor {
            acl.last_modified_on = floor + 1;
        }
    }
}

/// Per-resource ACL persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AclStore: Send + Sync {
    /// Stored ACL, if one has been saved
    async fn get_acl(&self, resource_id: &str) -> Result<Option<Acl>>;

    /// Persist an ACL and return it as stored. The condition is checked
    /// and the version advanced atomically with the write.
    async fn save_acl(&self, resource_id: &str, acl: Acl, condition: WriteCondition)
    -> Result<Acl>;

    /// Clear the stored ACL; returns whether one existed
    async fn delete_acl(&self, resource_id: &str) -> Result<bool>;
}

/// Pipeline metadata record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineInfo {
    /// Pipeline id
    pub name: String,
    /// Display title
    pub title: String,
    /// User who created the pipeline
    pub creator: String,
    /// Creation time (epoch millis)
    pub created: i64,
}

impl PipelineInfo {
    /// Metadata the ACL resolver works from
    pub fn resource_meta(&self) -> ResourceMeta {
        ResourceMeta {
            owner: self.creator.clone(),
            resource_type: ResourceType::Pipeline,
            created_time: self.created,
        }
    }
}

/// Pipeline metadata persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PipelineStore: Send + Sync {
    async fn create(&self, info: PipelineInfo) -> Result<()>;

    /// Fails with `NotFound` for unknown names
    async fn get_info(&self, name: &str) -> Result<PipelineInfo>;

    async fn list(&self) -> Result<Vec<PipelineInfo>>;

    /// Fails with `NotFound` for unknown names
    async fn delete(&self, name: &str) -> Result<()>;
}

/// Store collaborators selected by configuration
#[derive(Clone)]
pub struct StorageLayer {
    pub acls: Arc<dyn AclStore>,
    pub pipelines: Arc<dyn PipelineStore>,
}

impl StorageLayer {
    /// Create a new storage layer
    pub async fn new(config: &StorageConfig) -> Result<Self> {
        match config.backend {
            StorageBackend::Memory => {
                info!("Using in-memory ACL and pipeline stores");
                Ok(Self::in_memory())
            }
            StorageBackend::File => {
                let root = config.path.as_deref().ok_or_else(|| {
                    AclError::config("storage.path is required for the file backend")
                })?;
                info!("Using file-backed stores at {}", root);
                let root = std::path::Path::new(root);
                Ok(Self {
                    acls: Arc::new(FileAclStore::new(root.join("acl")).await?),
                    pipelines: Arc::new(FilePipelineStore::new(root.join("pipelines")).await?),
                })
            }
        }
    }

    pub fn in_memory() -> Self {
        Self {
            acls: Arc::new(MemoryAclStore::new()),
            pipelines: Arc::new(MemoryPipelineStore::new()),
        }
    }
}
