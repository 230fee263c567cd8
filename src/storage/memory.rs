//! In-memory store implementations

use super::{AclStore, PipelineInfo, PipelineStore, WriteCondition, advance_version};
use crate::acl::Acl;
use crate::utils::error::{AclError, Result};
use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

/// ACLs keyed by resource id
#[derive(Debug, Default)]
pub struct MemoryAclStore {
    acls: DashMap<String, Acl>,
}

impl MemoryAclStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.acls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.acls.is_empty()
    }
}

#[async_trait]
impl AclStore for MemoryAclStore {
    async fn get_acl(&self, resource_id: &str) -> Result<Option<Acl>> {
        Ok(self.acls.get(resource_id).map(|acl| acl.value().clone()))
    }

    async fn save_acl(
        &self,
        resource_id: &str,
        mut acl: Acl,
        condition: WriteCondition,
    ) -> Result<Acl> {
        // The entry holds the shard lock, so check and insert are atomic.
        match self.acls.entry(resource_id.to_string()) {
            Entry::Occupied(mut entry) => {
                condition.check(resource_id, Some(entry.get()))?;
                advance_version(&mut acl, Some(entry.get()), condition);
                entry.insert(acl.clone());
            }
            Entry::Vacant(entry) => {
                condition.check(resource_id, None)?;
                advance_version(&mut acl, None, condition);
                entry.insert(acl.clone());
            }
        }
        debug!(resource_id, version = acl.last_modified_on, "ACL stored in memory");
        Ok(acl)
    }

    async fn delete_acl(&self, resource_id: &str) -> Result<bool> {
        Ok(self.acls.remove(resource_id).is_some())
    }
}

/// Pipeline metadata keyed by name
#[derive(Debug, Default)]
pub struct MemoryPipelineStore {
    pipelines: DashMap<String, PipelineInfo>,
}

impl MemoryPipelineStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PipelineStore for MemoryPipelineStore {
    async fn create(&self, info: PipelineInfo) -> Result<()> {
        match self.pipelines.entry(info.name.clone()) {
            Entry::Occupied(_) => Err(AclError::conflict(format!(
                "Pipeline '{}' already exists",
                info.name
            ))),
            Entry::Vacant(entry) => {
                entry.insert(info);
                Ok(())
            }
        }
    }

    async fn get_info(&self, name: &str) -> Result<PipelineInfo> {
        self.pipelines
            .get(name)
            .map(|info| info.value().clone())
            .ok_or_else(|| AclError::not_found(format!("Pipeline '{}' does not exist", name)))
    }

    async fn list(&self) -> Result<Vec<PipelineInfo>> {
        let mut pipelines: Vec<PipelineInfo> =
            self.pipelines.iter().map(|e| e.value().clone()).collect();
        pipelines.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(pipelines)
    }

    async fn delete(&self, name: &str) -> Result<()> {
        self.pipelines
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| AclError::not_found(format!("Pipeline '{}' does not exist", name)))
    }
}
