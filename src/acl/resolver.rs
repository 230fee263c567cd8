//! Effective ACL and permission resolution

use super::types::{Acl, Permission, ResourceMeta, SubjectType};
use crate::directory::UserIdentity;
use crate::storage::{AclStore, WriteCondition};
use crate::utils::error::Result;
use std::sync::Arc;
use tracing::debug;

/// Source of "now" for synthesized ACLs
pub trait Clock: Send + Sync {
    /// Current time in epoch millis
    fn now_millis(&self) -> i64;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Clock pinned to one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

/// The implicit grant the owner holds while no ACL is stored.
pub fn owner_permission(resource_id: &str, meta: &ResourceMeta) -> Permission {
    Permission {
        resource_id: resource_id.to_string(),
        subject_id: meta.owner.clone(),
        subject_type: SubjectType::User,
        actions: meta.resource_type.actions(),
        last_modified_by: meta.owner.clone(),
        last_modified_on: meta.created_time,
    }
}

/// Effective ACL for administrative viewing.
///
/// A stored ACL is returned as is. Without one, only the owner sees the
/// synthesized owner-default ACL; everyone else gets `None`.
pub fn effective_acl(
    resource_id: &str,
    meta: &ResourceMeta,
    stored: Option<Acl>,
    requester: &UserIdentity,
    now: i64,
) -> Option<Acl> {
    if stored.is_some() {
        return stored;
    }

    if requester.name != meta.owner {
        return None;
    }

    Some(Acl {
        resource_id: resource_id.to_string(),
        resource_owner: meta.owner.clone(),
        resource_type: meta.resource_type,
        resource_created_time: meta.created_time,
        last_modified_by: meta.owner.clone(),
        last_modified_on: now,
        permissions: vec![owner_permission(resource_id, meta)],
    })
}

/// Permissions applicable to `requester`.
///
/// Subjects match by plain string equality against the requester's name
/// and groups, regardless of subject type. The result never names a
/// subject outside that set.
pub fn effective_permissions(
    resource_id: &str,
    meta: &ResourceMeta,
    stored: Option<&Acl>,
    requester: &UserIdentity,
) -> Vec<Permission> {
    match stored {
        Some(acl) => acl
            .permissions
            .iter()
            .filter(|p| requester.matches_subject(&p.subject_id))
            .cloned()
            .collect(),
        None if requester.name == meta.owner => vec![owner_permission(resource_id, meta)],
        None => Vec::new(),
    }
}

/// Resolver wired to an ACL store and a clock
#[derive(Clone)]
pub struct AclResolver {
    store: Arc<dyn AclStore>,
    clock: Arc<dyn Clock>,
}

impl AclResolver {
    pub fn new(store: Arc<dyn AclStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<dyn AclStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn now(&self) -> i64 {
        self.clock.now_millis()
    }

    /// Stored ACL, or the owner default when the requester owns the resource.
    /// Never writes.
    pub async fn get_effective_acl(
        &self,
        resource_id: &str,
        meta: &ResourceMeta,
        requester: &UserIdentity,
    ) -> Result<Option<Acl>> {
        let stored = self.store.get_acl(resource_id).await?;
        if stored.is_none() {
            debug!(resource_id, owner = %meta.owner, "no stored ACL, using owner default");
        }
        Ok(effective_acl(
            resource_id,
            meta,
            stored,
            requester,
            self.clock.now_millis(),
        ))
    }

    pub async fn get_effective_permissions(
        &self,
        resource_id: &str,
        meta: &ResourceMeta,
        requester: &UserIdentity,
    ) -> Result<Vec<Permission>> {
        let stored = self.store.get_acl(resource_id).await?;
        Ok(effective_permissions(
            resource_id,
            meta,
            stored.as_ref(),
            requester,
        ))
    }

    /// Write-through to the store, returning the ACL as stored.
    /// Authorization is the caller's job.
    pub async fn save_acl(
        &self,
        resource_id: &str,
        acl: Acl,
        condition: WriteCondition,
    ) -> Result<Acl> {
        debug!(resource_id, permissions = acl.permissions.len(), "saving ACL");
        self.store.save_acl(resource_id, acl, condition).await
    }
}
