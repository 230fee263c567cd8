//! ACL-enforcing access to pipeline metadata

use crate::acl::{AclResolver, Action, ensure_allowed, is_allowed};
use crate::directory::UserIdentity;
use crate::storage::{AclStore, PipelineInfo, PipelineStore};
use crate::utils::error::{AclError, Result};
use futures::future::try_join_all;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Pipeline store wrapper that checks the caller's effective permissions
#[derive(Clone)]
pub struct PipelineService {
    pipelines: Arc<dyn PipelineStore>,
    acls: Arc<dyn AclStore>,
    resolver: AclResolver,
}

impl PipelineService {
    pub fn new(
        pipelines: Arc<dyn PipelineStore>,
        acls: Arc<dyn AclStore>,
        resolver: AclResolver,
    ) -> Self {
        Self {
            pipelines,
            acls,
            resolver,
        }
    }

    /// Register a pipeline owned by `user`. No ACL is written, so the
    /// creator starts with the implicit owner grant. An ACL left behind by
    /// an earlier pipeline of the same name is cleared first.
    pub async fn create(&self, name: &str, title: &str, user: &UserIdentity) -> Result<PipelineInfo> {
        if name.trim().is_empty() {
            return Err(AclError::validation("Pipeline name cannot be empty"));
        }

        match self.pipelines.get_info(name).await {
            Ok(_) => {
                return Err(AclError::conflict(format!(
                    "Pipeline '{}' already exists",
                    name
                )));
            }
            Err(AclError::NotFound(_)) => {}
            Err(e) => return Err(e),
        }
        if self.acls.delete_acl(name).await? {
            warn!(pipeline = name, "Cleared ACL left over from a deleted pipeline");
        }

        let info = PipelineInfo {
            name: name.to_string(),
            title: if title.is_empty() {
                name.to_string()
            } else {
                title.to_string()
            },
            creator: user.name.clone(),
            created: self.resolver.now(),
        };
        self.pipelines.create(info.clone()).await?;
        info!(pipeline = %info.name, creator = %info.creator, "Pipeline created");
        Ok(info)
    }

    pub async fn get_info(&self, name: &str, user: &UserIdentity) -> Result<PipelineInfo> {
        let info = self.pipelines.get_info(name).await?;
        self.check(&info, Action::Read, user).await?;
        Ok(info)
    }

    /// Pipelines the user may read
    pub async fn list(&self, user: &UserIdentity) -> Result<Vec<PipelineInfo>> {
        let all = self.pipelines.list().await?;
        if user.is_admin() {
            return Ok(all);
        }

        let metas: Vec<_> = all.iter().map(PipelineInfo::resource_meta).collect();
        let checks = all.iter().zip(&metas).map(|(info, meta)| {
            self.resolver
                .get_effective_permissions(&info.name, meta, user)
        });
        let permissions = try_join_all(checks).await?;

        let visible: Vec<PipelineInfo> = all
            .into_iter()
            .zip(permissions)
            .filter(|(_, perms)| is_allowed(perms, Action::Read))
            .map(|(info, _)| info)
            .collect();
        debug!(user = %user.name, count = visible.len(), "Pipelines listed");
        Ok(visible)
    }

    /// Delete a pipeline and its stored ACL.
    ///
    /// The ACL goes first: if clearing it fails the pipeline record is
    /// kept and the caller can retry.
    pub async fn delete(&self, name: &str, user: &UserIdentity) -> Result<()> {
        let info = self.pipelines.get_info(name).await?;
        self.check(&info, Action::Write, user).await?;

        if let Err(e) = self.acls.delete_acl(name).await {
            warn!(pipeline = name, error = %e, "Failed to clear ACL, pipeline kept");
            return Err(e);
        }
        self.pipelines.delete(name).await?;
        info!(pipeline = name, user = %user.name, "Pipeline deleted");
        Ok(())
    }

    async fn check(&self, info: &PipelineInfo, action: Action, user: &UserIdentity) -> Result<()> {
        if user.is_admin() {
            return Ok(());
        }
        let permissions = self
            .resolver
            .get_effective_permissions(&info.name, &info.resource_meta(), user)
            .await?;
        ensure_allowed(&permissions, action, &info.name, &user.name)
    }
}
