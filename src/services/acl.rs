//! ACL administration service

use crate::acl::{Acl, AclResolver, Action, Permission, ResourceType, ensure_allowed};
use crate::directory::UserIdentity;
use crate::storage::{PipelineInfo, PipelineStore, WriteCondition};
use crate::utils::error::{AclError, Result};
use std::sync::Arc;
use tracing::{Instrument, debug, info, info_span};

/// Reads and edits pipeline ACLs on behalf of a resolved user
#[derive(Clone)]
pub struct AclService {
    resolver: AclResolver,
    pipelines: Arc<dyn PipelineStore>,
    optimistic_concurrency: bool,
}

impl AclService {
    pub fn new(
        resolver: AclResolver,
        pipelines: Arc<dyn PipelineStore>,
        optimistic_concurrency: bool,
    ) -> Self {
        Self {
            resolver,
            pipelines,
            optimistic_concurrency,
        }
    }

    /// Effective ACL of a pipeline, `None` when nothing is stored and the
    /// user is not the creator.
    pub async fn get_acl(&self, name: &str, user: &UserIdentity) -> Result<Option<Acl>> {
        let info = self.pipelines.get_info(name).await?;
        let meta = info.resource_meta();

        async {
            let acl = self.resolver.get_effective_acl(name, &meta, user).await?;
            debug!(user = %user.name, found = acl.is_some(), "ACL resolved");
            Ok::<_, AclError>(acl)
        }
        .instrument(pipeline_span(&info))
        .await
    }

    /// Permissions on a pipeline that apply to `user`
    pub async fn get_permissions(
        &self,
        name: &str,
        user: &UserIdentity,
    ) -> Result<Vec<Permission>> {
        let info = self.pipelines.get_info(name).await?;
        let meta = info.resource_meta();

        async {
            let permissions = self
                .resolver
                .get_effective_permissions(name, &meta, user)
                .await?;
            debug!(user = %user.name, count = permissions.len(), "permissions resolved");
            Ok::<_, AclError>(permissions)
        }
        .instrument(pipeline_span(&info))
        .await
    }

    /// Replace the ACL of a pipeline.
    ///
    /// The editor needs `WRITE` unless they are an admin. Owner and creation
    /// time are taken from the pipeline record, and the ACL is stamped with
    /// the editor and the current time. With optimistic concurrency enabled
    /// the incoming `lastModifiedOn` must match the stored one. The returned
    /// ACL carries the version the store assigned.
    pub async fn save_acl(&self, name: &str, mut acl: Acl, user: &UserIdentity) -> Result<Acl> {
        let info = self.pipelines.get_info(name).await?;
        let meta = info.resource_meta();

        async {
            if !user.is_admin() {
                let permissions = self
                    .resolver
                    .get_effective_permissions(name, &meta, user)
                    .await?;
                ensure_allowed(&permissions, Action::Write, name, &user.name)?;
            }

            validate_acl(name, &acl)?;

            let condition = if self.optimistic_concurrency {
                WriteCondition::Unmodified {
                    last_modified_on: acl.last_modified_on,
                }
            } else {
                WriteCondition::Always
            };

            let now = self.resolver.now();
            acl.resource_owner = meta.owner.clone();
            acl.resource_type = meta.resource_type;
            acl.resource_created_time = meta.created_time;
            acl.last_modified_by = user.name.clone();
            acl.last_modified_on = now;
            for permission in &mut acl.permissions {
                permission.resource_id = name.to_string();
                if permission.last_modified_by.is_empty() {
                    permission.last_modified_by = user.name.clone();
                    permission.last_modified_on = now;
                }
            }

            let saved = self.resolver.save_acl(name, acl, condition).await?;
            info!(
                user = %user.name,
                permissions = saved.permissions.len(),
                version = saved.last_modified_on,
                "ACL saved"
            );
            Ok::<_, AclError>(saved)
        }
        .instrument(pipeline_span(&info))
        .await
    }
}

fn pipeline_span(info: &PipelineInfo) -> tracing::Span {
    info_span!("pipeline", name = %info.name, title = %info.title)
}

/// Structural checks on an incoming ACL
pub(crate) fn validate_acl(name: &str, acl: &Acl) -> Result<()> {
    if acl.resource_id != name {
        return Err(AclError::validation(format!(
            "ACL resource id '{}' does not match pipeline '{}'",
            acl.resource_id, name
        )));
    }
    if acl.resource_type != ResourceType::Pipeline {
        return Err(AclError::validation("ACL resource type must be PIPELINE"));
    }

    for permission in &acl.permissions {
        if permission.subject_id.trim().is_empty() {
            return Err(AclError::validation("Permission subject id cannot be empty"));
        }
        if !permission.resource_id.is_empty() && permission.resource_id != name {
            return Err(AclError::validation(format!(
                "Permission for '{}' names resource '{}'",
                permission.subject_id, permission.resource_id
            )));
        }
        if let Some(action) = permission
            .actions
            .iter()
            .find(|a| !acl.resource_type.supports(**a))
        {
            return Err(AclError::validation(format!(
                "Action {} is not valid for {:?}",
                action, acl.resource_type
            )));
        }
    }
    Ok(())
}
