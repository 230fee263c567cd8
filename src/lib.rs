//! # pipeline-acl
//!
//! Access control for data pipelines.
//!
//! A pipeline without a stored ACL implicitly grants its creator every
//! action. The resolver synthesizes that owner default on read without
//! persisting it, filters stored grants down to the ones that apply to a
//! requester, and the gate turns the result into allow/deny decisions.
//!
//! ## Embedding the resolver
//!
//! ```rust,no_run
//! use pipeline_acl::acl::{AclResolver, Action, is_allowed};
//! use pipeline_acl::directory::UserIdentity;
//! use pipeline_acl::storage::{MemoryAclStore, PipelineInfo};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let resolver = AclResolver::new(Arc::new(MemoryAclStore::new()));
//!     let pipeline = PipelineInfo {
//!         name: "orders".to_string(),
//!         title: "Orders ETL".to_string(),
//!         creator: "alice".to_string(),
//!         created: 1_700_000_000_000,
//!     };
//!
//!     let alice = UserIdentity::new("alice");
//!     let perms = resolver
//!         .get_effective_permissions(&pipeline.name, &pipeline.resource_meta(), &alice)
//!         .await?;
//!     assert!(is_allowed(&perms, Action::Write));
//!     Ok(())
//! }
//! ```
//!
//! ## Service mode
//!
//! ```rust,no_run
//! use pipeline_acl::{Config, server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/acl.yaml").await?;
//!     server::run_server(config).await?;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod acl;
pub mod config;
pub mod directory;
pub mod server;
pub mod services;
pub mod storage;
pub mod utils;

// Re-export main types
pub use acl::{Acl, AclResolver, Action, Permission, ResourceType, SubjectType};
pub use config::Config;
pub use directory::{Role, UserIdentity};
pub use utils::error::{AclError, Result};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Version and commit reported at startup and by `/health`
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct BuildInfo {
    pub version: &'static str,
    /// Short commit hash, `unknown` outside a git checkout
    pub git_hash: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            git_hash: option_env!("GIT_HASH").unwrap_or("unknown"),
        }
    }
}

/// Build information of the running binary
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
