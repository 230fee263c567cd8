//! Services module
//!
//! Business logic sitting between the HTTP routes and the authorization core.

pub mod acl;
pub mod pipeline;

pub use acl::AclService;
pub use pipeline::PipelineService;
