//! HTTP route modules

pub mod acl;
pub mod pipelines;

pub use acl::configure_acl_routes;
pub use pipelines::configure_pipeline_routes;
