//! Utility modules for the ACL service
//!
//! - **error**: Error type, HTTP mapping and helpers
//! - **logging**: Tracing subscriber initialization

pub mod error;
pub mod logging;

pub use error::{AclError, Result};
pub use logging::init_logging;
