//! Error handling for the ACL service
//!
//! This module defines the error taxonomy shared by the authorization core,
//! the store collaborators and the HTTP layer.

#![allow(missing_docs)]

mod helpers;
mod response;
mod types;

pub use response::{ErrorDetail, ErrorResponse};
pub use types::{AclError, Result};
