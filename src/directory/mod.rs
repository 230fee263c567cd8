//! User directory
//!
//! Resolves principals handed over by the transport into user identities
//! with group memberships and roles.

mod system;
mod types;

pub use system::{Directory, StaticDirectory};
pub use types::{Role, UserIdentity};
