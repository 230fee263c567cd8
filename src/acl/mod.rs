//! Pipeline access control
//!
//! The authorization core: the resource/action model, the resolver that
//! computes effective ACLs and permissions (including the implicit owner
//! grant), and the gate callers consult before mutating a resource.

mod gate;
mod resolver;
mod types;

pub use gate::{ensure_allowed, is_allowed};
pub use resolver::{
    AclResolver, Clock, FixedClock, SystemClock, effective_acl, effective_permissions,
    owner_permission,
};
pub use types::{Acl, Action, Permission, ResourceMeta, ResourceType, SubjectType};
