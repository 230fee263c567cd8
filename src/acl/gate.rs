//! Authorization gate

use super::types::{Action, Permission};
use crate::utils::error::{AclError, Result};
use tracing::debug;

/// True iff some permission grants `action`.
pub fn is_allowed(permissions: &[Permission], action: Action) -> bool {
    permissions.iter().any(|p| p.allows(action))
}

/// Check-then-act helper: fails with an authorization error before the
/// caller touches any store.
pub fn ensure_allowed(
    permissions: &[Permission],
    action: Action,
    resource_id: &str,
    user: &str,
) -> Result<()> {
    if is_allowed(permissions, action) {
        debug!(resource_id, user, action = %action, "access granted");
        Ok(())
    } else {
        debug!(resource_id, user, action = %action, "access denied");
        Err(AclError::authorization(format!(
            "User '{}' lacks {} on '{}'",
            user, action, resource_id
        )))
    }
}
