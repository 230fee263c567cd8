//! Principal extraction
//!
//! The service sits behind a trusted proxy that authenticates users and
//! forwards the principal name in a header (`auth.user_header`). The
//! extractor resolves that name through the directory.

use crate::directory::{Role, UserIdentity};
use crate::server::AppState;
use crate::utils::error::{AclError, Result};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use std::future::Future;
use std::ops::Deref;
use std::pin::Pin;
use tracing::debug;

/// The resolved user behind the current request
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserIdentity);

impl CurrentUser {
    /// Fail with an authorization error unless the user holds one of `roles`
    pub fn require_any(&self, roles: &[Role]) -> Result<()> {
        if self.0.has_any_role(roles) {
            return Ok(());
        }
        let wanted: Vec<&str> = roles.iter().map(Role::as_str).collect();
        Err(AclError::authorization(format!(
            "User '{}' needs one of the roles [{}]",
            self.0.name,
            wanted.join(", ")
        )))
    }

    pub fn into_inner(self) -> UserIdentity {
        self.0
    }
}

impl Deref for CurrentUser {
    type Target = UserIdentity;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for CurrentUser {
    type Error = AclError;
    type Future = Pin<Box<dyn Future<Output = Result<Self>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let req = req.clone();

        Box::pin(async move {
            let state =
                state.ok_or_else(|| AclError::internal("Application state is not configured"))?;
            let header = &state.config().auth().user_header;

            let principal = req
                .headers()
                .get(header.as_str())
                .and_then(|value| value.to_str().ok())
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| {
                    debug!(path = req.path(), "Request without principal header");
                    AclError::unauthorized(format!("Missing {} header", header))
                })?;

            let identity = state.directory.resolve(principal).await?;
            Ok(CurrentUser(identity))
        })
    }
}
