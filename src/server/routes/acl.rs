//! Pipeline ACL endpoints
//!
//! - `GET  /v1/acl/{pipelineName}`: effective ACL (`null` when hidden)
//! - `POST /v1/acl/{pipelineName}`: replace the ACL
//! - `GET  /v1/acl/{pipelineName}/permissions`: the caller's permissions

use crate::acl::Acl;
use crate::directory::Role;
use crate::server::AppState;
use crate::server::middleware::CurrentUser;
use crate::utils::error::Result;
use actix_web::{HttpResponse, web};

/// Roles allowed to view and edit ACLs
const ACL_EDITOR_ROLES: &[Role] = &[Role::Creator, Role::Admin];

/// Configure ACL routes
pub fn configure_acl_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/v1/acl")
            .route("/{pipeline_name}", web::get().to(get_acl))
            .route("/{pipeline_name}", web::post().to(save_acl))
            .route("/{pipeline_name}/permissions", web::get().to(get_permissions)),
    );
}

async fn get_acl(
    data: web::Data<AppState>,
    path: web::Path<String>,
    user: CurrentUser,
) -> Result<HttpResponse> {
    user.require_any(ACL_EDITOR_ROLES)?;
    let acl = data.acl_service.get_acl(&path, &user).await?;
    Ok(HttpResponse::Ok().json(acl))
}

async fn save_acl(
    data: web::Data<AppState>,
    path: web::Path<String>,
    user: CurrentUser,
    payload: web::Json<Acl>,
) -> Result<HttpResponse> {
    user.require_any(ACL_EDITOR_ROLES)?;
    let saved = data
        .acl_service
        .save_acl(&path, payload.into_inner(), &user)
        .await?;
    Ok(HttpResponse::Ok().json(saved))
}

async fn get_permissions(
    data: web::Data<AppState>,
    path: web::Path<String>,
    user: CurrentUser,
) -> Result<HttpResponse> {
    let permissions = data.acl_service.get_permissions(&path, &user).await?;
    Ok(HttpResponse::Ok().json(permissions))
}
