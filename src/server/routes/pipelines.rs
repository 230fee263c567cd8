//! Pipeline metadata endpoints

use crate::directory::Role;
use crate::server::AppState;
use crate::server::middleware::CurrentUser;
use crate::utils::error::Result;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

/// Pipeline creation payload
#[derive(Debug, Deserialize)]
pub struct CreatePipelineRequest {
    pub name: String,
    #[serde(default)]
    pub title: String,
}

/// Configure pipeline routes
pub fn configure_pipeline_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/v1/pipelines")
            .route("", web::get().to(list_pipelines))
            .route("", web::post().to(create_pipeline))
            .route("/{name}", web::get().to(get_pipeline))
            .route("/{name}", web::delete().to(delete_pipeline)),
    );
}

/// GET /v1/pipelines
async fn list_pipelines(data: web::Data<AppState>, user: CurrentUser) -> Result<HttpResponse> {
    let pipelines = data.pipeline_service.list(&user).await?;
    Ok(HttpResponse::Ok().json(pipelines))
}

/// POST /v1/pipelines
async fn create_pipeline(
    data: web::Data<AppState>,
    user: CurrentUser,
    payload: web::Json<CreatePipelineRequest>,
) -> Result<HttpResponse> {
    user.require_any(&[Role::Creator, Role::Admin])?;
    let info = data
        .pipeline_service
        .create(&payload.name, &payload.title, &user)
        .await?;
    Ok(HttpResponse::Created().json(info))
}

/// GET /v1/pipelines/{name}
async fn get_pipeline(
    data: web::Data<AppState>,
    path: web::Path<String>,
    user: CurrentUser,
) -> Result<HttpResponse> {
    let info = data.pipeline_service.get_info(&path, &user).await?;
    Ok(HttpResponse::Ok().json(info))
}

/// DELETE /v1/pipelines/{name}
async fn delete_pipeline(
    data: web::Data<AppState>,
    path: web::Path<String>,
    user: CurrentUser,
) -> Result<HttpResponse> {
    user.require_any(&[Role::Creator, Role::Admin])?;
    data.pipeline_service.delete(&path, &user).await?;
    Ok(HttpResponse::NoContent().finish())
}
