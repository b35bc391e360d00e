//! Configuration API handlers
//!
//! - POST /config - Create a configuration under a fresh id
//! - GET /config - List every configuration
//! - GET /config/{id} - List every version of one id
//! - POST /config/{id} - Add a version to an id
//! - GET /config/{id}/{version} - Get one version
//! - DELETE /config/{id}/{version} - Delete one version

use actix_web::{HttpRequest, HttpResponse, web};
use confreg_registry::Configuration;
use tracing::debug;

use super::model::json_body;
use crate::{error::AppError, model::AppState};

pub async fn create_configuration(
    req: HttpRequest,
    data: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let config: Configuration = json_body(&req, &body)?;
    let created = data.configurations().create(config).await?;
    Ok(HttpResponse::Ok().json(created))
}

pub async fn get_all_configurations(data: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let configs = data.configurations().get_all().await?;
    debug!(count = configs.len(), "listed configurations");
    Ok(HttpResponse::Ok().json(configs))
}

pub async fn get_configuration_versions(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let configs = data.configurations().get_all_versions_by_id(&id).await?;
    Ok(HttpResponse::Ok().json(configs))
}

pub async fn add_configuration_version(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let config: Configuration = json_body(&req, &body)?;
    let stored = data.configurations().add_version(&id, config).await?;
    Ok(HttpResponse::Ok().json(stored))
}

pub async fn get_configuration(
    data: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (id, version) = path.into_inner();
    let config = data
        .configurations()
        .get_by_id_and_version(&id, &version)
        .await?;
    Ok(HttpResponse::Ok().json(config))
}

pub async fn delete_configuration(
    data: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (id, version) = path.into_inner();
    let confirmation = data.configurations().delete(&id, &version).await?;
    Ok(HttpResponse::Ok().json(confirmation))
}
