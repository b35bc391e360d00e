//! Group API handlers
//!
//! - POST /group - Create a group under a fresh id
//! - GET /group - List every group
//! - GET /group/{id} - List every version of one id
//! - GET /group/{id}/{version} - Get one version
//! - POST /group/{id}/{version} - Store a version at the path's id and version
//! - PUT /group/{id}/{version} - Replace an existing version
//! - DELETE /group/{id}/{version} - Delete one version
//! - GET /group/{id}/{version}/{labels} - Members whose labels equal `k:v;k:v`

use actix_web::{HttpRequest, HttpResponse, web};
use confreg_registry::Group;
use tracing::debug;

use super::model::{GroupPayload, json_body};
use crate::{error::AppError, model::AppState};

pub async fn create_group(
    req: HttpRequest,
    data: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let payload: GroupPayload = json_body(&req, &body)?;
    let group = payload.into_group()?;
    let created = data.groups().create(group).await?;
    Ok(HttpResponse::Ok().json(created))
}

pub async fn get_all_groups(data: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let groups = data.groups().get_all().await?;
    debug!(count = groups.len(), "listed groups");
    Ok(HttpResponse::Ok().json(groups))
}

pub async fn get_group_versions(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let groups = data.groups().get_all_versions_by_id(&id).await?;
    Ok(HttpResponse::Ok().json(groups))
}

pub async fn get_group(
    data: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (id, version) = path.into_inner();
    let group = data.groups().get_by_id_and_version(&id, &version).await?;
    Ok(HttpResponse::Ok().json(group))
}

pub async fn add_group_version(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<(String, String)>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let (id, version) = path.into_inner();
    let mut group: Group = json_body(&req, &body)?;
    group.id = id;
    group.version = version;

    let stored = data.groups().add_version(group).await?;
    Ok(HttpResponse::Ok().json(stored))
}

pub async fn replace_group(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<(String, String)>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let (id, version) = path.into_inner();
    // Decoded in full before the repository deletes anything
    let group: Group = json_body(&req, &body)?;

    let replaced = data.groups().replace(&id, &version, group).await?;
    Ok(HttpResponse::Ok().json(replaced))
}

pub async fn delete_group(
    data: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (id, version) = path.into_inner();
    let confirmation = data.groups().delete(&id, &version).await?;
    Ok(HttpResponse::Ok().json(confirmation))
}

pub async fn find_group_members(
    data: web::Data<AppState>,
    path: web::Path<(String, String, String)>,
) -> Result<HttpResponse, AppError> {
    let (id, version, labels) = path.into_inner();
    let members = data.groups().find_by_labels(&id, &version, &labels).await?;
    debug!(
        id = %id,
        version = %version,
        labels = %labels,
        matched = members.len(),
        "label query"
    );
    Ok(HttpResponse::Ok().json(members))
}
