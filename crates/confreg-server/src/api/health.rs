//! Store health endpoint
//!
//! - GET /health - 200 when the store answers, 503 otherwise

use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::{error::AppError, model::AppState};

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub backend: String,
    pub timestamp: String,
}

pub async fn health(data: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    data.store().health_check().await?;

    Ok(HttpResponse::Ok().json(HealthStatus {
        status: "UP",
        backend: data.store().backend().to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    }))
}
