use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::database::UserRepository;

#[derive(Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    /// `healthy`, or `degraded` when the document store is unreachable.
    pub status: String,
    pub service: String,
    pub version: String,
    pub store: String,
    pub timestamp: i64,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service and store are healthy", body = HealthResponse),
        (status = 503, description = "Document store unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(users: web::Data<dyn UserRepository>) -> HttpResponse {
    let (status, store, mut response) = match users.ping().await {
        Ok(()) => ("healthy", "ok".to_string(), HttpResponse::Ok()),
        Err(e) => {
            log::warn!("⚠️ Health check: store unreachable: {}", e);
            ("degraded", "unreachable".to_string(), HttpResponse::ServiceUnavailable())
        }
    };

    response.json(HealthResponse {
        status: status.to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store,
        timestamp: chrono::Utc::now().timestamp(),
    })
}
