use actix_web::{get, HttpResponse};
use chrono::Utc;
use crate::models::health::HealthResponse;

/// GET /health - liveness, ne touche pas au store
#[get("/health")]
pub async fn health_check() -> HttpResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        service: env!("CARGO_PKG_NAME"),
        time: Utc::now(),
    };

    HttpResponse::Ok().json(response)
}
