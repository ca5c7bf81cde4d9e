pub mod health;
pub mod users;


use actix_web::{web, HttpRequest};
use actix_web::error::JsonPayloadError;

use crate::utils::errors::ApiError;

/// Body JSON illisible -> 400 "Invalid request body" (au lieu du texte d'actix)
fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    log::warn!("Rejected JSON body on {}: {}", req.path(), err);
    ApiError::InvalidBody.into()
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(health::health_check)
        .configure(users::users_routes);
}
