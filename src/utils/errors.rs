use actix_web::{http::StatusCode, HttpResponse, ResponseError};

use crate::services::ledger::LedgerError;
use crate::services::store::StoreError;

/// Erreurs renvoyées au client. Les messages sont fixes : le détail interne
/// d'une panne du store est loggé, jamais renvoyé.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("User not found")]
    UserNotFound,
    #[error("Missing userId header")]
    MissingUserId,
    #[error("Invalid request body")]
    InvalidBody,
    #[error("{0}")]
    Ledger(#[from] LedgerError),
    #[error("Request could not be processed")]
    Store(#[source] StoreError),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UserNotFound => ApiError::UserNotFound,
            other => ApiError::Store(other),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::UserNotFound | ApiError::Ledger(LedgerError::TransactionNotFound) => {
                StatusCode::NOT_FOUND
            }
            // pannes du store comprises : tout le reste sort en 400
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Store(inner) => log::error!("Store failure: {}", inner),
            ApiError::Ledger(inner) => log::warn!("Rejected: {}", inner),
            _ => log::debug!("Request error: {}", self),
        }

        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "detail": self.to_string()
        }))
    }
}
