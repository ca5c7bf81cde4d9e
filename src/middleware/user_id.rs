use actix_web::{dev::Payload, FromRequest, HttpRequest};
use futures::future::{ready, Ready};

use crate::utils::errors::ApiError;

pub const USER_ID_HEADER: &str = "userId";

/// Identifiant du user lu dans le header `userId`.
/// Aucune authentification : on fait confiance à l'appelant.
#[derive(Debug, Clone)]
pub struct UserId(pub String);

impl FromRequest for UserId {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        // 1. Extraire le header (nom insensible à la casse)
        let header = match req.headers().get(USER_ID_HEADER) {
            Some(header) => header,
            None => return ready(Err(ApiError::MissingUserId)),
        };

        // 2. Convertir en string non vide
        match header.to_str() {
            Ok(value) if !value.trim().is_empty() => ready(Ok(UserId(value.to_string()))),
            _ => ready(Err(ApiError::MissingUserId)),
        }
    }
}
