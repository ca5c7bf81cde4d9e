use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::middleware::UserId;
use crate::models::dto::{
    AddTransactionRequest, AddTransactionResponse, TransactionResponse, UpdateCategoryRequest,
    UpdateCategoryResponse, UserResponse,
};
use crate::services::wallet_service::WalletService;
use crate::utils::errors::ApiError;

/// GET /getUser - Le user et ses transactions, les plus récentes d'abord
#[get("/getUser")]
pub async fn get_user(
    user_id: UserId,
    service: web::Data<WalletService>,
) -> Result<HttpResponse, ApiError> {
    let user = service.get_user(&user_id.0).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(&user)))
}

/// POST /addTransaction - Ajouter une transaction CREDIT ou DEBIT
#[post("/addTransaction")]
pub async fn add_transaction(
    user_id: UserId,
    body: web::Json<AddTransactionRequest>,
    service: web::Data<WalletService>,
) -> Result<HttpResponse, ApiError> {
    if let Err(errors) = body.validate() {
        log::warn!("Invalid addTransaction body: {}", errors);
        return Err(ApiError::InvalidBody);
    }

    let request = body.into_inner();
    let transaction = service
        .add_transaction(&user_id.0, &request.kind, request.amount, request.category)
        .await?;

    Ok(HttpResponse::Ok().json(AddTransactionResponse {
        message: "Transaction added".to_string(),
        transaction: TransactionResponse::from(&transaction),
    }))
}

/// POST /updateTransactionCategory - Changer la catégorie d'une transaction
#[post("/updateTransactionCategory")]
pub async fn update_transaction_category(
    user_id: UserId,
    body: web::Json<UpdateCategoryRequest>,
    service: web::Data<WalletService>,
) -> Result<HttpResponse, ApiError> {
    if let Err(errors) = body.validate() {
        log::warn!("Invalid updateTransactionCategory body: {}", errors);
        return Err(ApiError::InvalidBody);
    }

    let request = body.into_inner();
    service
        .update_transaction_category(&user_id.0, &request.transaction_id, &request.category)
        .await?;

    Ok(HttpResponse::Ok().json(UpdateCategoryResponse {
        message: "Transaction category updated".to_string(),
        user_id: user_id.0,
        transaction_id: request.transaction_id,
        category: request.category,
    }))
}

pub fn users_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(get_user)
        .service(add_transaction)
        .service(update_transaction_category);
}
