// Requêtes et réponses JSON des endpoints wallet
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::ledger::{Transaction, UserRecord};

// Body de POST /addTransaction
#[derive(Debug, Deserialize, Validate)]
pub struct AddTransactionRequest {
    #[serde(rename = "type")]
    #[validate(length(min = 1))]
    pub kind: String,   // "CREDIT" / "DEBIT", casse libre
    pub amount: f64,
    pub category: Option<String>,
}

// Body de POST /updateTransactionCategory
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCategoryRequest {
    #[serde(rename = "transactionId")]
    #[validate(length(min = 1))]
    pub transaction_id: String,
    pub category: String,
}

#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    pub transaction_id: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    pub date_created: i64,
    pub balance_after_transaction: f64,
}

impl From<&Transaction> for TransactionResponse {
    fn from(t: &Transaction) -> Self {
        TransactionResponse {
            transaction_id: t.transaction_id.clone(),
            amount: decimal_to_f64(t.amount),
            kind: t.kind.to_string(),
            category: t.category.clone(),
            date_created: t.date_created,
            balance_after_transaction: decimal_to_f64(t.balance_after_transaction),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user_id: String,
    pub wallet_balance: f64,
    pub transactions: Vec<TransactionResponse>,
}

impl From<&UserRecord> for UserResponse {
    fn from(user: &UserRecord) -> Self {
        UserResponse {
            user_id: user.user_id.clone(),
            wallet_balance: decimal_to_f64(user.wallet_balance),
            transactions: user.transactions.iter().map(TransactionResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AddTransactionResponse {
    pub message: String,
    pub transaction: TransactionResponse,
}

#[derive(Debug, Serialize)]
pub struct UpdateCategoryResponse {
    pub message: String,
    pub user_id: String,
    pub transaction_id: String,
    pub category: String,
}

// Decimal -> nombre JSON
fn decimal_to_f64(decimal: Decimal) -> f64 {
    decimal.to_f64().unwrap_or(0.0)
}
