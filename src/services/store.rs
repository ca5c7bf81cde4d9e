use async_trait::async_trait;
use rust_decimal::Decimal;
use sea_orm::sea_query::{Alias, Expr, Query};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, FromQueryResult};

use crate::models::ledger::{Transaction, UserChanges, UserRecord};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("User not found")]
    UserNotFound,
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    #[error("Corrupted transactions for user {0}: {1}")]
    Corrupted(String, serde_json::Error),
}

/// Accès à la table des users : lecture d'une ligne, réécriture de ses champs
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get(&self, user_id: &str) -> Result<Option<UserRecord>, StoreError>;

    async fn update(&self, user_id: &str, changes: UserChanges) -> Result<(), StoreError>;
}

// Ligne brute telle que lue en base
#[derive(Debug, FromQueryResult)]
struct UserRow {
    user_id: String,
    wallet_balance: Option<Decimal>,
    transactions: Option<serde_json::Value>,
    next_transaction_id: Option<i64>,
}

impl UserRow {
    fn into_record(self) -> Result<UserRecord, StoreError> {
        let transactions: Vec<Transaction> = match self.transactions {
            Some(value) => serde_json::from_value(value)
                .map_err(|e| StoreError::Corrupted(self.user_id.clone(), e))?,
            None => Vec::new(),
        };

        Ok(UserRecord {
            user_id: self.user_id,
            wallet_balance: self.wallet_balance.unwrap_or(Decimal::ZERO),
            transactions,
            next_transaction_id: self.next_transaction_id.map(|n| n as u64),
        })
    }
}

/// Store Postgres via SeaORM. Le nom de table vient de la configuration,
/// d'où les requêtes sea_query plutôt qu'une entité figée.
pub struct PgUserStore {
    db: DatabaseConnection,
    table: String,
}

impl PgUserStore {
    pub fn new(db: DatabaseConnection, table: impl Into<String>) -> Self {
        Self {
            db,
            table: table.into(),
        }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn get(&self, user_id: &str) -> Result<Option<UserRecord>, StoreError> {
        let query = Query::select()
            .columns([
                Alias::new("user_id"),
                Alias::new("wallet_balance"),
                Alias::new("transactions"),
                Alias::new("next_transaction_id"),
            ])
            .from(Alias::new(self.table.as_str()))
            .and_where(Expr::col(Alias::new("user_id")).eq(user_id))
            .to_owned();

        let backend = self.db.get_database_backend();
        let row = UserRow::find_by_statement(backend.build(&query))
            .one(&self.db)
            .await?;

        row.map(UserRow::into_record).transpose()
    }

    async fn update(&self, user_id: &str, changes: UserChanges) -> Result<(), StoreError> {
        let transactions = serde_json::to_value(&changes.transactions)
            .map_err(|e| StoreError::Corrupted(user_id.to_string(), e))?;

        let mut query = Query::update();
        query
            .table(Alias::new(self.table.as_str()))
            .value(Alias::new("transactions"), transactions)
            .and_where(Expr::col(Alias::new("user_id")).eq(user_id));

        if let Some(balance) = changes.wallet_balance {
            query.value(Alias::new("wallet_balance"), balance);
        }
        if let Some(next_id) = changes.next_transaction_id {
            query.value(Alias::new("next_transaction_id"), next_id as i64);
        }

        let backend = self.db.get_database_backend();
        let result = self.db.execute(backend.build(&query)).await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::UserNotFound);
        }

        Ok(())
    }
}

/// Store en mémoire pour les tests des handlers
#[cfg(test)]
pub mod memory {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    pub struct MemoryUserStore {
        users: Mutex<HashMap<String, UserRecord>>,
        pub fail: std::sync::atomic::AtomicBool,
    }

    impl MemoryUserStore {
        pub fn with_user(user_id: &str, balance: Decimal) -> Self {
            let store = Self::default();
            store.insert(UserRecord {
                user_id: user_id.to_string(),
                wallet_balance: balance,
                transactions: Vec::new(),
                next_transaction_id: None,
            });
            store
        }

        pub fn insert(&self, record: UserRecord) {
            self.users
                .lock()
                .unwrap()
                .insert(record.user_id.clone(), record);
        }

        pub fn snapshot(&self, user_id: &str) -> Option<UserRecord> {
            self.users.lock().unwrap().get(user_id).cloned()
        }

        fn check_fail(&self) -> Result<(), StoreError> {
            if self.fail.load(std::sync::atomic::Ordering::SeqCst) {
                return Err(StoreError::Database(DbErr::Custom(
                    "connection reset by peer".to_string(),
                )));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl UserStore for MemoryUserStore {
        async fn get(&self, user_id: &str) -> Result<Option<UserRecord>, StoreError> {
            self.check_fail()?;
            // yield pour laisser les requêtes concurrentes s'entrelacer
            tokio::task::yield_now().await;
            Ok(self.snapshot(user_id))
        }

        async fn update(&self, user_id: &str, changes: UserChanges) -> Result<(), StoreError> {
            self.check_fail()?;
            tokio::task::yield_now().await;
            let mut users = self.users.lock().unwrap();
            let record = users.get_mut(user_id).ok_or(StoreError::UserNotFound)?;

            record.transactions = changes.transactions;
            if let Some(balance) = changes.wallet_balance {
                record.wallet_balance = balance;
            }
            if let Some(next_id) = changes.next_transaction_id {
                record.next_transaction_id = Some(next_id);
            }
            Ok(())
        }
    }
}
