use std::sync::Arc;

use chrono::Utc;

use crate::models::ledger::{Transaction, UserChanges, UserRecord};
use crate::services::ledger;
use crate::services::store::UserStore;
use crate::services::user_locks::UserLocks;
use crate::utils::errors::ApiError;

/// Orchestration store -> ledger -> store pour les trois opérations du wallet
pub struct WalletService {
    store: Arc<dyn UserStore>,
    locks: UserLocks,
}

impl WalletService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self {
            store,
            locks: UserLocks::new(),
        }
    }

    async fn load(&self, user_id: &str) -> Result<UserRecord, ApiError> {
        self.store
            .get(user_id)
            .await?
            .ok_or(ApiError::UserNotFound)
    }

    /// Retourne le user avec ses transactions triées de la plus récente à la plus ancienne
    pub async fn get_user(&self, user_id: &str) -> Result<UserRecord, ApiError> {
        let mut user = self.load(user_id).await?;
        ledger::sort_by_date_desc(&mut user.transactions);
        Ok(user)
    }

    /// Ajoute une transaction CREDIT/DEBIT et persiste liste + solde en un seul update.
    /// Les écritures d'un même user sont sérialisées par le verrou.
    pub async fn add_transaction(
        &self,
        user_id: &str,
        kind: &str,
        amount: f64,
        category: Option<String>,
    ) -> Result<Transaction, ApiError> {
        let _guard = self.locks.acquire(user_id).await;

        // 1. Le user doit exister avant toute validation du body
        let mut user = self.load(user_id).await?;

        // 2. Type et montant
        let kind = ledger::parse_type(kind)?;
        let amount = ledger::normalize_amount(amount)?;

        // 3. Calcul en mémoire (refus si fonds insuffisants)
        let transaction =
            ledger::append_transaction(&mut user, kind, amount, category, Utc::now().timestamp())?;

        // 4. Persistance
        self.store
            .update(
                user_id,
                UserChanges {
                    transactions: user.transactions,
                    wallet_balance: Some(user.wallet_balance),
                    next_transaction_id: user.next_transaction_id,
                },
            )
            .await?;

        log::info!(
            "Transaction {} added for user {}: {} {} (balance {})",
            transaction.transaction_id,
            user_id,
            transaction.kind,
            transaction.amount,
            transaction.balance_after_transaction
        );

        Ok(transaction)
    }

    /// Change la catégorie d'une transaction ; seule la liste est réécrite
    pub async fn update_transaction_category(
        &self,
        user_id: &str,
        transaction_id: &str,
        category: &str,
    ) -> Result<(), ApiError> {
        let _guard = self.locks.acquire(user_id).await;

        let mut user = self.load(user_id).await?;
        ledger::set_category(&mut user.transactions, transaction_id, category)?;

        self.store
            .update(
                user_id,
                UserChanges {
                    transactions: user.transactions,
                    wallet_balance: None,
                    next_transaction_id: None,
                },
            )
            .await?;

        log::info!(
            "Transaction {} of user {} recategorized as {:?}",
            transaction_id,
            user_id,
            category
        );

        Ok(())
    }
}
