// ============================================================================
// LEDGER - LOGIQUE PURE
// ============================================================================
//
// Description:
//   Calculs sur le ledger d'un utilisateur, sans accès au store :
//   normalisation des montants, contrôle des fonds, nouveau solde,
//   attribution des identifiants, changement de catégorie, tri.
//
// Points d'attention:
//   - Les montants sont arrondis à 2 décimales AVANT tout calcul
//   - Le champ `amount` stocké reste positif, seul le solde est signé
//   - Les identifiants viennent d'un compteur, pas de la position dans la liste
//
// ============================================================================

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::models::ledger::{Transaction, TransactionType, UserRecord, DEFAULT_CATEGORY};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LedgerError {
    #[error("Insufficient funds")]
    InsufficientFunds,
    #[error("Invalid amount")]
    InvalidAmount,
    #[error("Invalid transaction type")]
    InvalidType,
    #[error("Transaction not found")]
    TransactionNotFound,
}

/// Parse le type de transaction (insensible à la casse)
pub fn parse_type(raw: &str) -> Result<TransactionType, LedgerError> {
    TransactionType::from_str(raw).map_err(|_| LedgerError::InvalidType)
}

/// Ramène le montant reçu à exactement 2 décimales.
/// Le formatage peut arrondir : 10.005 devient 10.00 ou 10.01 selon sa valeur binaire.
pub fn normalize_amount(raw: f64) -> Result<Decimal, LedgerError> {
    if !raw.is_finite() {
        return Err(LedgerError::InvalidAmount);
    }

    let formatted = format!("{:.2}", raw);
    let amount = Decimal::from_str(&formatted).map_err(|_| LedgerError::InvalidAmount)?;

    // 0.001 s'arrondit à 0.00 : refusé aussi
    if amount <= Decimal::ZERO {
        return Err(LedgerError::InvalidAmount);
    }

    Ok(amount)
}

/// Prochain identifiant à attribuer pour ce user
pub fn next_transaction_id(record: &UserRecord) -> u64 {
    record
        .next_transaction_id
        .unwrap_or(record.transactions.len() as u64)
}

/// Ajoute une transaction au ledger en mémoire et met à jour solde + compteur.
/// Rien n'est modifié si la transaction est refusée.
pub fn append_transaction(
    record: &mut UserRecord,
    kind: TransactionType,
    amount: Decimal,
    category: Option<String>,
    date_created: i64,
) -> Result<Transaction, LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::InvalidAmount);
    }

    let signed_amount = match kind {
        TransactionType::Credit => amount,
        TransactionType::Debit => -amount,
    };

    if kind == TransactionType::Debit && record.wallet_balance < amount {
        return Err(LedgerError::InsufficientFunds);
    }

    // un solde hors de la plage Decimal est refusé, jamais de panique
    let new_balance = record
        .wallet_balance
        .checked_add(signed_amount)
        .ok_or(LedgerError::InvalidAmount)?;
    let id = next_transaction_id(record);

    let transaction = Transaction {
        transaction_id: id.to_string(),
        amount,
        kind,
        category: category
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        date_created,
        balance_after_transaction: new_balance,
    };

    record.transactions.push(transaction.clone());
    record.wallet_balance = new_balance;
    record.next_transaction_id = Some(id + 1);

    Ok(transaction)
}

/// Change la catégorie de la première transaction portant cet identifiant.
// TODO: index par transaction_id si le volume de transactions par user grossit
pub fn set_category(
    transactions: &mut [Transaction],
    transaction_id: &str,
    category: &str,
) -> Result<(), LedgerError> {
    let transaction = transactions
        .iter_mut()
        .find(|t| t.transaction_id == transaction_id)
        .ok_or(LedgerError::TransactionNotFound)?;

    transaction.category = category.to_string();
    Ok(())
}

/// Tri du plus récent au plus ancien ; le tri est stable pour les égalités
pub fn sort_by_date_desc(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| b.date_created.cmp(&a.date_created));
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn user(balance: &str) -> UserRecord {
        UserRecord {
            user_id: "u1".to_string(),
            wallet_balance: dec(balance),
            transactions: Vec::new(),
            next_transaction_id: None,
        }
    }

    #[test]
    fn test_parse_type_is_case_insensitive() {
        assert_eq!(parse_type("credit"), Ok(TransactionType::Credit));
        assert_eq!(parse_type("Debit"), Ok(TransactionType::Debit));
        assert_eq!(parse_type("refund"), Err(LedgerError::InvalidType));
    }

    #[test]
    fn test_normalize_amount() {
        assert_eq!(normalize_amount(50.5).unwrap().to_string(), "50.50");
        assert_eq!(normalize_amount(200.0).unwrap().to_string(), "200.00");
        assert_eq!(normalize_amount(1.239).unwrap(), dec("1.24"));
        assert_eq!(normalize_amount(0.001), Err(LedgerError::InvalidAmount));
        assert_eq!(normalize_amount(-5.0), Err(LedgerError::InvalidAmount));
        assert_eq!(normalize_amount(f64::NAN), Err(LedgerError::InvalidAmount));
    }

    #[test]
    fn test_credit_increases_balance() {
        let mut record = user("100.00");
        let tx = append_transaction(
            &mut record,
            TransactionType::Credit,
            dec("50.50"),
            None,
            1_700_000_000,
        )
        .unwrap();

        assert_eq!(tx.transaction_id, "0");
        assert_eq!(tx.amount.to_string(), "50.50");
        assert_eq!(tx.balance_after_transaction.to_string(), "150.50");
        assert_eq!(tx.category, "None");
        assert_eq!(record.wallet_balance, dec("150.50"));
        assert_eq!(record.transactions, vec![tx]);
        assert_eq!(record.next_transaction_id, Some(1));
    }

    #[test]
    fn test_debit_decreases_balance_down_to_zero() {
        let mut record = user("80.00");
        let tx = append_transaction(
            &mut record,
            TransactionType::Debit,
            dec("80.00"),
            Some("Rent".to_string()),
            1,
        )
        .unwrap();

        assert_eq!(tx.amount, dec("80.00"));
        assert_eq!(tx.balance_after_transaction, Decimal::ZERO);
        assert_eq!(record.wallet_balance, Decimal::ZERO);
        assert_eq!(tx.category, "Rent");
    }

    #[test]
    fn test_debit_over_balance_is_rejected_without_mutation() {
        let mut record = user("150.50");
        let before = record.clone();

        let result = append_transaction(&mut record, TransactionType::Debit, dec("200.00"), None, 1);

        assert_eq!(result, Err(LedgerError::InsufficientFunds));
        assert_eq!(record, before);
    }

    #[test]
    fn test_balance_overflow_is_rejected_without_mutation() {
        let mut record = user("0");
        record.wallet_balance = Decimal::MAX;
        let before = record.clone();

        let result = append_transaction(&mut record, TransactionType::Credit, dec("1.00"), None, 1);

        assert_eq!(result, Err(LedgerError::InvalidAmount));
        assert_eq!(record, before);
    }

    #[test]
    fn test_empty_category_defaults_to_none() {
        let mut record = user("0");
        let tx = append_transaction(
            &mut record,
            TransactionType::Credit,
            dec("1.00"),
            Some(String::new()),
            1,
        )
        .unwrap();
        assert_eq!(tx.category, DEFAULT_CATEGORY);
    }

    #[test]
    fn test_ids_come_from_counter_not_position() {
        let mut record = user("10.00");
        record.next_transaction_id = Some(7);

        let tx = append_transaction(&mut record, TransactionType::Credit, dec("1.00"), None, 1).unwrap();

        assert_eq!(tx.transaction_id, "7");
        assert_eq!(record.next_transaction_id, Some(8));
    }

    #[test]
    fn test_legacy_record_counter_starts_at_length() {
        let mut record = user("10.00");
        append_transaction(&mut record, TransactionType::Credit, dec("1.00"), None, 1).unwrap();
        record.next_transaction_id = None;

        assert_eq!(next_transaction_id(&record), 1);
    }

    #[test]
    fn test_set_category_touches_only_target() {
        let mut record = user("0");
        for ts in 0..3 {
            append_transaction(&mut record, TransactionType::Credit, dec("5.00"), None, ts).unwrap();
        }
        let before = record.transactions.clone();

        set_category(&mut record.transactions, "1", "Groceries").unwrap();

        assert_eq!(record.transactions[1].category, "Groceries");
        assert_eq!(record.transactions[0], before[0]);
        assert_eq!(record.transactions[2], before[2]);
        let mut expected = before[1].clone();
        expected.category = "Groceries".to_string();
        assert_eq!(record.transactions[1], expected);
    }

    #[test]
    fn test_set_category_unknown_id() {
        let mut record = user("0");
        assert_eq!(
            set_category(&mut record.transactions, "42", "Food"),
            Err(LedgerError::TransactionNotFound)
        );
    }

    #[test]
    fn test_sort_is_descending_and_stable() {
        let mut record = user("0");
        for ts in [5, 9, 5, 1] {
            append_transaction(&mut record, TransactionType::Credit, dec("1.00"), None, ts).unwrap();
        }

        sort_by_date_desc(&mut record.transactions);

        let order: Vec<(&str, i64)> = record
            .transactions
            .iter()
            .map(|t| (t.transaction_id.as_str(), t.date_created))
            .collect();
        assert_eq!(order, vec![("1", 9), ("0", 5), ("2", 5), ("3", 1)]);
    }
}
