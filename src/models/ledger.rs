use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Catégorie posée quand le client n'en fournit pas
pub const DEFAULT_CATEGORY: &str = "None";

/// Sens d'une transaction : CREDIT augmente le solde, DEBIT le diminue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Credit,
    Debit,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Credit => "CREDIT",
            TransactionType::Debit => "DEBIT",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Insensible à la casse : "credit", "Credit" et "CREDIT" sont acceptés
impl FromStr for TransactionType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CREDIT" => Ok(TransactionType::Credit),
            "DEBIT" => Ok(TransactionType::Debit),
            _ => Err(()),
        }
    }
}

/// Une ligne du ledger, telle que stockée dans la colonne JSON `transactions`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_id: String,
    pub amount: Decimal,          // toujours positif
    #[serde(rename = "type")]
    pub kind: TransactionType,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub date_created: i64,        // timestamp Unix (secondes), 0 si absent
    pub balance_after_transaction: Decimal,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// L'enregistrement complet d'un utilisateur (une ligne de la table)
#[derive(Clone, Debug, PartialEq)]
pub struct UserRecord {
    pub user_id: String,
    pub wallet_balance: Decimal,
    pub transactions: Vec<Transaction>,
    /// Compteur d'identifiants ; None pour les lignes créées avant son introduction
    pub next_transaction_id: Option<u64>,
}

/// Champs réécrits par un `update` du store
#[derive(Clone, Debug, PartialEq)]
pub struct UserChanges {
    pub transactions: Vec<Transaction>,
    pub wallet_balance: Option<Decimal>,
    pub next_transaction_id: Option<u64>,
}
