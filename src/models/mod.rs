// ============================================================================
// MODELS - MODULE PRINCIPAL
// ============================================================================
//
// Liste des modules:
//   - ledger : User, Transaction, TransactionType (ce qui est stocké)
//   - dto : Requêtes / réponses JSON des endpoints
//   - health : Health check API
//
// Points d'attention:
//   - Les montants sont des Decimal en interne, des nombres JSON en sortie
//   - Une ligne par user ; les transactions sont une liste JSON dans la ligne
//
// ============================================================================

pub mod dto;
pub mod health;
pub mod ledger;
