pub mod ledger;
pub mod store;
pub mod user_locks;
pub mod wallet_service;
