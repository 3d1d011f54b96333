//! # ledger-core
//! UTXO pool, transaction validation, and fee-ordered epoch confirmation.

pub mod codec;
pub mod constants;
pub mod crypto;
pub mod error;
pub mod handler;
pub mod traits;
pub mod types;
pub mod utxo_pool;
pub mod validation;

pub use handler::{AcceptedTransaction, EpochSummary, LedgerValidator};
pub use utxo_pool::UtxoPool;
