//! Error types for the ledger.
use thiserror::Error;

use crate::types::Amount;

/// Why a candidate transaction was rejected.
///
/// Rejections never escape an epoch: the handler logs the reason and drops
/// the transaction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransactionError {
    #[error("unknown UTXO: {0}")] UnknownUtxo(String),
    #[error("duplicate input: {0}")] DuplicateInput(String),
    #[error("invalid signature on input {index}")] InvalidSignature { index: usize },
    #[error("negative value on output {0}")] NegativeOutput(usize),
    #[error("insufficient funds: have {have}, need {need}")] InsufficientFunds { have: Amount, need: Amount },
    #[error("value overflow")] ValueOverflow,
    #[error("codec: {0}")] Codec(#[from] CodecError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("invalid public key bytes")] InvalidPublicKey,
    #[error("invalid signature bytes")] InvalidSignature,
    #[error("signature verification failed")] VerificationFailed,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("serialization: {0}")] Serialization(String),
    #[error("input index out of bounds: {index} >= {len}")] InputIndexOutOfBounds { index: usize, len: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    #[error("outpoint not in pool: {0}")] NotFound(String),
}

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error(transparent)] Transaction(#[from] TransactionError),
    #[error(transparent)] Crypto(#[from] CryptoError),
    #[error(transparent)] Codec(#[from] CodecError),
    #[error(transparent)] Pool(#[from] PoolError),
}
