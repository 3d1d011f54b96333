//! Epoch processing: greedy acceptance and fee-ordered confirmation.
//!
//! [`LedgerValidator::handle_epoch`] walks a candidate batch once, in the
//! order given. Each candidate is validated against the pool as left by every
//! earlier acceptance in the same batch; a valid one is applied immediately,
//! an invalid one is dropped for the epoch. The confirmed set is then reported
//! highest fee first, ties in acceptance order.
//!
//! The result depends on presentation order: accepting one transaction can
//! spend an outpoint a richer later candidate needed. No backtracking is
//! attempted, so the returned set is not a global fee maximum.

use tracing::{debug, info, trace};

use crate::codec::CanonicalCodec;
use crate::crypto::Ed25519Verifier;
use crate::error::TransactionError;
use crate::traits::{SignatureVerifier, TransactionCodec};
use crate::types::{Amount, Hash256, Transaction};
use crate::utxo_pool::UtxoPool;
use crate::validation::{self, ValidatedTransaction};

/// A transaction confirmed during an epoch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedTransaction {
    /// The confirmed transaction.
    pub tx: Transaction,
    /// Identity hash its outputs were minted under.
    pub txid: Hash256,
    /// Fee priced against the pool at the moment of acceptance.
    pub fee: Amount,
}

/// Aggregate outcome of one epoch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EpochSummary {
    /// Number of candidates confirmed.
    pub accepted: usize,
    /// Number of candidates dropped.
    pub rejected: usize,
    /// Sum of confirmed fees. `None` on overflow.
    pub total_fees: Option<Amount>,
}

impl EpochSummary {
    fn from_accepted(accepted: &[AcceptedTransaction], candidates: usize) -> Self {
        Self {
            accepted: accepted.len(),
            rejected: candidates - accepted.len(),
            total_fees: accepted
                .iter()
                .try_fold(0 as Amount, |acc, a| acc.checked_add(a.fee)),
        }
    }
}

/// Owns the UTXO pool and confirms candidate batches against it.
///
/// The pool is exclusively owned: callers read it through [`pool`](Self::pool)
/// and take it back with [`into_pool`](Self::into_pool). Epoch processing
/// needs `&mut self`, so no other reader can observe a half-processed batch.
#[derive(Debug, Clone)]
pub struct LedgerValidator<C = CanonicalCodec, V = Ed25519Verifier> {
    pool: UtxoPool,
    codec: C,
    verifier: V,
}

impl LedgerValidator {
    /// Create a validator over `pool` with the default codec and verifier.
    pub fn new(pool: UtxoPool) -> Self {
        Self::with_collaborators(pool, CanonicalCodec, Ed25519Verifier)
    }
}

impl<C, V> LedgerValidator<C, V>
where
    C: TransactionCodec,
    V: SignatureVerifier,
{
    /// Create a validator with explicit collaborators.
    pub fn with_collaborators(pool: UtxoPool, codec: C, verifier: V) -> Self {
        Self { pool, codec, verifier }
    }

    /// Current pool state.
    pub fn pool(&self) -> &UtxoPool {
        &self.pool
    }

    /// Consume the validator, returning the pool.
    pub fn into_pool(self) -> UtxoPool {
        self.pool
    }

    /// Whether `tx` is acceptable against the current pool.
    pub fn is_valid(&self, tx: &Transaction) -> bool {
        validation::is_valid(tx, &self.pool, &self.codec, &self.verifier)
    }

    /// Validate `tx` against the current pool, naming the failing rule.
    pub fn validate(&self, tx: &Transaction) -> Result<ValidatedTransaction, TransactionError> {
        validation::validate_transaction(tx, &self.pool, &self.codec, &self.verifier)
    }

    /// Fee of `tx` against the current pool.
    pub fn fee(&self, tx: &Transaction) -> Result<Amount, TransactionError> {
        validation::transaction_fee(tx, &self.pool)
    }

    /// Process one epoch, returning the confirmed transactions highest fee first.
    ///
    /// The pool is updated in place with every confirmed transaction, applied
    /// in acceptance order.
    pub fn handle_epoch(&mut self, candidates: Vec<Transaction>) -> Vec<Transaction> {
        self.handle_epoch_detailed(candidates)
            .into_iter()
            .map(|accepted| accepted.tx)
            .collect()
    }

    /// Like [`handle_epoch`](Self::handle_epoch), keeping each confirmation's
    /// txid and fee.
    pub fn handle_epoch_detailed(&mut self, candidates: Vec<Transaction>) -> Vec<AcceptedTransaction> {
        let candidate_count = candidates.len();
        let mut accepted = Vec::new();

        for (position, tx) in candidates.into_iter().enumerate() {
            match self.validate(&tx) {
                Ok(validated) => {
                    self.apply(&tx, validated.txid);
                    trace!(position, txid = %validated.txid, fee = validated.fee, "accepted transaction");
                    accepted.push(AcceptedTransaction {
                        tx,
                        txid: validated.txid,
                        fee: validated.fee,
                    });
                }
                Err(e) => {
                    debug!(position, "rejected transaction: {e}");
                }
            }
        }

        sort_by_fee_desc(&mut accepted);

        let summary = EpochSummary::from_accepted(&accepted, candidate_count);
        info!(
            accepted = summary.accepted,
            rejected = summary.rejected,
            total_fees = ?summary.total_fees,
            utxos = self.pool.len(),
            "epoch processed"
        );

        accepted
    }

    /// Spend `tx`'s inputs and mint its outputs under `txid`.
    ///
    /// Only called after validation against the current pool, so every input
    /// is present and removal cannot fail halfway.
    fn apply(&mut self, tx: &Transaction, txid: Hash256) {
        for outpoint in tx.spent_outpoints() {
            self.pool.remove(outpoint);
        }
        for (outpoint, output) in tx.created_outpoints(txid).zip(tx.outputs.iter()) {
            self.pool.insert(outpoint, output.clone());
        }
    }
}

/// Order by fee, highest first. Stable: equal fees keep their relative order.
pub fn sort_by_fee_desc(accepted: &mut [AcceptedTransaction]) {
    accepted.sort_by(|a, b| b.fee.cmp(&a.fee));
}
