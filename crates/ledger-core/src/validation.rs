//! Transaction validation against the UTXO pool.
//!
//! A candidate is acceptable iff, in this order:
//!
//! 1. every input spends an outpoint present in the pool,
//! 2. no outpoint is spent twice within the transaction,
//! 3. every input's signature verifies against the spent output's recipient,
//! 4. every output value is non-negative,
//! 5. total input value covers total output value (the fee may be zero).
//!
//! Checks short-circuit on the first failure. The pool is only read.
//! [`validate_transaction`] names the failing rule; [`is_valid`] collapses it
//! to the boolean the epoch handler needs.

use std::collections::HashSet;

use crate::error::TransactionError;
use crate::traits::{SignatureVerifier, TransactionCodec};
use crate::types::{Amount, Hash256, Transaction};
use crate::utxo_pool::UtxoPool;

/// Summary of a successfully validated transaction.
///
/// Values are relative to the pool snapshot the transaction was validated
/// against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedTransaction {
    /// Identity hash minting this transaction's outpoints.
    pub txid: Hash256,
    /// Total value of all spent inputs.
    pub total_input: Amount,
    /// Total value of all created outputs.
    pub total_output: Amount,
    /// `total_input - total_output`, never negative.
    pub fee: Amount,
}

/// Validate `tx` against `pool`.
///
/// Returns a [`ValidatedTransaction`] with the computed fee on success.
/// Collaborator failures (a malformed key, a codec that cannot encode the
/// transaction) are reported as ordinary rejections.
pub fn validate_transaction<C, V>(
    tx: &Transaction,
    pool: &UtxoPool,
    codec: &C,
    verifier: &V,
) -> Result<ValidatedTransaction, TransactionError>
where
    C: TransactionCodec + ?Sized,
    V: SignatureVerifier + ?Sized,
{
    let mut seen = HashSet::with_capacity(tx.inputs.len());
    let mut total_input: Amount = 0;

    for (i, input) in tx.inputs.iter().enumerate() {
        let utxo = pool
            .get(&input.previous_output)
            .map_err(|_| TransactionError::UnknownUtxo(input.previous_output.to_string()))?;

        if !seen.insert(&input.previous_output) {
            return Err(TransactionError::DuplicateInput(
                input.previous_output.to_string(),
            ));
        }

        let payload = codec.signing_payload(tx, i)?;
        verifier
            .verify(&utxo.recipient, &payload, &input.signature)
            .map_err(|_| TransactionError::InvalidSignature { index: i })?;

        total_input = total_input
            .checked_add(utxo.value)
            .ok_or(TransactionError::ValueOverflow)?;
    }

    let mut total_output: Amount = 0;
    for (i, output) in tx.outputs.iter().enumerate() {
        if output.value < 0 {
            return Err(TransactionError::NegativeOutput(i));
        }
        total_output = total_output
            .checked_add(output.value)
            .ok_or(TransactionError::ValueOverflow)?;
    }

    if total_input < total_output {
        return Err(TransactionError::InsufficientFunds {
            have: total_input,
            need: total_output,
        });
    }

    let txid = codec.txid(tx)?;

    Ok(ValidatedTransaction {
        txid,
        total_input,
        total_output,
        fee: total_input - total_output,
    })
}

/// Boolean form of [`validate_transaction`].
pub fn is_valid<C, V>(tx: &Transaction, pool: &UtxoPool, codec: &C, verifier: &V) -> bool
where
    C: TransactionCodec + ?Sized,
    V: SignatureVerifier + ?Sized,
{
    validate_transaction(tx, pool, codec, verifier).is_ok()
}

/// Fee of `tx` priced against `pool`: resolved input values minus output values.
///
/// Only meaningful for a transaction that passes validation against the same
/// pool; no signature or sign checks are made here.
pub fn transaction_fee(tx: &Transaction, pool: &UtxoPool) -> Result<Amount, TransactionError> {
    let total_input = tx.inputs.iter().try_fold(0 as Amount, |acc, input| {
        let utxo = pool
            .get(&input.previous_output)
            .map_err(|_| TransactionError::UnknownUtxo(input.previous_output.to_string()))?;
        acc.checked_add(utxo.value).ok_or(TransactionError::ValueOverflow)
    })?;
    let total_output = tx
        .total_output_value()
        .ok_or(TransactionError::ValueOverflow)?;
    total_input
        .checked_sub(total_output)
        .ok_or(TransactionError::ValueOverflow)
}
