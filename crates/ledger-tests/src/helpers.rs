//! Shared test helpers for E2E and adversarial tests.

use ledger_core::codec::CanonicalCodec;
use ledger_core::crypto::{KeyPair, sign_transaction_input};
use ledger_core::types::{Amount, Hash256, Identity, OutPoint, Transaction, TxInput, TxOutput};
use ledger_core::UtxoPool;

/// Deterministic keypair from a seed byte.
pub fn keypair(seed: u8) -> KeyPair {
    KeyPair::from_secret_bytes([seed; 32])
}

/// An outpoint that no real transaction produced, for pre-funding pools.
pub fn genesis_outpoint(seed: u8) -> OutPoint {
    OutPoint::new(Hash256([seed; 32]), 0)
}

/// Pool funding `owner` with one output per value, at genesis outpoints 1, 2, 3, ...
pub fn funded_pool(owner: &KeyPair, values: &[Amount]) -> UtxoPool {
    values
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            (
                genesis_outpoint(i as u8 + 1),
                TxOutput { value, recipient: owner.identity() },
            )
        })
        .collect()
}

/// Unsigned transaction spending `inputs` into `outputs`.
pub fn make_tx(inputs: &[OutPoint], outputs: &[(Amount, Identity)]) -> Transaction {
    Transaction {
        inputs: inputs
            .iter()
            .map(|op| TxInput { previous_output: op.clone(), signature: vec![] })
            .collect(),
        outputs: outputs
            .iter()
            .map(|&(value, recipient)| TxOutput { value, recipient })
            .collect(),
    }
}

/// Transaction spending `inputs`, every input signed by `signer`.
pub fn signed_tx(signer: &KeyPair, inputs: &[OutPoint], outputs: &[(Amount, Identity)]) -> Transaction {
    let mut tx = make_tx(inputs, outputs);
    sign_all(&mut tx, signer);
    tx
}

/// Sign every input of `tx` with `signer`.
pub fn sign_all(tx: &mut Transaction, signer: &KeyPair) {
    for i in 0..tx.inputs.len() {
        sign_transaction_input(tx, i, signer, &CanonicalCodec).unwrap();
    }
}

/// Txid of a transaction that is known to encode.
pub fn txid(tx: &Transaction) -> Hash256 {
    tx.txid().unwrap()
}
