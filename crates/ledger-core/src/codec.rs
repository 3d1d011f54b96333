//! Canonical transaction codec.
//!
//! # Signing scheme
//!
//! Transaction inputs are signed using a **sighash** that commits to:
//! - All input outpoints (txid + index)
//! - All outputs (value + recipient)
//! - The index of the input being signed
//!
//! Signatures are excluded from the sighash to avoid circularity and allow
//! inputs to be signed independently in any order. The txid, by contrast,
//! covers the full encoding including signatures.

use crate::error::CodecError;
use crate::traits::TransactionCodec;
use crate::types::{Hash256, Transaction};

/// Default codec: bincode + BLAKE3.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanonicalCodec;

impl TransactionCodec for CanonicalCodec {
    fn txid(&self, tx: &Transaction) -> Result<Hash256, CodecError> {
        tx.txid()
    }

    fn signing_payload(&self, tx: &Transaction, input_index: usize) -> Result<Vec<u8>, CodecError> {
        Ok(signing_hash(tx, input_index)?.as_bytes().to_vec())
    }
}

/// Compute the signing hash (sighash) for a transaction input.
///
/// Layout, all integers little-endian:
/// `input_count || (txid || index)* || output_count || (value || recipient)* || input_index`.
pub fn signing_hash(tx: &Transaction, input_index: usize) -> Result<Hash256, CodecError> {
    if input_index >= tx.inputs.len() {
        return Err(CodecError::InputIndexOutOfBounds {
            index: input_index,
            len: tx.inputs.len(),
        });
    }

    let mut data = Vec::with_capacity(16 + tx.inputs.len() * 40 + tx.outputs.len() * 40 + 8);

    data.extend_from_slice(&(tx.inputs.len() as u64).to_le_bytes());
    for input in &tx.inputs {
        data.extend_from_slice(input.previous_output.txid.as_bytes());
        data.extend_from_slice(&input.previous_output.index.to_le_bytes());
    }

    data.extend_from_slice(&(tx.outputs.len() as u64).to_le_bytes());
    for output in &tx.outputs {
        data.extend_from_slice(&output.value.to_le_bytes());
        data.extend_from_slice(output.recipient.as_bytes());
    }

    data.extend_from_slice(&(input_index as u64).to_le_bytes());

    Ok(Hash256(blake3::hash(&data).into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Identity, OutPoint, TxInput, TxOutput};

    fn two_input_tx() -> Transaction {
        Transaction {
            inputs: vec![
                TxInput {
                    previous_output: OutPoint::new(Hash256([0x11; 32]), 0),
                    signature: vec![],
                },
                TxInput {
                    previous_output: OutPoint::new(Hash256([0x22; 32]), 1),
                    signature: vec![],
                },
            ],
            outputs: vec![TxOutput {
                value: 90,
                recipient: Identity([0xCC; 32]),
            }],
        }
    }

    #[test]
    fn sighash_deterministic() {
        let tx = two_input_tx();
        assert_eq!(signing_hash(&tx, 0).unwrap(), signing_hash(&tx, 0).unwrap());
    }

    #[test]
    fn sighash_differs_per_input() {
        let tx = two_input_tx();
        assert_ne!(signing_hash(&tx, 0).unwrap(), signing_hash(&tx, 1).unwrap());
    }

    #[test]
    fn sighash_ignores_signatures() {
        let tx = two_input_tx();
        let mut signed = tx.clone();
        signed.inputs[0].signature = vec![0xAB; 64];
        assert_eq!(signing_hash(&tx, 1).unwrap(), signing_hash(&signed, 1).unwrap());
    }

    #[test]
    fn sighash_commits_to_outputs() {
        let tx = two_input_tx();
        let mut tampered = tx.clone();
        tampered.outputs[0].value = 91;
        assert_ne!(signing_hash(&tx, 0).unwrap(), signing_hash(&tampered, 0).unwrap());

        let mut redirected = tx.clone();
        redirected.outputs[0].recipient = Identity([0xDD; 32]);
        assert_ne!(signing_hash(&tx, 0).unwrap(), signing_hash(&redirected, 0).unwrap());
    }

    #[test]
    fn sighash_out_of_bounds() {
        let tx = two_input_tx();
        assert_eq!(
            signing_hash(&tx, 2).unwrap_err(),
            CodecError::InputIndexOutOfBounds { index: 2, len: 2 }
        );
    }

    #[test]
    fn codec_txid_matches_transaction_txid() {
        let tx = two_input_tx();
        assert_eq!(CanonicalCodec.txid(&tx).unwrap(), tx.txid().unwrap());
    }

    #[test]
    fn codec_payload_is_sighash_bytes() {
        let tx = two_input_tx();
        let payload = CanonicalCodec.signing_payload(&tx, 1).unwrap();
        assert_eq!(payload.as_slice(), signing_hash(&tx, 1).unwrap().as_bytes());
    }
}
