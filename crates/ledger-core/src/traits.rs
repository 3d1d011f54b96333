//! Trait interfaces for the ledger's external collaborators.
//!
//! - [`SignatureVerifier`]: authenticates an input against the spent
//!   output's recipient ([`Ed25519Verifier`](crate::crypto::Ed25519Verifier)
//!   implements)
//! - [`TransactionCodec`]: derives transaction identities and per-input
//!   signing payloads ([`CanonicalCodec`](crate::codec::CanonicalCodec)
//!   implements)
//!
//! Both are pure with no shared state. The validator treats any `Err` from
//! them as a failed check for that transaction, never as a fault of the epoch.

use crate::error::{CodecError, CryptoError};
use crate::types::{Hash256, Identity, Transaction};

/// Signature verification oracle.
pub trait SignatureVerifier: Send + Sync {
    /// Verify `signature` over `payload` against `identity`.
    ///
    /// Returns `Ok(())` only for an authentic signature. A malformed key or
    /// signature is an `Err`, indistinguishable to the ledger from a forgery.
    fn verify(&self, identity: &Identity, payload: &[u8], signature: &[u8]) -> Result<(), CryptoError>;
}

/// Transaction identity and signing-payload derivation.
///
/// Must be deterministic: the same transaction always yields the same txid
/// and the same payload for each input position.
pub trait TransactionCodec: Send + Sync {
    /// Identity hash used to mint the transaction's own outpoints.
    fn txid(&self, tx: &Transaction) -> Result<Hash256, CodecError>;

    /// Bytes the owner of input `input_index` signs.
    fn signing_payload(&self, tx: &Transaction, input_index: usize) -> Result<Vec<u8>, CodecError>;
}

impl<T: SignatureVerifier + ?Sized> SignatureVerifier for &T {
    fn verify(&self, identity: &Identity, payload: &[u8], signature: &[u8]) -> Result<(), CryptoError> {
        (**self).verify(identity, payload, signature)
    }
}

impl<T: TransactionCodec + ?Sized> TransactionCodec for &T {
    fn txid(&self, tx: &Transaction) -> Result<Hash256, CodecError> {
        (**self).txid(tx)
    }

    fn signing_payload(&self, tx: &Transaction, input_index: usize) -> Result<Vec<u8>, CodecError> {
        (**self).signing_payload(tx, input_index)
    }
}
