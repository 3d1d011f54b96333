//! Ed25519 cryptographic operations for the ledger.
//!
//! Provides key generation, transaction-input signing, and the default
//! [`SignatureVerifier`] implementation. Uses ed25519-dalek for the
//! underlying Ed25519 implementation. Output recipients are identified by
//! their raw 32-byte verification key ([`Identity`]).

use ed25519_dalek::{Signer, Verifier};
use std::fmt;

use crate::constants::SIGNATURE_LEN;
use crate::error::{CodecError, CryptoError};
use crate::traits::{SignatureVerifier, TransactionCodec};
use crate::types::{Identity, Transaction};

/// Ed25519 keypair for signing transactions.
///
/// Wraps [`ed25519_dalek::SigningKey`]. The secret key is zeroized on drop
/// by the underlying library. Use [`KeyPair::generate`] for random keys or
/// [`KeyPair::from_secret_bytes`] for deterministic derivation from a seed.
pub struct KeyPair {
    signing_key: ed25519_dalek::SigningKey,
}

impl KeyPair {
    /// Generate a random keypair using the OS cryptographic RNG.
    pub fn generate() -> Self {
        let mut csprng = rand::rngs::OsRng;
        Self {
            signing_key: ed25519_dalek::SigningKey::generate(&mut csprng),
        }
    }

    /// Create a keypair from 32-byte secret key material.
    pub fn from_secret_bytes(bytes: [u8; 32]) -> Self {
        Self {
            signing_key: ed25519_dalek::SigningKey::from_bytes(&bytes),
        }
    }

    /// Derive the public key from this keypair.
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            verifying_key: self.signing_key.verifying_key(),
        }
    }

    /// Ledger identity owned by this keypair.
    pub fn identity(&self) -> Identity {
        self.public_key().identity()
    }

    /// Get the raw secret key bytes (32 bytes). Handle with care.
    pub fn secret_bytes(&self) -> [u8; 32] {
        self.signing_key.to_bytes()
    }

    /// Sign a message, returning the raw 64-byte Ed25519 signature.
    pub fn sign(&self, message: &[u8]) -> [u8; 64] {
        self.signing_key.sign(message).to_bytes()
    }
}

impl Clone for KeyPair {
    fn clone(&self) -> Self {
        Self::from_secret_bytes(self.secret_bytes())
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key())
            .finish_non_exhaustive()
    }
}

/// Ed25519 public key for verifying signatures.
#[derive(Clone)]
pub struct PublicKey {
    verifying_key: ed25519_dalek::VerifyingKey,
}

impl PublicKey {
    /// Create a public key from raw bytes (32 bytes).
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, CryptoError> {
        let vk = ed25519_dalek::VerifyingKey::from_bytes(bytes)
            .map_err(|_| CryptoError::InvalidPublicKey)?;
        Ok(Self { verifying_key: vk })
    }

    /// Parse the key an [`Identity`] names.
    pub fn from_identity(identity: &Identity) -> Result<Self, CryptoError> {
        Self::from_bytes(identity.as_bytes())
    }

    /// Get the raw public key bytes (32 bytes).
    pub fn to_bytes(&self) -> [u8; 32] {
        self.verifying_key.to_bytes()
    }

    /// The identity used in [`TxOutput::recipient`](crate::types::TxOutput::recipient).
    pub fn identity(&self) -> Identity {
        Identity(self.to_bytes())
    }

    /// Verify an Ed25519 signature on a message.
    pub fn verify(&self, message: &[u8], signature: &[u8; 64]) -> Result<(), CryptoError> {
        let sig = ed25519_dalek::Signature::from_bytes(signature);
        self.verifying_key
            .verify(message, &sig)
            .map_err(|_| CryptoError::VerificationFailed)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", hex::encode(self.to_bytes()))
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.to_bytes()))
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for PublicKey {}

/// Default [`SignatureVerifier`]: the identity is a raw Ed25519 key.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Verifier;

impl SignatureVerifier for Ed25519Verifier {
    fn verify(&self, identity: &Identity, payload: &[u8], signature: &[u8]) -> Result<(), CryptoError> {
        let pk = PublicKey::from_identity(identity)?;
        let sig_bytes: [u8; SIGNATURE_LEN] = signature
            .try_into()
            .map_err(|_| CryptoError::InvalidSignature)?;
        pk.verify(payload, &sig_bytes)
    }
}

/// Sign a transaction input in place.
///
/// Asks `codec` for the input's signing payload, signs it with `keypair`,
/// and writes the signature into the input. Inputs can be signed in any order
/// as long as the codec's payload excludes signatures.
pub fn sign_transaction_input<C: TransactionCodec>(
    tx: &mut Transaction,
    input_index: usize,
    keypair: &KeyPair,
    codec: &C,
) -> Result<(), CodecError> {
    let payload = codec.signing_payload(tx, input_index)?;
    let len = tx.inputs.len();
    let input = tx
        .inputs
        .get_mut(input_index)
        .ok_or(CodecError::InputIndexOutOfBounds { index: input_index, len })?;
    input.signature = keypair.sign(&payload).to_vec();
    Ok(())
}
