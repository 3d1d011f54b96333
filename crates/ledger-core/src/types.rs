//! Core ledger types: output references, output records, transactions.
//!
//! All monetary values are signed fixed-point [`Amount`]s in base units
//! (1 coin = [`COIN`](crate::constants::COIN) units). Amounts are signed so a
//! negative declared output can be represented and rejected by validation.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::constants::PUBLIC_KEY_LEN;
use crate::error::CodecError;

/// A monetary value in base units.
pub type Amount = i64;

/// A 32-byte hash value.
///
/// Used for transaction IDs (BLAKE3 of the canonical encoding) and
/// signing hashes. Serialized as a lowercase hex string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default, bincode::Encode, bincode::Decode)]
pub struct Hash256(pub [u8; 32]);

impl Hash256 {
    /// The zero hash (32 zero bytes).
    pub const ZERO: Self = Self([0u8; 32]);

    /// Create a Hash256 from a byte array.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Return the underlying bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Check if this is the zero hash.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl From<[u8; 32]> for Hash256 {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Hash256 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for Hash256 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_hex32(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Hash256 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_hex32(deserializer).map(Self)
    }
}

/// Public identity of an output's recipient.
///
/// Opaque to the ledger: the bytes are only interpreted by the configured
/// [`SignatureVerifier`](crate::traits::SignatureVerifier). The default
/// verifier reads them as a raw Ed25519 verification key, and not every
/// 32-byte value is a valid key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, bincode::Encode, bincode::Decode)]
pub struct Identity(pub [u8; PUBLIC_KEY_LEN]);

impl Identity {
    /// Return the underlying bytes.
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl From<[u8; 32]> for Identity {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl Serialize for Identity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_hex32(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Identity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_hex32(deserializer).map(Self)
    }
}

fn serialize_hex32<S: Serializer>(bytes: &[u8; 32], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode(bytes))
}

fn deserialize_hex32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<[u8; 32], D::Error> {
    let s = String::deserialize(deserializer)?;
    let decoded = hex::decode(&s).map_err(serde::de::Error::custom)?;
    decoded
        .as_slice()
        .try_into()
        .map_err(|_| serde::de::Error::invalid_length(decoded.len(), &"32 bytes"))
}

/// Reference to a specific output of a previous transaction.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, bincode::Encode, bincode::Decode)]
pub struct OutPoint {
    /// Transaction ID containing the referenced output.
    pub txid: Hash256,
    /// Index of the output within the transaction.
    pub index: u64,
}

impl OutPoint {
    pub fn new(txid: Hash256, index: u64) -> Self {
        Self { txid, index }
    }
}

impl fmt::Display for OutPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.txid, self.index)
    }
}

/// A transaction input, spending a previous output.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, bincode::Encode, bincode::Decode)]
pub struct TxInput {
    /// The outpoint being spent.
    pub previous_output: OutPoint,
    /// Signature over the signing payload for this input's position,
    /// made by the owner of the spent output.
    #[serde(with = "hex_vec")]
    pub signature: Vec<u8>,
}

/// A transaction output, creating a new UTXO.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, bincode::Encode, bincode::Decode)]
pub struct TxOutput {
    /// Value in base units. Must be non-negative to be valid.
    pub value: Amount,
    /// Identity allowed to spend this output.
    pub recipient: Identity,
}

/// A transaction transferring value between identities.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default, bincode::Encode, bincode::Decode)]
pub struct Transaction {
    /// Inputs consuming previous outputs.
    pub inputs: Vec<TxInput>,
    /// New outputs created by this transaction.
    pub outputs: Vec<TxOutput>,
}

impl Transaction {
    /// Compute the transaction ID (BLAKE3 hash of the canonical encoding).
    ///
    /// Uses bincode with standard config for deterministic serialization.
    /// Signatures are part of the encoding.
    pub fn txid(&self) -> Result<Hash256, CodecError> {
        let encoded = bincode::encode_to_vec(self, bincode::config::standard())
            .map_err(|e| CodecError::Serialization(e.to_string()))?;
        Ok(Hash256(blake3::hash(&encoded).into()))
    }

    /// Sum of all output values. Returns None on overflow.
    pub fn total_output_value(&self) -> Option<Amount> {
        self.outputs
            .iter()
            .try_fold(0 as Amount, |acc, out| acc.checked_add(out.value))
    }

    /// Outpoints consumed by this transaction, in input order.
    pub fn spent_outpoints(&self) -> impl Iterator<Item = &OutPoint> {
        self.inputs.iter().map(|input| &input.previous_output)
    }

    /// Outpoints this transaction mints for its own outputs under `txid`.
    pub fn created_outpoints(&self, txid: Hash256) -> impl Iterator<Item = OutPoint> + '_ {
        (0..self.outputs.len() as u64).map(move |index| OutPoint { txid, index })
    }
}

mod hex_vec {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(s).map_err(serde::de::Error::custom)
    }
}
