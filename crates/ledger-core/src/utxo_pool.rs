//! The unspent transaction output pool.
//!
//! A plain keyed store from [`OutPoint`] to [`TxOutput`]: it performs no
//! validation of its own and has no concurrency control. The
//! [`LedgerValidator`](crate::handler::LedgerValidator) owns one exclusively
//! and is the only writer during an epoch.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::PoolError;
use crate::types::{Amount, OutPoint, TxOutput};

/// Set of currently spendable outputs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UtxoPool {
    utxos: HashMap<OutPoint, TxOutput>,
}

impl UtxoPool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `outpoint` is currently spendable.
    pub fn contains(&self, outpoint: &OutPoint) -> bool {
        self.utxos.contains_key(outpoint)
    }

    /// Look up the output record for `outpoint`.
    pub fn get(&self, outpoint: &OutPoint) -> Result<&TxOutput, PoolError> {
        self.utxos
            .get(outpoint)
            .ok_or_else(|| PoolError::NotFound(outpoint.to_string()))
    }

    /// Delete the mapping for `outpoint`, returning the removed record.
    ///
    /// Removing an absent outpoint is a no-op.
    pub fn remove(&mut self, outpoint: &OutPoint) -> Option<TxOutput> {
        self.utxos.remove(outpoint)
    }

    /// Add or overwrite the mapping for `outpoint`.
    pub fn insert(&mut self, outpoint: OutPoint, output: TxOutput) {
        self.utxos.insert(outpoint, output);
    }

    /// Number of unspent outputs.
    pub fn len(&self) -> usize {
        self.utxos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.utxos.is_empty()
    }

    /// Iterate over all `(outpoint, output)` entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&OutPoint, &TxOutput)> {
        self.utxos.iter()
    }

    /// All spendable outpoints, in arbitrary order.
    pub fn outpoints(&self) -> Vec<OutPoint> {
        self.utxos.keys().cloned().collect()
    }

    /// Sum of all output values. Returns None on overflow.
    pub fn total_value(&self) -> Option<Amount> {
        self.utxos
            .values()
            .try_fold(0 as Amount, |acc, out| acc.checked_add(out.value))
    }
}

impl FromIterator<(OutPoint, TxOutput)> for UtxoPool {
    fn from_iter<I: IntoIterator<Item = (OutPoint, TxOutput)>>(iter: I) -> Self {
        Self {
            utxos: iter.into_iter().collect(),
        }
    }
}

impl Extend<(OutPoint, TxOutput)> for UtxoPool {
    fn extend<I: IntoIterator<Item = (OutPoint, TxOutput)>>(&mut self, iter: I) {
        self.utxos.extend(iter);
    }
}

/// Wire form of one pool entry. JSON object keys must be strings, so the
/// pool serializes as a list of entries rather than a map.
#[derive(Serialize, Deserialize)]
struct PoolEntry {
    outpoint: OutPoint,
    output: TxOutput,
}

impl Serialize for UtxoPool {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut entries: Vec<PoolEntry> = self
            .utxos
            .iter()
            .map(|(outpoint, output)| PoolEntry {
                outpoint: outpoint.clone(),
                output: output.clone(),
            })
            .collect();
        // Stable output for snapshots.
        entries.sort_by(|a, b| {
            (a.outpoint.txid, a.outpoint.index).cmp(&(b.outpoint.txid, b.outpoint.index))
        });
        entries.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for UtxoPool {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<PoolEntry>::deserialize(deserializer)?;
        Ok(entries
            .into_iter()
            .map(|entry| (entry.outpoint, entry.output))
            .collect())
    }
}
