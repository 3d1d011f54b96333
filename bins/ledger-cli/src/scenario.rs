//! Scenario files: a pool snapshot plus one epoch's candidate batch.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use ledger_core::codec::CanonicalCodec;
use ledger_core::crypto::{KeyPair, sign_transaction_input};
use ledger_core::types::{Amount, Hash256, Identity, OutPoint, Transaction, TxInput, TxOutput};
use ledger_core::{AcceptedTransaction, LedgerValidator, UtxoPool};

/// Input to one epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub pool: UtxoPool,
    /// Candidates in presentation order.
    pub candidates: Vec<Transaction>,
}

/// One confirmed transaction in a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Confirmed {
    pub txid: Hash256,
    pub fee: Amount,
    pub tx: Transaction,
}

impl From<AcceptedTransaction> for Confirmed {
    fn from(accepted: AcceptedTransaction) -> Self {
        Self {
            txid: accepted.txid,
            fee: accepted.fee,
            tx: accepted.tx,
        }
    }
}

/// Outcome of one epoch: confirmations highest fee first, then the pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochReport {
    pub confirmed: Vec<Confirmed>,
    pub rejected: usize,
    pub pool: UtxoPool,
}

impl Scenario {
    /// Read a scenario from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("failed to parse scenario {}", path.display()))
    }

    /// Run the candidates as one epoch against the pool.
    pub fn run(self) -> EpochReport {
        let candidate_count = self.candidates.len();
        let mut validator = LedgerValidator::new(self.pool);
        let confirmed: Vec<Confirmed> = validator
            .handle_epoch_detailed(self.candidates)
            .into_iter()
            .map(Confirmed::from)
            .collect();
        EpochReport {
            rejected: candidate_count - confirmed.len(),
            confirmed,
            pool: validator.into_pool(),
        }
    }
}

/// Deterministic keypair for demo identities.
fn demo_key(seed: u8) -> KeyPair {
    KeyPair::from_secret_bytes([seed; 32])
}

/// Outpoint of a pre-funded demo output.
fn funding_outpoint(n: u64) -> OutPoint {
    let mut label = b"demo-funding-".to_vec();
    label.extend_from_slice(&n.to_le_bytes());
    OutPoint::new(Hash256(blake3::hash(&label).into()), 0)
}

fn signed_spend(owner: &KeyPair, input: OutPoint, value: Amount, recipient: Identity) -> Result<Transaction> {
    let mut tx = Transaction {
        inputs: vec![TxInput { previous_output: input, signature: vec![] }],
        outputs: vec![TxOutput { value, recipient }],
    };
    sign_transaction_input(&mut tx, 0, owner, &CanonicalCodec).context("failed to sign demo input")?;
    Ok(tx)
}

/// Signed demo: four spends paying fees 5, 1, 5, 0 and a late double spend.
///
/// Expected confirmation order is fee 5 (first), fee 5 (third), fee 1, fee 0;
/// the double spend is rejected because the first spend consumed its input.
pub fn demo() -> Result<Scenario> {
    let alice = demo_key(1);
    let bob = demo_key(2).identity();
    let carol = demo_key(3).identity();

    let pool: UtxoPool = (1..=4)
        .map(|n| {
            (
                funding_outpoint(n),
                TxOutput { value: 10, recipient: alice.identity() },
            )
        })
        .collect();

    let candidates = vec![
        signed_spend(&alice, funding_outpoint(1), 5, bob)?,
        signed_spend(&alice, funding_outpoint(2), 9, bob)?,
        signed_spend(&alice, funding_outpoint(3), 5, carol)?,
        signed_spend(&alice, funding_outpoint(4), 10, carol)?,
        signed_spend(&alice, funding_outpoint(1), 1, carol)?,
    ];

    Ok(Scenario { pool, candidates })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_is_deterministic() {
        assert_eq!(demo().unwrap(), demo().unwrap());
    }

    #[test]
    fn demo_funding_outpoints_are_distinct() {
        let scenario = demo().unwrap();
        assert_eq!(scenario.pool.len(), 4);
    }

    #[test]
    fn demo_confirms_by_fee_and_drops_double_spend() {
        let scenario = demo().unwrap();
        let expected = vec![
            scenario.candidates[0].clone(),
            scenario.candidates[2].clone(),
            scenario.candidates[1].clone(),
            scenario.candidates[3].clone(),
        ];

        let report = scenario.run();
        let fees: Vec<Amount> = report.confirmed.iter().map(|c| c.fee).collect();
        assert_eq!(fees, vec![5, 5, 1, 0]);
        let txs: Vec<Transaction> = report.confirmed.into_iter().map(|c| c.tx).collect();
        assert_eq!(txs, expected);
        assert_eq!(report.rejected, 1);
        assert_eq!(report.pool.len(), 4);
        assert_eq!(report.pool.total_value(), Some(29));
    }

    #[test]
    fn scenario_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scenario.json");
        let scenario = demo().unwrap();
        std::fs::write(&path, serde_json::to_string_pretty(&scenario).unwrap()).unwrap();

        assert_eq!(Scenario::load(&path).unwrap(), scenario);
    }

    #[test]
    fn load_missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let err = Scenario::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("absent.json"));
    }

    #[test]
    fn load_malformed_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{\"pool\": 3}").unwrap();
        let err = Scenario::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse"));
    }
}
