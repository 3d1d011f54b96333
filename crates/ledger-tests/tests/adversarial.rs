//! Adversarial property-based tests for the ledger validator.
//!
//! Each property runs 256 cases with proptest shrinking to produce minimal
//! failing examples.
//!
//! Attack vectors tested:
//! - Spending outputs that do not exist
//! - Claiming the same output twice inside one transaction
//! - Negative outputs and overspending
//! - Output value overflow
//! - Double spends across a batch
//! - Value conservation across an epoch

use proptest::prelude::*;

use ledger_core::types::{Amount, OutPoint};
use ledger_core::LedgerValidator;
use ledger_core::error::TransactionError;
use ledger_tests::helpers::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// An input naming an outpoint absent from the pool is never valid.
    #[test]
    fn unknown_input_rejected(
        values in prop::collection::vec(1i64..1_000, 1..6),
        missing_seed in 100u8..=255,
    ) {
        let alice = keypair(1);
        let validator = LedgerValidator::new(funded_pool(&alice, &values));

        let tx = signed_tx(
            &alice,
            &[genesis_outpoint(1), genesis_outpoint(missing_seed)],
            &[(1, alice.identity())],
        );
        prop_assert!(!validator.is_valid(&tx));
        prop_assert!(
            matches!(validator.validate(&tx), Err(TransactionError::UnknownUtxo(_))),
            "expected UnknownUtxo for seed {}", missing_seed
        );
    }

    /// Listing one outpoint twice never double-counts its value.
    #[test]
    fn duplicate_input_rejected(
        value in 1i64..1_000,
        copies in 2usize..5,
    ) {
        let alice = keypair(1);
        let validator = LedgerValidator::new(funded_pool(&alice, &[value]));

        let inputs = vec![genesis_outpoint(1); copies];
        let tx = signed_tx(&alice, &inputs, &[(value, alice.identity())]);
        prop_assert!(
            matches!(validator.validate(&tx), Err(TransactionError::DuplicateInput(_))),
            "expected DuplicateInput with {} copies", copies
        );
    }

    /// Any negative output invalidates the transaction, even when the sum balances.
    #[test]
    fn negative_output_rejected(
        value in 1i64..1_000,
        negative in -1_000i64..0,
    ) {
        let alice = keypair(1);
        let bob = keypair(2).identity();
        let validator = LedgerValidator::new(funded_pool(&alice, &[value]));

        // value + |negative| and negative sum back to value.
        let tx = signed_tx(
            &alice,
            &[genesis_outpoint(1)],
            &[(value - negative, bob), (negative, bob)],
        );
        prop_assert!(matches!(
            validator.validate(&tx),
            Err(TransactionError::NegativeOutput(1))
        ));
    }

    /// Outputs above inputs are rejected; outputs equal to inputs pay zero fee.
    #[test]
    fn overspend_rejected_exact_spend_accepted(
        values in prop::collection::vec(0i64..1_000, 1..5),
        extra in 1i64..1_000,
    ) {
        let alice = keypair(1);
        let bob = keypair(2).identity();
        let validator = LedgerValidator::new(funded_pool(&alice, &values));

        let inputs: Vec<OutPoint> = (1..=values.len() as u8).map(genesis_outpoint).collect();
        let total: Amount = values.iter().sum();

        let over = signed_tx(&alice, &inputs, &[(total + extra, bob)]);
        prop_assert_eq!(
            validator.validate(&over).map(|v| v.fee),
            Err(TransactionError::InsufficientFunds { have: total, need: total + extra })
        );

        let exact = signed_tx(&alice, &inputs, &[(total, bob)]);
        prop_assert_eq!(validator.validate(&exact).map(|v| v.fee), Ok(0));
    }

    /// Outputs whose sum overflows the amount type are rejected, not wrapped.
    #[test]
    fn output_overflow_rejected(
        value in 1i64..1_000,
        slack in 0i64..1_000,
    ) {
        let alice = keypair(1);
        let bob = keypair(2).identity();
        let validator = LedgerValidator::new(funded_pool(&alice, &[value]));

        let tx = signed_tx(
            &alice,
            &[genesis_outpoint(1)],
            &[(Amount::MAX - slack, bob), (slack + 1, bob)],
        );
        prop_assert_eq!(validator.validate(&tx).map(|v| v.fee), Err(TransactionError::ValueOverflow));
    }

    /// A batch of only invalid candidates leaves the pool exactly as it was.
    #[test]
    fn rejected_batch_leaves_pool_unchanged(
        values in prop::collection::vec(1i64..1_000, 1..6),
        extras in prop::collection::vec(1i64..100, 1..6),
    ) {
        let alice = keypair(1);
        let bob = keypair(2).identity();
        let pool = funded_pool(&alice, &values);
        let mut validator = LedgerValidator::new(pool.clone());

        let candidates = extras
            .iter()
            .enumerate()
            .map(|(i, &extra)| {
                let idx = i % values.len();
                signed_tx(
                    &alice,
                    &[genesis_outpoint(idx as u8 + 1)],
                    &[(values[idx] + extra, bob)],
                )
            })
            .collect();

        prop_assert!(validator.handle_epoch(candidates).is_empty());
        prop_assert_eq!(validator.pool(), &pool);
    }

    /// Across a contended batch: confirmations are fee-ordered, each input is
    /// spent at most once, every confirmed output exists, and the pool shrinks
    /// by exactly the fees paid.
    #[test]
    fn epoch_conserves_value(
        values in prop::collection::vec(1i64..10_000, 1..8),
        picks in prop::collection::vec((0usize..8, 0i64..=100), 1..16),
    ) {
        let alice = keypair(1);
        let bob = keypair(2).identity();
        let pool = funded_pool(&alice, &values);
        let before = pool.total_value().unwrap();
        let mut validator = LedgerValidator::new(pool);

        let candidates: Vec<_> = picks
            .iter()
            .map(|&(pick, percent)| {
                let idx = pick % values.len();
                signed_tx(
                    &alice,
                    &[genesis_outpoint(idx as u8 + 1)],
                    &[(values[idx] * percent / 100, bob)],
                )
            })
            .collect();

        let confirmed = validator.handle_epoch_detailed(candidates);

        for pair in confirmed.windows(2) {
            prop_assert!(pair[0].fee >= pair[1].fee, "fees out of order: {} < {}", pair[0].fee, pair[1].fee);
        }

        let mut spent: Vec<OutPoint> = confirmed
            .iter()
            .flat_map(|a| a.tx.spent_outpoints().cloned())
            .collect();
        let spent_count = spent.len();
        spent.sort_by_key(|op| op.txid);
        spent.dedup();
        prop_assert_eq!(spent.len(), spent_count, "an outpoint was spent twice");

        let pool = validator.pool();
        for op in &spent {
            prop_assert!(!pool.contains(op));
        }
        for accepted in &confirmed {
            prop_assert_eq!(accepted.txid, txid(&accepted.tx));
            for (op, output) in accepted.tx.created_outpoints(accepted.txid).zip(&accepted.tx.outputs) {
                prop_assert_eq!(pool.get(&op).unwrap(), output);
            }
        }

        let fees: Amount = confirmed.iter().map(|a| a.fee).sum();
        prop_assert_eq!(pool.total_value().unwrap(), before - fees);
    }
}
