//! Integration test suite for the ledger validator.
//!
//! End-to-end scenarios drive whole epochs through [`ledger_core::LedgerValidator`];
//! the adversarial suite checks validation and conservation invariants under
//! randomized inputs.

pub mod helpers;
