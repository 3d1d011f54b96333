//! Ledger constants. All monetary values are in base units (1 coin = 10^8 units).

use crate::types::Amount;

/// Base units per whole coin.
///
/// # Examples
///
/// ```
/// use ledger_core::constants::COIN;
/// assert_eq!(10 * COIN, 1_000_000_000);
/// ```
pub const COIN: Amount = 100_000_000;

/// Length of a raw Ed25519 signature in bytes.
pub const SIGNATURE_LEN: usize = 64;

/// Length of a raw Ed25519 verification key in bytes.
pub const PUBLIC_KEY_LEN: usize = 32;
