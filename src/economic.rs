//! Block reward schedule

use crate::constants::*;

/// GetBlockSubsidy: ℕ → ℤ
///
/// Subsidy halves every `HALVING_INTERVAL` blocks:
/// `INITIAL_SUBSIDY >> ⌊h / HALVING_INTERVAL⌋`, and is zero once the shift
/// reaches `MAX_HALVINGS`.
pub fn get_block_subsidy(height: u64) -> i64 {
    let halvings = height / HALVING_INTERVAL;
    if halvings >= MAX_HALVINGS {
        return 0;
    }
    INITIAL_SUBSIDY >> halvings
}

/// Maximum value a coinbase at `height` may claim: subsidy plus the fees
/// collected by the block's other transactions.
pub fn block_value(height: u64, fees: i64) -> i64 {
    get_block_subsidy(height).saturating_add(fees)
}
