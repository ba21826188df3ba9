//! Block validity predicates

use tracing::debug;

use crate::crypto::hash_to_hex;
use crate::transaction::check_transaction;
use crate::types::*;

/// CheckBlock: ℬ → {valid, invalid}
///
/// 1. The transaction list is not empty
/// 2. Every transaction passes [`check_transaction`]
///
/// Header field shapes are guaranteed by decoding. Merkle commitment is
/// checked separately with [`Block::check_merkle_root`].
pub fn check_block(block: &Block) -> ValidationResult {
    if block.transactions().is_empty() {
        debug!(block = %hash_to_hex(&block.block_hash()), "rejecting empty block");
        return ValidationResult::Invalid("Block has no transactions".to_string());
    }

    for (i, tx) in block.transactions().iter().enumerate() {
        if let ValidationResult::Invalid(reason) = check_transaction(tx) {
            return ValidationResult::Invalid(format!("Transaction {} invalid: {}", i, reason));
        }
    }

    ValidationResult::Valid
}

/// Coinbase placement: the first transaction is a coinbase and no other is.
pub fn check_coinbase_placement(block: &Block) -> bool {
    match block.transactions().split_first() {
        Some((first, rest)) => first.is_coinbase() && !rest.iter().any(Transaction::is_coinbase),
        None => false,
    }
}
