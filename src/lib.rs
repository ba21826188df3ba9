//! # Ledger Codec
//!
//! Canonical binary codec and consensus data model for ledger objects:
//! transactions, blocks, outpoints, inventory items, block locators, and
//! the unspent-output set, plus the merkle structures that bind a block
//! header to its transaction list.
//!
//! ## Design Principles
//!
//! 1. **Untrusted input**: every decode is bounds-checked and length fields
//!    are capped by [`config::DecodeLimits`]; malformed bytes produce an
//!    error, never a panic
//! 2. **Byte-exact**: `serialize(deserialize(b)) == b` for every accepted `b`;
//!    identifiers are double SHA-256 over those bytes
//! 3. **Exact Version Pinning**: consensus-critical hash crates are pinned
//!
//! ## Usage
//!
//! ```rust
//! use ledger_codec::ConsensusCore;
//! use ledger_codec::types::*;
//!
//! let core = ConsensusCore::new();
//! let tx = Transaction::new(
//!     1,
//!     vec![TransactionInput {
//!         prevout: OutPoint::null(),
//!         script_sig: vec![0x51],
//!         sequence: 0xffffffff,
//!     }],
//!     vec![TransactionOutput { value: 1000, script_pubkey: vec![0x51] }],
//!     0,
//! );
//! let bytes = core.encode_transaction(&tx);
//! let decoded = core.decode_transaction(&bytes).unwrap();
//! assert_eq!(decoded.txid(), tx.txid());
//! ```

pub mod block;
pub mod config;
pub mod constants;
pub mod crypto;
pub mod economic;
pub mod error;
pub mod merkle;
pub mod serialization;
pub mod transaction;
pub mod types;
pub mod utxo;

// Re-export commonly used types
pub use config::DecodeLimits;
pub use constants::*;
pub use crypto::{checksum32, digest160, digest256, digest256_pair};
pub use error::{ConsensusError, DecodeError, Result, UtxoError};
pub use merkle::{check_merkle_branch, merkle_root, MerkleTree};
pub use serialization::{deserialize, serialize, Decodable, Decoder, Encodable, Encoder};
pub use types::*;
pub use utxo::{SharedUtxoSet, UtxoEntry, UtxoSet};

/// Entry point bundling decode limits with the codec, merkle and validity
/// operations.
///
/// # Examples
///
/// ```
/// use ledger_codec::{ConsensusCore, DecodeLimits};
///
/// let core = ConsensusCore::with_limits(DecodeLimits {
///     max_inputs: 10,
///     ..Default::default()
/// });
/// assert_eq!(core.limits().max_inputs, 10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConsensusCore {
    limits: DecodeLimits,
}

impl ConsensusCore {
    /// Create an instance with default decode limits
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: DecodeLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &DecodeLimits {
        &self.limits
    }

    pub fn encode_transaction(&self, tx: &Transaction) -> Vec<u8> {
        serialize(tx)
    }

    /// Decode a transaction occupying all of `bytes`.
    pub fn decode_transaction(&self, bytes: &[u8]) -> Result<Transaction> {
        serialization::deserialize_with_limits(bytes, self.limits.clone())
    }

    pub fn encode_block(&self, block: &Block) -> Vec<u8> {
        serialize(block)
    }

    /// Decode a block occupying all of `bytes`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ledger_codec::ConsensusCore;
    ///
    /// let core = ConsensusCore::new();
    /// // 80-byte header and a declared transaction count with no body
    /// let mut bytes = vec![0u8; 80];
    /// bytes.push(1);
    /// assert!(core.decode_block(&bytes).is_err());
    /// ```
    pub fn decode_block(&self, bytes: &[u8]) -> Result<Block> {
        serialization::deserialize_with_limits(bytes, self.limits.clone())
    }

    /// Validate a transaction according to consensus rules
    pub fn validate_transaction(&self, tx: &Transaction) -> ValidationResult {
        transaction::check_transaction(tx)
    }

    /// Validate a block's structure
    ///
    /// # Examples
    ///
    /// ```
    /// use ledger_codec::ConsensusCore;
    /// use ledger_codec::types::*;
    ///
    /// let core = ConsensusCore::new();
    /// let empty = Block::from_header(BlockHeader::default());
    /// assert!(!core.validate_block(&empty).is_valid());
    /// ```
    pub fn validate_block(&self, block: &Block) -> ValidationResult {
        block::check_block(block)
    }

    /// Check an output's value bound
    pub fn validate_output(&self, output: &TransactionOutput) -> bool {
        transaction::check_output(output)
    }

    /// Get block subsidy for height
    ///
    /// # Examples
    ///
    /// ```
    /// use ledger_codec::ConsensusCore;
    ///
    /// let core = ConsensusCore::new();
    /// assert_eq!(core.get_block_subsidy(0), 5000000000);
    /// assert_eq!(core.get_block_subsidy(210000), 2500000000);
    /// ```
    pub fn get_block_subsidy(&self, height: u64) -> i64 {
        economic::get_block_subsidy(height)
    }

    pub fn block_value(&self, height: u64, fees: i64) -> i64 {
        economic::block_value(height, fees)
    }

    /// Merkle root over transaction ids; `None` for an empty list.
    pub fn merkle_root(&self, txids: &[Hash256]) -> Option<Hash256> {
        merkle::merkle_root(txids)
    }

    /// Root implied by a merkle branch
    ///
    /// # Examples
    ///
    /// ```
    /// use ledger_codec::{ConsensusCore, MerkleTree};
    ///
    /// let core = ConsensusCore::new();
    /// let leaves = [[1u8; 32], [2u8; 32], [3u8; 32]];
    /// let tree = MerkleTree::from_hashes(&leaves).unwrap();
    /// let branch = tree.branch(2).unwrap();
    /// assert_eq!(core.verify_merkle_branch(&leaves[2], &branch, 2), tree.root());
    /// ```
    pub fn verify_merkle_branch(&self, leaf: &Hash256, branch: &[Hash256], index: usize) -> Hash256 {
        merkle::check_merkle_branch(leaf, branch, index)
    }
}
