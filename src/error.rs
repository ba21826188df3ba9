//! Error types for decoding, unspent-output bookkeeping and configuration

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConsensusError {
    #[error("Decode failed: {0}")]
    Decode(#[from] DecodeError),

    #[error("UTXO set update failed: {0}")]
    Utxo(#[from] UtxoError),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Failure to decode untrusted bytes. The input must be discarded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unexpected end of input: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEnd { needed: usize, remaining: usize },

    #[error("non-canonical varint encoding of {0}")]
    NonCanonicalVarInt(u64),

    #[error("{what} count {count} exceeds limit {max}")]
    CountTooLarge {
        what: &'static str,
        count: u64,
        max: usize,
    },

    #[error("{0} trailing bytes after object")]
    TrailingBytes(usize),
}

/// Rejected mutation of the unspent-output set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UtxoError {
    #[error("transaction {0} already present")]
    AlreadyExists(String),

    #[error("transaction {0} not found")]
    UnknownTransaction(String),

    #[error("output index {index} out of range for {txid} ({outputs} outputs)")]
    IndexOutOfRange {
        txid: String,
        index: u32,
        outputs: usize,
    },

    #[error("output {txid}:{index} already spent")]
    AlreadySpent { txid: String, index: u32 },
}

pub type Result<T> = std::result::Result<T, ConsensusError>;
