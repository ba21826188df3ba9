//! Protocol constants

/// Satoshis per coin
pub const COIN: i64 = 100_000_000;

/// Maximum money supply: 21,000,000 coins in satoshis
pub const MAX_MONEY: i64 = 21_000_000 * COIN;

/// Halving interval: 210,000 blocks
pub const HALVING_INTERVAL: u64 = 210_000;

/// Initial block subsidy: 50 coins
pub const INITIAL_SUBSIDY: i64 = 50 * COIN;

/// Subsidy is zero once the shift reaches the width of the amount type.
pub const MAX_HALVINGS: u64 = 64;

/// Maximum serialized block size
pub const MAX_BLOCK_SIZE: usize = 1_000_000;

/// Default cap on inputs decoded for one transaction
pub const MAX_INPUTS: usize = 100_000;

/// Default cap on outputs decoded for one transaction
pub const MAX_OUTPUTS: usize = 100_000;

/// Default cap on a single script length
pub const MAX_SCRIPT_SIZE: usize = MAX_BLOCK_SIZE;

/// Default cap on transactions decoded for one block
pub const MAX_BLOCK_TRANSACTIONS: usize = 100_000;

/// Default cap on hashes in a block locator
pub const MAX_LOCATOR_HASHES: usize = 500;

/// Output index marking the null outpoint
pub const NULL_OUTPOINT_INDEX: u32 = 0xffffffff;

/// Sequence number for final transaction
pub const SEQUENCE_FINAL: u32 = 0xffffffff;

/// First protocol version whose address records carry a timestamp
pub const CADDR_TIME_VERSION: u32 = 31402;

/// Protocol version used when the caller has no negotiated version
pub const PROTOCOL_VERSION: u32 = 60002;

/// Service bit: node serves the full block chain
pub const NODE_NETWORK: u64 = 1 << 0;

/// Inventory tag: error / unknown
pub const MSG_ERROR: u32 = 0;

/// Inventory tag: transaction
pub const MSG_TX: u32 = 1;

/// Inventory tag: block
pub const MSG_BLOCK: u32 = 2;

/// Serialized block header length
pub const BLOCK_HEADER_SIZE: usize = 80;
