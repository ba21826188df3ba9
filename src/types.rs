//! Core ledger types

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::OnceLock;

use crate::constants::*;
use crate::crypto::digest256;
use crate::serialization::{serialize, Encodable};

/// Hash type: 256-bit hash
pub type Hash256 = [u8; 32];

/// Short identity digest: 160-bit hash
pub type Hash160 = [u8; 20];

/// Byte string type
pub type ByteString = Vec<u8>;

/// OutPoint: reference to one output of a prior transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutPoint {
    pub hash: Hash256,
    pub index: u32,
}

impl OutPoint {
    pub fn new(hash: Hash256, index: u32) -> Self {
        Self { hash, index }
    }

    /// The coinbase marker: zero hash, index `0xffffffff`.
    pub fn null() -> Self {
        Self {
            hash: [0u8; 32],
            index: NULL_OUTPOINT_INDEX,
        }
    }

    pub fn is_null(&self) -> bool {
        self.hash == [0u8; 32] && self.index == NULL_OUTPOINT_INDEX
    }
}

/// Transaction Input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionInput {
    pub prevout: OutPoint,
    pub script_sig: ByteString,
    pub sequence: u32,
}

/// Transaction Output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionOutput {
    pub value: i64,
    pub script_pubkey: ByteString,
}

impl TransactionOutput {
    /// Placeholder output: value -1 and no script. Never a valid output.
    pub fn null() -> Self {
        Self {
            value: -1,
            script_pubkey: Vec::new(),
        }
    }

    pub fn set_null(&mut self) {
        self.value = -1;
        self.script_pubkey.clear();
    }

    pub fn is_null(&self) -> bool {
        self.value == -1
    }
}

/// Transaction with a lazily computed, cached identifier.
///
/// Fields are reachable only through accessors so that every mutation
/// clears the cached txid. Holding a `&mut` from [`Transaction::inputs_mut`]
/// or [`Transaction::outputs_mut`] clears it up front; the borrow checker
/// then guarantees no stale id is observed while the borrow is live.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transaction {
    version: u32,
    inputs: Vec<TransactionInput>,
    outputs: Vec<TransactionOutput>,
    lock_time: u32,
    #[serde(skip)]
    txid: OnceLock<Hash256>,
}

impl PartialEq for Transaction {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
            && self.inputs == other.inputs
            && self.outputs == other.outputs
            && self.lock_time == other.lock_time
    }
}

impl Eq for Transaction {}

impl Transaction {
    pub fn new(
        version: u32,
        inputs: Vec<TransactionInput>,
        outputs: Vec<TransactionOutput>,
        lock_time: u32,
    ) -> Self {
        Self {
            version,
            inputs,
            outputs,
            lock_time,
            txid: OnceLock::new(),
        }
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn inputs(&self) -> &[TransactionInput] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[TransactionOutput] {
        &self.outputs
    }

    pub fn lock_time(&self) -> u32 {
        self.lock_time
    }

    pub fn set_version(&mut self, version: u32) {
        self.version = version;
        self.invalidate_txid();
    }

    pub fn set_lock_time(&mut self, lock_time: u32) {
        self.lock_time = lock_time;
        self.invalidate_txid();
    }

    pub fn inputs_mut(&mut self) -> &mut Vec<TransactionInput> {
        self.invalidate_txid();
        &mut self.inputs
    }

    pub fn outputs_mut(&mut self) -> &mut Vec<TransactionOutput> {
        self.invalidate_txid();
        &mut self.outputs
    }

    pub fn push_input(&mut self, input: TransactionInput) {
        self.inputs_mut().push(input);
    }

    pub fn push_output(&mut self, output: TransactionOutput) {
        self.outputs_mut().push(output);
    }

    /// Drop the cached identifier; the next [`Transaction::txid`] recomputes it.
    pub fn invalidate_txid(&mut self) {
        self.txid.take();
    }

    /// Identifier: double SHA-256 of the canonical serialization.
    pub fn txid(&self) -> Hash256 {
        *self.txid.get_or_init(|| digest256(&serialize(self)))
    }

    /// The cached identifier, if one has been computed since the last mutation.
    pub fn cached_txid(&self) -> Option<Hash256> {
        self.txid.get().copied()
    }

    /// Exactly one input, spending the null outpoint.
    pub fn is_coinbase(&self) -> bool {
        self.inputs.len() == 1 && self.inputs[0].prevout.is_null()
    }

    pub fn serialized_size(&self) -> usize {
        Encodable::serialized_size(self)
    }
}

/// Block Header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BlockHeader {
    pub version: u32,
    pub prev_block_hash: Hash256,
    pub merkle_root: Hash256,
    pub timestamp: u32,
    pub bits: u32,
    pub nonce: u32,
}

impl BlockHeader {
    /// Uncached header digest. [`Block::block_hash`] caches the same value.
    pub fn block_hash(&self) -> Hash256 {
        digest256(&serialize(self))
    }
}

/// Block: header plus ordered transaction list, with a cached identifier.
///
/// The identifier covers the header only; the transaction list is bound to
/// it through `merkle_root`. Editing transactions therefore leaves the
/// cached hash intact, editing the header clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Block {
    header: BlockHeader,
    transactions: Vec<Transaction>,
    #[serde(skip)]
    hash: OnceLock<Hash256>,
}

impl PartialEq for Block {
    fn eq(&self, other: &Self) -> bool {
        self.header == other.header && self.transactions == other.transactions
    }
}

impl Eq for Block {}

impl Block {
    pub fn new(header: BlockHeader, transactions: Vec<Transaction>) -> Self {
        Self {
            header,
            transactions,
            hash: OnceLock::new(),
        }
    }

    /// A block carrying only `header`, with no transactions.
    pub fn from_header(header: BlockHeader) -> Self {
        Self::new(header, Vec::new())
    }

    pub fn header(&self) -> &BlockHeader {
        &self.header
    }

    pub fn header_mut(&mut self) -> &mut BlockHeader {
        self.invalidate_hash();
        &mut self.header
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn transactions_mut(&mut self) -> &mut Vec<Transaction> {
        &mut self.transactions
    }

    pub fn push_transaction(&mut self, tx: Transaction) {
        self.transactions.push(tx);
    }

    pub fn into_parts(self) -> (BlockHeader, Vec<Transaction>) {
        (self.header, self.transactions)
    }

    pub fn invalidate_hash(&mut self) {
        self.hash.take();
    }

    pub fn block_hash(&self) -> Hash256 {
        *self.hash.get_or_init(|| self.header.block_hash())
    }

    pub fn cached_hash(&self) -> Option<Hash256> {
        self.hash.get().copied()
    }

    pub fn serialized_size(&self) -> usize {
        Encodable::serialized_size(self)
    }
}

/// Known inventory tags. Unknown tags still decode as a raw `u32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InventoryType {
    Invalid,
    Tx,
    Block,
}

impl From<InventoryType> for u32 {
    fn from(kind: InventoryType) -> Self {
        match kind {
            InventoryType::Invalid => MSG_ERROR,
            InventoryType::Tx => MSG_TX,
            InventoryType::Block => MSG_BLOCK,
        }
    }
}

impl TryFrom<u32> for InventoryType {
    type Error = u32;

    fn try_from(tag: u32) -> std::result::Result<Self, u32> {
        match tag {
            MSG_ERROR => Ok(InventoryType::Invalid),
            MSG_TX => Ok(InventoryType::Tx),
            MSG_BLOCK => Ok(InventoryType::Block),
            other => Err(other),
        }
    }
}

/// Inventory item: an object referenced by kind and identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InventoryItem {
    pub inv_type: u32,
    pub hash: Hash256,
}

impl InventoryItem {
    pub fn new(kind: InventoryType, hash: Hash256) -> Self {
        Self {
            inv_type: kind.into(),
            hash,
        }
    }

    pub fn kind(&self) -> Option<InventoryType> {
        InventoryType::try_from(self.inv_type).ok()
    }
}

/// Peer address record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NetworkAddress {
    /// Last-seen time; only on the wire from `CADDR_TIME_VERSION` onward
    pub time: u32,
    pub services: u64,
    /// IPv6, or IPv4 mapped into IPv6
    pub ip: [u8; 16],
    pub port: u16,
}

impl NetworkAddress {
    pub fn from_ipv4(addr: Ipv4Addr, port: u16, services: u64) -> Self {
        Self {
            time: 0,
            services,
            ip: addr.to_ipv6_mapped().octets(),
            port,
        }
    }

    pub fn ip_addr(&self) -> IpAddr {
        let v6 = Ipv6Addr::from(self.ip);
        match v6.to_ipv4_mapped() {
            Some(v4) => IpAddr::V4(v4),
            None => IpAddr::V6(v6),
        }
    }
}

/// Block locator: checkpoint hashes, most recent first
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BlockLocator {
    pub version: u32,
    pub have: Vec<Hash256>,
}

/// Validation result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(String),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tx() -> Transaction {
        Transaction::new(
            1,
            vec![TransactionInput {
                prevout: OutPoint::new([1; 32], 0),
                script_sig: vec![0x51],
                sequence: SEQUENCE_FINAL,
            }],
            vec![TransactionOutput {
                value: 1000,
                script_pubkey: vec![0x51],
            }],
            0,
        )
    }

    #[test]
    fn test_null_outpoint() {
        assert!(OutPoint::null().is_null());
        assert!(!OutPoint::new([0; 32], 0).is_null());
        assert!(!OutPoint::new([1; 32], NULL_OUTPOINT_INDEX).is_null());
    }

    #[test]
    fn test_is_coinbase_shapes() {
        let coinbase = Transaction::new(
            1,
            vec![TransactionInput {
                prevout: OutPoint::null(),
                script_sig: vec![],
                sequence: SEQUENCE_FINAL,
            }],
            vec![],
            0,
        );
        assert!(coinbase.is_coinbase());

        let mut two_inputs = coinbase.clone();
        two_inputs.push_input(TransactionInput {
            prevout: OutPoint::null(),
            script_sig: vec![],
            sequence: SEQUENCE_FINAL,
        });
        assert!(!two_inputs.is_coinbase());

        assert!(!sample_tx().is_coinbase());
        assert!(!Transaction::default().is_coinbase());
    }

    #[test]
    fn test_txid_cache_invalidated_on_mutation() {
        let mut tx = sample_tx();
        assert_eq!(tx.cached_txid(), None);

        let first = tx.txid();
        assert_eq!(tx.cached_txid(), Some(first));

        tx.set_lock_time(500);
        assert_eq!(tx.cached_txid(), None);
        let second = tx.txid();
        assert_ne!(first, second);

        tx.outputs_mut()[0].value = 999;
        assert_eq!(tx.cached_txid(), None);
        assert_ne!(tx.txid(), second);
    }

    #[test]
    fn test_equality_ignores_cache() {
        let a = sample_tx();
        let b = sample_tx();
        a.txid();
        assert_eq!(a, b);
    }

    #[test]
    fn test_block_hash_tracks_header_only() {
        let mut block = Block::from_header(BlockHeader {
            version: 1,
            timestamp: 1_231_006_505,
            bits: 0x1d00ffff,
            ..Default::default()
        });
        let hash = block.block_hash();
        assert_eq!(hash, block.header().block_hash());

        block.push_transaction(sample_tx());
        assert_eq!(block.cached_hash(), Some(hash));

        block.header_mut().nonce = 7;
        assert_eq!(block.cached_hash(), None);
        assert_ne!(block.block_hash(), hash);
    }

    #[test]
    fn test_block_into_parts() {
        let header = BlockHeader {
            version: 2,
            nonce: 42,
            ..Default::default()
        };
        let block = Block::new(header, vec![sample_tx()]);
        let (parts_header, transactions) = block.into_parts();
        assert_eq!(parts_header, header);
        assert_eq!(transactions, vec![sample_tx()]);
    }

    #[test]
    fn test_null_output() {
        let mut out = TransactionOutput {
            value: 5,
            script_pubkey: vec![1, 2],
        };
        assert!(!out.is_null());
        out.set_null();
        assert!(out.is_null());
        assert_eq!(out, TransactionOutput::null());
    }

    #[test]
    fn test_inventory_kind() {
        let item = InventoryItem::new(InventoryType::Block, [9; 32]);
        assert_eq!(item.inv_type, MSG_BLOCK);
        assert_eq!(item.kind(), Some(InventoryType::Block));

        let unknown = InventoryItem {
            inv_type: 77,
            hash: [0; 32],
        };
        assert_eq!(unknown.kind(), None);
    }

    #[test]
    fn test_network_address_ipv4_mapping() {
        let addr = NetworkAddress::from_ipv4(Ipv4Addr::new(10, 0, 0, 1), 8333, NODE_NETWORK);
        assert_eq!(&addr.ip[..12], &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xff, 0xff]);
        assert_eq!(addr.ip_addr(), IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)));
    }
}
