//! Unspent-output set
//!
//! One [`UtxoEntry`] per transaction, keyed by txid. Spending an output
//! replaces its slot with `None`; slots are never removed, so an outpoint
//! index always addresses the same position. Entries whose outputs are all
//! spent stay until the caller evicts them with [`UtxoSet::remove`].

use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use tracing::debug;

use crate::crypto::hash_to_hex;
use crate::error::UtxoError;
use crate::types::*;

/// Outputs of one transaction as tracked by the set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtxoEntry {
    pub txid: Hash256,
    pub is_coinbase: bool,
    /// Height of the block that confirmed the transaction
    pub height: u32,
    pub version: u32,
    /// `None` marks a spent output
    pub outputs: Vec<Option<TransactionOutput>>,
}

impl UtxoEntry {
    pub fn from_transaction(tx: &Transaction, is_coinbase: bool, height: u32) -> Self {
        Self {
            txid: tx.txid(),
            is_coinbase,
            height,
            version: tx.version(),
            outputs: tx.outputs().iter().cloned().map(Some).collect(),
        }
    }

    /// The unspent output at `index`, if any.
    pub fn output(&self, index: u32) -> Option<&TransactionOutput> {
        self.outputs.get(index as usize)?.as_ref()
    }

    pub fn unspent_count(&self) -> usize {
        self.outputs.iter().filter(|o| o.is_some()).count()
    }

    pub fn is_fully_spent(&self) -> bool {
        self.unspent_count() == 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UtxoSet {
    entries: HashMap<Hash256, UtxoEntry>,
}

impl UtxoSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, txid: &Hash256) -> bool {
        self.entries.contains_key(txid)
    }

    /// Insert a prepared entry. An existing entry for the same txid is never
    /// overwritten.
    pub fn insert(&mut self, entry: UtxoEntry) -> Result<(), UtxoError> {
        match self.entries.entry(entry.txid) {
            Entry::Occupied(_) => {
                debug!(txid = %hash_to_hex(&entry.txid), "rejecting duplicate utxo entry");
                Err(UtxoError::AlreadyExists(hash_to_hex(&entry.txid)))
            }
            Entry::Vacant(slot) => {
                debug!(
                    txid = %hash_to_hex(&entry.txid),
                    outputs = entry.outputs.len(),
                    height = entry.height,
                    "added utxo entry"
                );
                slot.insert(entry);
                Ok(())
            }
        }
    }

    /// Track every output of `tx` as unspent.
    pub fn add_from_transaction(
        &mut self,
        tx: &Transaction,
        is_coinbase: bool,
        height: u32,
    ) -> Result<(), UtxoError> {
        self.insert(UtxoEntry::from_transaction(tx, is_coinbase, height))
    }

    pub fn lookup(&self, txid: &Hash256) -> Option<&UtxoEntry> {
        self.entries.get(txid)
    }

    /// True unless `outpoint` names a tracked, in-range, unspent output.
    pub fn is_spent(&self, outpoint: &OutPoint) -> bool {
        self.entries
            .get(&outpoint.hash)
            .and_then(|entry| entry.output(outpoint.index))
            .is_none()
    }

    /// Mark one output spent in place.
    pub fn spend(&mut self, outpoint: &OutPoint) -> Result<(), UtxoError> {
        let entry = self
            .entries
            .get_mut(&outpoint.hash)
            .ok_or_else(|| UtxoError::UnknownTransaction(hash_to_hex(&outpoint.hash)))?;

        let outputs = entry.outputs.len();
        let slot = entry
            .outputs
            .get_mut(outpoint.index as usize)
            .ok_or_else(|| UtxoError::IndexOutOfRange {
                txid: hash_to_hex(&outpoint.hash),
                index: outpoint.index,
                outputs,
            })?;

        if slot.take().is_none() {
            let txid = hash_to_hex(&outpoint.hash);
            debug!(txid = %txid, index = outpoint.index, "rejecting double spend");
            return Err(UtxoError::AlreadySpent {
                txid,
                index: outpoint.index,
            });
        }

        debug!(txid = %hash_to_hex(&outpoint.hash), index = outpoint.index, "spent output");
        Ok(())
    }

    /// Evict an entry, typically once it is fully spent.
    pub fn remove(&mut self, txid: &Hash256) -> Option<UtxoEntry> {
        self.entries.remove(txid)
    }

    pub fn iter(&self) -> impl Iterator<Item = &UtxoEntry> {
        self.entries.values()
    }
}

/// [`UtxoSet`] behind a single reader-writer lock.
///
/// Queries share the read lock. `add_from_transaction` and `spend` hold the
/// write lock for their whole check-then-act sequence, so two callers can
/// never both spend the same output.
#[derive(Debug, Default)]
pub struct SharedUtxoSet {
    inner: RwLock<UtxoSet>,
}

impl SharedUtxoSet {
    pub fn new(set: UtxoSet) -> Self {
        Self {
            inner: RwLock::new(set),
        }
    }

    pub fn add_from_transaction(
        &self,
        tx: &Transaction,
        is_coinbase: bool,
        height: u32,
    ) -> Result<(), UtxoError> {
        // compute the txid before taking the lock
        let entry = UtxoEntry::from_transaction(tx, is_coinbase, height);
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(entry)
    }

    pub fn spend(&self, outpoint: &OutPoint) -> Result<(), UtxoError> {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .spend(outpoint)
    }

    pub fn is_spent(&self, outpoint: &OutPoint) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_spent(outpoint)
    }

    pub fn lookup(&self, txid: &Hash256) -> Option<UtxoEntry> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .lookup(txid)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_inner(self) -> UtxoSet {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}
