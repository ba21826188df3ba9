//! Merkle tree over transaction identifiers
//!
//! Level 0 holds the leaves. Each higher level combines adjacent pairs with
//! `digest256(left || right)`; an odd trailing element is paired with
//! itself. Pairing is applied at least once, so a single leaf `A` yields the
//! root `digest256(A || A)`, and stops at the first level with one element.

use serde::{Deserialize, Serialize};

use crate::crypto::digest256_pair;
use crate::types::{Block, Hash256, Transaction};

/// Deserialized trees are rebuilt from their leaves and must match exactly,
/// so `root` and `branch` never see a malformed level list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredMerkleTree")]
pub struct MerkleTree {
    levels: Vec<Vec<Hash256>>,
}

#[derive(Deserialize)]
struct StoredMerkleTree {
    levels: Vec<Vec<Hash256>>,
}

impl TryFrom<StoredMerkleTree> for MerkleTree {
    type Error = String;

    fn try_from(stored: StoredMerkleTree) -> Result<Self, Self::Error> {
        let leaves = stored
            .levels
            .first()
            .ok_or_else(|| "merkle tree has no levels".to_string())?;
        let rebuilt =
            Self::from_hashes(leaves).ok_or_else(|| "merkle tree has no leaves".to_string())?;
        if rebuilt.levels != stored.levels {
            return Err("merkle tree levels do not match its leaves".to_string());
        }
        Ok(rebuilt)
    }
}

impl MerkleTree {
    /// Build the tree over `leaves`. `None` for an empty list.
    pub fn from_hashes(leaves: &[Hash256]) -> Option<Self> {
        if leaves.is_empty() {
            return None;
        }

        let mut levels = vec![leaves.to_vec()];
        loop {
            let next = combine_level(levels.last()?);
            let done = next.len() == 1;
            levels.push(next);
            if done {
                break;
            }
        }
        Some(Self { levels })
    }

    pub fn from_transactions(transactions: &[Transaction]) -> Option<Self> {
        let txids: Vec<Hash256> = transactions.iter().map(Transaction::txid).collect();
        Self::from_hashes(&txids)
    }

    pub fn root(&self) -> Hash256 {
        // levels always ends in a single-element level
        self.levels[self.levels.len() - 1][0]
    }

    /// All levels, leaves first, root level last.
    pub fn levels(&self) -> &[Vec<Hash256>] {
        &self.levels
    }

    pub fn leaves(&self) -> &[Hash256] {
        &self.levels[0]
    }

    /// Sibling hashes from the leaf level up to, not including, the root.
    pub fn branch(&self, index: usize) -> Option<Vec<Hash256>> {
        if index >= self.leaves().len() {
            return None;
        }

        let mut branch = Vec::with_capacity(self.levels.len() - 1);
        let mut idx = index;
        for level in &self.levels[..self.levels.len() - 1] {
            let sibling = (idx ^ 1).min(level.len() - 1);
            branch.push(level[sibling]);
            idx >>= 1;
        }
        Some(branch)
    }
}

fn combine_level(level: &[Hash256]) -> Vec<Hash256> {
    level
        .chunks(2)
        .map(|pair| {
            let left = &pair[0];
            let right = pair.get(1).unwrap_or(left);
            digest256_pair(left, right)
        })
        .collect()
}

/// Merkle root over `leaves`; `None` when there are none.
pub fn merkle_root(leaves: &[Hash256]) -> Option<Hash256> {
    MerkleTree::from_hashes(leaves).map(|tree| tree.root())
}

/// Recompute the root implied by `leaf` at `index` and its `branch`.
///
/// Never fails; the caller compares the result with the expected root.
pub fn check_merkle_branch(leaf: &Hash256, branch: &[Hash256], index: usize) -> Hash256 {
    let mut hash = *leaf;
    let mut idx = index;
    for sibling in branch {
        hash = if idx & 1 == 1 {
            digest256_pair(sibling, &hash)
        } else {
            digest256_pair(&hash, sibling)
        };
        idx >>= 1;
    }
    hash
}

impl Block {
    /// `None` for a block with no transactions.
    pub fn merkle_tree(&self) -> Option<MerkleTree> {
        MerkleTree::from_transactions(self.transactions())
    }

    pub fn compute_merkle_root(&self) -> Option<Hash256> {
        self.merkle_tree().map(|tree| tree.root())
    }

    /// Header commitment matches the transaction list.
    pub fn check_merkle_root(&self) -> bool {
        self.compute_merkle_root() == Some(self.header().merkle_root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::digest256;

    fn leaf(n: u8) -> Hash256 {
        digest256(&[n])
    }

    #[test]
    fn test_deserialize_rejects_malformed_levels() {
        for json in [
            r#"{"levels":[]}"#,
            r#"{"levels":[[]]}"#,
        ] {
            assert!(serde_json::from_str::<MerkleTree>(json).is_err(), "{json}");
        }

        // leaves without their upper levels
        let tree = MerkleTree::from_hashes(&[leaf(1), leaf(2)]).unwrap();
        let truncated = serde_json::json!({ "levels": [tree.leaves()] });
        assert!(serde_json::from_value::<MerkleTree>(truncated).is_err());

        // tampered root
        let mut levels = tree.levels().to_vec();
        levels[1][0] = leaf(9);
        let tampered = serde_json::json!({ "levels": levels });
        assert!(serde_json::from_value::<MerkleTree>(tampered).is_err());
    }

    #[test]
    fn test_serde_roundtrip_keeps_tree() {
        let tree = MerkleTree::from_hashes(&[leaf(1), leaf(2), leaf(3)]).unwrap();
        let json = serde_json::to_string(&tree).unwrap();
        let restored: MerkleTree = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, tree);
        assert_eq!(restored.root(), tree.root());
        assert_eq!(restored.branch(2), tree.branch(2));
    }

    #[test]
    fn test_empty_has_no_tree() {
        assert!(MerkleTree::from_hashes(&[]).is_none());
        assert_eq!(merkle_root(&[]), None);
    }

    #[test]
    fn test_single_leaf_root_is_self_pair() {
        let a = leaf(1);
        let tree = MerkleTree::from_hashes(&[a]).unwrap();
        assert_eq!(tree.root(), digest256_pair(&a, &a));
        assert_eq!(tree.levels().len(), 2);
        assert_eq!(tree.branch(0).unwrap(), vec![a]);
    }

    #[test]
    fn test_two_leaves() {
        let (a, b) = (leaf(1), leaf(2));
        assert_eq!(merkle_root(&[a, b]), Some(digest256_pair(&a, &b)));
    }

    #[test]
    fn test_three_leaves_duplicate_last() {
        let (a, b, c) = (leaf(1), leaf(2), leaf(3));
        let tree = MerkleTree::from_hashes(&[a, b, c]).unwrap();
        let ab = digest256_pair(&a, &b);
        let cc = digest256_pair(&c, &c);
        assert_eq!(tree.levels()[1], vec![ab, cc]);
        assert_eq!(tree.root(), digest256_pair(&ab, &cc));
        assert_eq!(tree.levels().len(), 3);
    }

    #[test]
    fn test_branch_for_odd_last_leaf_uses_itself() {
        let leaves = [leaf(1), leaf(2), leaf(3)];
        let tree = MerkleTree::from_hashes(&leaves).unwrap();
        let branch = tree.branch(2).unwrap();
        assert_eq!(branch[0], leaves[2]);
        assert_eq!(branch[1], digest256_pair(&leaves[0], &leaves[1]));
    }

    #[test]
    fn test_every_branch_verifies() {
        for n in 1..=17u8 {
            let leaves: Vec<Hash256> = (0..n).map(leaf).collect();
            let tree = MerkleTree::from_hashes(&leaves).unwrap();
            for (i, l) in leaves.iter().enumerate() {
                let branch = tree.branch(i).unwrap();
                assert_eq!(
                    check_merkle_branch(l, &branch, i),
                    tree.root(),
                    "n={} i={}",
                    n,
                    i
                );
            }
        }
    }

    #[test]
    fn test_wrong_leaf_or_index_mismatches() {
        let leaves: Vec<Hash256> = (0..4).map(leaf).collect();
        let tree = MerkleTree::from_hashes(&leaves).unwrap();
        let branch = tree.branch(1).unwrap();
        assert_ne!(check_merkle_branch(&leaves[2], &branch, 1), tree.root());
        assert_ne!(check_merkle_branch(&leaves[1], &branch, 0), tree.root());
    }

    #[test]
    fn test_branch_out_of_range() {
        let tree = MerkleTree::from_hashes(&[leaf(1), leaf(2)]).unwrap();
        assert!(tree.branch(2).is_none());
    }
}
