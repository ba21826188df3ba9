//! Block wire format
//!
//! Header (80 bytes): version, previous block hash, merkle root, timestamp,
//! bits, nonce. A full block appends a varint transaction count and the
//! transactions in order.

use super::encoding::{Decodable, Decoder, Encodable, Encoder};
use super::varint::varint_size;
use crate::constants::BLOCK_HEADER_SIZE;
use crate::error::DecodeError;
use crate::types::{Block, BlockHeader, Transaction};

impl Encodable for BlockHeader {
    fn consensus_encode(&self, encoder: &mut Encoder) {
        encoder.write_u32(self.version);
        encoder.write_hash(&self.prev_block_hash);
        encoder.write_hash(&self.merkle_root);
        encoder.write_u32(self.timestamp);
        encoder.write_u32(self.bits);
        encoder.write_u32(self.nonce);
    }

    fn serialized_size(&self) -> usize {
        BLOCK_HEADER_SIZE
    }
}

impl Decodable for BlockHeader {
    const MIN_ENCODED_SIZE: usize = BLOCK_HEADER_SIZE;

    fn consensus_decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            version: decoder.read_u32()?,
            prev_block_hash: decoder.read_hash()?,
            merkle_root: decoder.read_hash()?,
            timestamp: decoder.read_u32()?,
            bits: decoder.read_u32()?,
            nonce: decoder.read_u32()?,
        })
    }
}

impl Encodable for Block {
    fn consensus_encode(&self, encoder: &mut Encoder) {
        self.header().consensus_encode(encoder);
        encoder.write_vec(self.transactions());
    }

    fn serialized_size(&self) -> usize {
        let txs: usize = self
            .transactions()
            .iter()
            .map(|tx| tx.serialized_size())
            .sum();
        BLOCK_HEADER_SIZE + varint_size(self.transactions().len() as u64) + txs
    }
}

impl Decodable for Block {
    const MIN_ENCODED_SIZE: usize = BLOCK_HEADER_SIZE + 1;

    fn consensus_decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        let header = BlockHeader::consensus_decode(decoder)?;
        let max_txs = decoder.limits().max_block_transactions;
        let transactions: Vec<Transaction> = decoder.read_vec("transaction", max_txs)?;
        Ok(Block::new(header, transactions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialization::{deserialize, serialize};
    use crate::types::*;

    fn header() -> BlockHeader {
        BlockHeader {
            version: 1,
            prev_block_hash: [0x11; 32],
            merkle_root: [0x22; 32],
            timestamp: 1_300_000_000,
            bits: 0x1d00ffff,
            nonce: 42,
        }
    }

    fn coinbase() -> Transaction {
        Transaction::new(
            1,
            vec![TransactionInput {
                prevout: OutPoint::null(),
                script_sig: vec![0x04, 0xff, 0xff, 0x00, 0x1d],
                sequence: 0xffffffff,
            }],
            vec![TransactionOutput {
                value: 5_000_000_000,
                script_pubkey: vec![0xac],
            }],
            0,
        )
    }

    #[test]
    fn test_header_is_80_bytes() {
        let bytes = serialize(&header());
        assert_eq!(bytes.len(), BLOCK_HEADER_SIZE);
        assert_eq!(&bytes[..4], &[1, 0, 0, 0]);
        assert_eq!(&bytes[4..36], &[0x11; 32]);
        assert_eq!(&bytes[76..], &42u32.to_le_bytes());
    }

    #[test]
    fn test_block_roundtrip() {
        let block = Block::new(header(), vec![coinbase(), coinbase()]);
        let bytes = serialize(&block);
        assert_eq!(bytes.len(), block.serialized_size());
        assert_eq!(bytes[80], 2);

        let decoded: Block = deserialize(&bytes).unwrap();
        assert_eq!(decoded, block);
        assert_eq!(decoded.block_hash(), block.block_hash());
    }

    #[test]
    fn test_header_only_block() {
        let block = Block::from_header(header());
        let bytes = serialize(&block);
        assert_eq!(bytes.len(), 81);
        assert_eq!(deserialize::<Block>(&bytes).unwrap(), block);
    }

    #[test]
    fn test_truncated_block_rejected() {
        let bytes = serialize(&Block::new(header(), vec![coinbase()]));
        for cut in [1, 10, 40, 79, 80, 81, bytes.len() - 1] {
            assert!(
                deserialize::<Block>(&bytes[..bytes.len() - cut]).is_err(),
                "cut {} bytes",
                cut
            );
        }
    }

    #[test]
    fn test_inflated_transaction_count_rejected() {
        let mut bytes = serialize(&Block::new(header(), vec![coinbase()]));
        bytes[80] = 2;
        assert!(deserialize::<Block>(&bytes).is_err());
    }
}
