//! Transaction wire format
//!
//! Format:
//! - Version (4 bytes, little-endian)
//! - Input count (varint)
//! - For each input:
//!   - Previous output hash (32 bytes)
//!   - Previous output index (4 bytes, little-endian)
//!   - Script length (varint) and script bytes
//!   - Sequence (4 bytes, little-endian)
//! - Output count (varint)
//! - For each output:
//!   - Value (8 bytes, little-endian, signed)
//!   - Script length (varint) and script bytes
//! - Lock time (4 bytes, little-endian)

use super::encoding::{Decodable, Decoder, Encodable, Encoder};
use super::varint::varint_size;
use crate::error::DecodeError;
use crate::types::*;

impl Encodable for OutPoint {
    fn consensus_encode(&self, encoder: &mut Encoder) {
        encoder.write_hash(&self.hash);
        encoder.write_u32(self.index);
    }

    fn serialized_size(&self) -> usize {
        36
    }
}

impl Decodable for OutPoint {
    const MIN_ENCODED_SIZE: usize = 36;

    fn consensus_decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        let hash = decoder.read_hash()?;
        let index = decoder.read_u32()?;
        Ok(Self { hash, index })
    }
}

impl Encodable for TransactionInput {
    fn consensus_encode(&self, encoder: &mut Encoder) {
        self.prevout.consensus_encode(encoder);
        encoder.write_var_bytes(&self.script_sig);
        encoder.write_u32(self.sequence);
    }

    fn serialized_size(&self) -> usize {
        36 + varint_size(self.script_sig.len() as u64) + self.script_sig.len() + 4
    }
}

impl Decodable for TransactionInput {
    // outpoint, empty script, sequence
    const MIN_ENCODED_SIZE: usize = 41;

    fn consensus_decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        let prevout = OutPoint::consensus_decode(decoder)?;
        let script_sig = decoder.read_var_bytes()?;
        let sequence = decoder.read_u32()?;
        Ok(Self {
            prevout,
            script_sig,
            sequence,
        })
    }
}

impl Encodable for TransactionOutput {
    fn consensus_encode(&self, encoder: &mut Encoder) {
        encoder.write_i64(self.value);
        encoder.write_var_bytes(&self.script_pubkey);
    }

    fn serialized_size(&self) -> usize {
        8 + varint_size(self.script_pubkey.len() as u64) + self.script_pubkey.len()
    }
}

impl Decodable for TransactionOutput {
    // value, empty script
    const MIN_ENCODED_SIZE: usize = 9;

    fn consensus_decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        let value = decoder.read_i64()?;
        let script_pubkey = decoder.read_var_bytes()?;
        Ok(Self {
            value,
            script_pubkey,
        })
    }
}

impl Encodable for Transaction {
    fn consensus_encode(&self, encoder: &mut Encoder) {
        encoder.write_u32(self.version());
        encoder.write_vec(self.inputs());
        encoder.write_vec(self.outputs());
        encoder.write_u32(self.lock_time());
    }

    fn serialized_size(&self) -> usize {
        let inputs: usize = self.inputs().iter().map(|i| i.serialized_size()).sum();
        let outputs: usize = self.outputs().iter().map(|o| o.serialized_size()).sum();
        4 + varint_size(self.inputs().len() as u64)
            + inputs
            + varint_size(self.outputs().len() as u64)
            + outputs
            + 4
    }
}

impl Decodable for Transaction {
    // version, two zero counts, lock time
    const MIN_ENCODED_SIZE: usize = 10;

    fn consensus_decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        let version = decoder.read_u32()?;
        let max_inputs = decoder.limits().max_inputs;
        let inputs = decoder.read_vec("input", max_inputs)?;
        let max_outputs = decoder.limits().max_outputs;
        let outputs = decoder.read_vec("output", max_outputs)?;
        let lock_time = decoder.read_u32()?;
        Ok(Transaction::new(version, inputs, outputs, lock_time))
    }
}
