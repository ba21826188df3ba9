//! Inventory, address and block-locator wire formats.

use super::encoding::{Decodable, Decoder, Encodable, Encoder};
use super::varint::varint_size;
use crate::constants::{CADDR_TIME_VERSION, PROTOCOL_VERSION};
use crate::error::DecodeError;
use crate::types::{BlockLocator, Hash256, InventoryItem, NetworkAddress};

impl Encodable for InventoryItem {
    fn consensus_encode(&self, encoder: &mut Encoder) {
        encoder.write_u32(self.inv_type);
        encoder.write_hash(&self.hash);
    }

    fn serialized_size(&self) -> usize {
        36
    }
}

impl Decodable for InventoryItem {
    const MIN_ENCODED_SIZE: usize = 36;

    fn consensus_decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        let inv_type = decoder.read_u32()?;
        let hash = decoder.read_hash()?;
        Ok(Self { inv_type, hash })
    }
}

impl Encodable for BlockLocator {
    fn consensus_encode(&self, encoder: &mut Encoder) {
        encoder.write_u32(self.version);
        encoder.write_vec(&self.have);
    }

    fn serialized_size(&self) -> usize {
        4 + varint_size(self.have.len() as u64) + 32 * self.have.len()
    }
}

impl Decodable for BlockLocator {
    const MIN_ENCODED_SIZE: usize = 5;

    fn consensus_decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        let version = decoder.read_u32()?;
        let max_hashes = decoder.limits().max_locator_hashes;
        let have: Vec<Hash256> = decoder.read_vec("locator hash", max_hashes)?;
        Ok(Self { version, have })
    }
}

/// Encode an address record as seen by a peer speaking `protocol_version`.
///
/// The timestamp is only on the wire from `CADDR_TIME_VERSION` onward. The
/// port is big-endian.
pub fn encode_address(encoder: &mut Encoder, addr: &NetworkAddress, protocol_version: u32) {
    if protocol_version >= CADDR_TIME_VERSION {
        encoder.write_u32(addr.time);
    }
    encoder.write_u64(addr.services);
    encoder.write_bytes(&addr.ip);
    encoder.write_u16_be(addr.port);
}

pub fn decode_address(
    decoder: &mut Decoder<'_>,
    protocol_version: u32,
) -> Result<NetworkAddress, DecodeError> {
    let time = if protocol_version >= CADDR_TIME_VERSION {
        decoder.read_u32()?
    } else {
        0
    };
    let services = decoder.read_u64()?;
    let ip = decoder.read_array::<16>()?;
    let port = decoder.read_u16_be()?;
    Ok(NetworkAddress {
        time,
        services,
        ip,
        port,
    })
}

/// Uses the current `PROTOCOL_VERSION`, so the timestamp is included.
impl Encodable for NetworkAddress {
    fn consensus_encode(&self, encoder: &mut Encoder) {
        encode_address(encoder, self, PROTOCOL_VERSION);
    }

    fn serialized_size(&self) -> usize {
        30
    }
}

impl Decodable for NetworkAddress {
    const MIN_ENCODED_SIZE: usize = 30;

    fn consensus_decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        decode_address(decoder, PROTOCOL_VERSION)
    }
}
