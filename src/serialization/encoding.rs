//! Bounded read cursor, append-only writer, and the codec traits.

use tracing::{debug, trace};

use crate::config::DecodeLimits;
use crate::error::{DecodeError, Result};
use crate::types::Hash256;

/// Read cursor over an immutable byte slice.
///
/// Passed as `&mut Decoder` down the decode call chain. A failed read leaves
/// the position unspecified; callers discard the whole attempt.
#[derive(Debug)]
pub struct Decoder<'a> {
    data: &'a [u8],
    pos: usize,
    limits: DecodeLimits,
}

impl<'a> Decoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_limits(data, DecodeLimits::default())
    }

    pub fn with_limits(data: &'a [u8], limits: DecodeLimits) -> Self {
        Self {
            data,
            pos: 0,
            limits,
        }
    }

    pub fn limits(&self) -> &DecodeLimits {
        &self.limits
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn read_bytes(&mut self, len: usize) -> std::result::Result<&'a [u8], DecodeError> {
        let remaining = self.remaining();
        if len > remaining {
            return Err(DecodeError::UnexpectedEnd {
                needed: len,
                remaining,
            });
        }
        let out = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(out)
    }

    pub fn read_array<const N: usize>(&mut self) -> std::result::Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> std::result::Result<u8, DecodeError> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_u16(&mut self) -> std::result::Result<u16, DecodeError> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    pub fn read_u16_be(&mut self) -> std::result::Result<u16, DecodeError> {
        Ok(u16::from_be_bytes(self.read_array()?))
    }

    pub fn read_u32(&mut self) -> std::result::Result<u32, DecodeError> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    pub fn read_u64(&mut self) -> std::result::Result<u64, DecodeError> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    pub fn read_i32(&mut self) -> std::result::Result<i32, DecodeError> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    pub fn read_i64(&mut self) -> std::result::Result<i64, DecodeError> {
        Ok(i64::from_le_bytes(self.read_array()?))
    }

    pub fn read_hash(&mut self) -> std::result::Result<Hash256, DecodeError> {
        self.read_array()
    }

    /// Compact size integer. Rejects truncated payloads and values that
    /// would have fit a shorter form.
    pub fn read_varint(&mut self) -> std::result::Result<u64, DecodeError> {
        match self.read_u8()? {
            0xfd => {
                let value = self.read_u16()? as u64;
                if value < 0xfd {
                    return Err(DecodeError::NonCanonicalVarInt(value));
                }
                Ok(value)
            }
            0xfe => {
                let value = self.read_u32()? as u64;
                if value <= 0xffff {
                    return Err(DecodeError::NonCanonicalVarInt(value));
                }
                Ok(value)
            }
            0xff => {
                let value = self.read_u64()?;
                if value <= 0xffff_ffff {
                    return Err(DecodeError::NonCanonicalVarInt(value));
                }
                Ok(value)
            }
            b => Ok(b as u64),
        }
    }

    /// Varint element count, capped at `max`.
    pub fn read_count(
        &mut self,
        what: &'static str,
        max: usize,
    ) -> std::result::Result<usize, DecodeError> {
        let count = self.read_varint()?;
        if count > max as u64 {
            return Err(DecodeError::CountTooLarge { what, count, max });
        }
        Ok(count as usize)
    }

    /// Varint length followed by that many raw bytes.
    pub fn read_var_bytes(&mut self) -> std::result::Result<Vec<u8>, DecodeError> {
        let len = self.read_count("byte buffer", self.limits.max_script_size)?;
        Ok(self.read_bytes(len)?.to_vec())
    }

    /// Varint count followed by that many elements.
    ///
    /// Capacity is bounded by how many elements the bytes actually left could
    /// hold, never by the declared count alone.
    pub fn read_vec<T: Decodable>(
        &mut self,
        what: &'static str,
        max: usize,
    ) -> std::result::Result<Vec<T>, DecodeError> {
        let count = self.read_count(what, max)?;
        let mut items = Vec::with_capacity(initial_capacity::<T>(count, self.remaining()));
        for _ in 0..count {
            items.push(T::consensus_decode(self)?);
        }
        Ok(items)
    }
}

/// Append-only output buffer.
#[derive(Debug, Default, Clone)]
pub struct Encoder {
    buf: Vec<u8>,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.write_bytes(&value.to_le_bytes());
    }

    pub fn write_u16_be(&mut self, value: u16) {
        self.write_bytes(&value.to_be_bytes());
    }

    pub fn write_u32(&mut self, value: u32) {
        self.write_bytes(&value.to_le_bytes());
    }

    pub fn write_u64(&mut self, value: u64) {
        self.write_bytes(&value.to_le_bytes());
    }

    pub fn write_i32(&mut self, value: i32) {
        self.write_bytes(&value.to_le_bytes());
    }

    pub fn write_i64(&mut self, value: i64) {
        self.write_bytes(&value.to_le_bytes());
    }

    pub fn write_hash(&mut self, hash: &Hash256) {
        self.write_bytes(hash);
    }

    pub fn write_varint(&mut self, value: u64) {
        if value < 0xfd {
            self.write_u8(value as u8);
        } else if value <= 0xffff {
            self.write_u8(0xfd);
            self.write_u16(value as u16);
        } else if value <= 0xffff_ffff {
            self.write_u8(0xfe);
            self.write_u32(value as u32);
        } else {
            self.write_u8(0xff);
            self.write_u64(value);
        }
    }

    pub fn write_var_bytes(&mut self, bytes: &[u8]) {
        self.write_varint(bytes.len() as u64);
        self.write_bytes(bytes);
    }

    pub fn write_vec<T: Encodable>(&mut self, items: &[T]) {
        self.write_varint(items.len() as u64);
        for item in items {
            item.consensus_encode(self);
        }
    }
}

/// Canonical wire encoding.
pub trait Encodable {
    fn consensus_encode(&self, encoder: &mut Encoder);

    /// Encoded length in bytes. Implementors override this where the length
    /// can be computed without encoding.
    fn serialized_size(&self) -> usize {
        let mut encoder = Encoder::new();
        self.consensus_encode(&mut encoder);
        encoder.len()
    }
}

/// Decoding from untrusted bytes.
pub trait Decodable: Sized {
    /// Smallest possible encoding of one value, in bytes.
    const MIN_ENCODED_SIZE: usize = 1;

    fn consensus_decode(decoder: &mut Decoder<'_>) -> std::result::Result<Self, DecodeError>;
}

impl Encodable for Hash256 {
    fn consensus_encode(&self, encoder: &mut Encoder) {
        encoder.write_hash(self);
    }

    fn serialized_size(&self) -> usize {
        32
    }
}

impl Decodable for Hash256 {
    const MIN_ENCODED_SIZE: usize = 32;

    fn consensus_decode(decoder: &mut Decoder<'_>) -> std::result::Result<Self, DecodeError> {
        decoder.read_hash()
    }
}

/// Elements to reserve for a sequence declaring `count` items with
/// `remaining` bytes of input left.
pub(crate) fn initial_capacity<T: Decodable>(count: usize, remaining: usize) -> usize {
    count.min(remaining / T::MIN_ENCODED_SIZE.max(1))
}

pub fn serialize<T: Encodable + ?Sized>(value: &T) -> Vec<u8> {
    let mut encoder = Encoder::new();
    value.consensus_encode(&mut encoder);
    encoder.into_inner()
}

/// Decode exactly one `T` occupying all of `data`.
pub fn deserialize<T: Decodable>(data: &[u8]) -> Result<T> {
    deserialize_with_limits(data, DecodeLimits::default())
}

pub fn deserialize_with_limits<T: Decodable>(data: &[u8], limits: DecodeLimits) -> Result<T> {
    let mut decoder = Decoder::with_limits(data, limits);
    let value = decode_logged(&mut decoder)?;
    if !decoder.is_empty() {
        let trailing = decoder.remaining();
        debug!(
            object = std::any::type_name::<T>(),
            trailing, "rejecting trailing bytes"
        );
        return Err(DecodeError::TrailingBytes(trailing).into());
    }
    Ok(value)
}

/// Decode one `T` from the front of `data`, returning it and the bytes consumed.
pub fn deserialize_partial<T: Decodable>(data: &[u8]) -> Result<(T, usize)> {
    let mut decoder = Decoder::new(data);
    let value = decode_logged(&mut decoder)?;
    Ok((value, decoder.position()))
}

fn decode_logged<T: Decodable>(decoder: &mut Decoder<'_>) -> std::result::Result<T, DecodeError> {
    match T::consensus_decode(decoder) {
        Ok(value) => {
            trace!(
                object = std::any::type_name::<T>(),
                len = decoder.position(),
                "decoded"
            );
            Ok(value)
        }
        Err(e) => {
            debug!(
                object = std::any::type_name::<T>(),
                position = decoder.position(),
                error = %e,
                "decode failed"
            );
            Err(e)
        }
    }
}
