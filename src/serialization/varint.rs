//! Compact variable-length integer ("varint")
//!
//! Encoding rules:
//! - If value < 0xfd: single byte
//! - If value <= 0xffff: 0xfd prefix + 2 bytes (little-endian)
//! - If value <= 0xffffffff: 0xfe prefix + 4 bytes (little-endian)
//! - Otherwise: 0xff prefix + 8 bytes (little-endian)
//!
//! Decoding accepts only the shortest form, so re-encoding a decoded value
//! always reproduces the input bytes.

use super::encoding::{Decoder, Encoder};
use crate::error::DecodeError;

/// Encode a u64 value as a varint
///
/// # Examples
///
/// ```
/// use ledger_codec::serialization::varint::encode_varint;
///
/// assert_eq!(encode_varint(0), vec![0]);
/// assert_eq!(encode_varint(252), vec![252]);
/// assert_eq!(encode_varint(253), vec![0xfd, 253, 0]);
/// assert_eq!(encode_varint(65536), vec![0xfe, 0, 0, 1, 0]);
/// ```
pub fn encode_varint(value: u64) -> Vec<u8> {
    let mut encoder = Encoder::with_capacity(varint_size(value));
    encoder.write_varint(value);
    encoder.into_inner()
}

/// Decode a varint from the front of `data`.
///
/// Returns the decoded value and the number of bytes consumed.
pub fn decode_varint(data: &[u8]) -> Result<(u64, usize), DecodeError> {
    let mut decoder = Decoder::new(data);
    let value = decoder.read_varint()?;
    Ok((value, decoder.position()))
}

/// Encoded length of `value`.
pub fn varint_size(value: u64) -> usize {
    if value < 0xfd {
        1
    } else if value <= 0xffff {
        3
    } else if value <= 0xffff_ffff {
        5
    } else {
        9
    }
}
