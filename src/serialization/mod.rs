//! Wire format serialization/deserialization
//!
//! All integers are little-endian except the address port. Every decoder
//! reads through a bounds-checked [`Decoder`]; encoding never fails.

pub mod block;
pub mod encoding;
pub mod network;
pub mod transaction;
pub mod varint;

pub use encoding::{
    deserialize, deserialize_partial, deserialize_with_limits, serialize, Decodable, Decoder,
    Encodable, Encoder,
};
pub use network::{decode_address, encode_address};
pub use varint::{decode_varint, encode_varint, varint_size};
