//! Pix BR Code payload generation.
//!
//! A [`PaymentRequest`] is sanitized, its key normalized, its fields laid out
//! as nested tag-length-value pairs in a fixed order, and the result closed
//! with a CRC16 checksum. [`encode()`] runs the whole pipeline; [`decode()`] reads
//! a payload back after verifying its checksum.

pub mod error;
pub mod types;
pub mod request;
pub mod sanitize;
pub mod key;
pub mod tlv;
pub mod payload;
pub mod crc;
pub mod decode;

pub use error::PixError;
pub use types::*;
pub use request::PaymentRequestBuilder;
pub use payload::{assemble, encode};
pub use decode::{DecodedPayload, decode};
