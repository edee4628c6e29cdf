//! CRC16/CCITT-FALSE checksum closing every BR Code payload.
//!
//! Polynomial 0x1021, initial register 0xFFFF, no reflection, no final XOR.
//! The checksum covers the whole payload including the `6304` header of the
//! checksum field itself.

use crate::error::PixError;

const POLYNOMIAL: u16 = 0x1021;
const INITIAL: u16 = 0xFFFF;

/// Tag `63` with fixed length `04`
pub const CRC_FIELD_HEADER: &str = "6304";
/// Header plus four hex digits
pub const CRC_FIELD_LEN: usize = 8;

pub fn crc16(data: &[u8]) -> u16 {
    let mut crc = INITIAL;
    for &byte in data {
        crc ^= (byte as u16) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ POLYNOMIAL
            } else {
                crc << 1
            };
        }
    }
    crc
}

/// Append the `6304` header and the checksum as four uppercase hex digits.
pub fn append_checksum(payload_without_checksum: &str) -> String {
    let mut payload =
        String::with_capacity(payload_without_checksum.len() + CRC_FIELD_LEN);
    payload.push_str(payload_without_checksum);
    payload.push_str(CRC_FIELD_HEADER);
    let crc = crc16(payload.as_bytes());
    payload.push_str(&format!("{crc:04X}"));
    payload
}

/// Check the trailing checksum and return the payload body before `6304`.
pub fn verify_checksum(payload: &str) -> Result<&str, PixError> {
    if payload.len() < CRC_FIELD_LEN || !payload.is_char_boundary(payload.len() - 4) {
        return Err(PixError::MalformedPayload(
            "payload too short to carry a checksum".into(),
        ));
    }
    let (signed, actual) = payload.split_at(payload.len() - 4);
    let body = signed.strip_suffix(CRC_FIELD_HEADER).ok_or_else(|| {
        PixError::MalformedPayload("payload does not end with a 6304 checksum field".into())
    })?;

    let expected = format!("{:04X}", crc16(signed.as_bytes()));
    if !actual.eq_ignore_ascii_case(&expected) {
        return Err(PixError::ChecksumMismatch {
            expected,
            actual: actual.to_string(),
        });
    }
    Ok(body)
}
