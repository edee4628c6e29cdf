//! EMV-style tag-length-value fields: `tag(2) + len(2) + value`.
//!
//! Lengths count bytes of the value and are zero-padded decimal, so a value
//! may carry at most 99 bytes.

use crate::error::PixError;

pub const MAX_VALUE_LEN: usize = 99;
/// Two tag digits plus two length digits
pub const HEADER_LEN: usize = 4;

/// A single tag-length-value unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlvField {
    pub tag: String,
    pub value: String,
}

impl TlvField {
    pub fn new(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            value: value.into(),
        }
    }

    pub fn encode(&self) -> Result<String, PixError> {
        encode_field(&self.tag, &self.value)
    }
}

/// Encode one field as `tag + zero-padded length + value`.
pub fn encode_field(tag: &str, value: &str) -> Result<String, PixError> {
    if !is_two_digits(tag) {
        return Err(PixError::MalformedPayload(format!(
            "tag '{tag}' is not two ASCII digits"
        )));
    }
    if value.len() > MAX_VALUE_LEN {
        return Err(PixError::FieldTooLong {
            tag: tag.to_string(),
            len: value.len(),
        });
    }
    Ok(format!("{tag}{:02}{value}", value.len()))
}

/// Encode a sequence of fields back to back, in the order given.
pub fn encode_fields(fields: &[TlvField]) -> Result<String, PixError> {
    fields.iter().map(TlvField::encode).collect()
}

/// Split a TLV-encoded string into its fields, in order.
///
/// Fails when a header is truncated, a tag or length is not numeric, or a
/// declared length runs past the end of the input.
pub fn parse_fields(input: &str) -> Result<Vec<TlvField>, PixError> {
    let mut fields = Vec::new();
    let mut rest = input;

    while !rest.is_empty() {
        let header = rest.get(..HEADER_LEN).ok_or_else(|| {
            PixError::MalformedPayload(format!("truncated field header '{rest}'"))
        })?;
        let (tag, len_digits) = header.split_at(2);
        if !is_two_digits(tag) || !is_two_digits(len_digits) {
            return Err(PixError::MalformedPayload(format!(
                "invalid field header '{header}'"
            )));
        }
        let len: usize = len_digits
            .parse()
            .map_err(|_| PixError::MalformedPayload(format!("invalid length '{len_digits}'")))?;

        let body = &rest[HEADER_LEN..];
        let value = body.get(..len).ok_or_else(|| {
            PixError::MalformedPayload(format!(
                "field {tag} declares {len} bytes but only {} remain",
                body.len()
            ))
        })?;

        fields.push(TlvField::new(tag, value));
        rest = &body[len..];
    }

    Ok(fields)
}

fn is_two_digits(s: &str) -> bool {
    s.len() == 2 && s.bytes().all(|b| b.is_ascii_digit())
}
