//! Reading a BR Code payload back into its parts.
//!
//! Used to inspect codes produced elsewhere and to check generated payloads
//! structurally: every declared length is honored at both nesting levels and
//! the checksum matches.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::crc::verify_checksum;
use crate::error::PixError;
use crate::payload::{
    PIX_GUI, REFERENCE_PLACEHOLDER, SUBTAG_GUI, SUBTAG_KEY, SUBTAG_REFERENCE, TAG_ADDITIONAL_DATA,
    TAG_AMOUNT, TAG_MERCHANT_ACCOUNT, TAG_MERCHANT_CITY, TAG_MERCHANT_NAME,
};
use crate::tlv::{TlvField, parse_fields};

/// Fields recovered from a checksum-valid payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedPayload {
    pub key: String,
    pub amount: Option<Decimal>,
    pub recipient_name: String,
    pub recipient_city: String,
    /// `None` when the payload carries the `***` placeholder
    pub reference_id: Option<String>,
    pub checksum: String,
    /// Top-level fields in payload order, checksum field excluded
    #[serde(skip)]
    pub fields: Vec<TlvField>,
}

pub fn decode(payload: &str) -> Result<DecodedPayload, PixError> {
    let body = verify_checksum(payload)?;
    let fields = parse_fields(body)?;

    let account = parse_fields(required(&fields, TAG_MERCHANT_ACCOUNT)?)?;
    let gui = required(&account, SUBTAG_GUI)?;
    if !gui.eq_ignore_ascii_case(PIX_GUI) {
        return Err(PixError::MalformedPayload(format!(
            "merchant account GUI '{gui}' is not {PIX_GUI}"
        )));
    }
    let key = required(&account, SUBTAG_KEY)?.to_string();

    let amount = find(&fields, TAG_AMOUNT)
        .map(|raw| {
            Decimal::from_str(raw)
                .map_err(|e| PixError::InvalidAmount(format!("'{raw}': {e}")))
        })
        .transpose()?;

    let reference_id = match find(&fields, TAG_ADDITIONAL_DATA) {
        Some(raw) => {
            let additional = parse_fields(raw)?;
            find(&additional, SUBTAG_REFERENCE)
                .filter(|r| *r != REFERENCE_PLACEHOLDER)
                .map(str::to_string)
        }
        None => None,
    };

    Ok(DecodedPayload {
        key,
        amount,
        recipient_name: required(&fields, TAG_MERCHANT_NAME)?.to_string(),
        recipient_city: required(&fields, TAG_MERCHANT_CITY)?.to_string(),
        reference_id,
        checksum: payload[payload.len() - 4..].to_ascii_uppercase(),
        fields,
    })
}

fn find<'a>(fields: &'a [TlvField], tag: &str) -> Option<&'a str> {
    fields
        .iter()
        .find(|f| f.tag == tag)
        .map(|f| f.value.as_str())
}

fn required<'a>(fields: &'a [TlvField], tag: &str) -> Result<&'a str, PixError> {
    find(fields, tag)
        .ok_or_else(|| PixError::MalformedPayload(format!("missing field {tag}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "00020101021226330014br.gov.bcb.pix0111049400131385204000053039865406199.005802BR5914DOUGLAS FELIPE6009SAO PAULO62070503***63045CF2";

    #[test]
    fn test_decode_sample() {
        let decoded = decode(SAMPLE).unwrap();
        assert_eq!(decoded.key, "04940013138");
        assert_eq!(decoded.amount, Some(Decimal::new(19900, 2)));
        assert_eq!(decoded.recipient_name, "DOUGLAS FELIPE");
        assert_eq!(decoded.recipient_city, "SAO PAULO");
        assert_eq!(decoded.reference_id, None);
        assert_eq!(decoded.checksum, "5CF2");
        assert_eq!(decoded.fields.len(), 10);
    }

    #[test]
    fn test_decode_reference() {
        let decoded = decode(
            "00020101021226370014br.gov.bcb.pix0115pix@example.com52040000530398654040.005802BR5904LOJA6014RIO DE JANEIRO62130509PEDIDO123630402C5",
        )
        .unwrap();
        assert_eq!(decoded.key, "pix@example.com");
        assert_eq!(decoded.amount, Some(Decimal::ZERO));
        assert_eq!(decoded.reference_id.as_deref(), Some("PEDIDO123"));
    }

    #[test]
    fn test_decode_accepts_lowercase_checksum() {
        let lower = SAMPLE.replace("5CF2", "5cf2");
        assert_eq!(decode(&lower).unwrap().checksum, "5CF2");
    }

    #[test]
    fn test_decode_rejects_bad_checksum() {
        let tampered = SAMPLE.replace("199.00", "999.00");
        assert!(matches!(
            decode(&tampered),
            Err(PixError::ChecksumMismatch { .. })
        ));
    }
}
