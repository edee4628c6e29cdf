//! Fixed-order assembly of the BR Code payload body and its format constants.

use rust_decimal::Decimal;

use crate::crc::append_checksum;
use crate::error::PixError;
use crate::key::normalize_key;
use crate::sanitize::{sanitize_city, sanitize_name};
use crate::tlv::{TlvField, encode_fields};
use crate::types::{PaymentRequest, PixPayload};

// ─────────────────────────────────────────────────────────────────────────────
// Fixed format constants
// ─────────────────────────────────────────────────────────────────────────────

pub const TAG_PAYLOAD_FORMAT: &str = "00";
pub const TAG_POINT_OF_INITIATION: &str = "01";
pub const TAG_MERCHANT_ACCOUNT: &str = "26";
pub const TAG_MERCHANT_CATEGORY: &str = "52";
pub const TAG_CURRENCY: &str = "53";
pub const TAG_AMOUNT: &str = "54";
pub const TAG_COUNTRY: &str = "58";
pub const TAG_MERCHANT_NAME: &str = "59";
pub const TAG_MERCHANT_CITY: &str = "60";
pub const TAG_ADDITIONAL_DATA: &str = "62";

/// Sub-tags of the merchant account template (26)
pub const SUBTAG_GUI: &str = "00";
pub const SUBTAG_KEY: &str = "01";
/// Sub-tag of the additional data template (62)
pub const SUBTAG_REFERENCE: &str = "05";

pub const PAYLOAD_FORMAT_INDICATOR: &str = "01";
/// Single-use code
pub const POINT_OF_INITIATION_SINGLE_USE: &str = "12";
pub const PIX_GUI: &str = "br.gov.bcb.pix";
/// Category not informed
pub const MERCHANT_CATEGORY_CODE: &str = "0000";
/// ISO 4217 numeric code for BRL
pub const CURRENCY_BRL: &str = "986";
pub const COUNTRY_CODE: &str = "BR";
pub const DEFAULT_CITY: &str = "SAO PAULO";
pub const REFERENCE_PLACEHOLDER: &str = "***";

pub const MAX_AMOUNT_LEN: usize = 13;
pub const MAX_REFERENCE_LEN: usize = 25;

// ─────────────────────────────────────────────────────────────────────────────
// Assembly
// ─────────────────────────────────────────────────────────────────────────────

/// Build the payload body, everything before the `6304` checksum field.
///
/// Fields are emitted in a fixed order so the same request always yields the
/// same bytes and the checksum covers a canonical string.
pub fn assemble(request: &PaymentRequest) -> Result<String, PixError> {
    let name = sanitize_name(&request.recipient_name);
    if name.is_empty() {
        return Err(PixError::MissingField("recipient_name"));
    }
    let key = normalize_key(&request.key, request.key_type)?;
    let amount = format_amount(request.amount)?;
    let city = resolve_city(request.recipient_city.as_deref());
    let reference = resolve_reference(request.reference_id.as_deref());

    let merchant_account = encode_fields(&[
        TlvField::new(SUBTAG_GUI, PIX_GUI),
        TlvField::new(SUBTAG_KEY, key),
    ])?;
    let additional_data = encode_fields(&[TlvField::new(SUBTAG_REFERENCE, reference)])?;

    let fields = [
        TlvField::new(TAG_PAYLOAD_FORMAT, PAYLOAD_FORMAT_INDICATOR),
        TlvField::new(TAG_POINT_OF_INITIATION, POINT_OF_INITIATION_SINGLE_USE),
        TlvField::new(TAG_MERCHANT_ACCOUNT, merchant_account),
        TlvField::new(TAG_MERCHANT_CATEGORY, MERCHANT_CATEGORY_CODE),
        TlvField::new(TAG_CURRENCY, CURRENCY_BRL),
        TlvField::new(TAG_AMOUNT, amount),
        TlvField::new(TAG_COUNTRY, COUNTRY_CODE),
        TlvField::new(TAG_MERCHANT_NAME, name),
        TlvField::new(TAG_MERCHANT_CITY, city),
        TlvField::new(TAG_ADDITIONAL_DATA, additional_data),
    ];
    let body = encode_fields(&fields)?;

    tracing::debug!(
        key_type = %request.key_type,
        fields = fields.len(),
        bytes = body.len(),
        "assembled pix payload body"
    );
    Ok(body)
}

/// Assemble the request and close it with its checksum.
pub fn encode(request: &PaymentRequest) -> Result<PixPayload, PixError> {
    let body = assemble(request)?;
    Ok(PixPayload::from_checked(append_checksum(&body)))
}

/// Render an amount with exactly two fractional digits, e.g. `199.00`.
pub fn format_amount(amount: Decimal) -> Result<String, PixError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(PixError::InvalidAmount(format!("{amount} is negative")));
    }
    if amount.normalize().scale() > 2 {
        return Err(PixError::InvalidAmount(format!(
            "{amount} has more than two fractional digits"
        )));
    }

    let mut fixed = amount.abs();
    fixed.rescale(2);
    let rendered = fixed.to_string();
    if rendered.len() > MAX_AMOUNT_LEN {
        return Err(PixError::InvalidAmount(format!(
            "{rendered} exceeds {MAX_AMOUNT_LEN} characters"
        )));
    }
    Ok(rendered)
}

fn resolve_city(raw: Option<&str>) -> String {
    let city = raw.map(sanitize_city).unwrap_or_default();
    if city.is_empty() {
        if raw.is_some() {
            tracing::warn!("recipient city sanitized to empty, using default");
        }
        DEFAULT_CITY.to_string()
    } else {
        city
    }
}

fn resolve_reference(raw: Option<&str>) -> String {
    let reference: String = raw
        .unwrap_or_default()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(MAX_REFERENCE_LEN)
        .collect();
    if reference.is_empty() {
        REFERENCE_PLACEHOLDER.to_string()
    } else {
        reference
    }
}
