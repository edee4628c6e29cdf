//! End-to-end payload generation scenarios.
//!
//! Each test drives a `PaymentRequest` through sanitization, key
//! normalization, TLV assembly and checksumming, then reads the result back
//! with the decoder.

use pix_runtime::payload::{TAG_ADDITIONAL_DATA, TAG_MERCHANT_ACCOUNT};
use pix_runtime::tlv::{HEADER_LEN, parse_fields};
use pix_runtime::{KeyType, PaymentRequest, PaymentRequestBuilder, PixError, decode, encode};
use rust_decimal::Decimal;

// ── Helpers ──────────────────────────────────────────────────────────────────

/// Sum of headers plus declared lengths for a TLV string, checking every
/// nested template along the way.
fn declared_len(encoded: &str) -> usize {
    let fields = parse_fields(encoded).expect("well-formed TLV");
    fields
        .iter()
        .map(|f| {
            if f.tag == TAG_MERCHANT_ACCOUNT || f.tag == TAG_ADDITIONAL_DATA {
                assert_eq!(declared_len(&f.value), f.value.len(), "nested field {}", f.tag);
            }
            HEADER_LEN + f.value.len()
        })
        .sum()
}

fn phone_request() -> PaymentRequest {
    PaymentRequestBuilder::new()
        .key("11999999999")
        .key_type(KeyType::Phone)
        .recipient_name("João da Silva")
        .amount(Decimal::new(5000, 2))
        .build()
        .unwrap()
}

// ── Scenarios ────────────────────────────────────────────────────────────────

#[test]
fn test_known_vector_tax_id() {
    let request = PaymentRequest::new(
        "049.400.131-38",
        KeyType::TaxIdIndividual,
        "Douglas Felipe",
        Decimal::new(199, 0),
    )
    .with_city("São Paulo");

    let payload = encode(&request).unwrap();
    assert_eq!(
        payload.as_str(),
        "00020101021226330014br.gov.bcb.pix0111049400131385204000053039865406199.005802BR5914DOUGLAS FELIPE6009SAO PAULO62070503***63045CF2"
    );
}

#[test]
fn test_single_character_change_changes_checksum() {
    let payload = encode(&phone_request()).unwrap();
    let changed = encode(&phone_request().with_reference("A")).unwrap();
    assert_ne!(payload.checksum(), changed.checksum());

    let tampered = payload.as_str().replacen("JOAO", "JOAA", 1);
    assert!(matches!(
        decode(&tampered),
        Err(PixError::ChecksumMismatch { .. })
    ));
}

#[test]
fn test_phone_end_to_end() {
    let payload = encode(&phone_request()).unwrap();
    let s = payload.as_str();

    assert!(s.starts_with("000201"));
    assert!(s.contains("0114+5511999999999"));
    assert!(s.contains("540550.00"));
    assert!(s.contains("5913JOAO DA SILVA"));
    assert!(s.contains("6009SAO PAULO"));
    assert_eq!(
        s,
        "00020101021226360014br.gov.bcb.pix0114+5511999999999520400005303986540550.005802BR5913JOAO DA SILVA6009SAO PAULO62070503***63046B2E"
    );

    let checksum = payload.checksum();
    assert!(checksum.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
    assert_eq!(declared_len(s), s.len());
}

#[test]
fn test_phone_with_country_code_matches_national_form() {
    let national = encode(&phone_request()).unwrap();
    for raw in ["+55 (11) 99999-9999", "5511999999999"] {
        let request = PaymentRequest {
            key: raw.into(),
            ..phone_request()
        };
        assert_eq!(encode(&request).unwrap(), national, "key {raw}");
    }
    assert_eq!(decode(national.as_str()).unwrap().key, "+5511999999999");
}

#[test]
fn test_deterministic_output() {
    let a = encode(&phone_request()).unwrap();
    let b = encode(&phone_request()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_decode_recovers_request() {
    let request = PaymentRequest::new(
        "Loja.Pix@Example.com",
        KeyType::Email,
        "Café & Cia. Ltda",
        Decimal::new(1050, 2),
    )
    .with_city("Florianópolis - SC")
    .with_reference("PED-2024-0001");

    let decoded = decode(encode(&request).unwrap().as_str()).unwrap();
    assert_eq!(decoded.key, "Loja.Pix@Example.com");
    assert_eq!(decoded.amount, Some(Decimal::new(1050, 2)));
    assert_eq!(decoded.recipient_name, "CAFE CIA LTDA");
    assert_eq!(decoded.recipient_city, "FLORIANOPOLIS S");
    assert_eq!(decoded.reference_id.as_deref(), Some("PED20240001"));
}

#[test]
fn test_random_key_vector() {
    let request = PaymentRequest::new(
        " 123e4567-e89b-12d3-a456-426614174000 ",
        KeyType::Random,
        "ACME",
        Decimal::new(1050, 2),
    );
    assert_eq!(
        encode(&request).unwrap().as_str(),
        "00020101021226580014br.gov.bcb.pix0136123e4567-e89b-12d3-a456-426614174000520400005303986540510.505802BR5904ACME6009SAO PAULO62070503***6304A03C"
    );
}

#[test]
fn test_length_fields_match_for_long_inputs() {
    let request = PaymentRequest::new(
        "12.345.678/0001-95",
        KeyType::TaxIdEntity,
        "Associação Beneficente dos Trabalhadores Autônomos",
        Decimal::new(99_999_999_999, 2),
    )
    .with_city("São José dos Campos")
    .with_reference("x".repeat(60));

    let payload = encode(&request).unwrap();
    assert_eq!(declared_len(payload.as_str()), payload.len());
}

// ── Rejections ───────────────────────────────────────────────────────────────

#[test]
fn test_empty_email_key_rejected() {
    let request = PaymentRequest::new("", KeyType::Email, "X", Decimal::new(1000, 2));
    assert!(matches!(encode(&request), Err(PixError::InvalidKey(_))));
}

#[test]
fn test_negative_amount_rejected() {
    let request = PaymentRequest {
        amount: Decimal::new(-1000, 2),
        ..phone_request()
    };
    assert!(matches!(encode(&request), Err(PixError::InvalidAmount(_))));
}

#[test]
fn test_sub_cent_amount_rejected() {
    let request = PaymentRequest {
        amount: Decimal::new(10005, 3),
        ..phone_request()
    };
    assert!(matches!(encode(&request), Err(PixError::InvalidAmount(_))));
}

#[test]
fn test_unusable_name_rejected() {
    let request = PaymentRequest {
        recipient_name: "***".into(),
        ..phone_request()
    };
    assert_eq!(
        encode(&request),
        Err(PixError::MissingField("recipient_name"))
    );
}
