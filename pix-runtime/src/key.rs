//! Pix key normalization per key type.

use crate::error::PixError;
use crate::types::KeyType;

/// Brazilian country calling code
const COUNTRY_CALLING_CODE: &str = "55";

/// Normalize a raw Pix key into the form carried by the merchant account field.
///
/// Tax ids keep digits only. Phones become `+55` followed by the national
/// number (area code plus 8 or 9 digits); numbers already carrying `55` keep
/// it. Email/random keys are trimmed but otherwise left as given (case matters).
pub fn normalize_key(key: &str, key_type: KeyType) -> Result<String, PixError> {
    let normalized = match key_type {
        KeyType::TaxIdIndividual | KeyType::TaxIdEntity => digits_only(key),
        KeyType::Phone => {
            let digits = digits_only(key);
            match digits.len() {
                0 => String::new(),
                10 | 11 => format!("+{COUNTRY_CALLING_CODE}{digits}"),
                _ => format!("+{digits}"),
            }
        }
        KeyType::Email | KeyType::Random => key.trim().to_string(),
    };

    if normalized.is_empty() {
        return Err(PixError::InvalidKey(format!(
            "{key_type} key is empty after normalization"
        )));
    }

    Ok(normalized)
}

fn digits_only(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}
