//! Payment request input and encoded payload output.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PixError;

/// Kind of Pix key — decides how the raw key is normalized before encoding
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum KeyType {
    /// Individual taxpayer id (CPF)
    TaxIdIndividual,
    /// Legal entity taxpayer id (CNPJ)
    TaxIdEntity,
    Phone,
    Email,
    /// Random key (EVP) issued by the recipient's bank
    Random,
}

impl KeyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyType::TaxIdIndividual => "tax_id_individual",
            KeyType::TaxIdEntity => "tax_id_entity",
            KeyType::Phone => "phone",
            KeyType::Email => "email",
            KeyType::Random => "random",
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyType {
    type Err = PixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "tax_id_individual" | "cpf" => Ok(KeyType::TaxIdIndividual),
            "tax_id_entity" | "cnpj" => Ok(KeyType::TaxIdEntity),
            "phone" => Ok(KeyType::Phone),
            "email" => Ok(KeyType::Email),
            "random" | "evp" => Ok(KeyType::Random),
            other => Err(PixError::InvalidKey(format!("unknown key type '{other}'"))),
        }
    }
}

/// A fixed-amount payment request supplied by the caller
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentRequest {
    pub key: String,
    pub key_type: KeyType,
    pub recipient_name: String,
    /// Falls back to `SAO PAULO` when absent
    #[serde(default)]
    pub recipient_city: Option<String>,
    pub amount: Decimal,
    /// Falls back to the `***` placeholder when absent
    #[serde(default)]
    pub reference_id: Option<String>,
}

impl PaymentRequest {
    pub fn new(
        key: impl Into<String>,
        key_type: KeyType,
        recipient_name: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            key: key.into(),
            key_type,
            recipient_name: recipient_name.into(),
            recipient_city: None,
            amount,
            reference_id: None,
        }
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.recipient_city = Some(city.into());
        self
    }

    pub fn with_reference(mut self, reference_id: impl Into<String>) -> Self {
        self.reference_id = Some(reference_id.into());
        self
    }
}

/// A complete BR Code payload, checksum included.
///
/// Treat it as atomic: render it as a QR image or show it as copyable text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PixPayload(String);

impl PixPayload {
    pub(crate) fn from_checked(payload: String) -> Self {
        Self(payload)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// The four uppercase hex digits closing the payload
    pub fn checksum(&self) -> &str {
        &self.0[self.0.len() - 4..]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PixPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PixPayload {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<PixPayload> for String {
    fn from(payload: PixPayload) -> Self {
        payload.0
    }
}
