//! Builder for [`PaymentRequest`](crate::types::PaymentRequest).

use crate::error::PixError;
use crate::types::{KeyType, PaymentRequest};
use rust_decimal::Decimal;

pub struct PaymentRequestBuilder {
    key: Option<String>,
    key_type: Option<KeyType>,
    recipient_name: Option<String>,
    recipient_city: Option<String>,
    amount: Option<Decimal>,
    reference_id: Option<String>,
}

impl PaymentRequestBuilder {
    pub fn new() -> Self {
        Self {
            key: None,
            key_type: None,
            recipient_name: None,
            recipient_city: None,
            amount: None,
            reference_id: None,
        }
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn key_type(mut self, key_type: KeyType) -> Self {
        self.key_type = Some(key_type);
        self
    }

    pub fn recipient_name(mut self, name: impl Into<String>) -> Self {
        self.recipient_name = Some(name.into());
        self
    }

    pub fn recipient_city(mut self, city: impl Into<String>) -> Self {
        self.recipient_city = Some(city.into());
        self
    }

    pub fn amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn reference_id(mut self, reference_id: impl Into<String>) -> Self {
        self.reference_id = Some(reference_id.into());
        self
    }

    /// Fill the recipient fields left unset from a stored merchant profile
    pub fn or_recipient(mut self, defaults: &PaymentRequestBuilder) -> Self {
        self.key = self.key.or_else(|| defaults.key.clone());
        self.key_type = self.key_type.or(defaults.key_type);
        self.recipient_name = self.recipient_name.or_else(|| defaults.recipient_name.clone());
        self.recipient_city = self.recipient_city.or_else(|| defaults.recipient_city.clone());
        self
    }

    pub fn build(self) -> Result<PaymentRequest, PixError> {
        Ok(PaymentRequest {
            key: self.key.ok_or(PixError::MissingField("key"))?,
            key_type: self.key_type.ok_or(PixError::MissingField("key_type"))?,
            recipient_name: self
                .recipient_name
                .filter(|n| !n.trim().is_empty())
                .ok_or(PixError::MissingField("recipient_name"))?,
            recipient_city: self.recipient_city,
            amount: self.amount.ok_or(PixError::MissingField("amount"))?,
            reference_id: self.reference_id,
        })
    }
}

impl Default for PaymentRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
