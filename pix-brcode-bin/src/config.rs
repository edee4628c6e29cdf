//! Merchant profile configuration.
//!
//! The recipient side of a payment request (key, key type, name, city) is
//! usually fixed per deployment, so it lives in a TOML file:
//!
//! ```toml
//! [merchant]
//! key = "04940013138"
//! key_type = "tax_id_individual"
//! recipient_name = "Douglas Felipe"
//! recipient_city = "São Paulo"
//! ```
//!
//! `PIX_KEY`, `PIX_KEY_TYPE`, `PIX_RECIPIENT_NAME` and `PIX_RECIPIENT_CITY`
//! override the file; CLI flags override both.

use std::path::{Path, PathBuf};

use pix_runtime::{KeyType, PaymentRequestBuilder};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "pix.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixConfig {
    #[serde(default)]
    pub merchant: MerchantProfile,
}

/// Recipient defaults applied to every generated payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantProfile {
    pub key: Option<String>,
    pub key_type: Option<KeyType>,
    pub recipient_name: Option<String>,
    pub recipient_city: Option<String>,
}

impl PixConfig {
    pub fn from_toml(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load the file (explicit path, else `pix.toml` when present) and apply
    /// environment overrides.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match explicit {
            Some(path) => Self::from_toml(path)?,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_toml(DEFAULT_CONFIG_PATH)?
            }
            None => {
                tracing::debug!("no {DEFAULT_CONFIG_PATH} found, using environment only");
                Self::default()
            }
        };
        config.with_env_overrides(|name| std::env::var(name).ok())
    }

    pub fn with_env_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let merchant = &mut self.merchant;
        if let Some(key) = lookup("PIX_KEY") {
            merchant.key = Some(key);
        }
        if let Some(raw) = lookup("PIX_KEY_TYPE") {
            let key_type = raw
                .parse::<KeyType>()
                .map_err(|e| ConfigError::Invalid(format!("PIX_KEY_TYPE: {e}")))?;
            merchant.key_type = Some(key_type);
        }
        if let Some(name) = lookup("PIX_RECIPIENT_NAME") {
            merchant.recipient_name = Some(name);
        }
        if let Some(city) = lookup("PIX_RECIPIENT_CITY") {
            merchant.recipient_city = Some(city);
        }
        Ok(self)
    }
}

impl MerchantProfile {
    pub fn to_builder(&self) -> PaymentRequestBuilder {
        let mut builder = PaymentRequestBuilder::new();
        if let Some(key) = &self.key {
            builder = builder.key(key.as_str());
        }
        if let Some(key_type) = self.key_type {
            builder = builder.key_type(key_type);
        }
        if let Some(name) = &self.recipient_name {
            builder = builder.recipient_name(name.as_str());
        }
        if let Some(city) = &self.recipient_city {
            builder = builder.recipient_city(city.as_str());
        }
        builder
    }
}
