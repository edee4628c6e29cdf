use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use pix_runtime::{DecodedPayload, KeyType, PaymentRequestBuilder, PixPayload, decode, encode};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::PixConfig;

/// Generate and inspect Pix BR Code payloads
#[derive(Parser, Debug)]
#[command(name = "pix-brcode")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the merchant profile (TOML)
    #[arg(short, long, global = true, env = "PIX_CONFIG_PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a payload for a fixed amount
    Encode(EncodeArgs),

    /// Verify a payload and print its fields
    Decode {
        /// The full payload, checksum included
        payload: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Transfer amount, at most two fractional digits
    #[arg(short, long)]
    pub amount: Decimal,

    /// Pix key (overrides the merchant profile)
    #[arg(long)]
    pub key: Option<String>,

    /// tax_id_individual, tax_id_entity, phone, email or random
    #[arg(long)]
    pub key_type: Option<KeyType>,

    /// Recipient name (overrides the merchant profile)
    #[arg(long)]
    pub name: Option<String>,

    /// Recipient city (overrides the merchant profile)
    #[arg(long)]
    pub city: Option<String>,

    /// Transaction reference, `***` when omitted
    #[arg(short, long)]
    pub reference: Option<String>,

    /// Print JSON instead of the bare payload
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct EncodeOutput<'a> {
    payload: &'a PixPayload,
    decoded: &'a DecodedPayload,
}

/// Execute a parsed command and return what should go to stdout.
pub fn run(cli: Cli) -> Result<String> {
    match cli.command {
        Commands::Encode(args) => {
            let config = PixConfig::load(cli.config.as_deref())
                .context("failed to load merchant profile")?;
            run_encode(args, &config)
        }
        Commands::Decode { payload, json } => run_decode(payload.trim(), json),
    }
}

pub fn run_encode(args: EncodeArgs, config: &PixConfig) -> Result<String> {
    let mut builder = PaymentRequestBuilder::new().amount(args.amount);
    if let Some(key) = args.key {
        builder = builder.key(key);
    }
    if let Some(key_type) = args.key_type {
        builder = builder.key_type(key_type);
    }
    if let Some(name) = args.name {
        builder = builder.recipient_name(name);
    }
    if let Some(city) = args.city {
        builder = builder.recipient_city(city);
    }
    if let Some(reference) = args.reference {
        builder = builder.reference_id(reference);
    }

    let request = builder
        .or_recipient(&config.merchant.to_builder())
        .build()
        .context("incomplete payment request")?;
    let payload = encode(&request).context("could not generate payment code")?;
    tracing::info!(
        amount = %request.amount,
        checksum = payload.checksum(),
        "generated pix payload"
    );

    if args.json {
        let decoded = decode(payload.as_str())?;
        let output = EncodeOutput {
            payload: &payload,
            decoded: &decoded,
        };
        Ok(serde_json::to_string_pretty(&output)?)
    } else {
        Ok(payload.into_string())
    }
}

pub fn run_decode(payload: &str, json: bool) -> Result<String> {
    let decoded = decode(payload).context("invalid pix payload")?;
    if json {
        return Ok(serde_json::to_string_pretty(&decoded)?);
    }

    let amount = decoded
        .amount
        .map(|a| a.to_string())
        .unwrap_or_else(|| "(open)".to_string());
    let reference = decoded.reference_id.as_deref().unwrap_or("***");
    Ok(format!(
        "key:       {}\namount:    {}\nname:      {}\ncity:      {}\nreference: {}\nchecksum:  {}",
        decoded.key,
        amount,
        decoded.recipient_name,
        decoded.recipient_city,
        reference,
        decoded.checksum,
    ))
}
