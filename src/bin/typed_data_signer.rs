//! Typed Data Signer
//!
//! Hashes, signs or verifies a typed-data JSON file with the configured
//! StarkNet account.
//!
//! Configuration comes from the environment (or a `.env` file):
//!   STARKNET_ACCOUNT_ADDRESS, STARKNET_PRIVATE_KEY, STARKNET_GATEWAY_URL (optional)
//!
//! Usage:
//!   cargo run --bin typed_data_signer -- hash   <typed_data.json>
//!   cargo run --bin typed_data_signer -- sign   <typed_data.json>
//!   cargo run --bin typed_data_signer -- verify <typed_data.json> <r> <s>

use anyhow::{bail, Context, Result};
use starknet_account::{init_logging, to_field, to_hex, AccountConfig, Signature, TypedData};
use std::env;
use std::fs;
use tracing::info;

fn usage() -> ! {
    eprintln!("Usage: typed_data_signer <hash|sign|verify> <typed_data.json> [r s]");
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() < 2 {
        usage();
    }
    let command = args[0].as_str();
    let path = &args[1];

    let json = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?;
    let typed_data = TypedData::from_json(&json).context("Failed to parse typed data")?;

    let config = AccountConfig::from_env().context("Failed to load account configuration")?;
    let account = config.connect().context("Failed to set up account")?;
    info!("Using account {}", to_hex(&account.address()));

    match command {
        "hash" => {
            println!("{}", account.hash_message_hex(&typed_data)?);
        }
        "sign" => {
            let signature = account.sign_message(&typed_data)?;
            println!("{}", to_hex(&signature.r));
            println!("{}", to_hex(&signature.s));
        }
        "verify" => {
            if args.len() < 4 {
                usage();
            }
            let signature = Signature::new(
                to_field(&args[2]).context("Invalid r")?,
                to_field(&args[3]).context("Invalid s")?,
            );
            let valid = account.verify_message(&typed_data, &signature).await?;
            println!("{}", valid);
            if !valid {
                std::process::exit(1);
            }
        }
        other => bail!("Unknown command '{}'", other),
    }

    Ok(())
}
