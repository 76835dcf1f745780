use serde::Deserialize;
use std::env;
use std::fmt;
use std::sync::Arc;
use tracing::info;

use crate::account::Account;
use crate::codec::to_field;
use crate::error::{AccountError, Result};
use crate::gateway::{GatewayClient, TESTNET_GATEWAY_URL};
use crate::signer::{KeyPair, KeyPairSigner};

pub const GATEWAY_URL_VAR: &str = "STARKNET_GATEWAY_URL";
pub const ACCOUNT_ADDRESS_VAR: &str = "STARKNET_ACCOUNT_ADDRESS";
pub const PRIVATE_KEY_VAR: &str = "STARKNET_PRIVATE_KEY";

/// Where the account lives and which key signs for it
#[derive(Clone, Deserialize)]
pub struct AccountConfig {
    #[serde(default = "default_gateway_url")]
    pub gateway_url: String,
    pub account_address: String,
    pub private_key: String,
}

fn default_gateway_url() -> String {
    TESTNET_GATEWAY_URL.to_string()
}

impl AccountConfig {
    /// Load from the environment, reading a `.env` file first if present
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let gateway_url = env::var(GATEWAY_URL_VAR).unwrap_or_else(|_| default_gateway_url());
        let account_address = required_var(ACCOUNT_ADDRESS_VAR)?;
        let private_key = required_var(PRIVATE_KEY_VAR)?;

        Ok(Self {
            gateway_url,
            account_address,
            private_key,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build a gateway-backed account from this configuration
    pub fn connect(&self) -> Result<Account<GatewayClient, KeyPairSigner>> {
        let address = to_field(&self.account_address)
            .map_err(|e| AccountError::Config(format!("{}: {}", ACCOUNT_ADDRESS_VAR, e)))?;
        let key_pair = KeyPair::from_str_key(&self.private_key)
            .map_err(|e| AccountError::Config(format!("{}: {}", PRIVATE_KEY_VAR, e)))?;
        let gateway = GatewayClient::new(&self.gateway_url)?;

        info!("Account {} on {}", self.account_address, self.gateway_url);
        Ok(Account::new(Arc::new(gateway), address, key_pair))
    }
}

fn required_var(name: &str) -> Result<String> {
    env::var(name).map_err(|_| AccountError::Config(format!("{} must be set", name)))
}

impl fmt::Debug for AccountConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountConfig")
            .field("gateway_url", &self.gateway_url)
            .field("account_address", &self.account_address)
            .field("private_key", &"<redacted>")
            .finish()
    }
}
