use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error, info};
use url::Url;

use crate::error::{AccountError, Result};
use crate::transport::Transport;
use crate::types::{
    AddTransactionRequest, AddTransactionResponse, CallContractResponse, EstimateFeeResponse,
    FunctionCall, GatewayErrorBody,
};

pub const MAINNET_GATEWAY_URL: &str = "https://alpha-mainnet.starknet.io";
pub const TESTNET_GATEWAY_URL: &str = "https://alpha4.starknet.io";

/// HTTP client for the StarkNet gateway and feeder gateway
#[derive(Debug, Clone)]
pub struct GatewayClient {
    client: Client,
    base_url: Url,
}

impl GatewayClient {
    /// Create a new gateway client for mainnet
    pub fn new_mainnet() -> Result<Self> {
        Self::new(MAINNET_GATEWAY_URL)
    }

    /// Create a new gateway client for the goerli testnet
    pub fn new_testnet() -> Result<Self> {
        Self::new(TESTNET_GATEWAY_URL)
    }

    /// Create a new gateway client with custom base URL
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("starknet-account/0.1.0")
            .build()?;

        // Trailing slash so endpoint paths join under any base path
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn feeder_gateway_url(&self, method: &str) -> Result<Url> {
        let mut url = self.base_url.join(&format!("feeder_gateway/{}", method))?;
        url.query_pairs_mut().append_pair("blockNumber", "pending");
        Ok(url)
    }

    fn gateway_url(&self, method: &str) -> Result<Url> {
        Ok(self.base_url.join(&format!("gateway/{}", method))?)
    }

    async fn post_json<B, R>(&self, url: Url, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        debug!("POST {}", url);

        let response = self
            .client
            .post(url.clone())
            .header("Accept", "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        debug!("Gateway response status: {}", status);
        debug!("Gateway response body: {}", response_text);

        if !status.is_success() {
            error!("Gateway request to {} failed: {} - {}", url, status, response_text);
            return Err(parse_gateway_error(status.as_u16(), &response_text));
        }

        serde_json::from_str(&response_text).map_err(|e| {
            AccountError::Other(format!(
                "Failed to parse gateway response: {}. Response: {}",
                e, response_text
            ))
        })
    }
}

/// Map a non-success gateway body to a typed error; bodies that are not the
/// usual `{code, message}` object become [`AccountError::ApiError`].
pub(crate) fn parse_gateway_error(status: u16, body: &str) -> AccountError {
    match serde_json::from_str::<GatewayErrorBody>(body) {
        Ok(GatewayErrorBody { code, message }) => AccountError::Gateway { code, message },
        Err(_) => AccountError::ApiError(format!("HTTP {}: {}", status, body)),
    }
}

#[async_trait]
impl Transport for GatewayClient {
    async fn call_contract(&self, call: &FunctionCall) -> Result<CallContractResponse> {
        let url = self.feeder_gateway_url("call_contract")?;
        self.post_json(url, call).await
    }

    async fn add_transaction(&self, request: &AddTransactionRequest) -> Result<AddTransactionResponse> {
        let url = self.gateway_url("add_transaction")?;
        let response: AddTransactionResponse = self.post_json(url, request).await?;

        info!(
            "Transaction submitted - Code: {}, Hash: {}",
            response.code, response.transaction_hash
        );
        Ok(response)
    }

    async fn estimate_fee(&self, request: &AddTransactionRequest) -> Result<EstimateFeeResponse> {
        let url = self.feeder_gateway_url("estimate_fee")?;
        self.post_json(url, request).await
    }
}
