use async_trait::async_trait;

use crate::error::Result;
use crate::types::{
    AddTransactionRequest, AddTransactionResponse, CallContractResponse, EstimateFeeResponse,
    FunctionCall,
};

/// Network surface an account needs
///
/// Implementations own retries, timeouts and endpoint routing; the account
/// issues a single request per operation and propagates whatever error
/// comes back.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Read-only contract call
    async fn call_contract(&self, call: &FunctionCall) -> Result<CallContractResponse>;

    /// Submit a signed transaction
    async fn add_transaction(&self, request: &AddTransactionRequest) -> Result<AddTransactionResponse>;

    /// Estimate the fee of a signed transaction without submitting it
    async fn estimate_fee(&self, request: &AddTransactionRequest) -> Result<EstimateFeeResponse>;
}
