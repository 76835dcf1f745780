use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use starknet_crypto::{ExtendedSignature, Felt};

use crate::codec::{deserialize_biguint, to_decimal_string, to_hex, NumericValue};

/// ECDSA signature on the STARK curve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    pub r: Felt,
    pub s: Felt,
}

impl Signature {
    pub fn new(r: Felt, s: Felt) -> Self {
        Self { r, s }
    }

    pub fn to_vec(&self) -> Vec<Felt> {
        vec![self.r, self.s]
    }

    /// `[r, s]` as decimal strings, the form sent over the wire
    pub fn to_decimal_array(&self) -> Vec<String> {
        vec![to_decimal_string(&self.r), to_decimal_string(&self.s)]
    }
}

impl From<ExtendedSignature> for Signature {
    fn from(signature: ExtendedSignature) -> Self {
        Self {
            r: signature.r,
            s: signature.s,
        }
    }
}

impl std::fmt::Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "r: {} | s: {}", to_hex(&self.r), to_hex(&self.s))
    }
}

/// A call routed through the account's `execute` entrypoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub contract_address: Felt,
    pub entrypoint: String,
    pub calldata: Vec<NumericValue>,
    /// Explicit nonce; fetched from the account when absent
    pub nonce: Option<Felt>,
    /// Must stay empty: accounts always sign their own invocations
    pub signature: Vec<Felt>,
}

impl Invocation {
    pub fn new(contract_address: Felt, entrypoint: impl Into<String>) -> Self {
        Self {
            contract_address,
            entrypoint: entrypoint.into(),
            calldata: Vec::new(),
            nonce: None,
            signature: Vec::new(),
        }
    }

    pub fn with_calldata<I, V>(mut self, calldata: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<NumericValue>,
    {
        self.calldata = calldata.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_nonce(mut self, nonce: Felt) -> Self {
        self.nonce = Some(nonce);
        self
    }

    pub fn with_signature(mut self, signature: Vec<Felt>) -> Self {
        self.signature = signature;
        self
    }
}

/// Read-only contract call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCall {
    /// Hex
    pub contract_address: String,
    /// Hex
    pub entry_point_selector: String,
    /// Decimal strings
    pub calldata: Vec<String>,
    #[serde(default)]
    pub signature: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallContractResponse {
    pub result: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    InvokeFunction,
}

/// Signed transaction submitted to the gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddTransactionRequest {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Hex
    pub contract_address: String,
    /// Hex
    pub entry_point_selector: String,
    /// Decimal strings
    pub calldata: Vec<String>,
    /// Decimal strings
    pub signature: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddTransactionResponse {
    pub code: String,
    pub transaction_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Fee estimate; every field is a non-negative big integer
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EstimateFeeResponse {
    #[serde(alias = "amount", deserialize_with = "deserialize_biguint")]
    pub overall_fee: BigUint,
    #[serde(default, alias = "gas_usage", deserialize_with = "deserialize_biguint")]
    pub gas_consumed: BigUint,
    #[serde(default, deserialize_with = "deserialize_biguint")]
    pub gas_price: BigUint,
}

/// Error body returned by the gateway on non-success statuses
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayErrorBody {
    pub code: String,
    pub message: String,
}

/// Outcome of an on-chain signature check that keeps failure causes apart
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    Valid,
    /// The validator contract ran and rejected the signature
    Rejected(String),
    /// The check could not be carried out
    Inconclusive(String),
}

impl VerificationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, VerificationOutcome::Valid)
    }
}
