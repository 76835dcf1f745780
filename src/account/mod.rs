//! Account orchestration: nonce, encoding, signing, submission and message
//! verification.
//!
//! An account holds nothing mutable. Every invocation fetches the nonce
//! fresh from the chain, so two invocations issued concurrently from one
//! account can race for the same nonce and one of them will be rejected by
//! the network. Callers that need ordering must serialize `invoke_function`
//! calls per account themselves (for instance, wait for each transaction
//! before sending the next).

use std::fmt;
use std::sync::Arc;

use starknet_crypto::Felt;
use tracing::{debug, info, warn};

use crate::codec::{to_decimal_string, to_field, to_hex};
use crate::error::{AccountError, Result};
use crate::selector::{
    selector_from_name, EXECUTE_ENTRYPOINT, GET_NONCE_ENTRYPOINT, IS_VALID_SIGNATURE_ENTRYPOINT,
};
use crate::signer::{KeyPair, KeyPairSigner, Signer};
use crate::transaction::encode_invoke;
use crate::transport::Transport;
use crate::typed_data::{get_message_hash, TypedData};
use crate::types::{
    AddTransactionRequest, AddTransactionResponse, EstimateFeeResponse, FunctionCall, Invocation,
    Signature, TransactionKind, VerificationOutcome,
};


/// Smart-contract wallet driven by a local signer
pub struct Account<T, S = KeyPairSigner> {
    address: Felt,
    signer: S,
    transport: Arc<T>,
}

impl<T: Transport> Account<T, KeyPairSigner> {
    pub fn new(transport: Arc<T>, address: Felt, key_pair: KeyPair) -> Self {
        Self::with_signer(transport, address, KeyPairSigner::new(key_pair))
    }
}

impl<T: Transport, S: Signer> Account<T, S> {
    pub fn with_signer(transport: Arc<T>, address: Felt, signer: S) -> Self {
        Self {
            address,
            signer,
            transport,
        }
    }

    pub fn address(&self) -> Felt {
        self.address
    }

    pub fn signer(&self) -> &S {
        &self.signer
    }

    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    /// Current nonce, read from the account contract on every call
    pub async fn get_nonce(&self) -> Result<Felt> {
        let call = self.self_call(GET_NONCE_ENTRYPOINT, Vec::new());
        let response = self.transport.call_contract(&call).await?;

        let first = response.result.first().ok_or_else(|| {
            AccountError::ApiError("get_nonce returned an empty result".to_string())
        })?;
        let nonce = to_field(first)?;

        debug!("Fetched nonce {} for {}", to_hex(&nonce), to_hex(&self.address));
        Ok(nonce)
    }

    pub async fn get_nonce_hex(&self) -> Result<String> {
        Ok(to_hex(&self.get_nonce().await?))
    }

    /// Sign `invocation` and submit it through the account's `execute`
    /// entrypoint.
    ///
    /// Fails with [`AccountError::UnsupportedSignature`] if the invocation
    /// already carries a signature.
    pub async fn invoke_function(&self, invocation: &Invocation) -> Result<AddTransactionResponse> {
        let request = self.build_invoke_request(invocation).await?;
        let response = self.transport.add_transaction(&request).await?;

        info!(
            "Invoked {} on {} from {} - Hash: {}",
            invocation.entrypoint,
            to_hex(&invocation.contract_address),
            to_hex(&self.address),
            response.transaction_hash
        );
        Ok(response)
    }

    /// Fee estimate for `invocation`, signed exactly as it would be submitted
    pub async fn estimate_fee(&self, invocation: &Invocation) -> Result<EstimateFeeResponse> {
        let request = self.build_invoke_request(invocation).await?;
        let fee = self.transport.estimate_fee(&request).await?;

        debug!(
            "Estimated fee for {}: overall {}, gas {}, price {}",
            invocation.entrypoint, fee.overall_fee, fee.gas_consumed, fee.gas_price
        );
        Ok(fee)
    }

    async fn build_invoke_request(&self, invocation: &Invocation) -> Result<AddTransactionRequest> {
        if !invocation.signature.is_empty() {
            return Err(AccountError::UnsupportedSignature);
        }

        let nonce = match invocation.nonce {
            Some(nonce) => nonce,
            None => self.get_nonce().await?,
        };

        let encoded = encode_invoke(
            self.address,
            invocation.contract_address,
            &invocation.entrypoint,
            &invocation.calldata,
            nonce,
        )?;
        let signature = self.signer.sign_transaction(&encoded.payload)?;

        Ok(AddTransactionRequest {
            kind: TransactionKind::InvokeFunction,
            contract_address: to_hex(&self.address),
            entry_point_selector: to_hex(&selector_from_name(EXECUTE_ENTRYPOINT)),
            calldata: encoded.calldata,
            signature: signature.to_decimal_array(),
        })
    }

    /// Sign typed data for this account
    pub fn sign_message(&self, typed_data: &TypedData) -> Result<Signature> {
        let hash = self.hash_message(typed_data)?;
        self.signer.sign_message_hash(&hash)
    }

    /// Typed-data hash bound to this account's address
    pub fn hash_message(&self, typed_data: &TypedData) -> Result<Felt> {
        get_message_hash(typed_data, self.address)
    }

    pub fn hash_message_hex(&self, typed_data: &TypedData) -> Result<String> {
        Ok(to_hex(&self.hash_message(typed_data)?))
    }

    /// Ask the account contract whether `signature` is valid for `hash`.
    ///
    /// Any failure of the call, whether the contract rejected the signature
    /// or the request never completed, yields `false`. Use
    /// [`Account::check_message_hash`] to tell those apart.
    pub async fn verify_message_hash(&self, hash: &Felt, signature: &Signature) -> bool {
        self.check_message_hash(hash, signature).await.is_valid()
    }

    /// Like [`Account::verify_message_hash`], keeping the failure cause
    pub async fn check_message_hash(&self, hash: &Felt, signature: &Signature) -> VerificationOutcome {
        let signature_felts = signature.to_vec();

        let mut calldata = Vec::with_capacity(signature_felts.len() + 2);
        calldata.push(to_decimal_string(hash));
        calldata.push(signature_felts.len().to_string());
        calldata.extend(signature_felts.iter().map(to_decimal_string));

        let call = self.self_call(IS_VALID_SIGNATURE_ENTRYPOINT, calldata);

        match self.transport.call_contract(&call).await {
            Ok(_) => {
                debug!("Signature valid for {}", to_hex(hash));
                VerificationOutcome::Valid
            }
            Err(AccountError::Gateway { code, message }) => {
                debug!("Signature rejected for {}: {} {}", to_hex(hash), code, message);
                VerificationOutcome::Rejected(format!("{}: {}", code, message))
            }
            Err(e) => {
                warn!("Signature check for {} did not complete: {}", to_hex(hash), e);
                VerificationOutcome::Inconclusive(e.to_string())
            }
        }
    }

    /// Hash `typed_data` and verify `signature` against it on-chain
    pub async fn verify_message(&self, typed_data: &TypedData, signature: &Signature) -> Result<bool> {
        let hash = self.hash_message(typed_data)?;
        Ok(self.verify_message_hash(&hash, signature).await)
    }

    fn self_call(&self, entrypoint: &str, calldata: Vec<String>) -> FunctionCall {
        FunctionCall {
            contract_address: to_hex(&self.address),
            entry_point_selector: to_hex(&selector_from_name(entrypoint)),
            calldata,
            signature: Vec::new(),
        }
    }
}

impl<T, S: fmt::Debug> fmt::Debug for Account<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("address", &to_hex(&self.address))
            .field("signer", &self.signer)
            .finish()
    }
}
