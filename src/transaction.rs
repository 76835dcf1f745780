//! Calldata encoding for the account `execute` entrypoint.
//!
//! An account-routed invocation is wrapped as
//! `[contract_address, selector, len(calldata), ...calldata, nonce]`, with
//! every element rendered as a decimal string. The length always counts the
//! inner calldata only and precedes it.

use starknet_crypto::Felt;

use crate::codec::{to_decimal_array, to_decimal_string, to_field, NumericValue};
use crate::error::Result;
use crate::hash::compute_hash_on_elements;
use crate::selector::selector_from_name;

/// Everything the account signs for one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionPayload {
    pub wallet_address: Felt,
    pub contract_address: Felt,
    pub entrypoint: String,
    pub calldata: Vec<Felt>,
    pub nonce: Felt,
}

impl TransactionPayload {
    pub fn entrypoint_selector(&self) -> Felt {
        selector_from_name(&self.entrypoint)
    }

    /// Hash signed by the account key:
    /// `H(wallet, contract, selector, H(calldata), nonce)` with `H` the
    /// Pedersen chain hash.
    pub fn message_hash(&self) -> Felt {
        let calldata_hash = compute_hash_on_elements(&self.calldata);
        compute_hash_on_elements(&[
            self.wallet_address,
            self.contract_address,
            self.entrypoint_selector(),
            calldata_hash,
            self.nonce,
        ])
    }
}

/// Outer `execute` calldata plus the payload to sign
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedInvoke {
    pub calldata: Vec<String>,
    pub payload: TransactionPayload,
}

/// Build the `execute` calldata for a call from `wallet_address` to
/// `entrypoint` on `contract_address`.
pub fn encode_invoke(
    wallet_address: Felt,
    contract_address: Felt,
    entrypoint: &str,
    calldata: &[NumericValue],
    nonce: Felt,
) -> Result<EncodedInvoke> {
    let inner_calldata = to_decimal_array(calldata)?;
    let inner = inner_calldata
        .iter()
        .map(|value| to_field(value))
        .collect::<Result<Vec<_>>>()?;

    let entrypoint_selector = selector_from_name(entrypoint);

    let mut outer = Vec::with_capacity(inner_calldata.len() + 4);
    outer.push(to_decimal_string(&contract_address));
    outer.push(to_decimal_string(&entrypoint_selector));
    outer.push(inner_calldata.len().to_string());
    outer.extend(inner_calldata);
    outer.push(to_decimal_string(&nonce));

    Ok(EncodedInvoke {
        calldata: outer,
        payload: TransactionPayload {
            wallet_address,
            contract_address,
            entrypoint: entrypoint.to_string(),
            calldata: inner,
            nonce,
        },
    })
}
