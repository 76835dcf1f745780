pub mod account;
pub mod codec;
pub mod config;
pub mod error;
pub mod gateway;
pub mod hash;
pub mod selector;
pub mod signer;
pub mod transaction;
pub mod transport;
pub mod typed_data;
pub mod types;

// Re-export commonly used types
pub use account::Account;
pub use codec::{to_decimal_array, to_decimal_string, to_field, to_hex, NumericValue};
pub use config::AccountConfig;
pub use error::{AccountError, Result};
pub use gateway::GatewayClient;
pub use hash::compute_hash_on_elements;
pub use selector::{selector_from_name, starknet_keccak};
pub use signer::{KeyPair, KeyPairSigner, Signer};
pub use transaction::{encode_invoke, EncodedInvoke, TransactionPayload};
pub use transport::Transport;
pub use typed_data::{get_message_hash, StarkNetDomain, TypedData, TypedDataField};
pub use types::{
    AddTransactionRequest, AddTransactionResponse, CallContractResponse, EstimateFeeResponse,
    FunctionCall, Invocation, Signature, TransactionKind, VerificationOutcome,
};

/// Network field element, reduced modulo the Stark prime
pub use starknet_crypto::Felt as FieldElement;

/// Initialize logging for the library
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();
}
