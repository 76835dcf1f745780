//! Entrypoint selectors: Keccak-256 truncated to 250 bits

use sha3::{Digest, Keccak256};
use starknet_crypto::Felt;
use tracing::trace;

/// Account entrypoint wrapping every invocation
pub const EXECUTE_ENTRYPOINT: &str = "execute";

/// Read-only account entrypoint returning the current nonce
pub const GET_NONCE_ENTRYPOINT: &str = "get_nonce";

/// Read-only account entrypoint that fails unless the signature is valid
pub const IS_VALID_SIGNATURE_ENTRYPOINT: &str = "is_valid_signature";

/// Compute starknet_keccak hash
///
/// Standard Keccak-256 with the top six bits of the big-endian digest cleared,
/// so the result is always below 2^250 and therefore a valid field element.
pub fn starknet_keccak(input: &[u8]) -> Felt {
    let mut hasher = Keccak256::new();
    hasher.update(input);
    let result = hasher.finalize();

    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&result);
    trace!("keccak256 digest: 0x{}", hex::encode(bytes));

    bytes[0] &= 0x03;
    Felt::from_bytes_be(&bytes)
}

/// Derive the selector of a contract entrypoint from its name
pub fn selector_from_name(name: &str) -> Felt {
    starknet_keccak(name.as_bytes())
}
