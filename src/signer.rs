//! Signing with a STARK-curve keypair.
//!
//! [`Signer`] is the seam between an account and its key material: the
//! account only ever asks for a transaction signature or a message-hash
//! signature. [`KeyPairSigner`] is the in-process implementation; tests
//! substitute deterministic fakes.

use std::fmt;

use starknet_crypto::{get_public_key, rfc6979_generate_k, sign, verify, Felt, SignError};
use tracing::debug;

use crate::codec::{to_field, to_hex};
use crate::error::{AccountError, Result};
use crate::transaction::TransactionPayload;
use crate::types::Signature;

pub trait Signer: fmt::Debug + Send + Sync {
    /// Public key matching the signing key
    fn public_key(&self) -> Felt;

    /// Sign the hash of an account invocation
    fn sign_transaction(&self, payload: &TransactionPayload) -> Result<Signature>;

    /// Sign an already computed message hash
    fn sign_message_hash(&self, hash: &Felt) -> Result<Signature>;
}

/// Private scalar and its public point's x coordinate
#[derive(Clone)]
pub struct KeyPair {
    private_key: Felt,
    public_key: Felt,
}

impl KeyPair {
    pub fn from_private_key(private_key: Felt) -> Result<Self> {
        if private_key == Felt::ZERO {
            return Err(AccountError::SigningError(
                "private key must be non-zero".to_string(),
            ));
        }

        Ok(Self {
            private_key,
            public_key: get_public_key(&private_key),
        })
    }

    /// Parse a hex or decimal private key
    pub fn from_str_key(private_key: &str) -> Result<Self> {
        Self::from_private_key(to_field(private_key)?)
    }

    pub fn public_key(&self) -> Felt {
        self.public_key
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("private_key", &"<redacted>")
            .field("public_key", &to_hex(&self.public_key))
            .finish()
    }
}

/// [`Signer`] holding its keypair in memory
#[derive(Debug, Clone)]
pub struct KeyPairSigner {
    key_pair: KeyPair,
}

impl KeyPairSigner {
    pub fn new(key_pair: KeyPair) -> Self {
        Self { key_pair }
    }

    /// Check a signature against this signer's public key without the network
    pub fn verify_hash(&self, hash: &Felt, signature: &Signature) -> Result<bool> {
        verify(&self.key_pair.public_key, hash, &signature.r, &signature.s)
            .map_err(|e| AccountError::SigningError(format!("Failed to verify: {:?}", e)))
    }

    fn sign_hash(&self, hash: &Felt) -> Result<Signature> {
        // RFC 6979 nonce; an unusable k is retried with the next seed
        let mut seed: Option<Felt> = None;
        loop {
            let k = rfc6979_generate_k(hash, &self.key_pair.private_key, seed.as_ref());
            match sign(&self.key_pair.private_key, hash, &k) {
                Ok(signature) => return Ok(signature.into()),
                Err(SignError::InvalidK) => {
                    seed = Some(seed.unwrap_or(Felt::ZERO) + Felt::ONE);
                }
                Err(e) => {
                    return Err(AccountError::SigningError(format!(
                        "Failed to sign {}: {:?}",
                        to_hex(hash),
                        e
                    )))
                }
            }
        }
    }
}

impl Signer for KeyPairSigner {
    fn public_key(&self) -> Felt {
        self.key_pair.public_key
    }

    fn sign_transaction(&self, payload: &TransactionPayload) -> Result<Signature> {
        let hash = payload.message_hash();
        debug!(
            "Signing {} on {} with nonce {} (hash {})",
            payload.entrypoint,
            to_hex(&payload.contract_address),
            to_hex(&payload.nonce),
            to_hex(&hash)
        );
        self.sign_hash(&hash)
    }

    fn sign_message_hash(&self, hash: &Felt) -> Result<Signature> {
        self.sign_hash(hash)
    }
}
